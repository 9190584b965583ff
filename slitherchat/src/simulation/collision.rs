use slotmap::SlotMap;

use super::CONTACT_DAMPING;
use super::food::{FoodField, FoodKey};
use super::snake::{Snake, SnakeKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Touched the head of another snake.
    Head(SnakeKey),
    /// Touched a body segment of another snake.
    Body(SnakeKey, usize),
    /// Touched one of its own segments.
    SelfBody(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FoodPickup {
    pub snake: SnakeKey,
    pub food: FoodKey,
    pub value: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kill {
    pub eater: SnakeKey,
    pub victim: SnakeKey,
    pub gained: usize,
}

#[derive(Debug, Default)]
pub struct ResolveReport {
    pub pickups: Vec<FoodPickup>,
    pub kills: Vec<Kill>,
    pub deaths: Vec<(SnakeKey, Contact)>,
}

pub fn contact_threshold(head_radius: f64, segment_radius: f64) -> f64 {
    head_radius + segment_radius * CONTACT_DAMPING
}

/// First contact of `actor`'s head against the other snakes in `live`, then against itself.
pub fn find_contact(
    actor: SnakeKey,
    snakes: &SlotMap<SnakeKey, Snake>,
    live: &[SnakeKey],
) -> Option<Contact> {
    let me = snakes.get(actor)?;
    let head = me.head();
    let head_r = me.head_radius();

    for &other_key in live {
        if other_key == actor {
            continue;
        }
        let Some(other) = snakes.get(other_key) else {
            continue;
        };
        for (i, segment) in other.segments.iter().enumerate() {
            if head.distance(segment.pos) < contact_threshold(head_r, segment.radius) {
                return Some(if i == 0 {
                    Contact::Head(other_key)
                } else {
                    Contact::Body(other_key, i)
                });
            }
        }
    }

    // Neck segments always overlap the head
    me.segments
        .iter()
        .enumerate()
        .skip(2)
        .find(|(_, segment)| head.distance(segment.pos) < contact_threshold(head_r, segment.radius))
        .map(|(i, _)| Contact::SelfBody(i))
}

/// Kills `victim` and, if that death is new and the eater still lives, hands over its length.
fn absorb(
    snakes: &mut SlotMap<SnakeKey, Snake>,
    eater: SnakeKey,
    victim: SnakeKey,
    report: &mut ResolveReport,
) -> bool {
    let Some(victim_snake) = snakes.get_mut(victim) else {
        return false;
    };
    let gained = victim_snake.len();
    if !victim_snake.die() {
        return false;
    }
    if let Some(eater_snake) = snakes.get_mut(eater).filter(|s| s.alive) {
        eater_snake.score += gained as u64;
        for _ in 0..gained {
            eater_snake.grow();
        }
        report.kills.push(Kill {
            eater,
            victim,
            gained,
        });
    }
    true
}

pub fn resolve(snakes: &mut SlotMap<SnakeKey, Snake>, food: &mut FoodField) -> ResolveReport {
    let mut report = ResolveReport::default();
    let live: Vec<SnakeKey> = snakes
        .iter()
        .filter(|(_, snake)| snake.alive)
        .map(|(key, _)| key)
        .collect();

    // Food pickups, removed after the pass
    let mut pending_removals: Vec<FoodKey> = Vec::new();
    for &key in &live {
        let snake = &mut snakes[key];
        let head = snake.head();
        let head_r = snake.head_radius();
        for (food_key, item) in food.iter() {
            if pending_removals.contains(&food_key) {
                continue;
            }
            if head.distance(item.pos) < head_r + item.radius {
                pending_removals.push(food_key);
                snake.score += item.value as u64;
                snake.grow();
                report.pickups.push(FoodPickup {
                    snake: key,
                    food: food_key,
                    value: item.value,
                });
            }
        }
    }
    for food_key in pending_removals {
        food.remove(food_key);
    }

    for &actor in &live {
        if !snakes[actor].alive {
            continue;
        }
        let Some(contact) = find_contact(actor, snakes, &live) else {
            continue;
        };
        match contact {
            Contact::Head(other) => {
                let actor_len = snakes[actor].len();
                let other_len = snakes[other].len();
                if actor_len > other_len {
                    if absorb(snakes, actor, other, &mut report) {
                        report.deaths.push((other, Contact::Head(actor)));
                    }
                } else if other_len > actor_len {
                    if absorb(snakes, other, actor, &mut report) {
                        report.deaths.push((actor, contact));
                    }
                } else if snakes[actor].die() {
                    report.deaths.push((actor, contact));
                }
            }
            Contact::Body(..) | Contact::SelfBody(_) => {
                if snakes[actor].die() {
                    report.deaths.push((actor, contact));
                }
            }
        }
    }

    report
}
