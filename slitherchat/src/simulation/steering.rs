//! Reactive potential-field steering.
//!
//! Every snake looks around within its vision radius and picks one of three
//! behaviours, in priority order: evade nearby heads and walls, seek the
//! nearest food item, or wander.

use macroquad::math::DVec2;
use rand::Rng;
use shared::util::normalize_angle;

use super::snake::SnakeKey;
use super::world::Bounds;
use super::{
    BORDER_MARGIN_FACTOR, DANGER_RANGE_FACTOR, DANGER_THRESHOLD, WALL_DANGER_WEIGHT, WALL_PUSH,
    WANDER_SPREAD,
};

/// What a snake can perceive during one decision.
pub struct Surroundings<'a> {
    pub food: &'a [DVec2],
    /// Heads of every live snake, including the deciding one.
    pub heads: &'a [(SnakeKey, DVec2)],
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SteeringDecision {
    Evade(f64),
    Seek(f64),
    /// Relative nudge applied to the current target.
    Wander(f64),
}

impl SteeringDecision {
    pub fn apply(self, current_target: f64) -> f64 {
        match self {
            SteeringDecision::Evade(angle) | SteeringDecision::Seek(angle) => {
                normalize_angle(angle)
            }
            SteeringDecision::Wander(delta) => normalize_angle(current_target + delta),
        }
    }
}

pub fn decide(
    me: SnakeKey,
    head: DVec2,
    vision: f64,
    surroundings: &Surroundings,
    rng: &mut impl Rng,
) -> SteeringDecision {
    let (danger, weight) = danger_vector(me, head, vision, surroundings);
    if weight > DANGER_THRESHOLD && danger != DVec2::ZERO {
        return SteeringDecision::Evade(danger.y.atan2(danger.x));
    }

    if let Some(food) = nearest_food(head, vision, surroundings.food) {
        let delta = food - head;
        return SteeringDecision::Seek(delta.y.atan2(delta.x));
    }

    SteeringDecision::Wander((rng.random::<f64>() - 0.5) * WANDER_SPREAD)
}

/// Nearest item strictly inside the vision radius. Ties keep the first one seen.
pub fn nearest_food(head: DVec2, vision: f64, food: &[DVec2]) -> Option<DVec2> {
    let mut best: Option<(DVec2, f64)> = None;
    for &pos in food {
        let dist = head.distance(pos);
        if dist < vision && best.is_none_or(|(_, best_dist)| dist < best_dist) {
            best = Some((pos, dist));
        }
    }
    best.map(|(pos, _)| pos)
}

/// Repulsion from nearby heads and walls, with its accumulated weight.
pub fn danger_vector(
    me: SnakeKey,
    head: DVec2,
    vision: f64,
    surroundings: &Surroundings,
) -> (DVec2, f64) {
    let mut danger = DVec2::ZERO;
    let mut weight = 0.0;

    let range = vision * DANGER_RANGE_FACTOR;
    for &(key, other) in surroundings.heads {
        if key == me {
            continue;
        }
        let dist = head.distance(other);
        if dist < range {
            let w = 1.0 - dist / vision;
            danger -= (other - head) * w;
            weight += w;
        }
    }

    let margin = vision * BORDER_MARGIN_FACTOR;
    let bounds = surroundings.bounds;
    if head.x < margin {
        danger.x += (margin - head.x) * WALL_PUSH;
        weight += WALL_DANGER_WEIGHT;
    } else if head.x > bounds.width - margin {
        danger.x -= (margin - (bounds.width - head.x)) * WALL_PUSH;
        weight += WALL_DANGER_WEIGHT;
    }
    if head.y < margin {
        danger.y += (margin - head.y) * WALL_PUSH;
        weight += WALL_DANGER_WEIGHT;
    } else if head.y > bounds.height - margin {
        danger.y -= (margin - (bounds.height - head.y)) * WALL_PUSH;
        weight += WALL_DANGER_WEIGHT;
    }

    (danger, weight)
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::dvec2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use slotmap::SlotMap;
    use std::f64::consts::PI;

    fn keys(n: usize) -> Vec<SnakeKey> {
        let mut arena: SlotMap<SnakeKey, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn test_seeks_nearest_food() {
        let k = keys(1);
        let food = [dvec2(600.0, 300.0), dvec2(450.0, 300.0), dvec2(400.0, 420.0)];
        let heads = [(k[0], dvec2(400.0, 300.0))];
        let surroundings = Surroundings {
            food: &food,
            heads: &heads,
            bounds: Bounds::new(1000.0, 800.0),
        };
        let mut rng = StdRng::seed_from_u64(0);
        let decision = decide(k[0], heads[0].1, 200.0, &surroundings, &mut rng);
        assert_eq!(decision, SteeringDecision::Seek(0.0));
    }

    #[test]
    fn test_food_tie_keeps_scan_order() {
        let head = dvec2(0.0, 0.0);
        let food = [dvec2(10.0, 0.0), dvec2(0.0, 10.0)];
        assert_eq!(nearest_food(head, 200.0, &food), Some(dvec2(10.0, 0.0)));
        assert_eq!(nearest_food(head, 5.0, &food), None);
    }

    #[test]
    fn test_evades_close_head() {
        let k = keys(2);
        let heads = [(k[0], dvec2(400.0, 300.0)), (k[1], dvec2(450.0, 300.0))];
        let food = [dvec2(500.0, 300.0)];
        let surroundings = Surroundings {
            food: &food,
            heads: &heads,
            bounds: Bounds::new(1000.0, 800.0),
        };
        let mut rng = StdRng::seed_from_u64(0);
        match decide(k[0], heads[0].1, 200.0, &surroundings, &mut rng) {
            SteeringDecision::Evade(angle) => assert!((angle.abs() - PI).abs() < 1e-9),
            other => panic!("expected evade, got {other:?}"),
        }
    }

    #[test]
    fn test_ignores_own_and_distant_heads() {
        let k = keys(2);
        let heads = [(k[0], dvec2(400.0, 300.0)), (k[1], dvec2(520.0, 300.0))];
        let surroundings = Surroundings {
            food: &[],
            heads: &heads,
            bounds: Bounds::new(1000.0, 800.0),
        };
        let (danger, weight) = danger_vector(k[0], heads[0].1, 200.0, &surroundings);
        assert_eq!(danger, DVec2::ZERO);
        assert_eq!(weight, 0.0);
    }

    #[test]
    fn test_wall_pushes_inward() {
        let k = keys(1);
        let surroundings = Surroundings {
            food: &[],
            heads: &[],
            bounds: Bounds::new(1000.0, 800.0),
        };
        let (danger, weight) = danger_vector(k[0], dvec2(20.0, 400.0), 200.0, &surroundings);
        assert!(danger.x > 0.0);
        assert_eq!(danger.y, 0.0);
        assert_eq!(weight, WALL_DANGER_WEIGHT);

        let mut rng = StdRng::seed_from_u64(0);
        let decision = decide(k[0], dvec2(990.0, 790.0), 200.0, &surroundings, &mut rng);
        match decision {
            SteeringDecision::Evade(angle) => assert!(angle < -PI / 2.0 && angle > -PI),
            other => panic!("expected evade, got {other:?}"),
        }
    }

    #[test]
    fn test_wander_stays_small() {
        let k = keys(1);
        let surroundings = Surroundings {
            food: &[],
            heads: &[],
            bounds: Bounds::new(1000.0, 800.0),
        };
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            match decide(k[0], dvec2(500.0, 400.0), 200.0, &surroundings, &mut rng) {
                SteeringDecision::Wander(delta) => assert!(delta.abs() <= WANDER_SPREAD / 2.0),
                other => panic!("expected wander, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_apply_normalizes() {
        assert_eq!(SteeringDecision::Wander(-0.1).apply(0.0), normalize_angle(-0.1));
        assert!((SteeringDecision::Seek(-PI / 2.0).apply(1.0) - 1.5 * PI).abs() < 1e-9);
    }
}
