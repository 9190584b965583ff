use macroquad::math::DVec2;
use rand::Rng;
use slotmap::{SlotMap, new_key_type};

use super::world::Bounds;
use super::{FOOD_MAX_PULSE_SPEED, FOOD_MAX_VALUE, FOOD_MIN_PULSE_SPEED, FOOD_MIN_VALUE};
use crate::config::{FOOD_SPAWN_MARGIN, SimulationConfig};

new_key_type! {
    pub struct FoodKey;
}

#[derive(Debug, Clone)]
pub struct FoodItem {
    pub pos: DVec2,
    pub value: u32,
    pub radius: f64,
    /// Index into the configured food palette.
    pub color: usize,
    pub pulse: f64,
    pub pulse_direction: f64,
    pub pulse_speed: f64,
}

impl FoodItem {
    pub fn radius_for(food_size: f64, value: u32) -> f64 {
        food_size * (0.8 + 0.2 * value as f64)
    }

    fn update_pulse(&mut self) {
        self.pulse += self.pulse_direction * self.pulse_speed;
        if self.pulse >= 1.0 {
            self.pulse = 1.0;
            self.pulse_direction = -1.0;
        } else if self.pulse <= 0.0 {
            self.pulse = 0.0;
            self.pulse_direction = 1.0;
        }
    }
}

pub struct FoodField {
    items: SlotMap<FoodKey, FoodItem>,
    bounds: Bounds,
    max_food: usize,
    spawn_rate: f64,
    food_size: f64,
    palette_len: usize,
}

impl FoodField {
    pub fn new(config: &SimulationConfig, bounds: Bounds) -> Self {
        Self {
            items: SlotMap::with_capacity_and_key(config.max_food),
            bounds,
            max_food: config.max_food,
            spawn_rate: config.food_spawn_rate,
            food_size: config.food_size,
            palette_len: config.food_colors.len().max(1),
        }
    }

    /// Inserts one random item, ignoring the cap.
    pub fn spawn_random(&mut self, rng: &mut impl Rng) -> FoodKey {
        let pos = self.bounds.random_point(FOOD_SPAWN_MARGIN, rng);
        let value = rng.random_range(FOOD_MIN_VALUE..=FOOD_MAX_VALUE);
        let item = FoodItem {
            pos,
            value,
            radius: FoodItem::radius_for(self.food_size, value),
            color: rng.random_range(0..self.palette_len),
            pulse: 0.0,
            pulse_direction: 1.0,
            pulse_speed: rng.random_range(FOOD_MIN_PULSE_SPEED..FOOD_MAX_PULSE_SPEED),
        };
        self.items.insert(item)
    }

    /// Forced initial seeding, never past the cap.
    pub fn seed(&mut self, count: usize, rng: &mut impl Rng) {
        let room = self.max_food.saturating_sub(self.items.len());
        for _ in 0..count.min(room) {
            self.spawn_random(rng);
        }
    }

    /// Bernoulli arrival of at most one item.
    pub fn try_spawn(&mut self, rng: &mut impl Rng) -> Option<FoodKey> {
        if self.items.len() < self.max_food && rng.random::<f64>() < self.spawn_rate {
            Some(self.spawn_random(rng))
        } else {
            None
        }
    }

    pub fn update(&mut self) {
        for item in self.items.values_mut() {
            item.update_pulse();
        }
    }

    pub fn remove(&mut self, key: FoodKey) -> Option<FoodItem> {
        self.items.remove(key)
    }

    pub fn get(&self, key: FoodKey) -> Option<&FoodItem> {
        self.items.get(key)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FoodKey, &FoodItem)> {
        self.items.iter()
    }

    pub fn positions(&self) -> Vec<DVec2> {
        self.items.values().map(|item| item.pos).collect()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[cfg(test)]
    pub(crate) fn insert_at(&mut self, pos: DVec2, value: u32) -> FoodKey {
        self.items.insert(FoodItem {
            pos,
            value,
            radius: FoodItem::radius_for(self.food_size, value),
            color: 0,
            pulse: 0.0,
            pulse_direction: 1.0,
            pulse_speed: FOOD_MIN_PULSE_SPEED,
        })
    }
}
