use macroquad::math::{DVec2, dvec2};
use rand::Rng;
use shared::Identity;
use shared::util::{
    normalize_angle, reflect_across_horizontal, reflect_across_vertical, shortest_angle_diff,
};
use slotmap::new_key_type;

use super::steering::{self, Surroundings};
use super::world::Bounds;
use super::{
    FOLLOW_FACTOR, HEAD_RADIUS, MIN_SEGMENT_RADIUS, SEGMENT_COHESION, SEGMENT_RADIUS_STEP,
    TURN_GAIN, Timer,
};
use crate::config::SimulationConfig;

new_key_type! {
    pub struct SnakeKey;
}

/// Radius of the segment at `index`, thinning toward the tail.
pub fn segment_radius(index: usize) -> f64 {
    if index == 0 {
        return HEAD_RADIUS;
    }
    (HEAD_RADIUS - index as f64 * SEGMENT_RADIUS_STEP).max(MIN_SEGMENT_RADIUS)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub pos: DVec2,
    pub radius: f64,
}

#[derive(Debug, Clone)]
pub struct Snake {
    pub identity: Identity,
    pub name: String,
    /// Index into the configured snake palette.
    pub color: usize,
    /// Index 0 is the head.
    pub segments: Vec<Segment>,
    pub heading: f64,
    pub target_heading: f64,
    pub speed: f64,
    pub turn_speed: f64,
    pub vision_range: f64,
    pub score: u64,
    pub alive: bool,
    pub think_timer: Timer,
}

impl Snake {
    pub fn new(
        identity: Identity,
        name: String,
        color: usize,
        head: DVec2,
        heading: f64,
        config: &SimulationConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let heading = normalize_angle(heading);
        let back = -dvec2(heading.cos(), heading.sin());
        let segments = (0..config.initial_snake_size)
            .map(|i| Segment {
                pos: head + back * (i as f64 * 2.0 * HEAD_RADIUS * SEGMENT_COHESION),
                radius: segment_radius(i),
            })
            .collect();

        // Random phase so that snakes spawned together do not think on the same tick
        let interval = config.ai_update_interval;
        let think_timer = Timer::new(interval, rng.random_range(0.0..interval));

        Self {
            identity,
            name,
            color,
            segments,
            heading,
            target_heading: heading,
            speed: config.snake_speed,
            turn_speed: config.turn_speed,
            vision_range: config.vision_range,
            score: 0,
            alive: true,
            think_timer,
        }
    }

    pub fn head(&self) -> DVec2 {
        self.segments[0].pos
    }

    pub fn head_radius(&self) -> f64 {
        self.segments[0].radius
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// One integration step. `tick_rate` converts `dt` into nominal ticks for motion.
    pub fn advance(
        &mut self,
        key: SnakeKey,
        dt: f64,
        tick_rate: f64,
        surroundings: &Surroundings,
        rng: &mut impl Rng,
    ) {
        if !self.alive {
            return;
        }

        self.turn(dt);

        self.think_timer.update(dt);
        if self.think_timer.is_ready() {
            self.think_timer.wrap();
            let decision = steering::decide(key, self.head(), self.vision_range, surroundings, rng);
            self.target_heading = decision.apply(self.target_heading);
        }

        let step = dt * tick_rate;
        let forward = dvec2(self.heading.cos(), self.heading.sin());
        let mut head = self.head() + forward * (self.speed * step);
        self.bounce(&mut head, surroundings.bounds);
        self.segments[0].pos = head;

        self.follow();

        if !self.head().is_finite() || !self.heading.is_finite() {
            tracing::warn!(name = %self.name, "Snake reached a non-finite state, removing it");
            self.die();
        }
    }

    fn turn(&mut self, dt: f64) {
        let diff = shortest_angle_diff(self.heading, self.target_heading);
        let fraction = (self.turn_speed * dt * TURN_GAIN).min(1.0);
        self.heading = normalize_angle(self.heading + diff * fraction);
    }

    /// Clamps the head inside the walls. The target heading is mirrored off a wall
    /// only while it still points into that wall.
    fn bounce(&mut self, head: &mut DVec2, bounds: Bounds) {
        let r = self.head_radius();
        let (sin, cos) = self.target_heading.sin_cos();
        if (head.x < r && cos < 0.0) || (head.x > bounds.width - r && cos > 0.0) {
            self.target_heading = reflect_across_vertical(self.target_heading);
        }
        head.x = head.x.clamp(r, bounds.width - r);

        if (head.y < r && sin < 0.0) || (head.y > bounds.height - r && sin > 0.0) {
            self.target_heading = reflect_across_horizontal(self.target_heading);
        }
        head.y = head.y.clamp(r, bounds.height - r);
    }

    // Tail to neck, each segment chases the one in front of it
    fn follow(&mut self) {
        for i in (1..self.segments.len()).rev() {
            let leader = self.segments[i - 1];
            let segment = &mut self.segments[i];
            let delta = leader.pos - segment.pos;
            let distance = delta.length();
            let ideal = (leader.radius + segment.radius) * SEGMENT_COHESION;
            if distance > ideal {
                segment.pos += delta / distance * ((distance - ideal) * FOLLOW_FACTOR);
            }
        }
    }

    /// Appends one tail segment continuing the direction of the last two.
    pub fn grow(&mut self) {
        let n = self.segments.len();
        let last = self.segments[n - 1];
        let direction = if n >= 2 {
            (last.pos - self.segments[n - 2].pos).normalize_or_zero()
        } else {
            DVec2::ZERO
        };
        let direction = if direction == DVec2::ZERO {
            -dvec2(self.heading.cos(), self.heading.sin())
        } else {
            direction
        };
        self.segments.push(Segment {
            pos: last.pos + direction * (2.0 * last.radius),
            radius: (last.radius - SEGMENT_RADIUS_STEP).max(MIN_SEGMENT_RADIUS),
        });
    }

    /// Marks the snake dead. Returns whether this call changed anything.
    pub fn die(&mut self) -> bool {
        if !self.alive {
            return false;
        }
        self.alive = false;
        true
    }
}
