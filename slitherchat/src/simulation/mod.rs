pub mod chat_feed;
pub mod collision;
pub mod food;
pub mod leaderboard;
pub mod scheduler;
pub mod snake;
pub mod spawn_queue;
pub mod steering;
mod timer;
pub mod world;

// Re-export key types for easier imports
pub use scheduler::{Continuation, TickScheduler};
pub use spawn_queue::SpawnSender;
pub use timer::Timer;
pub use world::{AgentView, FoodView, World, WorldSnapshot, WorldState};

// Snake body constants
pub const HEAD_RADIUS: f64 = 10.0;
pub const SEGMENT_RADIUS_STEP: f64 = 0.05; // Each segment is this much thinner than the one before
pub const MIN_SEGMENT_RADIUS: f64 = 2.0;
pub const SEGMENT_COHESION: f64 = 0.9; // Fraction of the summed radii kept between neighbours
pub const FOLLOW_FACTOR: f64 = 0.2; // Share of the excess gap closed per tick
pub const TURN_GAIN: f64 = 3.0;

// Collision constants
pub const CONTACT_DAMPING: f64 = 0.8; // Other segments count with 80% of their radius

// Steering constants
pub const DANGER_RANGE_FACTOR: f64 = 0.5; // Heads closer than vision * factor are dangerous
pub const BORDER_MARGIN_FACTOR: f64 = 1.0 / 3.0;
pub const WALL_PUSH: f64 = 0.5;
pub const WALL_DANGER_WEIGHT: f64 = 0.5;
pub const DANGER_THRESHOLD: f64 = 0.1;
pub const WANDER_SPREAD: f64 = 0.2;

// Food constants
pub const FOOD_MIN_VALUE: u32 = 1;
pub const FOOD_MAX_VALUE: u32 = 3;
pub const FOOD_MIN_PULSE_SPEED: f64 = 0.02;
pub const FOOD_MAX_PULSE_SPEED: f64 = 0.07;

// Scheduler constants
pub const MAX_FRAME_DT: f64 = 0.25; // Longer frames are treated as a stall
pub const MAX_CATCH_UP_STEPS: u32 = 5;
