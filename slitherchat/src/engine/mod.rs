mod camera;
mod rendering;

pub use camera::GameCamera;
pub use rendering::Renderer;

use macroquad::prelude::Color;

// Rendering constants
pub const HEAD_OUTLINE_WIDTH: f32 = 2.0;
pub const EYE_RADIUS_FACTOR: f32 = 0.3; // Eye size relative to head radius
pub const EYE_FORWARD_FACTOR: f32 = 0.5; // How far ahead of the head centre the eyes sit
pub const EYE_SPREAD_FACTOR: f32 = 1.2; // Sideways offset in eye radii
pub const FOOD_PULSE_GROWTH: f32 = 0.2;
pub const FOOD_CORE_FACTOR: f32 = 0.5;
pub const NAME_OFFSET: f32 = 10.0;
pub const NAME_FONT_SIZE: f32 = 16.0;
pub const WORLD_BORDER_COLOR: Color = Color::new(0.3, 0.3, 0.3, 1.0);
pub const FOOD_CORE_COLOR: Color = Color::new(1.0, 1.0, 1.0, 0.5);
