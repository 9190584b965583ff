use super::{
    EYE_FORWARD_FACTOR, EYE_RADIUS_FACTOR, EYE_SPREAD_FACTOR, FOOD_CORE_COLOR, FOOD_CORE_FACTOR,
    FOOD_PULSE_GROWTH, GameCamera, HEAD_OUTLINE_WIDTH, NAME_FONT_SIZE, NAME_OFFSET,
    WORLD_BORDER_COLOR,
};
use crate::config::RenderConfig;
use crate::simulation::{AgentView, FoodView, WorldSnapshot};
use macroquad::prelude::*;

/// Draws world snapshots: background, grid, food and snakes.
pub struct Renderer {
    /// The main game camera.
    pub game_camera: GameCamera,
    background: Color,
    grid_color: Color,
    grid_size: f32,
    /// Flag indicating if the camera is currently being dragged.
    is_dragging: bool,
    /// World position where the camera drag started.
    drag_start_world_pos: Vec2,
}

impl Renderer {
    pub fn new(world_width: f32, world_height: f32, config: &RenderConfig) -> Self {
        Self {
            game_camera: GameCamera::new(world_width, world_height),
            background: Color::from_hex(config.background_color),
            grid_color: Color::from_hex(config.grid_color),
            grid_size: config.grid_size,
            is_dragging: false,
            drag_start_world_pos: Vec2::ZERO,
        }
    }

    /// Processes mouse wheel input for zooming the camera.
    pub fn process_mouse_wheel_zoom(&mut self) {
        let wheel_movement = mouse_wheel().1;
        if wheel_movement != 0.0 {
            self.game_camera.adjust_zoom(-wheel_movement.signum());
        }
    }

    /// Processes mouse drag input for panning the camera.
    pub fn process_mouse_drag_pan(&mut self) {
        let current_mouse_pos = Vec2::from(mouse_position());

        if is_mouse_button_pressed(MouseButton::Left) {
            self.is_dragging = true;
            self.drag_start_world_pos = self.game_camera.camera.screen_to_world(current_mouse_pos);
        }

        if self.is_dragging {
            if is_mouse_button_down(MouseButton::Left) {
                let current_world_pos = self.game_camera.camera.screen_to_world(current_mouse_pos);
                let world_offset_from_start = current_world_pos - self.drag_start_world_pos;

                const DRAG_MOVEMENT_THRESHOLD_SQ: f32 = 0.01;

                if world_offset_from_start.length_squared() > DRAG_MOVEMENT_THRESHOLD_SQ {
                    self.game_camera.move_by(-world_offset_from_start);
                }
            }

            if is_mouse_button_released(MouseButton::Left) {
                self.is_dragging = false;
            }
        }
    }

    /// Main rendering function, draws all game elements.
    pub fn render(&self, snapshot: &WorldSnapshot) {
        clear_background(BLACK);
        set_camera(&self.game_camera.camera);

        self.draw_background(snapshot);
        self.draw_food(&snapshot.food);
        self.draw_snakes(&snapshot.agents);

        // Names go on top in screen space so they are never mirrored by the camera
        set_default_camera();
        self.draw_names(&snapshot.agents);
    }

    fn draw_background(&self, snapshot: &WorldSnapshot) {
        let width = snapshot.bounds.width as f32;
        let height = snapshot.bounds.height as f32;
        draw_rectangle(0.0, 0.0, width, height, self.background);

        if self.grid_size > 0.0 {
            let mut x = 0.0;
            while x <= width {
                draw_line(x, 0.0, x, height, 1.0, self.grid_color);
                x += self.grid_size;
            }
            let mut y = 0.0;
            while y <= height {
                draw_line(0.0, y, width, y, 1.0, self.grid_color);
                y += self.grid_size;
            }
        }

        draw_rectangle_lines(0.0, 0.0, width, height, 2.0, WORLD_BORDER_COLOR);
    }

    fn draw_food(&self, food: &[FoodView]) {
        for item in food {
            let x = item.pos.x as f32;
            let y = item.pos.y as f32;
            let radius = item.radius as f32 * (1.0 + FOOD_PULSE_GROWTH * item.pulse as f32);
            draw_circle(x, y, radius, Color::from_hex(item.color));
            draw_circle(x, y, radius * FOOD_CORE_FACTOR, FOOD_CORE_COLOR);
        }
    }

    fn draw_snakes(&self, agents: &[AgentView]) {
        for agent in agents.iter().filter(|agent| agent.alive) {
            let color = Color::from_hex(agent.color);

            // Tail first so the head ends up on top
            for segment in agent.segments.iter().rev() {
                draw_circle(
                    segment.pos.x as f32,
                    segment.pos.y as f32,
                    segment.radius as f32,
                    color,
                );
            }

            let Some(head) = agent.segments.first() else {
                continue;
            };
            let center = vec2(head.pos.x as f32, head.pos.y as f32);
            let radius = head.radius as f32;
            draw_circle_lines(center.x, center.y, radius, HEAD_OUTLINE_WIDTH, WHITE);
            Self::draw_eyes(center, radius, agent.heading as f32);
        }
    }

    fn draw_eyes(center: Vec2, radius: f32, heading: f32) {
        let forward = vec2(heading.cos(), heading.sin());
        let side = vec2(-forward.y, forward.x);
        let eye_radius = radius * EYE_RADIUS_FACTOR;
        let base = center + forward * (radius * EYE_FORWARD_FACTOR);

        for direction in [-1.0, 1.0] {
            let eye = base + side * (direction * eye_radius * EYE_SPREAD_FACTOR);
            draw_circle(eye.x, eye.y, eye_radius, WHITE);
            let pupil = eye + forward * (eye_radius * 0.3);
            draw_circle(pupil.x, pupil.y, eye_radius * 0.5, BLACK);
        }
    }

    fn draw_names(&self, agents: &[AgentView]) {
        for agent in agents.iter().filter(|agent| agent.alive) {
            let Some(head) = agent.segments.first() else {
                continue;
            };
            let above = vec2(
                head.pos.x as f32,
                (head.pos.y - head.radius) as f32 - NAME_OFFSET,
            );
            let screen = self.game_camera.world_to_screen(above);
            let text_dim = measure_text(&agent.name, None, NAME_FONT_SIZE as u16, 1.0);
            draw_text(
                &agent.name,
                screen.x - text_dim.width / 2.0,
                screen.y,
                NAME_FONT_SIZE,
                WHITE,
            );
        }
    }

    /// Resets the camera, typically when the world restarts.
    pub fn reset(&mut self) {
        self.game_camera.reset();
        self.is_dragging = false;
    }
}
