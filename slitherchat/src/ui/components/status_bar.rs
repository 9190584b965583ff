use macroquad::prelude::*;
use new_egui_macroquad::egui;

use crate::simulation::World;
use crate::ui::BASE_SPACING;

/// Bottom bar with population counters and the frame rate.
pub struct StatusBar {
    displayed_fps: i32,
    fps_timer: f32,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            displayed_fps: get_fps(),
            fps_timer: 0.0,
        }
    }

    /// Update the FPS counter
    pub fn update(&mut self) {
        self.fps_timer += get_frame_time();
        if self.fps_timer >= 0.5 {
            self.displayed_fps = get_fps();
            self.fps_timer = 0.0;
        }
    }

    pub fn draw(&mut self, ctx: &egui::Context, world: &World, zoom: f32) {
        let fps_color = if self.displayed_fps > 55 {
            egui::Color32::from_rgb(0, 180, 0)
        } else if self.displayed_fps > 30 {
            egui::Color32::from_rgb(220, 180, 70)
        } else {
            egui::Color32::from_rgb(220, 100, 100)
        };

        egui::TopBottomPanel::bottom("status_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = BASE_SPACING * 3.0;
                    ui.label(format!("Snakes: {}", world.live_count()));
                    ui.label(format!(
                        "Food: {}/{}",
                        world.food_count(),
                        world.config().max_food
                    ));
                    ui.label(format!("Tick: {}", world.tick_count()));
                    ui.label(format!("Zoom: x{zoom:.1}"));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("FPS: {}", self.displayed_fps))
                                .color(fps_color),
                        );
                    });
                });
            });
    }
}
