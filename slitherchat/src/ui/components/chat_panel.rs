use new_egui_macroquad::egui::{self, RichText};

use crate::simulation::World;
use crate::ui::{BASE_PADDING, hex_color32};

const CHAT_PANEL_WIDTH: f32 = 280.0;
const CHAT_PANEL_HEIGHT: f32 = 240.0;

/// Scrolling feed of recent chat messages, each author in their snake's color.
pub struct ChatPanel {
    visible: bool,
}

impl ChatPanel {
    pub fn new() -> Self {
        Self { visible: true }
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn draw(&mut self, egui_ctx: &egui::Context, world: &World) {
        if !self.visible {
            return;
        }

        egui::Window::new("Chat")
            .open(&mut self.visible)
            .collapsible(true)
            .resizable(true)
            .default_size(egui::vec2(CHAT_PANEL_WIDTH, CHAT_PANEL_HEIGHT))
            .anchor(
                egui::Align2::RIGHT_BOTTOM,
                egui::vec2(-BASE_PADDING, -(BASE_PADDING + 32.0)),
            )
            .show(egui_ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        let mut empty = true;
                        for line in world.chat_feed() {
                            empty = false;
                            let color = hex_color32(world.snake_color(line.color));
                            ui.horizontal_wrapped(|ui| {
                                ui.spacing_mut().item_spacing.x = 4.0;
                                let author = RichText::new(format!("{}:", line.name));
                                ui.label(author.strong().color(color));
                                ui.label(&line.message);
                            });
                        }
                        if empty {
                            ui.label(RichText::new("No messages yet").italics());
                        }
                    });
            });
    }
}
