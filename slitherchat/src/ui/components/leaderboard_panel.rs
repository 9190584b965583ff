use new_egui_macroquad::egui::{self, Color32, RichText};

use crate::simulation::World;
use crate::ui::{BASE_SPACING, hex_color32};

/// Floating window listing the top snakes.
pub struct LeaderboardPanel {
    visible: bool,
    max_entries: usize,
}

impl LeaderboardPanel {
    pub fn new(max_entries: usize) -> Self {
        Self {
            visible: true,
            max_entries,
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn draw(&mut self, egui_ctx: &egui::Context, world: &World) {
        if !self.visible {
            return;
        }

        let max_entries = self.max_entries;
        egui::Window::new("Leaderboard")
            .open(&mut self.visible)
            .resizable(false)
            .collapsible(true)
            .default_pos(egui::pos2(12.0, 64.0))
            .show(egui_ctx, |ui| {
                let entries = world.leaderboard(max_entries);
                if entries.is_empty() {
                    ui.label(RichText::new("Waiting for chat...").italics());
                    return;
                }

                egui::Grid::new("leaderboard_grid")
                    .num_columns(3)
                    .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                    .striped(true)
                    .show(ui, |ui| {
                        for entry in entries {
                            let mut name_color = hex_color32(world.snake_color(entry.color));
                            let mut text_color = ui.visuals().text_color();
                            if !entry.alive {
                                name_color = name_color.gamma_multiply(0.4);
                                text_color = Color32::GRAY;
                            }
                            ui.label(RichText::new(format!("{}.", entry.rank)).color(text_color));
                            ui.label(RichText::new(&entry.name).strong().color(name_color));
                            ui.label(RichText::new(entry.score.to_string()).color(text_color));
                            ui.end_row();
                        }
                    });
            });
    }
}
