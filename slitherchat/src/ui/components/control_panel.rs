use new_egui_macroquad::egui::{self, RichText};

use crate::simulation::WorldState;
use crate::ui::events::AppAction;
use crate::ui::{BASE_BUTTON_HEIGHT, BASE_BUTTON_WIDTH, BASE_PADDING, BASE_SPACING};

/// Top bar with the world controls and a shortcut help button.
pub struct ControlPanel {
    show_help: bool,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self { show_help: false }
    }

    fn keyboard_shortcuts(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            ("Space", "Start/stop the world"),
            ("R", "Restart the world"),
            ("L", "Toggle leaderboard"),
            ("C", "Toggle chat feed"),
            ("Scroll", "Zoom in/out"),
            ("Left drag", "Pan the view"),
        ]
    }

    pub fn draw(
        &mut self,
        egui_ctx: &egui::Context,
        state: WorldState,
        simulated_chat: bool,
    ) -> Option<AppAction> {
        let mut app_action = None;
        let running = state == WorldState::Running;

        egui::TopBottomPanel::top("control_panel")
            .frame(egui::Frame::side_top_panel(&egui_ctx.style()).inner_margin(BASE_PADDING))
            .show(egui_ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = BASE_SPACING;
                    let size = egui::vec2(BASE_BUTTON_WIDTH, BASE_BUTTON_HEIGHT);
                    let button = |label: &str| egui::Button::new(label).min_size(size);

                    if ui.add_enabled(!running, button("Start")).clicked() {
                        app_action = Some(AppAction::Start);
                    }
                    if ui.add_enabled(running, button("Stop")).clicked() {
                        app_action = Some(AppAction::Stop);
                    }
                    if ui.add(button("Restart")).clicked() {
                        app_action = Some(AppAction::Restart);
                    }
                    if ui.add(button("Leaderboard")).clicked() {
                        app_action = Some(AppAction::ToggleLeaderboard);
                    }
                    if ui.add(button("Chat")).clicked() {
                        app_action = Some(AppAction::ToggleChat);
                    }

                    ui.separator();
                    let (label, color) = if running {
                        ("Running", catppuccin_egui::MOCHA.green)
                    } else {
                        ("Stopped", catppuccin_egui::MOCHA.red)
                    };
                    ui.label(RichText::new(label).strong().color(color));
                    if simulated_chat {
                        ui.label(RichText::new("simulated chat").italics());
                    }

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let help = egui::Button::new("?")
                            .min_size(egui::vec2(BASE_BUTTON_HEIGHT, BASE_BUTTON_HEIGHT));
                        if ui.add(help).clicked() {
                            self.show_help = !self.show_help;
                        }
                    });
                });
            });

        if self.show_help {
            egui::Window::new("Controls")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-BASE_PADDING, 48.0))
                .show(egui_ctx, |ui| {
                    egui::Grid::new("keyboard_shortcuts")
                        .num_columns(2)
                        .spacing([BASE_SPACING * 2.0, BASE_SPACING])
                        .striped(true)
                        .show(ui, |ui| {
                            for (key, action) in self.keyboard_shortcuts() {
                                ui.monospace(key);
                                ui.label(action);
                                ui.end_row();
                            }
                        });
                });
        }

        app_action
    }
}
