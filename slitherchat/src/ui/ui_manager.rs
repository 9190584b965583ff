use catppuccin_egui::set_theme;
use egui::{self};
use macroquad::prelude::*;

use crate::engine::GameCamera;
use crate::simulation::World;
use crate::ui::components::{ChatPanel, ControlPanel, LeaderboardPanel, StatusBar};
use crate::ui::events::AppAction;

fn auto_zoom(ctx: &egui::Context, base_px: egui::Vec2) -> f32 {
    let logical = ctx.screen_rect().size();
    let win_px = logical * ctx.pixels_per_point(); // physical pixels
    let s = (win_px.x / base_px.x).min(win_px.y / base_px.y);
    ((s * 4.0).round() / 4.0).clamp(0.75, 3.0) // snap to 0.25 for crisp text
}

pub struct UIManager {
    drag_started_on_ui: bool,
    control_panel: ControlPanel,
    leaderboard_panel: LeaderboardPanel,
    chat_panel: ChatPanel,
    status_bar: StatusBar,
    last_screen_size: (f32, f32), // Only for camera resize events
    last_win_px: egui::Vec2,
}

impl UIManager {
    pub fn new(max_leaderboard_entries: usize) -> Self {
        Self {
            drag_started_on_ui: false,
            control_panel: ControlPanel::new(),
            leaderboard_panel: LeaderboardPanel::new(max_leaderboard_entries),
            chat_panel: ChatPanel::new(),
            status_bar: StatusBar::new(),
            last_screen_size: (screen_width(), screen_height()),
            last_win_px: egui::vec2(0.0, 0.0),
        }
    }

    /// Builds the HUD for this frame. Returns the requested action and whether
    /// the UI took the pointer.
    pub fn update(
        &mut self,
        world: &World,
        simulated_chat: bool,
        camera: &mut GameCamera,
    ) -> (Option<AppAction>, bool) {
        let window_w = screen_width();
        let window_h = screen_height();
        // Only update camera on resize
        if (window_w, window_h) != self.last_screen_size {
            self.last_screen_size = (window_w, window_h);
            camera.handle_resize();
        }

        self.status_bar.update();
        let zoom = camera.zoom();

        let mut app_action = None;
        let mut input_consumed = false;

        new_egui_macroquad::ui(|egui_ctx| {
            set_theme(egui_ctx, catppuccin_egui::MOCHA);
            // Auto-zoom only on window resize or DPI change
            let win_px = egui_ctx.screen_rect().size() * egui_ctx.pixels_per_point();
            if (win_px.x - self.last_win_px.x).abs() > 1.0
                || (win_px.y - self.last_win_px.y).abs() > 1.0
            {
                self.last_win_px = win_px;
                let target = auto_zoom(egui_ctx, egui::vec2(1920.0, 1080.0));
                egui_ctx.set_zoom_factor(target);
            }

            app_action = self
                .control_panel
                .draw(egui_ctx, world.state(), simulated_chat);
            self.leaderboard_panel.draw(egui_ctx, world);
            self.chat_panel.draw(egui_ctx, world);
            self.status_bar.draw(egui_ctx, world, zoom);

            input_consumed = egui_ctx.is_pointer_over_area() || egui_ctx.wants_keyboard_input();
            self.update_drag_state(egui_ctx);
        });

        (app_action, input_consumed || self.drag_started_on_ui)
    }

    fn update_drag_state(&mut self, egui_ctx: &egui::Context) {
        if is_mouse_button_down(MouseButton::Left) && egui_ctx.is_pointer_over_area() {
            self.drag_started_on_ui = true;
        } else if !is_mouse_button_down(MouseButton::Left) {
            self.drag_started_on_ui = false;
        }
    }

    pub fn render(&self) {
        new_egui_macroquad::draw();
    }

    pub fn toggle_leaderboard(&mut self) -> bool {
        self.leaderboard_panel.toggle()
    }

    pub fn toggle_chat(&mut self) -> bool {
        self.chat_panel.toggle()
    }
}
