use crate::chat::SimulatedChat;
use crate::config::{AppConfig, ChatConfig};
use crate::engine::Renderer;
use crate::simulation::{Continuation, TickScheduler, World};
use crate::ui::UIManager;
use crate::ui::events::AppAction;
use macroquad::prelude::*;

/// Main application structure for SlitherChat.
pub struct SlitherApp {
    ui: UIManager,                       // Manages the HUD and its interactions.
    renderer: Renderer,                  // Draws world snapshots.
    world: World,                        // Snakes, food and the spawn queue.
    scheduler: TickScheduler,            // Turns frame time into fixed ticks.
    continuation: Option<Continuation>,  // Permission to tick on the next frame.
    chat: Option<SimulatedChat>,         // Local chat producer, when enabled.
    chat_config: ChatConfig,
    chat_seed: Option<u64>,
}

impl SlitherApp {
    pub fn new(app_config: AppConfig) -> Self {
        let config = app_config.simulation;
        let world = World::new(&config);
        let renderer = Renderer::new(
            config.world_width as f32,
            config.world_height as f32,
            &config.render,
        );

        let mut app = Self {
            ui: UIManager::new(config.max_leaderboard_entries),
            renderer,
            scheduler: TickScheduler::new(config.tick_rate),
            continuation: None,
            chat: None,
            chat_seed: config.seed.map(|seed| seed.wrapping_add(1)),
            chat_config: config.chat.clone(),
            world,
        };

        if app_config.autostart {
            app.start();
        }

        app
    }

    /// Runs the main application loop.
    pub async fn run(&mut self) {
        loop {
            let frame_dt = get_frame_time() as f64;

            self.update_ui();
            self.advance_world(frame_dt);
            self.render();

            // Yield back to Macroquad (swap buffers, poll events, vsync)
            next_frame().await;
        }
    }

    /// Runs the ticks owed for this frame, if the current continuation is still valid.
    fn advance_world(&mut self, frame_dt: f64) {
        let Some(continuation) = self.continuation.take() else {
            return;
        };
        if let Some(batch) = self.scheduler.resume(continuation, frame_dt) {
            for _ in 0..batch.count {
                self.world.tick(batch.dt);
            }
        }
        self.continuation = self.scheduler.reschedule();
    }

    fn start(&mut self) {
        if self.world.is_running() {
            return;
        }
        self.world.start();
        self.continuation = Some(self.scheduler.start());

        if self.chat_config.simulate {
            match SimulatedChat::start(&self.chat_config, self.world.sender(), self.chat_seed) {
                Ok(chat) => self.chat = Some(chat),
                Err(e) => tracing::error!("Simulated chat unavailable: {e:#}"),
            }
        }
    }

    fn stop(&mut self) {
        self.scheduler.stop();
        self.continuation = None;
        // Dropping the producer joins its thread
        self.chat = None;
        self.world.stop();
    }

    fn restart(&mut self) {
        self.stop();
        self.renderer.reset();
        self.start();
    }

    /// Updates the UI state and handles input.
    fn update_ui(&mut self) {
        let shortcut_action = self.handle_global_shortcuts();
        self.handle_app_action(shortcut_action);

        let (app_action, ui_consumed_input) = self.ui.update(
            &self.world,
            self.chat.as_ref().is_some_and(SimulatedChat::is_running),
            &mut self.renderer.game_camera,
        );
        self.handle_app_action(app_action);

        if !ui_consumed_input {
            self.renderer.process_mouse_wheel_zoom();
            self.renderer.process_mouse_drag_pan();
        }
    }

    /// Maps keyboard shortcuts to actions.
    fn handle_global_shortcuts(&self) -> Option<AppAction> {
        if is_key_pressed(KeyCode::Space) {
            Some(if self.world.is_running() {
                AppAction::Stop
            } else {
                AppAction::Start
            })
        } else if is_key_pressed(KeyCode::R) {
            Some(AppAction::Restart)
        } else if is_key_pressed(KeyCode::L) {
            Some(AppAction::ToggleLeaderboard)
        } else if is_key_pressed(KeyCode::C) {
            Some(AppAction::ToggleChat)
        } else {
            None
        }
    }

    /// Processes application-level actions triggered by UI or shortcuts.
    fn handle_app_action(&mut self, action: Option<AppAction>) {
        let Some(action) = action else {
            return;
        };
        match action {
            AppAction::Start => self.start(),
            AppAction::Stop => self.stop(),
            AppAction::Restart => self.restart(),
            AppAction::ToggleLeaderboard => {
                self.ui.toggle_leaderboard();
            }
            AppAction::ToggleChat => {
                self.ui.toggle_chat();
            }
        }
    }

    /// Renders the current world snapshot and the HUD.
    fn render(&mut self) {
        let snapshot = self.world.snapshot();
        self.renderer.render(&snapshot);

        // Switch to default camera for UI rendering
        set_default_camera();
        self.ui.render();
    }
}
