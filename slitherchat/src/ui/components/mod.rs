// Components for the UI system
mod chat_panel;
mod control_panel;
mod leaderboard_panel;
mod status_bar;

// Export components
pub use chat_panel::ChatPanel;
pub use control_panel::ControlPanel;
pub use leaderboard_panel::LeaderboardPanel;
pub use status_bar::StatusBar;
