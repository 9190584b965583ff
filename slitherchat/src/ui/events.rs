/// Actions requested by the HUD or keyboard shortcuts, handled by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Start,
    Stop,
    /// Stop if running, then start a fresh world.
    Restart,
    ToggleLeaderboard,
    ToggleChat,
}
