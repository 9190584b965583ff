pub mod components;
pub mod events;

pub use ui_manager::UIManager;

mod ui_manager;

// Base sizes (logical points)
pub const BASE_PADDING: f32 = 6.0;
pub const BASE_SPACING: f32 = 6.0;
pub const BASE_BUTTON_WIDTH: f32 = 72.0;
pub const BASE_BUTTON_HEIGHT: f32 = 28.0;

/// Converts a `0xRRGGBB` palette entry to an egui color.
pub fn hex_color32(rgb: u32) -> egui::Color32 {
    egui::Color32::from_rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color32_channels() {
        assert_eq!(hex_color32(0x4CAF50), egui::Color32::from_rgb(0x4C, 0xAF, 0x50));
    }
}
