//! Text measurement

use crate::render::TextRole;

/// Measures rendered text in the font used for a role
pub trait TextMetrics {
    /// Advance width of `text` in pixels
    fn text_width(&self, text: &str, role: TextRole) -> i32;
}
