//! Fonts per text role

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::renderer::TextRenderer;
use embedded_graphics::text::Baseline;
use profont::{
    PROFONT_10_POINT, PROFONT_12_POINT, PROFONT_14_POINT, PROFONT_18_POINT, PROFONT_24_POINT,
    PROFONT_7_POINT, PROFONT_9_POINT,
};
use sunshine_core::config::FaceConfig;
use sunshine_core::render::TextRole;
use sunshine_core::traits::TextMetrics;

/// ProFont sizes, ascending
const PROFONT_SIZES: [(u32, &MonoFont<'static>); 7] = [
    (7, &PROFONT_7_POINT),
    (9, &PROFONT_9_POINT),
    (10, &PROFONT_10_POINT),
    (12, &PROFONT_12_POINT),
    (14, &PROFONT_14_POINT),
    (18, &PROFONT_18_POINT),
    (24, &PROFONT_24_POINT),
];

/// Largest ProFont not bigger than `size`, or the smallest one
pub fn profont(size: u32) -> &'static MonoFont<'static> {
    PROFONT_SIZES
        .iter()
        .rev()
        .find(|(points, _)| *points <= size)
        .map_or(&PROFONT_7_POINT, |(_, font)| *font)
}

/// The fonts a face is drawn with
#[derive(Clone, Copy)]
pub struct FontSet {
    pub time: &'static MonoFont<'static>,
    pub date: &'static MonoFont<'static>,
    pub temp: &'static MonoFont<'static>,
}

impl FontSet {
    /// AM/PM shares the time font
    pub fn for_config(config: &FaceConfig) -> Self {
        Self {
            time: profont(config.time_text_size),
            date: profont(config.date_text_size),
            temp: profont(config.temp_text_size),
        }
    }

    pub fn for_role(&self, role: TextRole) -> &'static MonoFont<'static> {
        match role {
            TextRole::Time | TextRole::AmPm => self.time,
            TextRole::Date => self.date,
            TextRole::MaxTemp | TextRole::MinTemp => self.temp,
        }
    }
}

impl TextMetrics for FontSet {
    fn text_width(&self, text: &str, role: TextRole) -> i32 {
        let style = MonoTextStyle::new(self.for_role(role), Rgb888::WHITE);
        style
            .measure_string(text, Point::zero(), Baseline::Alphabetic)
            .next_position
            .x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sunshine_core::config::Shape;

    #[test]
    fn test_profont_picks_largest_fitting() {
        assert_eq!(profont(24).character_size, PROFONT_24_POINT.character_size);
        assert_eq!(profont(20).character_size, PROFONT_18_POINT.character_size);
        assert_eq!(profont(3).character_size, PROFONT_7_POINT.character_size);
    }

    #[test]
    fn test_width_scales_with_length() {
        let fonts = FontSet::for_config(&FaceConfig::for_shape(Shape::Square));
        let one = fonts.text_width("0", TextRole::Time);

        assert!(one > 0);
        assert_eq!(fonts.text_width("12:34", TextRole::Time), 5 * one);
        assert_eq!(fonts.text_width("", TextRole::Date), 0);
    }

    #[test]
    fn test_am_pm_uses_time_font() {
        let fonts = FontSet::for_config(&FaceConfig::default());
        assert_eq!(
            fonts.text_width("PM", TextRole::AmPm),
            fonts.text_width("PM", TextRole::Time)
        );
        assert!(fonts.text_width("PM", TextRole::Time) > fonts.text_width("PM", TextRole::Date));
    }
}
