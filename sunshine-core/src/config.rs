//! Face layout and palette configuration
//!
//! Metrics are in panel pixels. Text sizes are nominal font sizes; the
//! display crate picks the closest font it has for each.

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum length of an AM/PM label
pub const MAX_LABEL_LEN: usize = 4;

/// Half the width of the rule under the date
pub const DIVIDER_HALF_WIDTH: i32 = 20;

/// 24-bit color, independent of any panel format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Snap each channel to fully on or off
    pub fn one_bit(self) -> Self {
        let snap = |c: u8| if c >= 0x80 { 0xFF } else { 0 };
        Self::rgb(snap(self.r), snap(self.g), snap(self.b))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Palette {
    /// Background while interactive
    pub background: Color,
    /// Background while ambient
    pub ambient_background: Color,
    /// Time, AM/PM and max temperature
    pub primary_text: Color,
    /// Date, divider and min temperature
    pub secondary_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x03, 0xA9, 0xF4),
            ambient_background: Color::BLACK,
            primary_text: Color::WHITE,
            secondary_text: Color::rgb(0xF0, 0xF0, 0xF0),
        }
    }
}

/// Panel outline; round panels push the text block further down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    #[default]
    Square,
    Round,
}

/// Everything the render loop needs besides time and weather
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FaceConfig {
    pub shape: Shape,
    /// Baseline of the time text
    pub y_offset: i32,
    pub line_height: i32,
    /// Gap between time and AM/PM, and between the weather row parts
    pub space_width: i32,
    pub time_text_size: u32,
    pub date_text_size: u32,
    /// Also the height weather icons are scaled to
    pub temp_text_size: u32,
    pub am_label: String<MAX_LABEL_LEN>,
    pub pm_label: String<MAX_LABEL_LEN>,
    pub palette: Palette,
}

impl FaceConfig {
    pub fn for_shape(shape: Shape) -> Self {
        let (y_offset, time_text_size, temp_text_size) = match shape {
            Shape::Square => (72, 24, 18),
            Shape::Round => (84, 24, 14),
        };
        Self {
            shape,
            y_offset,
            line_height: 24,
            space_width: 8,
            time_text_size,
            date_text_size: 12,
            temp_text_size,
            am_label: label("AM"),
            pm_label: label("PM"),
            palette: Palette::default(),
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self::for_shape(Shape::default())
    }
}

fn label(s: &str) -> String<MAX_LABEL_LEN> {
    let mut out = String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
