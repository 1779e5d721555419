//! Display-independent draw primitives

use heapless::{String, Vec};

use super::paint::{Paint, TextRole};
use crate::config::Color;
use crate::weather::IconArt;

/// Longest text run on the face (a temperature string)
pub const MAX_RUN_LEN: usize = 36;

/// Background, time, AM/PM, date, divider, icon, max, min
pub const MAX_OPS: usize = 8;

pub type TextRun = String<MAX_RUN_LEN>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DrawOp {
    /// Fill the whole surface
    Fill(Color),
    /// Text with its left edge at `x` and baseline at `y`
    Text {
        text: TextRun,
        x: i32,
        y: i32,
        role: TextRole,
        paint: Paint,
    },
    /// One pixel wide line
    Line {
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
        paint: Paint,
    },
    /// Weather art with its top-left corner at (`x`, `y`)
    Icon { art: IconArt, x: i32, y: i32 },
}

impl DrawOp {
    pub(crate) fn text(text: &str, x: i32, y: i32, role: TextRole, paint: Paint) -> Self {
        let mut run = TextRun::new();
        for c in text.chars() {
            if run.push(c).is_err() {
                break;
            }
        }
        DrawOp::Text {
            text: run,
            x,
            y,
            role,
            paint,
        }
    }
}

/// One frame's worth of primitives, in paint order
pub type DrawList = Vec<DrawOp, MAX_OPS>;
