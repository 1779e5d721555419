//! Face layout
//!
//! Lines stack down from `y_offset`: time, date one line below, divider
//! one more line below, weather row two lines below the divider. Every
//! line is centered on the surface's horizontal midpoint using measured
//! text widths.

use super::ops::{DrawList, DrawOp};
use super::paint::{Paints, TextRole};
use crate::config::{FaceConfig, DIVIDER_HALF_WIDTH};
use crate::time::LocalTime;
use crate::traits::TextMetrics;
use crate::weather::WeatherSnapshot;

/// Inputs for one frame
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    /// Drawing surface width in pixels
    pub width: i32,
    pub now_ms: i64,
    pub utc_offset_s: i32,
    /// Read from host settings each frame
    pub is_24_hour: bool,
    pub ambient: bool,
    pub weather: &'a WeatherSnapshot,
    pub config: &'a FaceConfig,
    pub paints: &'a Paints,
}

/// Lay out one frame
pub fn render<M: TextMetrics>(scene: &Scene<'_>, metrics: &M) -> DrawList {
    let config = scene.config;
    let paints = scene.paints;
    let cx = scene.width / 2;
    let mut ops = DrawList::new();

    let background = if scene.ambient {
        config.palette.ambient_background
    } else {
        config.palette.background
    };
    push(&mut ops, DrawOp::Fill(background));

    let mut y = config.y_offset;

    // A bad zone offset falls back to UTC rather than blanking the clock
    let local = LocalTime::at(scene.now_ms, scene.utc_offset_s)
        .or_else(|| LocalTime::at(scene.now_ms, 0));

    if let Some(local) = local {
        let time = local.time_text(scene.is_24_hour);
        let time_w = metrics.text_width(&time, TextRole::Time);

        if scene.is_24_hour {
            let x = cx - time_w / 2;
            push(&mut ops, text(paints, &time, x, y, TextRole::Time));
        } else {
            let am_pm = if local.is_pm() {
                config.pm_label.as_str()
            } else {
                config.am_label.as_str()
            };
            let am_pm_w = metrics.text_width(am_pm, TextRole::AmPm);
            let x = cx - (time_w + config.space_width + am_pm_w) / 2;
            push(&mut ops, text(paints, &time, x, y, TextRole::Time));
            push(
                &mut ops,
                text(paints, am_pm, x + time_w + config.space_width, y, TextRole::AmPm),
            );
        }

        y += config.line_height;
        let date = local.date_text();
        let x = cx - metrics.text_width(&date, TextRole::Date) / 2;
        push(&mut ops, text(paints, &date, x, y, TextRole::Date));
    } else {
        y += config.line_height;
    }

    y += config.line_height;
    push(
        &mut ops,
        DrawOp::Line {
            x0: cx - DIVIDER_HALF_WIDTH,
            y0: y,
            x1: cx + DIVIDER_HALF_WIDTH,
            y1: y,
            paint: paints.divider(),
        },
    );

    y += 2 * config.line_height;
    if let Some((max, min)) = scene.weather.temperatures() {
        let max_w = metrics.text_width(max, TextRole::MaxTemp);
        let min_w = metrics.text_width(min, TextRole::MinTemp);
        let art = scene.weather.art().filter(|_| !scene.ambient);

        let mut block = max_w + config.space_width + min_w;
        if let Some(art) = art {
            block += art.width as i32 + config.space_width;
        }

        let mut x = cx - block / 2;
        if let Some(art) = art {
            push(
                &mut ops,
                DrawOp::Icon {
                    art,
                    x,
                    y: y - art.height as i32,
                },
            );
            x += art.width as i32 + config.space_width;
        }
        push(&mut ops, text(paints, max, x, y, TextRole::MaxTemp));
        push(
            &mut ops,
            text(paints, min, x + max_w + config.space_width, y, TextRole::MinTemp),
        );
    }

    ops
}

fn text(paints: &Paints, s: &str, x: i32, y: i32, role: TextRole) -> DrawOp {
    DrawOp::text(s, x, y, role, paints.for_role(role))
}

fn push(ops: &mut DrawList, op: DrawOp) {
    // Capacity covers the fullest frame
    let _ = ops.push(op);
}
