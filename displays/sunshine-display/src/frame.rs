//! Draw list execution

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use sunshine_core::config::Color;
use sunshine_core::render::{DrawList, DrawOp, Paint};

use crate::fonts::FontSet;
use crate::icons::draw_icon;

fn rgb(color: Color) -> Rgb888 {
    Rgb888::new(color.r, color.g, color.b)
}

/// Panel color for a paint. Crisp paints snap to one bit per channel.
fn paint_color<C: From<Rgb888>>(paint: &Paint) -> C {
    let color = if paint.anti_alias {
        paint.color
    } else {
        paint.color.one_bit()
    };
    rgb(color).into()
}

/// Paint `ops` onto `target` in order
pub fn draw_frame<D>(target: &mut D, ops: &DrawList, fonts: &FontSet) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    for op in ops {
        match op {
            DrawOp::Fill(color) => target.clear(rgb(*color).into())?,
            DrawOp::Text {
                text,
                x,
                y,
                role,
                paint,
            } => {
                let style = MonoTextStyle::new(fonts.for_role(*role), paint_color(paint));
                Text::with_baseline(text.as_str(), Point::new(*x, *y), style, Baseline::Alphabetic)
                    .draw(target)?;
            }
            DrawOp::Line {
                x0,
                y0,
                x1,
                y1,
                paint,
            } => {
                Line::new(Point::new(*x0, *y0), Point::new(*x1, *y1))
                    .into_styled(PrimitiveStyle::with_stroke(paint_color(paint), 1))
                    .draw(target)?;
            }
            DrawOp::Icon { art, x, y } => draw_icon(target, art, Point::new(*x, *y))?,
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::icons::RAIN;
    use core::convert::Infallible;
    use std::collections::HashMap;
    use sunshine_core::config::{FaceConfig, Palette, Shape};
    use sunshine_core::render::{render, Paints, Scene};
    use sunshine_core::weather::{WeatherSnapshot, WeatherUpdate};
    use sunshine_protocol::{DataMap, KEY_MAX_TEMP, KEY_MIN_TEMP, KEY_WEATHER_ID};

    pub(crate) const SIZE: u32 = 240;

    /// Host-side target that remembers the last color of every pixel
    pub(crate) struct Canvas {
        pixels: HashMap<Point, Rgb888>,
    }

    impl Canvas {
        pub(crate) fn new() -> Self {
            Self {
                pixels: HashMap::new(),
            }
        }

        pub(crate) fn painted(&self) -> usize {
            self.pixels.len()
        }

        pub(crate) fn pixels(&self) -> impl Iterator<Item = Point> + '_ {
            self.pixels.keys().copied()
        }

        pub(crate) fn count(&self, color: Rgb888) -> usize {
            self.pixels.values().filter(|c| **c == color).count()
        }

        pub(crate) fn at(&self, point: Point) -> Option<Rgb888> {
            self.pixels.get(&point).copied()
        }
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size {
            Size::new(SIZE, SIZE)
        }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb888;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            let area = self.bounding_box();
            for Pixel(point, color) in pixels {
                if area.contains(point) {
                    self.pixels.insert(point, color);
                }
            }
            Ok(())
        }
    }

    fn rainy() -> WeatherSnapshot {
        let mut map = DataMap::new();
        map.put_int(KEY_WEATHER_ID, 501).unwrap();
        map.put_text(KEY_MAX_TEMP, "21°").unwrap();
        map.put_text(KEY_MIN_TEMP, "12°").unwrap();

        let mut snapshot = WeatherSnapshot::new();
        snapshot.apply(&WeatherUpdate::from_map(&map), 18);
        snapshot
    }

    fn draw(ambient: bool, weather: &WeatherSnapshot, paints: &Paints) -> Canvas {
        let config = FaceConfig::for_shape(Shape::Square);
        let scene = Scene {
            width: SIZE as i32,
            // Fri 2026-10-16 21:05:09.250 UTC
            now_ms: 1_792_184_709_250,
            utc_offset_s: 0,
            is_24_hour: true,
            ambient,
            weather,
            config: &config,
            paints,
        };
        let fonts = FontSet::for_config(&config);
        let ops = render(&scene, &fonts);
        let mut canvas = Canvas::new();
        draw_frame(&mut canvas, &ops, &fonts).unwrap();
        canvas
    }

    #[test]
    fn test_interactive_frame_has_background_text_and_icon() {
        let palette = Palette::default();
        let canvas = draw(false, &rainy(), &Paints::new(&palette));

        assert_eq!(canvas.painted(), (SIZE * SIZE) as usize);
        assert!(canvas.count(rgb(palette.primary_text)) > 0);
        assert!(canvas.count(rgb(palette.secondary_text)) > 0);
        assert!(canvas.count(RAIN) > 0);
    }

    #[test]
    fn test_ambient_frame_is_black_without_icon() {
        let palette = Palette::default();
        let canvas = draw(true, &rainy(), &Paints::new(&palette));

        assert_eq!(canvas.at(Point::new(0, 0)), Some(Rgb888::BLACK));
        assert_eq!(canvas.count(RAIN), 0);
        assert!(canvas.count(rgb(palette.primary_text)) > 0);
    }

    #[test]
    fn test_crisp_paint_snaps_secondary_text() {
        let palette = Palette::default();
        let mut paints = Paints::new(&palette);
        paints.set_anti_alias(false);
        let canvas = draw(true, &WeatherSnapshot::new(), &paints);

        assert_eq!(canvas.count(rgb(palette.secondary_text)), 0);
        assert!(canvas.count(Rgb888::WHITE) > 0);
    }

    #[test]
    fn test_divider_spans_its_half_width() {
        let palette = Palette::default();
        let config = FaceConfig::for_shape(Shape::Square);
        let canvas = draw(true, &WeatherSnapshot::new(), &Paints::new(&palette));

        let y = config.y_offset + 2 * config.line_height;
        let cx = SIZE as i32 / 2;
        let divider = rgb(palette.secondary_text);
        assert_eq!(canvas.at(Point::new(cx - 20, y)), Some(divider));
        assert_eq!(canvas.at(Point::new(cx + 20, y)), Some(divider));
        assert_eq!(canvas.at(Point::new(cx + 21, y)), Some(Rgb888::BLACK));
    }
}
