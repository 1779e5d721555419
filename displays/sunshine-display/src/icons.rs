//! Weather icons drawn from primitives
//!
//! Each icon is laid out on a percentage grid over its target box, so art
//! scales to whatever size the engine picked. Round parts are sized from
//! the box height to stay round in wide boxes.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle};
use sunshine_core::weather::{IconArt, WeatherIcon};

pub(crate) const SUN: Rgb888 = Rgb888::new(0xFF, 0xD5, 0x4F);
pub(crate) const CLOUD: Rgb888 = Rgb888::new(0xEC, 0xEF, 0xF1);
pub(crate) const STORM_CLOUD: Rgb888 = Rgb888::new(0x90, 0xA4, 0xAE);
pub(crate) const RAIN: Rgb888 = Rgb888::new(0x4F, 0xC3, 0xF7);
pub(crate) const SNOW: Rgb888 = Rgb888::WHITE;
pub(crate) const FOG: Rgb888 = Rgb888::new(0xCF, 0xD8, 0xDC);

/// Target box for one icon
struct Grid {
    origin: Point,
    w: i32,
    h: i32,
}

impl Grid {
    /// Point at `u`% across and `v`% down
    fn at(&self, u: i32, v: i32) -> Point {
        self.origin + Point::new(self.w * u / 100, self.h * v / 100)
    }

    /// `pct`% of the box height, at least one pixel
    fn span(&self, pct: i32) -> u32 {
        (self.h * pct / 100).max(1) as u32
    }
}

fn fill<C: PixelColor + From<Rgb888>>(color: Rgb888) -> PrimitiveStyle<C> {
    PrimitiveStyle::with_fill(color.into())
}

fn stroke<C: PixelColor + From<Rgb888>>(color: Rgb888, width: u32) -> PrimitiveStyle<C> {
    PrimitiveStyle::with_stroke(color.into(), width)
}

/// Draw `art` with its top-left corner at `top_left`
pub fn draw_icon<D>(target: &mut D, art: &IconArt, top_left: Point) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let grid = Grid {
        origin: top_left,
        w: art.width as i32,
        h: art.height as i32,
    };
    let line = grid.span(8);

    match art.icon {
        WeatherIcon::Clear => sun(target, &grid, grid.at(50, 50), 56),
        WeatherIcon::LightClouds => {
            sun(target, &grid, grid.at(35, 35), 44)?;
            cloud(target, &grid, 30, CLOUD)
        }
        WeatherIcon::Clouds => cloud(target, &grid, 15, CLOUD),
        WeatherIcon::LightRain => {
            cloud(target, &grid, 0, CLOUD)?;
            for u in [35, 65] {
                streak(target, &grid, u, line)?;
            }
            Ok(())
        }
        WeatherIcon::Rain => {
            cloud(target, &grid, 0, CLOUD)?;
            for u in [25, 50, 75] {
                streak(target, &grid, u, line)?;
            }
            Ok(())
        }
        WeatherIcon::Snow => {
            cloud(target, &grid, 0, CLOUD)?;
            let flake = grid.span(14);
            for (u, v) in [(25, 80), (50, 90), (75, 80)] {
                Circle::with_center(grid.at(u, v), flake)
                    .into_styled(fill(SNOW))
                    .draw(target)?;
            }
            Ok(())
        }
        WeatherIcon::Storm => {
            cloud(target, &grid, 0, STORM_CLOUD)?;
            Triangle::new(grid.at(55, 55), grid.at(38, 82), grid.at(52, 82))
                .into_styled(fill(SUN))
                .draw(target)?;
            Triangle::new(grid.at(48, 78), grid.at(62, 78), grid.at(42, 100))
                .into_styled(fill(SUN))
                .draw(target)
        }
        WeatherIcon::Fog => {
            let band = grid.span(10);
            for (v, inset) in [(30, 5), (55, 15), (80, 5)] {
                Line::new(grid.at(inset, v), grid.at(100 - inset, v))
                    .into_styled(stroke(FOG, band))
                    .draw(target)?;
            }
            Ok(())
        }
    }
}

/// Disc with four rays
fn sun<D>(target: &mut D, grid: &Grid, center: Point, pct: i32) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let diameter = grid.span(pct);
    Circle::with_center(center, diameter)
        .into_styled(fill(SUN))
        .draw(target)?;

    let reach = diameter as i32 * 3 / 4;
    let ray = stroke(SUN, grid.span(6));
    for (dx, dy) in [(reach, 0), (-reach, 0), (0, reach), (0, -reach)] {
        let inner = Point::new(dx * 2 / 3, dy * 2 / 3);
        Line::new(center + inner, center + Point::new(dx, dy))
            .into_styled(ray)
            .draw(target)?;
    }
    Ok(())
}

/// Two puffs on a flat base. `drop_pct` pushes the cloud down the box.
fn cloud<D>(target: &mut D, grid: &Grid, drop_pct: i32, color: Rgb888) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    let style = fill(color);
    let v = |pct: i32| pct + drop_pct * (100 - pct) / 100;

    Circle::with_center(grid.at(35, v(40)), grid.span(44))
        .into_styled(style)
        .draw(target)?;
    Circle::with_center(grid.at(62, v(32)), grid.span(56))
        .into_styled(style)
        .draw(target)?;

    let top_left = grid.at(15, v(40));
    let bottom_right = grid.at(85, v(60));
    Rectangle::with_corners(top_left, bottom_right)
        .into_styled(style)
        .draw(target)
}

/// Slanted rain streak under the cloud
fn streak<D>(target: &mut D, grid: &Grid, u: i32, width: u32) -> Result<(), D::Error>
where
    D: DrawTarget,
    D::Color: From<Rgb888>,
{
    Line::new(grid.at(u + 5, 70), grid.at(u - 5, 95))
        .into_styled(stroke(RAIN, width))
        .draw(target)
}
