//! Display backend for the Sunshine watch face
//!
//! This crate provides:
//! - `FontSet` mapping each text role to a ProFont size, which also serves
//!   as the engine's `TextMetrics`
//! - `draw_frame` executing a `DrawList` on any `embedded-graphics` target
//! - Procedural weather icons drawn from primitives
//!
//! # Architecture
//!
//! The engine lays out a frame as a list of primitives with no notion of
//! pixels formats or fonts. This crate is the only place that turns that
//! list into pixels, so the same layout runs on the ST7789 panel and on a
//! host-side test target.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod fonts;
pub mod frame;
pub mod icons;

pub use fonts::FontSet;
pub use frame::draw_frame;
