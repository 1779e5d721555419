//! Board-agnostic watch face engine
//!
//! This crate contains all watch face logic that does not depend on a
//! specific panel, radio or clock:
//!
//! - Face state and the redraw timer governor
//! - Weather snapshot, icon table and companion sync
//! - Render loop producing a display-independent draw list
//! - Capability traits the firmware implements (tick scheduling, companion
//!   link, entropy, text metrics)
//! - Layout and palette configuration

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod engine;
pub mod render;
pub mod state;
pub mod sync;
pub mod time;
pub mod traits;
pub mod weather;

pub use engine::{Notice, Response, WatchFaceEngine};
