//! Render loop
//!
//! Turns time, settings and the weather snapshot into a [`DrawList`]. No
//! pixels are touched here; a display backend executes the list.

pub mod face;
pub mod ops;
pub mod paint;

pub use face::{render, Scene};
pub use ops::{DrawList, DrawOp, TextRun, MAX_OPS};
pub use paint::{Paint, Paints, TextRole};
