//! Face state and the redraw timer
//!
//! The timer governor is explicit and deterministic: its run state is a
//! pure function of visibility and ambient mode.

pub mod events;
pub mod face;
pub mod governor;

pub use events::Event;
pub use face::FaceState;
pub use governor::{tick_delay_ms, TickOutcome, TickToken, TimerGovernor, TimerState};
