//! Wall clock
//!
//! The RP2040 has no battery-backed clock, so wall time is the build time
//! plus uptime. A companion could later correct it.

use embassy_time::Instant;

include!(concat!(env!("OUT_DIR"), "/build_time.rs"));

/// Current wall time in Unix milliseconds
pub fn now_ms() -> i64 {
    BUILD_EPOCH_MS + Instant::now().as_millis() as i64
}

