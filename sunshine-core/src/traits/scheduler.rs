//! Deferred tick delivery

use crate::state::TickToken;

/// Posts a tick back to the engine after a delay.
///
/// The host delivers it later as `Event::Tick(token)` on the same
/// sequencing context as every other event.
pub trait TickScheduler {
    fn schedule(&mut self, token: TickToken, delay_ms: u32);

    /// Drop a scheduled tick. Cancelling an unknown or delivered token is
    /// a no-op.
    fn cancel(&mut self, token: TickToken);
}
