//! Engine collaborators backed by Embassy and the RP2040
//!
//! - `UartCompanionLink` queues outbound messages for the UART writer
//! - `EmbassyTickScheduler` keeps the single pending tick deadline
//! - `RoscEntropy` draws request id bytes from the ring oscillator

use core::cell::Cell;

use embassy_rp::clocks::RoscRng;
use embassy_time::Instant;
use rand_core::RngCore;

use sunshine_core::state::TickToken;
use sunshine_core::traits::{CompanionLink, EntropySource, LinkError, TickScheduler};
use sunshine_protocol::data::Path;
use sunshine_protocol::{DataItem, WatchMessage};

use crate::channels::LINK_TX_CHANNEL;

/// Companion link over the framed UART
pub struct UartCompanionLink;

impl UartCompanionLink {
    fn send(&mut self, message: WatchMessage) -> Result<(), LinkError> {
        LINK_TX_CHANNEL
            .try_send(message)
            .map_err(|_| LinkError::QueueFull)
    }
}

fn path(path: &str) -> Result<Path, LinkError> {
    Path::try_from(path).map_err(|_| LinkError::Encode)
}

impl CompanionLink for UartCompanionLink {
    fn connect(&mut self) -> Result<(), LinkError> {
        self.send(WatchMessage::Connect)
    }

    fn disconnect(&mut self) -> Result<(), LinkError> {
        self.send(WatchMessage::Disconnect)
    }

    fn add_listener(&mut self, path_str: &str) -> Result<(), LinkError> {
        let path = path(path_str)?;
        self.send(WatchMessage::AddListener { path })
    }

    fn remove_listener(&mut self, path_str: &str) -> Result<(), LinkError> {
        let path = path(path_str)?;
        self.send(WatchMessage::RemoveListener { path })
    }

    fn put_data_item(&mut self, item: &DataItem) -> Result<(), LinkError> {
        self.send(WatchMessage::PutDataItem(item.clone()))
    }
}

/// Pending tick: its token and the uptime it comes due
#[derive(Clone, Copy)]
pub struct Due {
    pub token: TickToken,
    pub at: Instant,
}

/// Holds at most one deadline; the engine task sleeps until it
#[derive(Default)]
pub struct EmbassyTickScheduler {
    pending: Cell<Option<Due>>,
}

impl EmbassyTickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn due(&self) -> Option<Due> {
        self.pending.get()
    }

    /// Clear the deadline for `token`, if it is still the pending one
    pub fn clear(&self, token: TickToken) {
        if self.pending.get().map(|due| due.token) == Some(token) {
            self.pending.set(None);
        }
    }
}

impl TickScheduler for EmbassyTickScheduler {
    fn schedule(&mut self, token: TickToken, delay_ms: u32) {
        let at = Instant::now() + embassy_time::Duration::from_millis(delay_ms as u64);
        self.pending.set(Some(Due { token, at }));
    }

    fn cancel(&mut self, token: TickToken) {
        self.clear(token);
    }
}

/// Ring oscillator randomness
pub struct RoscEntropy(pub RoscRng);

impl EntropySource for RoscEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.fill_bytes(dest);
    }
}
