//! Inter-task communication channels
//!
//! Every engine input funnels through `EVENT_CHANNEL` so the engine task
//! is the single sequencing context. Outbound link messages queue on
//! `LINK_TX_CHANNEL` for the UART writer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use sunshine_core::state::Event;
use sunshine_protocol::WatchMessage;

/// Channel capacity for engine events
const EVENT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outbound link messages
const LINK_TX_CHANNEL_SIZE: usize = 4;

/// Host and link events for the engine
pub static EVENT_CHANNEL: Channel<CriticalSectionRawMutex, Event, EVENT_CHANNEL_SIZE> =
    Channel::new();

/// Messages for the companion
pub static LINK_TX_CHANNEL: Channel<CriticalSectionRawMutex, WatchMessage, LINK_TX_CHANNEL_SIZE> =
    Channel::new();

