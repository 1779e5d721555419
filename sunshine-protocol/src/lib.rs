//! Sunshine Companion Link Protocol
//!
//! This crate defines the UART link between the watch MCU and the companion
//! bridge (the radio side that talks to the paired phone). The bridge exposes
//! the phone's key/value data layer as a handful of messages: connect,
//! subscribe to a path, publish a data item, and change notifications.
//!
//! # Protocol Overview
//!
//! All messages use a simple binary frame format:
//! ```text
//! ┌───────┬────────┬──────┬─────────────┬──────────┐
//! │ START │ LENGTH │ KIND │ PAYLOAD     │ CHECKSUM │
//! │ 1B    │ 1B     │ 1B   │ 0–250B      │ 1B       │
//! └───────┴────────┴──────┴─────────────┴──────────┘
//! ```
//!
//! Data items travel as `postcard`-encoded payloads. The link is best
//! effort: nothing here retries or acknowledges beyond `PutResult`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod data;
pub mod events;
pub mod frame;
pub mod messages;

pub use data::{
    DataError, DataItem, DataMap, Key, Path, Text, Value, KEY_MAX_TEMP, KEY_MIN_TEMP, KEY_UUID,
    KEY_WEATHER_ID, WEATHER_PATH,
};
pub use events::{DataEvent, DataEventKind};
pub use frame::{Frame, FrameError, FrameParser, FRAME_START, MAX_PAYLOAD_SIZE};
pub use messages::{BridgeMessage, WatchMessage};
