//! Message kinds for the companion link
//!
//! Message kinds are divided into two categories:
//! - Watch → Bridge: connection control, subscriptions, publishes
//! - Bridge → Watch: connection lifecycle, data changes, publish results

use heapless::String;
use serde::{de::DeserializeOwned, Serialize};

use crate::data::{DataItem, Path};
use crate::events::DataEvent;
use crate::frame::{Frame, FrameError, MAX_PAYLOAD_SIZE};

// Message kinds: Watch → Bridge
pub const MSG_CONNECT: u8 = 0x01;
pub const MSG_DISCONNECT: u8 = 0x02;
pub const MSG_ADD_LISTENER: u8 = 0x03;
pub const MSG_REMOVE_LISTENER: u8 = 0x04;
pub const MSG_PUT_DATA_ITEM: u8 = 0x05;

// Message kinds: Bridge → Watch
pub const MSG_CONNECTED: u8 = 0x40;
pub const MSG_CONNECTION_SUSPENDED: u8 = 0x41;
pub const MSG_CONNECTION_FAILED: u8 = 0x42;
pub const MSG_DATA_CHANGED: u8 = 0x43;
pub const MSG_PUT_RESULT: u8 = 0x44;

fn encode_payload<T: Serialize>(kind: u8, value: &T) -> Result<Frame, FrameError> {
    let mut buf = [0u8; MAX_PAYLOAD_SIZE];
    let used = postcard::to_slice(value, &mut buf).map_err(|_| FrameError::PayloadTooLarge)?;
    Frame::new(kind, used)
}

fn decode_payload<T: DeserializeOwned>(frame: &Frame) -> Result<T, FrameError> {
    postcard::from_bytes(&frame.payload).map_err(|_| FrameError::InvalidFrame)
}

fn item_frame(kind: u8, item: &DataItem) -> Result<Frame, FrameError> {
    let mut buf = [0u8; MAX_PAYLOAD_SIZE];
    let used = item.encode(&mut buf).map_err(|_| FrameError::PayloadTooLarge)?;
    Frame::new(kind, used)
}

fn item_from(frame: &Frame) -> Result<DataItem, FrameError> {
    DataItem::decode(&frame.payload).map_err(|_| FrameError::InvalidFrame)
}

fn path_frame(kind: u8, path: &Path) -> Result<Frame, FrameError> {
    Frame::new(kind, path.as_bytes())
}

fn path_from(frame: &Frame) -> Result<Path, FrameError> {
    let text = core::str::from_utf8(&frame.payload).map_err(|_| FrameError::InvalidFrame)?;
    String::try_from(text).map_err(|_| FrameError::InvalidFrame)
}

/// Requests from the watch to the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WatchMessage {
    /// Open the data layer connection
    Connect,
    Disconnect,
    /// Start forwarding changes under a path
    AddListener { path: Path },
    RemoveListener { path: Path },
    /// Publish an item; the bridge answers with `PutResult`
    PutDataItem(DataItem),
}

impl WatchMessage {
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            WatchMessage::Connect => Ok(Frame::empty(MSG_CONNECT)),
            WatchMessage::Disconnect => Ok(Frame::empty(MSG_DISCONNECT)),
            WatchMessage::AddListener { path } => path_frame(MSG_ADD_LISTENER, path),
            WatchMessage::RemoveListener { path } => path_frame(MSG_REMOVE_LISTENER, path),
            WatchMessage::PutDataItem(item) => item_frame(MSG_PUT_DATA_ITEM, item),
        }
    }

    /// Parse a watch request (bridge side and tests)
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.kind {
            MSG_CONNECT => Ok(WatchMessage::Connect),
            MSG_DISCONNECT => Ok(WatchMessage::Disconnect),
            MSG_ADD_LISTENER => Ok(WatchMessage::AddListener {
                path: path_from(frame)?,
            }),
            MSG_REMOVE_LISTENER => Ok(WatchMessage::RemoveListener {
                path: path_from(frame)?,
            }),
            MSG_PUT_DATA_ITEM => item_from(frame).map(WatchMessage::PutDataItem),
            _ => Err(FrameError::InvalidFrame),
        }
    }
}

/// Notifications from the bridge to the watch
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeMessage {
    Connected,
    /// Link dropped; the bridge will reconnect on its own
    ConnectionSuspended,
    /// Connect attempt failed with a bridge-specific code
    ConnectionFailed { code: u8 },
    DataChanged(DataEvent),
    PutResult { ok: bool },
}

impl BridgeMessage {
    pub fn from_frame(frame: &Frame) -> Result<Self, FrameError> {
        match frame.kind {
            MSG_CONNECTED => Ok(BridgeMessage::Connected),
            MSG_CONNECTION_SUSPENDED => Ok(BridgeMessage::ConnectionSuspended),
            MSG_CONNECTION_FAILED => {
                let code = *frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                Ok(BridgeMessage::ConnectionFailed { code })
            }
            MSG_DATA_CHANGED => decode_payload(frame).map(BridgeMessage::DataChanged),
            MSG_PUT_RESULT => {
                let ok = *frame.payload.first().ok_or(FrameError::InvalidFrame)?;
                Ok(BridgeMessage::PutResult { ok: ok != 0 })
            }
            _ => Err(FrameError::InvalidFrame),
        }
    }

    /// Encode a notification (bridge side and tests)
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        match self {
            BridgeMessage::Connected => Ok(Frame::empty(MSG_CONNECTED)),
            BridgeMessage::ConnectionSuspended => Ok(Frame::empty(MSG_CONNECTION_SUSPENDED)),
            BridgeMessage::ConnectionFailed { code } => Frame::new(MSG_CONNECTION_FAILED, &[*code]),
            BridgeMessage::DataChanged(event) => encode_payload(MSG_DATA_CHANGED, event),
            BridgeMessage::PutResult { ok } => Frame::new(MSG_PUT_RESULT, &[*ok as u8]),
        }
    }
}
