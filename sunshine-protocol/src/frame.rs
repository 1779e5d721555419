//! Frame encoding and decoding for the companion link.
//!
//! Frame format:
//! - START (1 byte): 0x5A synchronization byte
//! - LENGTH (1 byte): payload length (0-250)
//! - KIND (1 byte): message kind identifier
//! - PAYLOAD (0-250 bytes): kind-specific data
//! - CHECKSUM (1 byte): XOR of LENGTH, KIND, and all PAYLOAD bytes

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = 0x5A;

/// Maximum payload size in bytes
pub const MAX_PAYLOAD_SIZE: usize = 250;

/// START + LENGTH + KIND + CHECKSUM
const FRAME_OVERHEAD: usize = 4;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = MAX_PAYLOAD_SIZE + FRAME_OVERHEAD;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Checksum mismatch
    InvalidChecksum,
    /// Frame is incomplete (need more bytes)
    Incomplete,
    /// Unknown kind or a payload that does not decode
    InvalidFrame,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// A parsed or constructed frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: u8,
    pub payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    pub fn new(kind: u8, payload: &[u8]) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLarge)?;
        Ok(Self { kind, payload })
    }

    /// A frame that carries only its kind
    pub fn empty(kind: u8) -> Self {
        Self {
            kind,
            payload: Vec::new(),
        }
    }

    fn checksum(length: u8, kind: u8, payload: &[u8]) -> u8 {
        payload.iter().fold(length ^ kind, |acc, b| acc ^ b)
    }

    /// Number of bytes this frame occupies on the wire
    pub fn encoded_len(&self) -> usize {
        self.payload.len() + FRAME_OVERHEAD
    }

    /// Encode this frame into `buffer`, returning the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        let out = buffer.get_mut(..len).ok_or(FrameError::BufferTooSmall)?;

        let length = self.payload.len() as u8;
        let (header, rest) = out.split_at_mut(3);
        header.copy_from_slice(&[FRAME_START, length, self.kind]);

        let (body, tail) = rest.split_at_mut(self.payload.len());
        body.copy_from_slice(&self.payload);
        tail[0] = Self::checksum(length, self.kind, &self.payload);

        Ok(len)
    }

    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut out = Vec::new();
        out.resize_default(self.encoded_len())
            .map_err(|_| FrameError::BufferTooSmall)?;
        self.encode(&mut out)?;
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Sync,
    Length,
    Kind,
    Payload,
    Checksum,
}

/// Streaming parser that pulls frames out of a UART byte stream.
///
/// Bytes before a START marker are dropped, so the parser resynchronizes
/// on its own after line noise or a corrupted frame.
#[derive(Debug, Clone)]
pub struct FrameParser {
    state: ParseState,
    length: u8,
    kind: u8,
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Default for FrameParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Sync,
            length: 0,
            kind: 0,
            payload: Vec::new(),
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed a single byte to the parser
    ///
    /// Returns `Ok(Some(frame))` when a complete valid frame is parsed,
    /// `Ok(None)` when more bytes are needed, or `Err` on parse error.
    /// After an error the parser is back to hunting for START.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Frame>, FrameError> {
        match self.state {
            ParseState::Sync => {
                if byte == FRAME_START {
                    self.state = ParseState::Length;
                }
            }
            ParseState::Length => {
                if byte as usize > MAX_PAYLOAD_SIZE {
                    self.reset();
                    return Err(FrameError::InvalidFrame);
                }
                self.length = byte;
                self.state = ParseState::Kind;
            }
            ParseState::Kind => {
                self.kind = byte;
                self.payload.clear();
                self.state = if self.length == 0 {
                    ParseState::Checksum
                } else {
                    ParseState::Payload
                };
            }
            ParseState::Payload => {
                // Length was bounded when it was read
                let _ = self.payload.push(byte);
                if self.payload.len() == self.length as usize {
                    self.state = ParseState::Checksum;
                }
            }
            ParseState::Checksum => {
                let expected = Frame::checksum(self.length, self.kind, &self.payload);
                let frame = Frame {
                    kind: self.kind,
                    payload: core::mem::take(&mut self.payload),
                };
                self.reset();

                if byte != expected {
                    return Err(FrameError::InvalidChecksum);
                }
                return Ok(Some(frame));
            }
        }
        Ok(None)
    }

    /// Feed a chunk of bytes, stopping at the first complete frame.
    ///
    /// Returns the frame (if any) and how many bytes were consumed, so the
    /// caller can feed the remainder of the chunk afterwards.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> (Result<Option<Frame>, FrameError>, usize) {
        for (i, &byte) in bytes.iter().enumerate() {
            match self.feed(byte) {
                Ok(None) => {}
                other => return (other, i + 1),
            }
        }
        (Ok(None), bytes.len())
    }
}
