//! Frame definitions
//!
//! A frame is a 2-byte length prefix followed by that many payload bytes.

use std::borrow::Cow;

/// Size of the length prefix in bytes
pub const LENGTH_PREFIX_SIZE: usize = 2;

/// Largest payload a 2-byte prefix can describe
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

/// Byte order of the length prefix on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    /// Least significant byte first (`"hi"` -> `02 00 68 69`)
    #[default]
    LittleEndian,

    /// Network byte order (`"hi"` -> `00 02 68 69`)
    BigEndian,
}

impl ByteOrder {
    /// Encode a payload length as a prefix
    pub fn encode_len(self, len: u16) -> [u8; LENGTH_PREFIX_SIZE] {
        match self {
            ByteOrder::LittleEndian => len.to_le_bytes(),
            ByteOrder::BigEndian => len.to_be_bytes(),
        }
    }

    /// Decode a prefix into a payload length
    pub fn decode_len(self, prefix: [u8; LENGTH_PREFIX_SIZE]) -> u16 {
        match self {
            ByteOrder::LittleEndian => u16::from_le_bytes(prefix),
            ByteOrder::BigEndian => u16::from_be_bytes(prefix),
        }
    }
}

/// A decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Payload bytes; always exactly as long as the length field said
    payload: Vec<u8>,
}

impl Frame {
    /// Create a frame from payload bytes
    ///
    /// Callers are responsible for keeping the payload within
    /// [`MAX_PAYLOAD_SIZE`]; the codec enforces it when encoding.
    pub fn new(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Value of the length field this frame was (or will be) sent with
    pub fn declared_len(&self) -> usize {
        self.payload.len()
    }

    /// Raw payload bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Payload rendered as text, replacing invalid UTF-8 sequences
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.payload)
    }

    /// Consume the frame, returning the payload
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}
