//! Protocol Module
//!
//! Defines the wire protocol spoken with the peer.
//!
//! ## Frame Format
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Len (2)  │         Payload             │
//! └──────────┴─────────────────────────────┘
//! ```
//!
//! - `Len`: unsigned 16-bit payload length, little-endian by default
//! - `Payload`: raw bytes, no tagging, checksums, or escaping
//!
//! ### Example
//! `"hi"` encodes as `02 00 68 69`.

mod frame;
mod codec;
mod reader;

pub use frame::{ByteOrder, Frame, LENGTH_PREFIX_SIZE, MAX_PAYLOAD_SIZE};
pub use codec::{encode_frame, decode_frame, write_frame};
pub use reader::FrameReader;
