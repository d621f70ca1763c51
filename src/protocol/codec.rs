//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Len (2)  │         Payload             │
//! └──────────┴─────────────────────────────┘
//! ```
//!
//! `Len` is the payload length in the configured [`ByteOrder`].

use std::io::Write;

use crate::error::{FrameError, Result};
use super::frame::{ByteOrder, Frame, LENGTH_PREFIX_SIZE, MAX_PAYLOAD_SIZE};

// =============================================================================
// Frame Encoding/Decoding
// =============================================================================

/// Encode a payload into a frame
///
/// Format: payload_len (2) + payload
pub fn encode_frame(payload: &[u8], order: ByteOrder) -> Result<Vec<u8>> {
    let len = payload_len(payload)?;

    let mut message = Vec::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    message.extend_from_slice(&order.encode_len(len));
    message.extend_from_slice(payload);

    Ok(message)
}

/// Decode one frame from the start of `bytes`
///
/// Returns the frame and the number of bytes consumed. Trailing bytes
/// beyond the frame are left for the caller.
pub fn decode_frame(bytes: &[u8], order: ByteOrder) -> Result<(Frame, usize)> {
    if bytes.len() < LENGTH_PREFIX_SIZE {
        return Err(FrameError::Decode(format!(
            "Incomplete length prefix: expected {} bytes, got {}",
            LENGTH_PREFIX_SIZE,
            bytes.len()
        )));
    }

    let payload_len = order.decode_len([bytes[0], bytes[1]]) as usize;

    let total_len = LENGTH_PREFIX_SIZE + payload_len;
    if bytes.len() < total_len {
        return Err(FrameError::Decode(format!(
            "Incomplete payload: expected {} bytes, got {}",
            payload_len,
            bytes.len() - LENGTH_PREFIX_SIZE
        )));
    }

    let frame = Frame::new(&bytes[LENGTH_PREFIX_SIZE..total_len]);
    Ok((frame, total_len))
}

/// Length of a payload as a prefix value
fn payload_len(payload: &[u8]) -> Result<u16> {
    u16::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: MAX_PAYLOAD_SIZE,
    })
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write a framed payload to a stream
///
/// Writes the prefix and payload in full, then flushes.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[u8], order: ByteOrder) -> Result<()> {
    let bytes = encode_frame(payload, order)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
