//! Frame reader
//!
//! Accumulates bytes from a stream until a whole frame is available.
//! TCP gives no guarantee that one read returns one frame: a prefix may
//! arrive without its payload, and one read may carry several frames.
//!
//! Parsing is a two-state machine:
//! - `WaitingForPrefix`: need 2 buffered bytes
//! - `WaitingForPayload`: prefix consumed, need `len` more bytes

use std::io::{ErrorKind, Read};

use bytes::BytesMut;

use crate::error::{FrameError, Result};
use super::frame::{ByteOrder, Frame, LENGTH_PREFIX_SIZE};

/// Parsing state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    WaitingForPrefix,
    WaitingForPayload { len: usize },
}

/// Buffering reader that yields complete frames
pub struct FrameReader<R> {
    /// Underlying byte stream
    inner: R,

    /// Bytes received but not yet consumed by a frame
    buffer: BytesMut,

    /// Scratch space for a single read, sized to the read ceiling
    chunk: Vec<u8>,

    /// Current parsing state
    state: State,

    /// Byte order of the length prefix
    order: ByteOrder,
}

impl<R: Read> FrameReader<R> {
    /// Create a reader issuing reads of at most `read_size` bytes
    pub fn new(inner: R, order: ByteOrder, read_size: usize) -> Self {
        let read_size = read_size.max(1);
        Self {
            inner,
            buffer: BytesMut::with_capacity(read_size),
            chunk: vec![0u8; read_size],
            state: State::WaitingForPrefix,
            order,
        }
    }

    /// Read the next complete frame
    ///
    /// Blocks until a frame is assembled. Returns `Ok(None)` if the stream
    /// ends cleanly between frames, and a decode error if it ends inside one.
    pub fn read_frame(&mut self) -> Result<Option<Frame>> {
        loop {
            if let Some(frame) = self.try_extract() {
                return Ok(Some(frame));
            }

            if self.fill()? == 0 {
                return self.end_of_stream();
            }
        }
    }

    /// Number of bytes buffered but not yet returned as a frame
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Byte order used for the length prefix
    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Reference to the underlying stream
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Pull one chunk from the stream into the buffer
    fn fill(&mut self) -> Result<usize> {
        let n = loop {
            match self.inner.read(&mut self.chunk) {
                Ok(n) => break n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(FrameError::Connection(e)),
            }
        };

        tracing::trace!("Read {} bytes ({} already buffered)", n, self.buffer.len());
        self.buffer.extend_from_slice(&self.chunk[..n]);
        Ok(n)
    }

    /// Try to take one frame out of the buffer
    fn try_extract(&mut self) -> Option<Frame> {
        if self.state == State::WaitingForPrefix {
            if self.buffer.len() < LENGTH_PREFIX_SIZE {
                return None;
            }
            let prefix = self.buffer.split_to(LENGTH_PREFIX_SIZE);
            let len = self.order.decode_len([prefix[0], prefix[1]]) as usize;
            self.state = State::WaitingForPayload { len };
        }

        let State::WaitingForPayload { len } = self.state else {
            return None;
        };
        if self.buffer.len() < len {
            return None;
        }

        let payload = self.buffer.split_to(len);
        self.state = State::WaitingForPrefix;
        Some(Frame::new(payload.to_vec()))
    }

    /// Classify a zero-byte read
    fn end_of_stream(&self) -> Result<Option<Frame>> {
        match self.state {
            State::WaitingForPrefix if self.buffer.is_empty() => Ok(None),
            State::WaitingForPrefix => Err(FrameError::Decode(format!(
                "Incomplete length prefix: expected {} bytes, got {}",
                LENGTH_PREFIX_SIZE,
                self.buffer.len()
            ))),
            State::WaitingForPayload { len } => Err(FrameError::Decode(format!(
                "Incomplete payload: expected {} bytes, got {}",
                len,
                self.buffer.len()
            ))),
        }
    }
}
