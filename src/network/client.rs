//! Framed Client
//!
//! Owns the single TCP connection to the peer and speaks the
//! length-prefixed protocol over it.

use std::io::{BufWriter, ErrorKind, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Duration;

use crate::config::Config;
use crate::error::{FrameError, Result};
use crate::protocol::{write_frame, ByteOrder, Frame, FrameReader};

/// A connected client
///
/// At most one request is in flight at a time: after [`send`](Self::send),
/// the response must be taken with [`receive`](Self::receive) before the
/// next send. The socket is closed when the client is dropped.
pub struct FramedClient {
    /// Frame-assembling reader over the read half
    reader: FrameReader<TcpStream>,

    /// TCP stream writer (buffered so prefix and payload go out together)
    writer: BufWriter<TcpStream>,

    /// Byte order of the length prefix
    byte_order: ByteOrder,

    /// Set between a send and its matching receive
    in_flight: bool,

    /// Peer address for logging
    peer_addr: String,
}

impl FramedClient {
    /// Connect to the peer named by `config`
    ///
    /// Blocks until the connection is established or refused.
    pub fn connect(config: &Config) -> Result<Self> {
        config.validate()?;

        let addr = config.addr();
        tracing::debug!("Connecting to {}", addr);

        let stream = TcpStream::connect(&addr).map_err(|source| FrameError::Connect {
            addr: addr.clone(),
            source,
        })?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or(addr);

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::info!("Connected to {}", peer_addr);

        Ok(Self {
            reader: FrameReader::new(read_stream, config.byte_order, config.read_buffer_size),
            writer: BufWriter::new(write_stream),
            byte_order: config.byte_order,
            in_flight: false,
            peer_addr,
        })
    }

    /// Send one framed payload, blocking until it is fully written
    pub fn send(&mut self, payload: &[u8]) -> Result<()> {
        if self.in_flight {
            return Err(FrameError::RequestInFlight);
        }

        write_frame(&mut self.writer, payload, self.byte_order)?;
        self.in_flight = true;

        tracing::debug!("Sent {} byte frame to {}", payload.len(), self.peer_addr);
        Ok(())
    }

    /// Receive one framed response
    ///
    /// Returns `Ok(None)` if the peer closed the connection between frames.
    pub fn receive(&mut self) -> Result<Option<Frame>> {
        let frame = self.reader.read_frame()?;
        self.in_flight = false;

        match &frame {
            Some(frame) => tracing::debug!(
                "Received {} byte frame from {}",
                frame.declared_len(),
                self.peer_addr
            ),
            None => tracing::debug!("Peer {} closed the connection", self.peer_addr),
        }

        Ok(frame)
    }

    /// Send a payload and wait for its response
    pub fn request(&mut self, payload: &[u8]) -> Result<Option<Frame>> {
        self.send(payload)?;
        self.receive()
    }

    /// True while a sent request still awaits its response
    pub fn is_awaiting_response(&self) -> bool {
        self.in_flight
    }

    /// Byte order used for the length prefix
    pub fn byte_order(&self) -> ByteOrder {
        self.byte_order
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }

    /// Flush and shut down both directions of the connection
    pub fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        match self.writer.get_ref().shutdown(Shutdown::Both) {
            Ok(()) => {}
            // Peer already tore the connection down
            Err(e) if e.kind() == ErrorKind::NotConnected => {}
            Err(e) => return Err(e.into()),
        }

        tracing::debug!("Closed connection to {}", self.peer_addr);
        Ok(())
    }
}
