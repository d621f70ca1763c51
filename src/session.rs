//! Interactive Session
//!
//! The operator loop: read a line, send it framed, print the response.
//!
//! ## States
//! ```text
//!            non-empty line: send
//!   ┌──────────────┐ ───────────────▶ ┌──────────────────┐
//!   │AwaitingInput │                  │ AwaitingResponse │
//!   └──────┬───────┘ ◀─────────────── └────────┬─────────┘
//!          │          response: print          │
//!          ▼                                   ▼
//!   empty line / EOF: done             peer closed: done
//! ```
//!
//! Errors are never retried; they end the session.

use std::io::{self, BufRead, Write};

use crate::error::{FrameError, Result};
use crate::network::FramedClient;
use crate::protocol::Frame;

/// Prompt written before each line is read
pub const PROMPT: &str = ">";

/// Where the loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    AwaitingInput,
    AwaitingResponse,
}

/// Outcome of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    /// Completed request/response exchanges
    pub exchanges: usize,

    /// True if the session ended because the peer closed the connection
    pub peer_closed: bool,
}

/// Drives one client from a line source to an output sink
pub struct Session<'a, R, W> {
    client: &'a mut FramedClient,
    input: R,
    output: W,
    state: SessionState,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(client: &'a mut FramedClient, input: R, output: W) -> Self {
        Self {
            client,
            input,
            output,
            state: SessionState::AwaitingInput,
        }
    }

    /// Current state of the loop
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run until an empty line, end of input, or peer close
    pub fn run(mut self) -> Result<SessionSummary> {
        let mut summary = SessionSummary {
            exchanges: 0,
            peer_closed: false,
        };
        let mut line = Vec::new();

        loop {
            match self.state {
                SessionState::AwaitingInput => {
                    let Some(payload) = self.prompt(&mut line)? else {
                        tracing::debug!("Empty input, ending session");
                        return Ok(summary);
                    };

                    self.client.send(payload)?;
                    self.state = SessionState::AwaitingResponse;
                }
                SessionState::AwaitingResponse => match self.client.receive()? {
                    Some(frame) => {
                        self.print_frame(&frame).map_err(FrameError::Terminal)?;
                        summary.exchanges += 1;
                        self.state = SessionState::AwaitingInput;
                    }
                    None => {
                        tracing::warn!("Peer {} closed the connection", self.client.peer_addr());
                        summary.peer_closed = true;
                        return Ok(summary);
                    }
                },
            }
        }
    }

    /// Show the prompt and read one line as raw bytes
    ///
    /// Input need not be UTF-8. Returns `None` on an empty line or end of input.
    fn prompt<'l>(&mut self, line: &'l mut Vec<u8>) -> Result<Option<&'l [u8]>> {
        write!(self.output, "{}", PROMPT).map_err(FrameError::Terminal)?;
        self.output.flush().map_err(FrameError::Terminal)?;

        line.clear();
        let n = self.input.read_until(b'\n', line).map_err(FrameError::Terminal)?;
        if n == 0 {
            return Ok(None);
        }

        let payload = strip_line_ending(line);
        if payload.is_empty() {
            Ok(None)
        } else {
            Ok(Some(payload))
        }
    }

    /// Write the payload bytes untouched, then the declared length
    fn print_frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.output.write_all(frame.payload())?;
        writeln!(self.output, " len: {}", frame.declared_len())
    }
}

/// Drop one trailing `\n` or `\r\n`
fn strip_line_ending(line: &[u8]) -> &[u8] {
    match line.strip_suffix(b"\n") {
        Some(line) => line.strip_suffix(b"\r").unwrap_or(line),
        None => line,
    }
}
