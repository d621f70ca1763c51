//! Error types for framelink
//!
//! Two failure kinds matter to callers: connection failures (connect,
//! send, receive) and decode failures (malformed or truncated frames).
//! Nothing in the crate recovers from either; they propagate to the caller.

use thiserror::Error;

/// Result type alias using FrameError
pub type Result<T> = std::result::Result<T, FrameError>;

/// Unified error type for framelink operations
#[derive(Debug, Error)]
pub enum FrameError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Connection error: {0}")]
    Connection(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Frame Errors
    // -------------------------------------------------------------------------
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Payload too large: {size} bytes (max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    #[error("A request is already in flight; receive its response before sending again")]
    RequestInFlight,

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("Terminal I/O error: {0}")]
    Terminal(#[source] std::io::Error),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FrameError {
    /// True for failures of the underlying socket (connect, send, receive)
    pub fn is_connection(&self) -> bool {
        matches!(self, FrameError::Connect { .. } | FrameError::Connection(_))
    }

    /// True for malformed or truncated frames
    pub fn is_decode(&self) -> bool {
        matches!(self, FrameError::Decode(_))
    }
}
