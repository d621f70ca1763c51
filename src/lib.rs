//! # framelink
//!
//! An interactive TCP client for a length-prefixed framing protocol:
//! - 2-byte length prefix (little-endian by default) + raw payload
//! - Buffering reader that only decodes whole frames
//! - One blocking connection, one request in flight
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Session (operator loop)                   │
//! │          AwaitingInput ⇄ AwaitingResponse                    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     FramedClient                             │
//! │               (one owned TcpStream)                          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │ write_frame │          │ FrameReader │
//!   │  (encode)   │          │  (buffer)   │
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod network;
pub mod session;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FrameError, Result};
pub use config::Config;
pub use network::FramedClient;
pub use session::{Session, SessionSummary};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of framelink
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
