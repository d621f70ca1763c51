//! Network Module
//!
//! Outbound TCP connection handling.
//!
//! ## Architecture
//! - One blocking connection per process
//! - Reads and writes on cloned handles of the same socket
//! - Strictly one request in flight

mod client;

pub use client::FramedClient;
