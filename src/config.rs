//! Configuration for framelink
//!
//! Connection parameters with the defaults of the reference client.

use crate::error::{FrameError, Result};
use crate::protocol::ByteOrder;

/// Default peer host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default peer port
pub const DEFAULT_PORT: u16 = 11111;

/// Default ceiling for a single socket read (bytes)
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Client configuration
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Peer Configuration
    // -------------------------------------------------------------------------
    /// Host name or IP address of the peer
    pub host: String,

    /// TCP port of the peer
    pub port: u16,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Byte order of the 2-byte length prefix
    pub byte_order: ByteOrder,

    /// Max bytes requested from the socket per read
    pub read_buffer_size: usize,

    // -------------------------------------------------------------------------
    // Socket Configuration
    // -------------------------------------------------------------------------
    /// Read timeout in milliseconds (0 = block indefinitely)
    pub read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = block indefinitely)
    pub write_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            byte_order: ByteOrder::default(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            read_timeout_ms: 0,
            write_timeout_ms: 0,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Peer address in `host:port` form
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Reject values that cannot produce a working connection
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(FrameError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(FrameError::Config("port must be non-zero".to_string()));
        }
        if self.read_buffer_size == 0 {
            return Err(FrameError::Config(
                "read buffer size must be at least 1 byte".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the peer host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the peer port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the byte order of the length prefix
    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.config.byte_order = order;
        self
    }

    /// Set the per-read buffer ceiling (in bytes)
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Set the read timeout (in milliseconds)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
