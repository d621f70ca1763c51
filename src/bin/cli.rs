//! framelink CLI
//!
//! Interactive prompt that sends each line as a frame and prints the reply.

use std::io;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use framelink::protocol::ByteOrder;
use framelink::{Config, FramedClient, Session};
use tracing_subscriber::{fmt, EnvFilter};

/// framelink CLI
#[derive(Parser, Debug)]
#[command(name = "framelink")]
#[command(about = "Send length-prefixed frames to a TCP peer and print the replies")]
#[command(version)]
struct Args {
    /// Peer host
    #[arg(long, default_value = framelink::config::DEFAULT_HOST)]
    host: String,

    /// Peer port
    #[arg(short, long, default_value_t = framelink::config::DEFAULT_PORT)]
    port: u16,

    /// Byte order of the 2-byte length prefix
    #[arg(long, value_enum, default_value_t = WireOrder::Little)]
    byte_order: WireOrder,

    /// Max bytes requested from the socket per read
    #[arg(long, default_value_t = framelink::config::DEFAULT_READ_BUFFER_SIZE)]
    read_buffer: usize,

    /// Read timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    read_timeout_ms: u64,

    /// Write timeout in milliseconds (0 = none)
    #[arg(long, default_value = "0")]
    write_timeout_ms: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum WireOrder {
    Little,
    Big,
}

impl From<WireOrder> for ByteOrder {
    fn from(order: WireOrder) -> Self {
        match order {
            WireOrder::Little => ByteOrder::LittleEndian,
            WireOrder::Big => ByteOrder::BigEndian,
        }
    }
}

fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the prompt and replies
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,framelink=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .byte_order(args.byte_order.into())
        .read_buffer_size(args.read_buffer)
        .read_timeout_ms(args.read_timeout_ms)
        .write_timeout_ms(args.write_timeout_ms)
        .build();

    tracing::debug!("framelink v{}", framelink::VERSION);

    let mut client = match FramedClient::connect(&config) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let session = Session::new(&mut client, stdin.lock(), stdout.lock());

    match session.run() {
        Ok(summary) => {
            tracing::info!("Session ended after {} exchanges", summary.exchanges);
        }
        Err(e) => {
            tracing::error!("Session error: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = client.close() {
        tracing::warn!("Error closing connection: {}", e);
    }

    ExitCode::SUCCESS
}
