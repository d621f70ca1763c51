//! Client Tests
//!
//! Runs FramedClient against throwaway TCP peers on ephemeral ports.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use framelink::protocol::{write_frame, ByteOrder, FrameReader};
use framelink::{Config, FrameError, FramedClient};

// =============================================================================
// Helper Functions
// =============================================================================

/// Accept one connection and hand it to `handler` on a background thread
fn spawn_peer<T, F>(order: ByteOrder, handler: F) -> (Config, JoinHandle<T>)
where
    T: Send + 'static,
    F: FnOnce(TcpStream) -> T + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        handler(stream)
    });

    let config = Config::builder()
        .host("127.0.0.1")
        .port(port)
        .byte_order(order)
        .build();
    (config, handle)
}

/// Peer that echoes every frame until the client hangs up
fn echo_peer(order: ByteOrder) -> impl FnOnce(TcpStream) -> usize + Send + 'static {
    move |stream| {
        let mut writer = stream.try_clone().unwrap();
        let mut reader = FrameReader::new(stream, order, 1024);
        let mut echoed = 0;
        while let Some(frame) = reader.read_frame().unwrap() {
            write_frame(&mut writer, frame.payload(), order).unwrap();
            echoed += 1;
        }
        echoed
    }
}

fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

// =============================================================================
// Connect Tests
// =============================================================================

#[test]
fn test_connect_to_closed_port_fails() {
    let config = Config::builder().host("127.0.0.1").port(closed_port()).build();

    let err = FramedClient::connect(&config).err().unwrap();
    assert!(err.is_connection());
    assert!(matches!(err, FrameError::Connect { .. }));
}

#[test]
fn test_connect_to_unresolvable_host_fails() {
    let config = Config::builder().host("no-such-host.invalid").port(11111).build();

    let err = FramedClient::connect(&config).err().unwrap();
    assert!(err.is_connection());
    assert!(err.to_string().contains("no-such-host.invalid:11111"));
}

#[test]
fn test_connect_rejects_invalid_config() {
    let config = Config::builder().port(0).build();

    let err = FramedClient::connect(&config).err().unwrap();
    assert!(matches!(err, FrameError::Config(_)));
}

#[test]
fn test_connect_reports_peer_addr() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, |_stream| ());

    let client = FramedClient::connect(&config).unwrap();
    assert_eq!(client.peer_addr(), config.addr());
    assert_eq!(client.byte_order(), ByteOrder::LittleEndian);
    assert!(!client.is_awaiting_response());

    drop(client);
    peer.join().unwrap();
}

// =============================================================================
// Send Tests
// =============================================================================

#[test]
fn test_send_writes_prefix_and_payload() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, |mut stream| {
        let mut buf = [0u8; 4];
        stream.read_exact(&mut buf).unwrap();
        buf
    });

    let mut client = FramedClient::connect(&config).unwrap();
    client.send(b"hi").unwrap();

    assert_eq!(peer.join().unwrap(), [0x02, 0x00, b'h', b'i']);
}

#[test]
fn test_send_big_endian() {
    let (config, peer) = spawn_peer(ByteOrder::BigEndian, |mut stream| {
        let mut buf = [0u8; 4];
        stream.read_exact(&mut buf).unwrap();
        buf
    });

    let mut client = FramedClient::connect(&config).unwrap();
    client.send(b"hi").unwrap();

    assert_eq!(peer.join().unwrap(), [0x00, 0x02, b'h', b'i']);
}

#[test]
fn test_second_send_before_receive_is_rejected() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, echo_peer(ByteOrder::LittleEndian));

    let mut client = FramedClient::connect(&config).unwrap();
    client.send(b"first").unwrap();
    assert!(client.is_awaiting_response());

    let err = client.send(b"second").unwrap_err();
    assert!(matches!(err, FrameError::RequestInFlight));

    let frame = client.receive().unwrap().unwrap();
    assert_eq!(frame.text(), "first");
    assert!(!client.is_awaiting_response());

    // Allowed again once the response is in
    let frame = client.request(b"second").unwrap().unwrap();
    assert_eq!(frame.text(), "second");

    drop(client);
    assert_eq!(peer.join().unwrap(), 2);
}

#[test]
fn test_send_oversized_payload_fails_without_writing() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, |mut stream| {
        let mut received = Vec::new();
        stream.read_to_end(&mut received).unwrap();
        received
    });

    let mut client = FramedClient::connect(&config).unwrap();
    let err = client.send(&vec![0u8; 70_000]).unwrap_err();
    assert!(matches!(err, FrameError::PayloadTooLarge { .. }));
    assert!(!client.is_awaiting_response());

    drop(client);
    assert!(peer.join().unwrap().is_empty());
}

// =============================================================================
// Receive Tests
// =============================================================================

#[test]
fn test_receive_pong_in_one_write() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, |mut stream| {
        stream
            .write_all(&[0x04, 0x00, b'p', b'o', b'n', b'g'])
            .unwrap();
    });

    let mut client = FramedClient::connect(&config).unwrap();
    let frame = client.receive().unwrap().unwrap();

    assert_eq!(frame.declared_len(), 4);
    assert_eq!(frame.text(), "pong");
    peer.join().unwrap();
}

#[test]
fn test_receive_prefix_and_payload_in_separate_writes() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, |mut stream| {
        stream.set_nodelay(true).unwrap();
        stream.write_all(&[0x04, 0x00]).unwrap();
        stream.flush().unwrap();
        thread::sleep(Duration::from_millis(50));
        stream.write_all(b"pong").unwrap();
    });

    let mut client = FramedClient::connect(&config).unwrap();
    let frame = client.receive().unwrap().unwrap();

    assert_eq!(frame.declared_len(), 4);
    assert_eq!(frame.text(), "pong");
    peer.join().unwrap();
}

#[test]
fn test_receive_after_peer_close_is_none() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, drop);

    let mut client = FramedClient::connect(&config).unwrap();
    peer.join().unwrap();

    assert!(client.receive().unwrap().is_none());
}

#[test]
fn test_receive_truncated_frame_is_decode_error() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, |mut stream| {
        stream.write_all(&[0x0A, 0x00, b'p', b'a', b'r']).unwrap();
    });

    let mut client = FramedClient::connect(&config).unwrap();
    peer.join().unwrap();

    let err = client.receive().unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn test_receive_truncated_prefix_is_decode_error() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, |mut stream| {
        stream.write_all(&[0x01]).unwrap();
    });

    let mut client = FramedClient::connect(&config).unwrap();
    peer.join().unwrap();

    let err = client.receive().unwrap_err();
    assert!(err.is_decode());
}

#[test]
fn test_read_timeout_surfaces_as_connection_error() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, |stream| {
        thread::sleep(Duration::from_millis(300));
        drop(stream);
    });
    let config = Config::builder()
        .host(config.host)
        .port(config.port)
        .read_timeout_ms(50)
        .build();

    let mut client = FramedClient::connect(&config).unwrap();
    let err = client.receive().unwrap_err();
    assert!(err.is_connection());

    peer.join().unwrap();
}

// =============================================================================
// Request Tests
// =============================================================================

#[test]
fn test_request_round_trip() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, echo_peer(ByteOrder::LittleEndian));

    let mut client = FramedClient::connect(&config).unwrap();
    for message in ["hello", "world", "ünïcödé"] {
        let frame = client.request(message.as_bytes()).unwrap().unwrap();
        assert_eq!(frame.declared_len(), message.len());
        assert_eq!(frame.text(), message);
    }

    client.close().unwrap();
    assert_eq!(peer.join().unwrap(), 3);
}

#[test]
fn test_request_large_frame_spans_many_reads() {
    let (config, peer) = spawn_peer(ByteOrder::LittleEndian, echo_peer(ByteOrder::LittleEndian));
    let payload = vec![b'q'; 60_000];

    let mut client = FramedClient::connect(&config).unwrap();
    let frame = client.request(&payload).unwrap().unwrap();
    assert_eq!(frame.declared_len(), 60_000);
    assert_eq!(frame.payload(), payload.as_slice());

    drop(client);
    assert_eq!(peer.join().unwrap(), 1);
}
