//! Benchmarks for framelink framing operations

use std::hint::black_box;
use std::io::Cursor;

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use framelink::protocol::{decode_frame, encode_frame, ByteOrder, FrameReader};

fn framing_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("framing");

    for size in [16usize, 1024, 65_535] {
        let payload = vec![b'a'; size];
        let encoded = encode_frame(&payload, ByteOrder::LittleEndian).unwrap();
        group.throughput(Throughput::Bytes(size as u64));

        group.bench_function(format!("encode/{}", size), |b| {
            b.iter(|| encode_frame(black_box(&payload), ByteOrder::LittleEndian).unwrap())
        });

        group.bench_function(format!("decode/{}", size), |b| {
            b.iter(|| decode_frame(black_box(&encoded), ByteOrder::LittleEndian).unwrap())
        });
    }

    // Many small frames pulled through the 1024-byte read ceiling
    let mut stream = Vec::new();
    for i in 0..1000 {
        stream.extend(encode_frame(format!("message {}", i).as_bytes(), ByteOrder::LittleEndian).unwrap());
    }
    group.throughput(Throughput::Bytes(stream.len() as u64));
    group.bench_function("reader/1000_small_frames", |b| {
        b.iter(|| {
            let mut reader = FrameReader::new(Cursor::new(black_box(&stream)), ByteOrder::LittleEndian, 1024);
            let mut count = 0;
            while let Some(frame) = reader.read_frame().unwrap() {
                count += frame.declared_len();
            }
            count
        })
    });

    group.finish();
}

criterion_group!(benches, framing_benchmarks);
criterion_main!(benches);
