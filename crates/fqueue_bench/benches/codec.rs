//! Frame and header codec benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fqueue_bench::{random_data, PAYLOAD_SIZES};
use fqueue_core::frame::{decode, decode_frame, encode};
use fqueue_core::Header;

/// Benchmark encoding frames of various payload sizes.
fn bench_frame_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_encode");

    for size in PAYLOAD_SIZES.iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let payload = random_data(size);
            b.iter(|| {
                let frame = encode(black_box(42), black_box(&payload));
                black_box(frame);
            });
        });
    }

    group.finish();
}

/// Benchmark decoding whole frames.
fn bench_frame_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_decode");

    for size in PAYLOAD_SIZES.iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let frame = encode(42, &random_data(size));
            b.iter(|| {
                let (header, payload) = decode_frame(black_box(&frame)).unwrap();
                black_box((header, payload));
            });
        });
    }

    group.finish();
}

/// Benchmark decoding the 16-byte prefix alone.
fn bench_prefix_decode(c: &mut Criterion) {
    let frame = encode(7, &random_data(256));

    c.bench_function("prefix_decode", |b| {
        b.iter(|| {
            let header = decode(black_box(&frame[..16])).unwrap();
            black_box(header);
        });
    });
}

/// Benchmark the 32-byte header block.
fn bench_header(c: &mut Criterion) {
    let mut group = c.benchmark_group("header");
    let header = Header {
        capacity: 1 << 20,
        head_offset: 4096,
        tail_offset: 65_536,
        sequence: 1_000,
    };
    let bytes = header.encode();

    group.bench_function("encode", |b| {
        b.iter(|| black_box(black_box(&header).encode()));
    });
    group.bench_function("decode", |b| {
        b.iter(|| black_box(Header::decode(black_box(&bytes)).unwrap()));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_frame_encode,
    bench_frame_decode,
    bench_prefix_decode,
    bench_header,
);

criterion_main!(benches);
