//! Storage backend benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fqueue_bench::random_data;
use fqueue_storage::{FileBackend, InMemoryBackend, StorageBackend};
use tempfile::TempDir;

/// Benchmark sequential positional writes to memory.
fn bench_inmemory_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("inmemory_write");

    for size in [64, 256, 1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let mut backend = InMemoryBackend::new();
            let data = random_data(size);
            let mut offset = 0u64;

            b.iter(|| {
                backend.write_at(black_box(offset), black_box(&data)).unwrap();
                offset += size as u64;
            });
        });
    }

    group.finish();
}

/// Benchmark positional reads from memory.
fn bench_inmemory_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("inmemory_read");

    for size in [64, 256, 1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let backend = InMemoryBackend::with_data(random_data(size));

            b.iter(|| {
                let result = backend.read_at(black_box(0), black_box(size)).unwrap();
                black_box(result);
            });
        });
    }

    group.finish();
}

/// Benchmark positional writes into a preallocated file.
fn bench_file_write(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_write");

    // Use larger sample size for file operations
    group.sample_size(50);

    for size in [256, 1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("bench.dat");
            let mut backend = FileBackend::open(&path).unwrap();
            backend.set_len(64 * 1024 * 1024).unwrap();
            let data = random_data(size);
            let mut offset = 0u64;

            b.iter(|| {
                backend.write_at(black_box(offset), black_box(&data)).unwrap();
                offset = (offset + size as u64) % (60 * 1024 * 1024);
            });
        });
    }

    group.finish();
}

/// Benchmark positional reads from a file.
fn bench_file_read(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_read");

    // Use larger sample size for file operations
    group.sample_size(50);

    for size in [256, 1024, 4096].iter() {
        group.throughput(Throughput::Bytes(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("bench.dat");
            let mut backend = FileBackend::open(&path).unwrap();
            backend.write_at(0, &random_data(size)).unwrap();
            backend.sync().unwrap();

            b.iter(|| {
                let result = backend.read_at(black_box(0), black_box(size)).unwrap();
                black_box(result);
            });
        });
    }

    group.finish();
}

/// Benchmark the durability barrier after a small write.
fn bench_file_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_sync");
    group.sample_size(20); // fsync is slow

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bench.dat");
    let mut backend = FileBackend::open(&path).unwrap();
    let data = random_data(1024);

    group.bench_function("after_1kb_write", |b| {
        b.iter(|| {
            backend.write_at(0, &data).unwrap();
            backend.flush().unwrap();
            backend.sync().unwrap();
        });
    });

    group.finish();
}

/// Benchmark growing a file the way the queue does when it runs out of room.
fn bench_file_grow(c: &mut Criterion) {
    let mut group = c.benchmark_group("file_grow");
    group.sample_size(20);

    group.bench_function("double_to_16mb", |b| {
        b.iter(|| {
            let temp_dir = TempDir::new().unwrap();
            let path = temp_dir.path().join("bench.dat");
            let mut backend = FileBackend::open(&path).unwrap();

            let mut len = 4096u64;
            while len <= 16 * 1024 * 1024 {
                backend.set_len(black_box(len)).unwrap();
                len *= 2;
            }
            black_box(backend.size().unwrap());
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_inmemory_write,
    bench_inmemory_read,
    bench_file_write,
    bench_file_read,
    bench_file_sync,
    bench_file_grow,
);

criterion_main!(benches);
