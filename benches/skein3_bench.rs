//! Benchmarks for the Skein3 dispatch layouts

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use skein3::{hash, mac, tree_hash, Config, DigestSize, HashMode, StreamingState};

fn bench_sizes(c: &mut Criterion) {
    let input = vec![0x5Au8; 64 * 1024];
    let mut group = c.benchmark_group("sequential_64k");
    group.throughput(Throughput::Bytes(input.len() as u64));

    for size in [DigestSize::Bits256, DigestSize::Bits512, DigestSize::Bits1024] {
        let config = Config::new(size);
        group.bench_with_input(BenchmarkId::from_parameter(size.bits()), &input, |b, input| {
            b.iter(|| hash(black_box(input), &config))
        });
    }
    group.finish();
}

fn bench_streaming(c: &mut Criterion) {
    let input = vec![0x33u8; 64 * 1024];
    let config = Config::default().with_mode(HashMode::Streaming);

    c.bench_function("streaming_64k_1k_chunks", |b| {
        b.iter(|| {
            let mut state = StreamingState::new(&config).unwrap();
            for chunk in input.chunks(1000) {
                state.update(black_box(chunk)).unwrap();
            }
            state.finalize().unwrap()
        })
    });
}

fn bench_tree(c: &mut Criterion) {
    let input = vec![b'x'; 1024 * 1024];
    let mut group = c.benchmark_group("tree_1m");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.sample_size(20);

    for threads in [1usize, 2, 4, 8] {
        let config = Config::default().with_tree_threads(threads);
        group.bench_with_input(BenchmarkId::from_parameter(threads), &input, |b, input| {
            b.iter(|| tree_hash(black_box(input), &config))
        });
    }
    group.finish();
}

fn bench_mac(c: &mut Criterion) {
    let config = Config::default();
    c.bench_function("mac_short", |b| {
        b.iter(|| mac(black_box(b"short message"), black_box(b"key"), &config))
    });
}

criterion_group!(benches, bench_sizes, bench_streaming, bench_tree, bench_mac);
criterion_main!(benches);
