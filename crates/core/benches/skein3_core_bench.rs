//! Benchmarks for the Threefish3 cipher and UBI chaining

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use skein3_core::{BLOCK_BYTES, Domain, SecurityLevel, Threefish, ubi};

fn bench_cipher(c: &mut Criterion) {
    let key = [0x0123_4567_89AB_CDEFu64; 16];
    let block = [0xFEDC_BA98_7654_3210u64; 16];
    let tweak = [0, 0, 0];

    let mut group = c.benchmark_group("threefish3_block");
    group.throughput(Throughput::Bytes(BLOCK_BYTES as u64));
    for level in [SecurityLevel::Standard, SecurityLevel::Enhanced] {
        let cipher = Threefish::new(&key, &tweak, level);
        group.bench_function(format!("{:?}", level), |b| {
            b.iter(|| cipher.encrypt(black_box(&block)))
        });
    }
    group.finish();
}

fn bench_ubi(c: &mut Criterion) {
    let input = vec![0xABu8; 64 * 1024];
    let chain = [0u64; 16];

    let mut group = c.benchmark_group("ubi_64k");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("message", |b| {
        b.iter(|| ubi(&chain, Domain::Message, black_box(&input), SecurityLevel::Standard))
    });
    group.finish();
}

criterion_group!(benches, bench_cipher, bench_ubi);
criterion_main!(benches);
