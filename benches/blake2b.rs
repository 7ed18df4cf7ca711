use argon2_phc::hash::{blake2b, blake2b_long};

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

pub fn bench_blake2b(c: &mut Criterion) {
    c.bench_function("blake2b 64 bytes", |b| {
        b.iter(|| blake2b(64, black_box(&[0u8; 64])))
    });

    c.bench_function("blake2b 1 KiB", |b| {
        b.iter(|| blake2b(64, black_box(&[0u8; 1024])))
    });

    c.bench_function("blake2b_long 1 KiB output", |b| {
        b.iter(|| blake2b_long(1024, black_box(&[0u8; 72])))
    });
}

criterion_group!(benches, bench_blake2b);
criterion_main!(benches);
