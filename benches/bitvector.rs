use criterion::{Criterion, black_box, criterion_group, criterion_main};
use growable_bitvec::BitVector;

const BITS: usize = 1 << 16;

fn sparse() -> BitVector {
    BitVector::from_ones_iter((0..BITS).step_by(97))
}

fn dense() -> BitVector {
    let mut bv = BitVector::with_capacity(BITS);
    bv.set_range(0..BITS).unwrap();
    bv.clear_range(BITS / 3..BITS / 3 + 5).unwrap();
    bv
}

fn bench_single_bits(c: &mut Criterion) {
    c.bench_function("set_then_get_64k", |b| {
        b.iter(|| {
            let mut bv = BitVector::with_capacity(BITS);
            for idx in (0..BITS).step_by(3) {
                bv.set(black_box(idx));
            }
            black_box(bv.get(black_box(BITS - 1)))
        })
    });
}

fn bench_scans(c: &mut Criterion) {
    let sparse = sparse();
    let dense = dense();

    c.bench_function("iter_ones_sparse", |b| {
        b.iter(|| black_box(&sparse).iter_ones().count())
    });
    c.bench_function("next_set_bit_walk_sparse", |b| {
        b.iter(|| {
            let mut count = 0;
            let mut from = 0;
            while let Some(idx) = black_box(&sparse).next_set_bit(from) {
                count += 1;
                from = idx + 1;
            }
            count
        })
    });
    c.bench_function("next_clear_bit_dense", |b| {
        b.iter(|| black_box(&dense).next_clear_bit(black_box(0)))
    });
    c.bench_function("previous_set_bit_sparse", |b| {
        b.iter(|| black_box(&sparse).previous_set_bit(black_box(BITS * 2)))
    });
}

fn bench_bulk(c: &mut Criterion) {
    let sparse = sparse();
    let dense = dense();

    c.bench_function("cardinality_dense", |b| {
        b.iter(|| black_box(&dense).cardinality())
    });
    c.bench_function("or_sparse_into_dense", |b| {
        b.iter(|| &dense | black_box(&sparse))
    });
    c.bench_function("and_not_dense_sparse", |b| {
        b.iter(|| &dense - black_box(&sparse))
    });
    c.bench_function("get_range_unaligned", |b| {
        b.iter(|| dense.get_range(black_box(13..BITS - 7)).unwrap())
    });
    c.bench_function("flip_range_unaligned", |b| {
        let mut bv = dense.clone();
        b.iter(|| bv.flip_range(black_box(13..BITS - 7)).unwrap())
    });
}

criterion_group!(benches, bench_single_bits, bench_scans, bench_bulk);
criterion_main!(benches);
