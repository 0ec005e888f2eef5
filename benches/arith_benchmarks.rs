use criterion::{Criterion, black_box, criterion_group, criterion_main};
use neon_shim::{Register, V128, V64, arith};

fn bench_saturating(c: &mut Criterion) {
    let mut group = c.benchmark_group("saturating");
    let a = V128::from_lanes(&[100i8, -100, 127, -128, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12]);
    let b = V128::splat(64i8);

    group.bench_function("add_i8", |bench| {
        bench.iter(|| arith::saturating_add::<i8, _>(black_box(a), black_box(b)))
    });
    group.bench_function("sub_u64", |bench| {
        bench.iter(|| arith::saturating_sub::<u64, _>(black_box(a), black_box(b)))
    });
    group.bench_function("shl_i16", |bench| {
        let n = V128::splat(3i16);
        bench.iter(|| arith::saturating_shl::<i16, _>(black_box(a), black_box(n)))
    });
    group.finish();
}

fn bench_rounding(c: &mut Criterion) {
    let mut group = c.benchmark_group("rounding");
    let a = V128::splat(0x8001u16);

    group.bench_function("shr_n_u16", |bench| {
        bench.iter(|| arith::rounding_shr_n::<u16, _, 3>(black_box(a)))
    });
    group.bench_function("doubling_mul_high_i32", |bench| {
        bench.iter(|| arith::saturating_rounding_doubling_mul_high::<i32, _>(black_box(a), black_box(a)))
    });
    group.bench_function("shr_narrow_i32", |bench| {
        bench.iter(|| arith::saturating_rounding_shr_narrow_n::<i16, 4>(black_box(a)))
    });
    group.bench_function("mul_long_u8", |bench| {
        let v = V64::splat(200u8);
        bench.iter(|| arith::mul_long::<u8>(black_box(v), black_box(v)))
    });
    group.finish();
}

criterion_group!(benches, bench_saturating, bench_rounding);
criterion_main!(benches);
