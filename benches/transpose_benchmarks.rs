use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use neon_shim::transpose::{load_deinterleaved_with, store_interleaved_with};
use neon_shim::{ScalarPermute, V128, detect_permute_backend, permute_backend_description};

fn generate_bytes(len: usize, seed: u64) -> Vec<u8> {
    // Simple LCG for reproducible buffers
    let mut rng = seed;
    (0..len)
        .map(|_| {
            rng = rng.wrapping_mul(1103515245).wrapping_add(12345);
            (rng >> 16) as u8
        })
        .collect()
}

/// Deinterleave + interleave of 8-bit tuples, scalar vs detected backend
fn bench_three_way_bytes(c: &mut Criterion) {
    let backend = detect_permute_backend();
    println!("Detected permute backend: {}", permute_backend_description(backend));

    let mut group = c.benchmark_group("transpose_u8x3");
    // One megabyte of RGB pixels.
    let src = generate_bytes(48 * 21845, 42);
    let mut dst = vec![0u8; src.len()];
    group.throughput(Throughput::Bytes(src.len() as u64));

    group.bench_function(BenchmarkId::new("scalar", src.len()), |b| {
        b.iter(|| {
            for (chunk, out) in src.chunks_exact(48).zip(dst.chunks_exact_mut(48)) {
                unsafe {
                    let regs = load_deinterleaved_with::<ScalarPermute, u8, 3, V128>(chunk.as_ptr());
                    store_interleaved_with::<ScalarPermute, u8, 3, V128>(
                        out.as_mut_ptr(),
                        black_box(regs),
                    );
                }
            }
        })
    });

    group.bench_function(BenchmarkId::new("detected", src.len()), |b| {
        b.iter(|| {
            for (chunk, out) in src.chunks_exact(48).zip(dst.chunks_exact_mut(48)) {
                unsafe {
                    let regs = neon_shim::load_deinterleaved::<u8, 3, V128>(chunk.as_ptr());
                    neon_shim::store_interleaved::<u8, 3, V128>(out.as_mut_ptr(), black_box(regs));
                }
            }
        })
    });

    group.finish();
}

/// Load cost across arities for 16-bit elements
fn bench_arity(c: &mut Criterion) {
    let mut group = c.benchmark_group("deinterleave_u16");
    let src: Vec<u16> = generate_bytes(4 * 8 * 2, 7)
        .chunks_exact(2)
        .map(|p| u16::from_le_bytes([p[0], p[1]]))
        .collect();

    group.bench_function("n2", |b| {
        b.iter(|| unsafe { neon_shim::load_deinterleaved::<u16, 2, V128>(black_box(src.as_ptr())) })
    });
    group.bench_function("n3", |b| {
        b.iter(|| unsafe { neon_shim::load_deinterleaved::<u16, 3, V128>(black_box(src.as_ptr())) })
    });
    group.bench_function("n4", |b| {
        b.iter(|| unsafe { neon_shim::load_deinterleaved::<u16, 4, V128>(black_box(src.as_ptr())) })
    });

    group.finish();
}

criterion_group!(benches, bench_three_way_bytes, bench_arity);
criterion_main!(benches);
