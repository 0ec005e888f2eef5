// tests/transpose_roundtrip.rs
//
// Structured loads/stores on random buffers for every arity, element width
// and register width, plus backend parity against the scalar permute.

use neon_shim::transpose::{load_deinterleaved_with, store_interleaved_with};
use neon_shim::{
    Lane, Register, ScalarPermute, V128, V64, deinterleave_slice, detect_permute_backend,
    interleave_into_slice, permute_backend_description,
};
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_buffer<T: Lane>(rng: &mut StdRng, len: usize) -> Vec<T>
where
    Standard: Distribution<T>,
{
    (0..len).map(|_| rng.r#gen()).collect()
}

fn check_round_trip<T: Lane, const N: usize, R: Register>(rng: &mut StdRng)
where
    Standard: Distribution<T>,
{
    let lanes = R::lane_count::<T>();
    let src: Vec<T> = random_buffer(rng, N * lanes);

    let regs: [R; N] = deinterleave_slice::<T, N, R>(&src).unwrap();
    for (k, reg) in regs.iter().enumerate() {
        for i in 0..lanes {
            assert_eq!(reg.lane::<T>(i), src[i * N + k], "N={N} lane {i} of register {k}");
        }
    }

    let mut out = vec![T::default(); src.len()];
    interleave_into_slice::<T, N, R>(regs, &mut out).unwrap();
    assert_eq!(out, src, "N={N} {}-bit round trip", T::BITS);
}

fn check_scalar_parity<T: Lane, const N: usize, R: Register>(rng: &mut StdRng)
where
    Standard: Distribution<T>,
{
    let src: Vec<T> = random_buffer(rng, N * R::lane_count::<T>());
    let native: [R; N] = deinterleave_slice::<T, N, R>(&src).unwrap();
    let scalar: [R; N] =
        unsafe { load_deinterleaved_with::<ScalarPermute, T, N, R>(src.as_ptr()) };
    assert_eq!(native, scalar);

    let mut out = vec![T::default(); src.len()];
    unsafe { store_interleaved_with::<ScalarPermute, T, N, R>(out.as_mut_ptr(), native) };
    assert_eq!(out, src);
}

macro_rules! for_each_shape {
    ($check:ident, $rng:expr; $($t:ty),*) => {$(
        $check::<$t, 2, V64>($rng);
        $check::<$t, 3, V64>($rng);
        $check::<$t, 4, V64>($rng);
        $check::<$t, 2, V128>($rng);
        $check::<$t, 3, V128>($rng);
        $check::<$t, 4, V128>($rng);
    )*};
}

#[test]
fn test_round_trip_all_shapes() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..32 {
        for_each_shape!(check_round_trip, &mut rng; u8, i16, u32, i64, f32, f64);
    }
}

#[test]
fn test_detected_backend_matches_scalar() {
    let backend = detect_permute_backend();
    println!("Permute backend: {}", permute_backend_description(backend));
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..32 {
        for_each_shape!(check_scalar_parity, &mut rng; u8, u16, u32, u64);
    }
}

#[test]
fn test_misaligned_source() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut bytes = vec![0u8; 64 + 1];
    rng.fill(&mut bytes[..]);

    // Start one byte in, so the buffer is misaligned for every register.
    let src = &bytes[1..49];
    let regs: [V128; 3] =
        unsafe { neon_shim::load_deinterleaved::<u8, 3, V128>(src.as_ptr()) };
    let mut out = vec![0u8; 48];
    unsafe { neon_shim::store_interleaved::<u8, 3, V128>(out.as_mut_ptr(), regs) };
    assert_eq!(out, src);
}

#[cfg(all(target_arch = "x86_64", feature = "native-permute"))]
#[test]
fn test_ssse3_permute_matches_scalar() {
    use neon_shim::BytePermute;
    use neon_shim::permute::{Ssse3Permute, scalar_permute};

    if !is_x86_feature_detected!("ssse3") {
        return;
    }
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..256 {
        let table = V128::from_bytes(rng.r#gen());
        let mask: [u8; 16] = std::array::from_fn(|_| {
            if rng.gen_bool(0.25) { 0x80 } else { rng.gen_range(0..16) }
        });
        let native = unsafe { Ssse3Permute::permute(table, &mask) };
        assert_eq!(native, scalar_permute(table, &mask));
    }
}
