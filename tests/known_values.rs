// tests/known_values.rs
//
// Hand-checked results for the public API, including the NEON edge cases
// that are easy to get wrong: shift amounts at and past the lane width,
// -128 shift amounts, MIN * MIN in the doubling multiplies.

use neon_shim::{IntLane, Register, V128, V64, arith, deinterleave_slice, transpose};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Amount register with every lane's low byte set to `amount`.
fn amounts<T: IntLane, R: Register>(amount: i8) -> R {
    R::splat(T::from_bits(amount as i64 as u64))
}

#[test]
fn test_saturating_add_s8() {
    let a = V128::from_lanes(&[127i8, -128, 100, -100, 0, 1, -1, 50, 0, 0, 0, 0, 0, 0, 0, 0]);
    let b = V128::from_lanes(&[1i8, -1, 100, -100, 0, -1, 1, -60, 0, 0, 0, 0, 0, 0, 0, 0]);
    let out = arith::saturating_add::<i8, _>(a, b).to_lanes::<i8>();
    assert_eq!(&out[..8], &[127, -128, 127, -128, 0, 0, 0, -10]);
}

#[test]
fn test_saturating_sub_unsigned_and_64_bit() {
    let a = V128::from_lanes(&[5u64, u64::MAX]);
    let b = V128::from_lanes(&[6u64, 1]);
    assert_eq!(arith::saturating_sub::<u64, _>(a, b).to_lanes::<u64>(), vec![0, u64::MAX - 1]);

    let a = V128::from_lanes(&[i64::MIN, i64::MAX]);
    let b = V128::from_lanes(&[1i64, -1]);
    assert_eq!(
        arith::saturating_sub::<i64, _>(a, b).to_lanes::<i64>(),
        vec![i64::MIN, i64::MAX]
    );
    assert_eq!(
        arith::saturating_add::<u64, _>(a, V128::splat(u64::MAX)).to_lanes::<u64>(),
        vec![u64::MAX, u64::MAX]
    );
}

#[test]
fn test_rounding_shr_u16() {
    let a = V128::splat(0x8001u16);
    assert_eq!(arith::rounding_shr_n::<u16, _, 1>(a), V128::splat(0x4001u16));
    assert_eq!(
        arith::rounding_shl::<u16, _>(a, amounts::<u16, V128>(-1)),
        V128::splat(0x4001u16)
    );
    // Shift by the full width keeps only the rounding bit.
    assert_eq!(arith::rounding_shr_n::<u16, _, 16>(a), V128::splat(1u16));
}

#[test]
fn test_rounding_shr_signed_full_width_is_zero() {
    let a = V64::from_lanes(&[i32::MIN, i32::MAX]);
    assert_eq!(arith::rounding_shr_n::<i32, _, 32>(a), V64::ZERO);
    // -3 / 2 = -1.5 rounds to -1; 3 / 2 = 1.5 rounds to 2.
    let a = V64::from_lanes(&[-3i32, 3]);
    assert_eq!(arith::rounding_shr_n::<i32, _, 1>(a).to_lanes::<i32>(), vec![-1, 2]);
}

#[test]
fn test_saturating_shl_edges() {
    let a = V128::from_lanes(&[0i8, 1, -1, 64, -64, 127, -128, 5, 0, 0, 0, 0, 0, 0, 0, 0]);

    // Shift by the width: zero stays zero, everything else saturates by sign.
    let out = arith::saturating_shl::<i8, _>(a, amounts::<i8, V128>(8)).to_lanes::<i8>();
    assert_eq!(&out[..8], &[0, 127, -128, 127, -128, 127, -128, 127]);

    // Shift by minus the width: sign fill.
    let out = arith::saturating_shl::<i8, _>(a, amounts::<i8, V128>(-8)).to_lanes::<i8>();
    assert_eq!(&out[..8], &[0, 0, -1, 0, -1, 0, -1, 0]);

    // -128 is a right shift far past the width.
    let out = arith::saturating_shl::<i8, _>(a, amounts::<i8, V128>(-128)).to_lanes::<i8>();
    assert_eq!(&out[..8], &[0, 0, -1, 0, -1, 0, -1, 0]);
    let out = arith::shl::<i8, _>(a, amounts::<i8, V128>(-128)).to_lanes::<i8>();
    assert_eq!(&out[..8], &[0, 0, -1, 0, -1, 0, -1, 0]);

    // One bit: 64 overflows, -64 becomes exactly MIN.
    let out = arith::saturating_shl::<i8, _>(a, amounts::<i8, V128>(1)).to_lanes::<i8>();
    assert_eq!(&out[..8], &[0, 2, -2, 127, -128, 127, -128, 10]);
}

#[test]
fn test_shift_amount_uses_low_byte_only() {
    // 0x0102 carries amount 2; the upper byte is ignored.
    let a = V64::splat(3u16);
    let n = V64::splat(0x0102u16);
    assert_eq!(arith::shl::<u16, _>(a, n), V64::splat(12u16));
}

#[test]
fn test_saturating_rounding_shl_unsigned() {
    let a = V128::splat(0xF0u8);
    assert_eq!(
        arith::saturating_rounding_shl::<u8, _>(a, amounts::<u8, V128>(1)),
        V128::splat(0xFFu8)
    );
    assert_eq!(
        arith::saturating_rounding_shl::<u8, _>(a, amounts::<u8, V128>(-5)),
        V128::splat(8u8)
    );
}

#[test]
fn test_doubling_multiply_q15() {
    // 0.5 * 0.5 = 0.25 in Q15.
    let half = V64::splat(0x4000i16);
    assert_eq!(
        arith::saturating_rounding_doubling_mul_high::<i16, _>(half, half),
        V64::splat(0x2000i16)
    );
    let min = V64::splat(i16::MIN);
    assert_eq!(arith::saturating_doubling_mul_high::<i16, _>(min, min), V64::splat(i16::MAX));
    assert_eq!(
        arith::saturating_doubling_mul_long::<i16>(min, min),
        V128::splat(i32::MAX)
    );
}

#[test]
fn test_narrow_widen() {
    let v = V64::from_lanes(&[-1i16, 0, i16::MIN, i16::MAX]);
    let wide = arith::widen::<i16>(v);
    assert_eq!(wide.to_lanes::<i32>(), vec![-1, 0, -32768, 32767]);
    assert_eq!(arith::narrow::<i16>(wide), v);

    let wide = V128::from_lanes(&[70000i32, -70000, -1, 40000]);
    assert_eq!(
        arith::saturating_narrow::<i16>(wide).to_lanes::<i16>(),
        vec![i16::MAX, i16::MIN, -1, i16::MAX]
    );
    assert_eq!(
        arith::saturating_narrow_unsigned::<i16>(wide).to_lanes::<u16>(),
        vec![u16::MAX, 0, 0, 40000]
    );
}

#[test]
fn test_deinterleave_two_way_u16() {
    init_logging();
    // V64 of u16 has four lanes; the example pads to eight elements.
    let src = [1u16, 2, 3, 4, 5, 6, 0, 0];
    let [a, b]: [V64; 2] = deinterleave_slice::<u16, 2, V64>(&src).unwrap();
    assert_eq!(&a.to_lanes::<u16>()[..3], &[1, 3, 5]);
    assert_eq!(&b.to_lanes::<u16>()[..3], &[2, 4, 6]);
}

#[test]
fn test_deinterleave_three_way_bytes() {
    init_logging();
    let src: Vec<u8> = (0..48).collect();
    let regs: [V128; 3] = unsafe { transpose::load_deinterleaved::<u8, 3, V128>(src.as_ptr()) };
    for (k, reg) in regs.iter().enumerate() {
        let expected: Vec<u8> = (0..16).map(|i| (i * 3 + k) as u8).collect();
        assert_eq!(reg.to_lanes::<u8>(), expected, "register {k}");
    }
}

#[test]
fn test_store_lane_and_duplicate() {
    let src = [10u32, 20, 30, 40];
    let regs: [V128; 4] = unsafe { transpose::load_duplicate::<u32, 4, V128>(src.as_ptr()) };
    assert_eq!(regs[2], V128::splat(30u32));

    let regs = unsafe { transpose::load_lane::<u32, 4, V128, 3>([1u32, 2, 3, 4].as_ptr(), regs) };
    assert_eq!(regs[0].to_lanes::<u32>(), vec![10, 10, 10, 1]);

    let mut dst = [0u32; 4];
    unsafe { transpose::store_lane::<u32, 4, V128, 3>(dst.as_mut_ptr(), regs) };
    assert_eq!(dst, [1, 2, 3, 4]);
}
