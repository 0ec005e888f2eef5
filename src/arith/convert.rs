//! Narrowing and widening conversions.
//!
//! Narrowing takes a full `V128` of `2w`-bit lanes and yields a `V64` of
//! `w`-bit lanes; widening goes the other way, from a `V64` (or one half of
//! a `V128`) to a full `V128`. Lane count follows from the fixed register
//! width.
//!
//! The shift-right-and-narrow family shifts at wide precision and narrows
//! once, so the only saturation is the final clamp to the narrow range.

use crate::arith::mul::widening_zip;
use crate::arith::shift::{lane_rounding_shr, lane_shr};
use crate::lane::{IntLane, SignedLane, Widen};
use crate::register::{Register, V128, V64};

/// Map each wide lane of `a` to a narrow lane.
#[inline]
fn narrow_map<W: IntLane, U: IntLane>(a: V128, mut f: impl FnMut(W) -> U) -> V64 {
    debug_assert_eq!(W::BYTES, 2 * U::BYTES);
    (0..V128::lane_count::<W>()).fold(V64::ZERO, |out, i| out.with_lane(i, f(a.lane(i))))
}

/// Map each narrow lane pair of two `V128`s (wide) to a narrow lane.
#[inline]
fn narrow_zip<W: IntLane, U: IntLane>(a: V128, b: V128, mut f: impl FnMut(W, W) -> U) -> V64 {
    (0..V128::lane_count::<W>()).fold(V64::ZERO, |out, i| {
        out.with_lane(i, f(a.lane(i), b.lane(i)))
    })
}

#[inline]
fn widen_map<T: Widen>(a: V64, mut f: impl FnMut(T) -> T::Wide) -> V128 {
    (0..V64::lane_count::<T>()).fold(V128::ZERO, |out, i| out.with_lane(i, f(a.lane(i))))
}

// ===== Narrow =====

/// Keep the low half of every lane (`vmovn`).
#[inline]
pub fn narrow<T: Widen>(a: V128) -> V64 {
    narrow_map(a, T::truncate)
}

/// Clamp every lane into the narrow type of the same signedness (`vqmovn`).
#[inline]
pub fn saturating_narrow<T: Widen>(a: V128) -> V64 {
    narrow_map(a, |x: T::Wide| T::saturate_i128(x.to_i128()))
}

/// Signed wide lanes clamped into the unsigned narrow type (`vqmovun`);
/// negative values become 0.
#[inline]
pub fn saturating_narrow_unsigned<S: Widen + SignedLane>(a: V128) -> V64 {
    narrow_map(a, |x: S::Wide| <S::Unsigned as IntLane>::saturate_i128(x.to_i128()))
}

/// `(a >> N)` then keep the low half (`vshrn_n`), `1 <= N <= w`.
#[inline]
pub fn shr_narrow_n<T: Widen, const N: u32>(a: V128) -> V64 {
    const { assert!(N >= 1 && N <= T::BITS, "narrowing shift must be in 1..=w") };
    narrow_map(a, |x: T::Wide| T::truncate(lane_shr(x, N)))
}

/// Rounding `(a >> N)` then keep the low half (`vrshrn_n`).
#[inline]
pub fn rounding_shr_narrow_n<T: Widen, const N: u32>(a: V128) -> V64 {
    const { assert!(N >= 1 && N <= T::BITS, "narrowing shift must be in 1..=w") };
    narrow_map(a, |x: T::Wide| T::truncate(lane_rounding_shr(x, N)))
}

/// `(a >> N)` then saturate to the narrow type (`vqshrn_n`).
#[inline]
pub fn saturating_shr_narrow_n<T: Widen, const N: u32>(a: V128) -> V64 {
    const { assert!(N >= 1 && N <= T::BITS, "narrowing shift must be in 1..=w") };
    narrow_map(a, |x: T::Wide| T::saturate_i128(lane_shr(x, N).to_i128()))
}

/// Rounding `(a >> N)` then saturate to the narrow type (`vqrshrn_n`).
#[inline]
pub fn saturating_rounding_shr_narrow_n<T: Widen, const N: u32>(a: V128) -> V64 {
    const { assert!(N >= 1 && N <= T::BITS, "narrowing shift must be in 1..=w") };
    narrow_map(a, |x: T::Wide| T::saturate_i128(lane_rounding_shr(x, N).to_i128()))
}

/// Signed `(a >> N)` saturated into the unsigned narrow type (`vqshrun_n`).
#[inline]
pub fn saturating_shr_narrow_unsigned_n<S: Widen + SignedLane, const N: u32>(a: V128) -> V64 {
    const { assert!(N >= 1 && N <= S::BITS, "narrowing shift must be in 1..=w") };
    narrow_map(a, |x: S::Wide| {
        <S::Unsigned as IntLane>::saturate_i128(lane_shr(x, N).to_i128())
    })
}

/// Signed rounding `(a >> N)` saturated into the unsigned narrow type
/// (`vqrshrun_n`).
#[inline]
pub fn saturating_rounding_shr_narrow_unsigned_n<S: Widen + SignedLane, const N: u32>(
    a: V128,
) -> V64 {
    const { assert!(N >= 1 && N <= S::BITS, "narrowing shift must be in 1..=w") };
    narrow_map(a, |x: S::Wide| {
        <S::Unsigned as IntLane>::saturate_i128(lane_rounding_shr(x, N).to_i128())
    })
}

#[inline]
fn high_half<T: Widen>(wide: T::Wide) -> T {
    T::truncate(lane_shr(wide, T::BITS))
}

#[inline]
fn rounding_high_half<T: Widen>(wide: T::Wide) -> T {
    let round = <T::Wide as IntLane>::from_bits(1 << (T::BITS - 1));
    high_half::<T>(wide.wrapping_add(round))
}

/// High half of `a + b` (`vaddhn`).
#[inline]
pub fn add_high_narrow<T: Widen>(a: V128, b: V128) -> V64 {
    narrow_zip(a, b, |a: T::Wide, b| high_half::<T>(a.wrapping_add(b)))
}

/// High half of `a + b + 2^(w-1)` (`vraddhn`).
#[inline]
pub fn rounding_add_high_narrow<T: Widen>(a: V128, b: V128) -> V64 {
    narrow_zip(a, b, |a: T::Wide, b| rounding_high_half::<T>(a.wrapping_add(b)))
}

/// High half of `a - b` (`vsubhn`).
#[inline]
pub fn sub_high_narrow<T: Widen>(a: V128, b: V128) -> V64 {
    narrow_zip(a, b, |a: T::Wide, b| high_half::<T>(a.wrapping_sub(b)))
}

/// High half of `a - b + 2^(w-1)` (`vrsubhn`).
#[inline]
pub fn rounding_sub_high_narrow<T: Widen>(a: V128, b: V128) -> V64 {
    narrow_zip(a, b, |a: T::Wide, b| rounding_high_half::<T>(a.wrapping_sub(b)))
}

// ===== Widen =====

/// Sign- or zero-extend every lane (`vmovl`).
#[inline]
pub fn widen<T: Widen>(a: V64) -> V128 {
    widen_map(a, T::widen)
}

/// Extend the upper half of a full register (`vmovl_high`).
#[inline]
pub fn widen_high<T: Widen>(a: V128) -> V128 {
    widen::<T>(a.high())
}

/// Extend then shift left by `N`, `0 <= N <= w` (`vshll_n`). Exact.
#[inline]
pub fn shl_long_n<T: Widen, const N: u32>(a: V64) -> V128 {
    const { assert!(N <= T::BITS, "long shift immediate must be in 0..=w") };
    widen_map(a, |x: T| x.widen() << N)
}

/// `a + b` at double width (`vaddl`).
#[inline]
pub fn add_long<T: Widen>(a: V64, b: V64) -> V128 {
    widening_zip(a, b, |a: T, b: T| a.widen().wrapping_add(b.widen()))
}

/// `a - b` at double width (`vsubl`).
#[inline]
pub fn sub_long<T: Widen>(a: V64, b: V64) -> V128 {
    widening_zip(a, b, |a: T, b: T| a.widen().wrapping_sub(b.widen()))
}

/// Wide `a` plus extended `b` (`vaddw`).
#[inline]
pub fn add_wide<T: Widen>(a: V128, b: V64) -> V128 {
    a.zip_map(widen::<T>(b), |a: T::Wide, b: T::Wide| a.wrapping_add(b))
}

/// Wide `a` minus extended `b` (`vsubw`).
#[inline]
pub fn sub_wide<T: Widen>(a: V128, b: V64) -> V128 {
    a.zip_map(widen::<T>(b), |a: T::Wide, b: T::Wide| a.wrapping_sub(b))
}
