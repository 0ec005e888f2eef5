//! Multiplication: wrapping multiply(-accumulate), widening multiply, and the
//! saturating doubling family used for Q15/Q31 fixed point.
//!
//! The doubling ops are evaluated exactly in `i128` and saturated once, at
//! the end. The only input that saturates `2·a·b >> w` is `MIN · MIN`.

use crate::lane::{DoublingMul, IntLane, Widen};
use crate::register::{Register, V128, V64};

/// Lane-wise `a * b` modulo `2^w` (`vmul`).
#[inline]
pub fn mul<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, T::wrapping_mul)
}

/// Lane-wise `acc + a * b`, wrapping (`vmla`).
#[inline]
pub fn mul_acc<T: IntLane, R: Register>(acc: R, a: R, b: R) -> R {
    acc.zip3_map(a, b, |acc: T, a, b| acc.wrapping_add(a.wrapping_mul(b)))
}

/// Lane-wise `acc - a * b`, wrapping (`vmls`).
#[inline]
pub fn mul_sub<T: IntLane, R: Register>(acc: R, a: R, b: R) -> R {
    acc.zip3_map(a, b, |acc: T, a, b| acc.wrapping_sub(a.wrapping_mul(b)))
}

/// Apply `f` to each lane pair of two half registers, producing wide lanes.
#[inline]
pub(crate) fn widening_zip<T: Widen>(a: V64, b: V64, mut f: impl FnMut(T, T) -> T::Wide) -> V128 {
    (0..V64::lane_count::<T>()).fold(V128::ZERO, |out, i| {
        out.with_lane(i, f(a.lane(i), b.lane(i)))
    })
}

/// Widening multiply: `w x w -> 2w`, always exact (`vmull`).
#[inline]
pub fn mul_long<T: Widen>(a: V64, b: V64) -> V128 {
    widening_zip(a, b, |a: T, b: T| a.widen().wrapping_mul(b.widen()))
}

/// `acc + a * b` with `a`, `b` widened (`vmlal`).
#[inline]
pub fn mul_acc_long<T: Widen>(acc: V128, a: V64, b: V64) -> V128 {
    acc.zip_map(mul_long::<T>(a, b), |acc: T::Wide, p: T::Wide| acc.wrapping_add(p))
}

/// `acc - a * b` with `a`, `b` widened (`vmlsl`).
#[inline]
pub fn mul_sub_long<T: Widen>(acc: V128, a: V64, b: V64) -> V128 {
    acc.zip_map(mul_long::<T>(a, b), |acc: T::Wide, p: T::Wide| acc.wrapping_sub(p))
}

#[inline]
fn lane_doubling_product<T: DoublingMul>(a: T, b: T) -> i128 {
    2 * a.to_i128() * b.to_i128()
}

/// `sat((2·a·b) >> w)` (`vqdmulh`).
#[inline]
pub fn saturating_doubling_mul_high<T: DoublingMul, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, |a: T, b: T| T::saturate_i128(lane_doubling_product(a, b) >> T::BITS))
}

/// `sat((2·a·b + 2^(w-1)) >> w)` (`vqrdmulh`).
#[inline]
pub fn saturating_rounding_doubling_mul_high<T: DoublingMul, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, |a: T, b: T| {
        let rounded = lane_doubling_product(a, b) + (1i128 << (T::BITS - 1));
        T::saturate_i128(rounded >> T::BITS)
    })
}

/// `sat_2w(2·a·b)` (`vqdmull`).
#[inline]
pub fn saturating_doubling_mul_long<T: DoublingMul>(a: V64, b: V64) -> V128 {
    widening_zip(a, b, |a: T, b: T| {
        <T::Wide as IntLane>::saturate_i128(lane_doubling_product(a, b))
    })
}

/// `sat_2w(acc + sat_2w(2·a·b))` (`vqdmlal`). The product saturates before
/// it is accumulated, matching the ARM definition.
#[inline]
pub fn saturating_doubling_mul_acc_long<T: DoublingMul>(acc: V128, a: V64, b: V64) -> V128 {
    let product = saturating_doubling_mul_long::<T>(a, b);
    acc.zip_map(product, |acc: T::Wide, p: T::Wide| {
        <T::Wide as IntLane>::saturate_i128(acc.to_i128() + p.to_i128())
    })
}

/// `sat_2w(acc - sat_2w(2·a·b))` (`vqdmlsl`).
#[inline]
pub fn saturating_doubling_mul_sub_long<T: DoublingMul>(acc: V128, a: V64, b: V64) -> V128 {
    let product = saturating_doubling_mul_long::<T>(a, b);
    acc.zip_map(product, |acc: T::Wide, p: T::Wide| {
        <T::Wide as IntLane>::saturate_i128(acc.to_i128() - p.to_i128())
    })
}
