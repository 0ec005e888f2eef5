//! Add / subtract in the four NEON flavours: wrapping, halving (with and
//! without rounding), and saturating. Plus absolute difference and the
//! saturating abs/neg pair, which share the same overflow corner (`MIN`).
//!
//! None of these use a wider intermediate. Halving ops rely on the
//! AND/XOR identities so the carry out of `a + b` is never needed, and the
//! saturating ops detect overflow from sign bits, which keeps 64‑bit lanes on
//! the same code path as the narrow ones.

use crate::lane::{IntLane, SignedLane};
use crate::register::Register;

// ===== Per-lane kernels =====

/// `floor((a + b) / 2)` without overflow: `(a & b) + ((a ^ b) >> 1)`.
#[inline]
pub(crate) fn lane_halving_add<T: IntLane>(a: T, b: T) -> T {
    (a & b).wrapping_add((a ^ b) >> 1)
}

/// `floor((a + b + 1) / 2)` without overflow: `(a | b) - ((a ^ b) >> 1)`.
#[inline]
pub(crate) fn lane_rounding_halving_add<T: IntLane>(a: T, b: T) -> T {
    (a | b).wrapping_sub((a ^ b) >> 1)
}

/// `floor((a - b) / 2)`, wrapped to the lane for unsigned underflow.
///
/// Halving both operands first loses their low bits; the result is one too
/// high exactly when `a` is even and `b` is odd.
#[inline]
pub(crate) fn lane_halving_sub<T: IntLane>(a: T, b: T) -> T {
    (a >> 1).wrapping_sub(b >> 1).wrapping_sub(!a & b & T::ONE)
}

#[inline]
pub(crate) fn lane_saturating_add<T: IntLane>(a: T, b: T) -> T {
    let sum = a.wrapping_add(b);
    if T::SIGNED {
        // Overflow iff the operands share a sign and the sum does not.
        if (!(a ^ b) & (a ^ sum)).is_negative() {
            a.saturated_toward()
        } else {
            sum
        }
    } else if sum < a {
        T::MAX
    } else {
        sum
    }
}

#[inline]
pub(crate) fn lane_saturating_sub<T: IntLane>(a: T, b: T) -> T {
    let diff = a.wrapping_sub(b);
    if T::SIGNED {
        // Overflow iff the operands differ in sign and the result's sign
        // differs from the minuend's.
        if ((a ^ b) & (a ^ diff)).is_negative() {
            a.saturated_toward()
        } else {
            diff
        }
    } else if b > a {
        T::ZERO
    } else {
        diff
    }
}

/// `|a - b|`, returned as the lane's bit pattern of the unsigned magnitude.
#[inline]
pub(crate) fn lane_abs_diff<T: IntLane>(a: T, b: T) -> T {
    if a >= b { a.wrapping_sub(b) } else { b.wrapping_sub(a) }
}

#[inline]
pub(crate) fn lane_saturating_abs<T: SignedLane>(a: T) -> T {
    if a == T::MIN {
        T::MAX
    } else if a.is_negative() {
        a.wrapping_neg()
    } else {
        a
    }
}

#[inline]
pub(crate) fn lane_saturating_neg<T: SignedLane>(a: T) -> T {
    if a == T::MIN { T::MAX } else { a.wrapping_neg() }
}

// ===== Register-level operations =====

/// Lane-wise `a + b` modulo `2^w`.
#[inline]
pub fn add<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, T::wrapping_add)
}

/// Lane-wise `a - b` modulo `2^w`.
#[inline]
pub fn sub<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, T::wrapping_sub)
}

/// Lane-wise `(a + b) >> 1`, truncating (`vhadd`).
#[inline]
pub fn halving_add<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, lane_halving_add::<T>)
}

/// Lane-wise `(a + b + 1) >> 1` (`vrhadd`).
#[inline]
pub fn rounding_halving_add<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, lane_rounding_halving_add::<T>)
}

/// Lane-wise `(a - b) >> 1` (`vhsub`).
#[inline]
pub fn halving_sub<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, lane_halving_sub::<T>)
}

/// Lane-wise `clamp(a + b)` (`vqadd`).
#[inline]
pub fn saturating_add<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, lane_saturating_add::<T>)
}

/// Lane-wise `clamp(a - b)` (`vqsub`).
#[inline]
pub fn saturating_sub<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, lane_saturating_sub::<T>)
}

/// Lane-wise `|a - b|` (`vabd`). For signed lanes the magnitude can exceed
/// `MAX`; the lane then holds its unsigned bit pattern, as on NEON.
#[inline]
pub fn abs_diff<T: IntLane, R: Register>(a: R, b: R) -> R {
    a.zip_map(b, lane_abs_diff::<T>)
}

/// Lane-wise `acc + |a - b|`, wrapping (`vaba`).
#[inline]
pub fn abs_diff_acc<T: IntLane, R: Register>(acc: R, a: R, b: R) -> R {
    acc.zip3_map(a, b, |acc: T, a, b| acc.wrapping_add(lane_abs_diff(a, b)))
}

/// Lane-wise `|a|` with `MIN` clamped to `MAX` (`vqabs`).
#[inline]
pub fn saturating_abs<T: SignedLane, R: Register>(a: R) -> R {
    a.map(lane_saturating_abs::<T>)
}

/// Lane-wise `-a` with `MIN` clamped to `MAX` (`vqneg`).
#[inline]
pub fn saturating_neg<T: SignedLane, R: Register>(a: R) -> R {
    a.map(lane_saturating_neg::<T>)
}
