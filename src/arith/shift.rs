//! Shifts: by immediate and by a per-lane signed amount, in plain,
//! saturating, rounding and saturating-rounding flavours, plus the
//! shift-and-accumulate and shift-and-insert forms.
//!
//! ## Shift amounts
//!
//! For the "by variable" operations the amount for each lane is the signed
//! low byte of the corresponding lane of the amount register, so every lane
//! width sees amounts in `[-128, 127]`. Positive amounts shift left, negative
//! amounts shift right. Amounts are held as `i32`, so negating `-128` is
//! well defined.
//!
//! No path ever asks the host for a shift by the lane width or more; those
//! cases are resolved up front.
//!
//! ## Rounding
//!
//! A rounding right shift by `s` returns `floor(a / 2^s + 1/2)` exactly.
//! With `t = a >> (s - 1)` that is `(t >> 1) + (t & 1)`: the floor of
//! `a / 2^s` plus the most significant discarded bit. Neither term can
//! overflow, and `s == w` needs no special case (`t` is already the top
//! bit, or the sign fill, of `a`).

use crate::lane::{IntLane, SignedLane};
use crate::register::Register;

// ===== Per-lane kernels =====

/// Shift amount carried by a lane: its low byte, as a signed value.
#[inline]
pub(crate) fn lane_shift_amount<T: IntLane>(lane: T) -> i32 {
    (lane.to_bits() as u8 as i8) as i32
}

/// `a << n`, zero once every bit has been shifted out.
#[inline]
pub(crate) fn lane_shl<T: IntLane>(a: T, n: u32) -> T {
    if n >= T::BITS { T::ZERO } else { a << n }
}

/// `a >> n` truncating; sign fill (signed) or zero (unsigned) for `n >= w`.
#[inline]
pub(crate) fn lane_shr<T: IntLane>(a: T, n: u32) -> T {
    if n < T::BITS {
        a >> n
    } else if T::SIGNED {
        a >> (T::BITS - 1)
    } else {
        T::ZERO
    }
}

/// `floor(a / 2^n + 1/2)`; `n == 0` returns `a`.
#[inline]
pub(crate) fn lane_rounding_shr<T: IntLane>(a: T, n: u32) -> T {
    if n == 0 {
        return a;
    }
    if n > T::BITS {
        return T::ZERO;
    }
    let t = a >> (n - 1);
    (t >> 1).wrapping_add(t & T::ONE)
}

/// Left shift by a signed amount; negative amounts shift right (truncating).
#[inline]
pub(crate) fn lane_shl_signed<T: IntLane>(a: T, amount: i32) -> T {
    if amount >= 0 {
        lane_shl(a, amount as u32)
    } else {
        lane_shr(a, amount.unsigned_abs())
    }
}

/// Saturating left shift by a signed amount.
///
/// Positive amounts saturate when a significant bit would be lost: for signed
/// lanes any shifted-out bit that differs from the resulting sign, for
/// unsigned lanes any shifted-out 1. Zero never saturates. Negative amounts
/// are ordinary truncating right shifts.
#[inline]
pub(crate) fn lane_saturating_shl<T: IntLane>(a: T, amount: i32) -> T {
    if amount < 0 {
        return lane_shr(a, amount.unsigned_abs());
    }
    if a == T::ZERO {
        return T::ZERO;
    }
    let n = amount as u32;
    if n >= T::BITS {
        return a.saturated_toward();
    }
    let shifted = a << n;
    if (shifted >> n) != a { a.saturated_toward() } else { shifted }
}

/// Left shift by a signed amount; negative amounts round.
#[inline]
pub(crate) fn lane_rounding_shl<T: IntLane>(a: T, amount: i32) -> T {
    if amount >= 0 {
        lane_shl(a, amount as u32)
    } else {
        lane_rounding_shr(a, amount.unsigned_abs())
    }
}

/// Saturating left shift by a signed amount; negative amounts round.
#[inline]
pub(crate) fn lane_saturating_rounding_shl<T: IntLane>(a: T, amount: i32) -> T {
    if amount >= 0 {
        lane_saturating_shl(a, amount)
    } else {
        lane_rounding_shr(a, amount.unsigned_abs())
    }
}

// ===== Shift by immediate =====

/// Lane-wise `a << N`, `0 <= N < w` (`vshl_n`).
#[inline]
pub fn shl_n<T: IntLane, R: Register, const N: u32>(a: R) -> R {
    const { assert!(N < T::BITS, "left shift immediate must be below the lane width") };
    a.map(|x: T| x << N)
}

/// Lane-wise `a >> N`, `1 <= N <= w` (`vshr_n`). Arithmetic for signed lanes.
#[inline]
pub fn shr_n<T: IntLane, R: Register, const N: u32>(a: R) -> R {
    const { assert!(N >= 1 && N <= T::BITS, "right shift immediate must be in 1..=w") };
    a.map(|x: T| lane_shr(x, N))
}

/// Lane-wise saturating `a << N`, `0 <= N < w` (`vqshl_n`).
#[inline]
pub fn saturating_shl_n<T: IntLane, R: Register, const N: u32>(a: R) -> R {
    const { assert!(N < T::BITS, "left shift immediate must be below the lane width") };
    a.map(|x: T| lane_saturating_shl(x, N as i32))
}

/// Signed input, unsigned saturating `a << N` (`vqshlu_n`). Negative lanes
/// become 0; results above the unsigned maximum clamp to it.
#[inline]
pub fn saturating_shl_unsigned_n<S: SignedLane, R: Register, const N: u32>(a: R) -> R {
    const { assert!(N < S::BITS, "left shift immediate must be below the lane width") };
    a.map(|x: S| <S::Unsigned as IntLane>::saturate_i128(x.to_i128() << N))
}

/// Lane-wise `floor(a / 2^N + 1/2)`, `1 <= N <= w` (`vrshr_n`).
#[inline]
pub fn rounding_shr_n<T: IntLane, R: Register, const N: u32>(a: R) -> R {
    const { assert!(N >= 1 && N <= T::BITS, "right shift immediate must be in 1..=w") };
    a.map(|x: T| lane_rounding_shr(x, N))
}

/// Lane-wise `acc + (b >> N)`, wrapping (`vsra_n`).
#[inline]
pub fn shr_acc_n<T: IntLane, R: Register, const N: u32>(acc: R, b: R) -> R {
    const { assert!(N >= 1 && N <= T::BITS, "right shift immediate must be in 1..=w") };
    acc.zip_map(b, |acc: T, b| acc.wrapping_add(lane_shr(b, N)))
}

/// Lane-wise `acc + rounding_shr(b, N)`, wrapping (`vrsra_n`).
#[inline]
pub fn rounding_shr_acc_n<T: IntLane, R: Register, const N: u32>(acc: R, b: R) -> R {
    const { assert!(N >= 1 && N <= T::BITS, "right shift immediate must be in 1..=w") };
    acc.zip_map(b, |acc: T, b| acc.wrapping_add(lane_rounding_shr(b, N)))
}

/// Shift `b` left by `N` and insert it into `a`, keeping the low `N` bits of
/// `a` (`vsli_n`), `0 <= N < w`.
#[inline]
pub fn shift_left_insert_n<T: IntLane, R: Register, const N: u32>(a: R, b: R) -> R {
    const { assert!(N < T::BITS, "left shift immediate must be below the lane width") };
    let keep = !(T::MASK << N) & T::MASK;
    a.zip_map(b, |a: T, b: T| {
        T::from_bits(((b.to_bits() << N) & T::MASK) | (a.to_bits() & keep))
    })
}

/// Shift `b` right (logically) by `N` and insert it into `a`, keeping the
/// high `N` bits of `a` (`vsri_n`), `1 <= N <= w`. `N == w` leaves `a`.
#[inline]
pub fn shift_right_insert_n<T: IntLane, R: Register, const N: u32>(a: R, b: R) -> R {
    const { assert!(N >= 1 && N <= T::BITS, "right shift immediate must be in 1..=w") };
    let reach = T::MASK.checked_shr(N).unwrap_or(0);
    let keep = T::MASK & !reach;
    a.zip_map(b, |a: T, b: T| {
        let moved = b.to_bits().checked_shr(N).unwrap_or(0);
        T::from_bits(moved | (a.to_bits() & keep))
    })
}

// ===== Shift by per-lane variable amount =====

/// `a` shifted by the signed amount in each lane of `amounts` (`vshl`).
#[inline]
pub fn shl<T: IntLane, R: Register>(a: R, amounts: R) -> R {
    a.zip_map(amounts, |a: T, n: T| lane_shl_signed(a, lane_shift_amount(n)))
}

/// Saturating variable shift (`vqshl`).
#[inline]
pub fn saturating_shl<T: IntLane, R: Register>(a: R, amounts: R) -> R {
    a.zip_map(amounts, |a: T, n: T| lane_saturating_shl(a, lane_shift_amount(n)))
}

/// Rounding variable shift (`vrshl`).
#[inline]
pub fn rounding_shl<T: IntLane, R: Register>(a: R, amounts: R) -> R {
    a.zip_map(amounts, |a: T, n: T| lane_rounding_shl(a, lane_shift_amount(n)))
}

/// Saturating rounding variable shift (`vqrshl`).
#[inline]
pub fn saturating_rounding_shl<T: IntLane, R: Register>(a: R, amounts: R) -> R {
    a.zip_map(amounts, |a: T, n: T| {
        lane_saturating_rounding_shl(a, lane_shift_amount(n))
    })
}
