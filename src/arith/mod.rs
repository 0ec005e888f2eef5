//! Saturating / rounding arithmetic engine
//!
//! Lane-wise integer arithmetic reproducing NEON's wrap, halving, saturating
//! and rounding rules exactly, for 8/16/32/64-bit lanes, signed and
//! unsigned, on either register width.
//!
//! Every operation is a pure, total function generic over the lane type `T`
//! and, where it makes sense, the register type `R` (`V64` or `V128`). The
//! lane type is chosen at the call site:
//!
//! ```
//! use neon_shim::arith;
//! use neon_shim::{Register, V128};
//!
//! let a = V128::splat(127i8);
//! let b = V128::splat(1i8);
//! assert_eq!(arith::saturating_add::<i8, _>(a, b), V128::splat(127i8));
//! assert_eq!(arith::add::<i8, _>(a, b), V128::splat(-128i8));
//! ```
//!
//! Immediates (shift counts) are const generics checked at compile time.
//!
//! Submodules:
//! - `addsub`: add/sub (wrapping, halving, rounding halving, saturating),
//!   absolute difference, saturating abs/neg
//! - `shift`: immediate and variable shifts in all rounding/saturation
//!   flavours, shift-accumulate, shift-insert
//! - `mul`: multiply(-accumulate), widening multiply, saturating doubling
//!   multiply family
//! - `convert`: narrowing and widening

pub mod addsub;
pub mod convert;
pub mod mul;
pub mod shift;

pub use addsub::{
    abs_diff, abs_diff_acc, add, halving_add, halving_sub, rounding_halving_add, saturating_abs,
    saturating_add, saturating_neg, saturating_sub, sub,
};
pub use convert::{
    add_high_narrow, add_long, add_wide, narrow, rounding_add_high_narrow,
    rounding_shr_narrow_n, rounding_sub_high_narrow, saturating_narrow,
    saturating_narrow_unsigned, saturating_rounding_shr_narrow_n,
    saturating_rounding_shr_narrow_unsigned_n, saturating_shr_narrow_n,
    saturating_shr_narrow_unsigned_n, shl_long_n, shr_narrow_n, sub_high_narrow, sub_long,
    sub_wide, widen, widen_high,
};
pub use mul::{
    mul, mul_acc, mul_acc_long, mul_long, mul_sub, mul_sub_long,
    saturating_doubling_mul_acc_long, saturating_doubling_mul_high,
    saturating_doubling_mul_long, saturating_doubling_mul_sub_long,
    saturating_rounding_doubling_mul_high,
};
pub use shift::{
    rounding_shl, rounding_shr_acc_n, rounding_shr_n, saturating_rounding_shl, saturating_shl,
    saturating_shl_n, saturating_shl_unsigned_n, shift_left_insert_n, shift_right_insert_n, shl,
    shl_n, shr_acc_n, shr_n,
};
