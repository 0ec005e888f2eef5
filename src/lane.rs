//! Lane model
//!
//! A vector register is a fixed number of bytes split into equal lanes. This
//! module describes what a single lane can be and gives the arithmetic engine
//! the handful of per-lane primitives it needs, independent of width:
//!
//! - `Lane`: anything that can occupy a lane (all fixed-width integers plus
//!   `f32`/`f64`). Only knows its width and its little-endian byte form.
//! - `IntLane`: integer lanes, with saturation bounds, signedness, wrapping
//!   arithmetic and a raw bit-pattern view used by the overflow checks.
//! - `Widen`: lane types that have a lane type of exactly twice the width
//!   (8/16/32-bit), used by the widening and narrowing conversions.
//! - `DoublingMul`: lane types that support the saturating doubling
//!   multiply family (16 and 32-bit signed, as on NEON).
//!
//! All traits are sealed; the set of lane types is closed.

use std::fmt::Debug;
use std::mem::size_of;
use std::ops::{BitAnd, BitOr, BitXor, Not, Shl, Shr};

mod sealed {
    pub trait Sealed {}
}

/// A value that can occupy one lane of a register.
pub trait Lane: sealed::Sealed + Copy + PartialEq + Debug + Default + 'static {
    /// Lane width in bits.
    const BITS: u32;
    /// Lane width in bytes.
    const BYTES: usize = (Self::BITS / 8) as usize;

    /// Decode a lane from the first `BYTES` bytes of `bytes` (little‑endian).
    fn from_le_slice(bytes: &[u8]) -> Self;
    /// Encode the lane into the first `BYTES` bytes of `out` (little‑endian).
    fn write_le_slice(self, out: &mut [u8]);
}

/// An integer lane: i8..i64 and u8..u64.
///
/// The bit-level helpers (`to_bits`/`from_bits`) expose the lane's raw
/// two's-complement pattern zero-extended to 64 bits, so one code path can
/// reason about any width.
pub trait IntLane:
    Lane
    + Eq
    + Ord
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Not<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
{
    /// Whether the lane is interpreted as two's-complement signed.
    const SIGNED: bool;
    /// Lower saturation bound.
    const MIN: Self;
    /// Upper saturation bound.
    const MAX: Self;
    const ZERO: Self;
    const ONE: Self;
    /// All ones in the low `BITS` bits.
    const MASK: u64 = u64::MAX >> (64 - Self::BITS);

    /// Signed lane type of the same width.
    type Signed: IntLane + SignedLane;
    /// Unsigned lane type of the same width.
    type Unsigned: IntLane + UnsignedLane;

    /// Raw bit pattern, zero-extended.
    fn to_bits(self) -> u64;
    /// Build a lane from the low `BITS` bits of `bits`.
    fn from_bits(bits: u64) -> Self;
    /// Exact value as an `i128`.
    fn to_i128(self) -> i128;
    /// Clamp an arbitrary-precision value into `[MIN, MAX]`.
    fn saturate_i128(value: i128) -> Self;

    fn wrapping_add(self, rhs: Self) -> Self;
    fn wrapping_sub(self, rhs: Self) -> Self;
    fn wrapping_mul(self, rhs: Self) -> Self;
    fn wrapping_neg(self) -> Self;

    /// True for signed lanes whose sign bit is set; always false for unsigned.
    #[inline]
    fn is_negative(self) -> bool {
        Self::SIGNED && (self.to_bits() >> (Self::BITS - 1)) & 1 == 1
    }

    /// The saturation bound on the same side of zero as `self`.
    #[inline]
    fn saturated_toward(self) -> Self {
        if self.is_negative() { Self::MIN } else { Self::MAX }
    }

    /// Reinterpret the bit pattern as the same-width lane type `U`.
    #[inline]
    fn cast_bits<U: IntLane>(self) -> U {
        U::from_bits(self.to_bits())
    }
}

/// Marker for signed integer lanes.
pub trait SignedLane: IntLane {}

/// Marker for unsigned integer lanes.
pub trait UnsignedLane: IntLane {}

/// Integer lanes that have a lane type of twice their width.
pub trait Widen: IntLane {
    /// Lane type of twice the width and the same signedness.
    type Wide: IntLane;

    /// Sign- or zero-extend into the wide type.
    fn widen(self) -> Self::Wide;
    /// Keep the low half of a wide lane.
    fn truncate(wide: Self::Wide) -> Self;
}

/// Signed lanes supporting the saturating doubling multiply family.
pub trait DoublingMul: SignedLane + Widen {}

macro_rules! impl_lane_bytes {
    ($t:ty, $bits:expr) => {
        impl sealed::Sealed for $t {}

        impl Lane for $t {
            const BITS: u32 = $bits;

            #[inline]
            fn from_le_slice(bytes: &[u8]) -> Self {
                let mut raw = [0u8; size_of::<$t>()];
                raw.copy_from_slice(&bytes[..size_of::<$t>()]);
                <$t>::from_le_bytes(raw)
            }

            #[inline]
            fn write_le_slice(self, out: &mut [u8]) {
                out[..size_of::<$t>()].copy_from_slice(&self.to_le_bytes());
            }
        }
    };
}

macro_rules! impl_int_lane {
    ($($t:ty: signed = $signed:literal, twins = ($s:ty, $u:ty);)*) => {
        $(
            impl_lane_bytes!($t, <$t>::BITS);

            impl IntLane for $t {
                const SIGNED: bool = $signed;
                const MIN: Self = <$t>::MIN;
                const MAX: Self = <$t>::MAX;
                const ZERO: Self = 0;
                const ONE: Self = 1;

                type Signed = $s;
                type Unsigned = $u;

                #[inline]
                fn to_bits(self) -> u64 {
                    self as $u as u64
                }

                #[inline]
                fn from_bits(bits: u64) -> Self {
                    bits as $u as $t
                }

                #[inline]
                fn to_i128(self) -> i128 {
                    self as i128
                }

                #[inline]
                fn saturate_i128(value: i128) -> Self {
                    if value < <$t>::MIN as i128 {
                        <$t>::MIN
                    } else if value > <$t>::MAX as i128 {
                        <$t>::MAX
                    } else {
                        value as $t
                    }
                }

                #[inline]
                fn wrapping_add(self, rhs: Self) -> Self {
                    <$t>::wrapping_add(self, rhs)
                }

                #[inline]
                fn wrapping_sub(self, rhs: Self) -> Self {
                    <$t>::wrapping_sub(self, rhs)
                }

                #[inline]
                fn wrapping_mul(self, rhs: Self) -> Self {
                    <$t>::wrapping_mul(self, rhs)
                }

                #[inline]
                fn wrapping_neg(self) -> Self {
                    <$t>::wrapping_neg(self)
                }
            }
        )*
    };
}

impl_int_lane! {
    i8: signed = true, twins = (i8, u8);
    i16: signed = true, twins = (i16, u16);
    i32: signed = true, twins = (i32, u32);
    i64: signed = true, twins = (i64, u64);
    u8: signed = false, twins = (i8, u8);
    u16: signed = false, twins = (i16, u16);
    u32: signed = false, twins = (i32, u32);
    u64: signed = false, twins = (i64, u64);
}

impl_lane_bytes!(f32, 32);
impl_lane_bytes!(f64, 64);

impl SignedLane for i8 {}
impl SignedLane for i16 {}
impl SignedLane for i32 {}
impl SignedLane for i64 {}
impl UnsignedLane for u8 {}
impl UnsignedLane for u16 {}
impl UnsignedLane for u32 {}
impl UnsignedLane for u64 {}

macro_rules! impl_widen {
    ($($narrow:ty => $wide:ty),* $(,)?) => {
        $(
            impl Widen for $narrow {
                type Wide = $wide;

                #[inline]
                fn widen(self) -> $wide {
                    self as $wide
                }

                #[inline]
                fn truncate(wide: $wide) -> Self {
                    wide as $narrow
                }
            }
        )*
    };
}

impl_widen!(i8 => i16, i16 => i32, i32 => i64, u8 => u16, u16 => u32, u32 => u64);

impl DoublingMul for i16 {}
impl DoublingMul for i32 {}
