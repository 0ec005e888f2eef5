//! Register values
//!
//! `V128` models a full 128‑bit vector register and `V64` the half‑width
//! register NEON uses for narrow results and the "D" forms of most
//! operations. Both are plain byte arrays: bytes are stored in little‑endian
//! lane order, so lane `i` of a `w`‑bit interpretation occupies bytes
//! `[i*w/8, (i+1)*w/8)`. A register has no inherent lane type; every
//! operation picks its interpretation through a `Lane` type parameter.
//!
//! The `Register` trait lets the arithmetic and transpose engines be written
//! once for both widths.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};
use std::ptr;

use crate::lane::Lane;

mod sealed {
    pub trait Sealed {}
}

/// 128‑bit register value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C, align(16))]
pub struct V128 {
    bytes: [u8; 16],
}

/// 64‑bit (half‑width) register value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C, align(8))]
pub struct V64 {
    bytes: [u8; 8],
}

impl V128 {
    pub const ZERO: Self = Self { bytes: [0; 16] };

    #[inline]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.bytes
    }

    #[inline]
    pub const fn from_bits(bits: u128) -> Self {
        Self::from_bytes(bits.to_le_bytes())
    }

    #[inline]
    pub const fn to_bits(self) -> u128 {
        u128::from_le_bytes(self.bytes)
    }

    /// Lower 64 bits (lanes `0..N/2`).
    #[inline]
    pub fn low(self) -> V64 {
        let mut out = V64::ZERO;
        out.bytes.copy_from_slice(&self.bytes[..8]);
        out
    }

    /// Upper 64 bits (lanes `N/2..N`).
    #[inline]
    pub fn high(self) -> V64 {
        let mut out = V64::ZERO;
        out.bytes.copy_from_slice(&self.bytes[8..]);
        out
    }

    /// Join two half registers: `low` becomes lanes `0..N/2`.
    #[inline]
    pub fn combine(low: V64, high: V64) -> Self {
        let mut out = Self::ZERO;
        out.bytes[..8].copy_from_slice(&low.bytes);
        out.bytes[8..].copy_from_slice(&high.bytes);
        out
    }
}

impl V64 {
    pub const ZERO: Self = Self { bytes: [0; 8] };

    #[inline]
    pub const fn from_bytes(bytes: [u8; 8]) -> Self {
        Self { bytes }
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 8] {
        self.bytes
    }

    #[inline]
    pub const fn from_bits(bits: u64) -> Self {
        Self::from_bytes(bits.to_le_bytes())
    }

    #[inline]
    pub const fn to_bits(self) -> u64 {
        u64::from_le_bytes(self.bytes)
    }
}

impl fmt::Debug for V128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V128({:#034x})", self.to_bits())
    }
}

impl fmt::Debug for V64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "V64({:#018x})", self.to_bits())
    }
}

macro_rules! impl_bitwise {
    ($reg:ty: $($tr:ident::$method:ident => $op:tt),*) => {
        $(
            impl $tr for $reg {
                type Output = Self;

                #[inline]
                fn $method(self, rhs: Self) -> Self {
                    let mut out = self;
                    for (o, r) in out.bytes.iter_mut().zip(rhs.bytes) {
                        *o $op r;
                    }
                    out
                }
            }
        )*
    };
}

impl_bitwise!(V128: BitAnd::bitand => &=, BitOr::bitor => |=, BitXor::bitxor => ^=);
impl_bitwise!(V64: BitAnd::bitand => &=, BitOr::bitor => |=, BitXor::bitxor => ^=);

/// Common interface of `V64` and `V128`.
///
/// Lane indices passed to `lane`/`with_lane` must be below
/// `lane_count::<T>()`; out-of-range indices panic on the slice bounds check.
pub trait Register: sealed::Sealed + Copy + Default + Eq + fmt::Debug {
    /// Register width in bytes.
    const BYTES: usize;
    const ZERO: Self;

    fn as_bytes(&self) -> &[u8];
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Place the register in the low bytes of a `V128`, zero padded.
    fn to_v128(self) -> V128;
    /// Take the low `BYTES` bytes of a `V128`.
    fn from_v128(v: V128) -> Self;

    /// Number of `T` lanes in this register.
    #[inline]
    fn lane_count<T: Lane>() -> usize {
        Self::BYTES / T::BYTES
    }

    #[inline]
    fn lane<T: Lane>(&self, index: usize) -> T {
        let offset = index * T::BYTES;
        T::from_le_slice(&self.as_bytes()[offset..offset + T::BYTES])
    }

    /// Copy of `self` with lane `index` replaced.
    #[inline]
    fn with_lane<T: Lane>(mut self, index: usize, value: T) -> Self {
        let offset = index * T::BYTES;
        value.write_le_slice(&mut self.as_bytes_mut()[offset..offset + T::BYTES]);
        self
    }

    /// Broadcast `value` into every lane.
    #[inline]
    fn splat<T: Lane>(value: T) -> Self {
        (0..Self::lane_count::<T>()).fold(Self::ZERO, |reg, i| reg.with_lane(i, value))
    }

    /// Build a register from exactly `lane_count::<T>()` lanes.
    ///
    /// Panics if `lanes` has the wrong length.
    fn from_lanes<T: Lane>(lanes: &[T]) -> Self {
        assert_eq!(lanes.len(), Self::lane_count::<T>(), "lane count mismatch");
        lanes
            .iter()
            .enumerate()
            .fold(Self::ZERO, |reg, (i, &v)| reg.with_lane(i, v))
    }

    fn to_lanes<T: Lane>(&self) -> Vec<T> {
        (0..Self::lane_count::<T>()).map(|i| self.lane(i)).collect()
    }

    /// Read `BYTES` bytes from `ptr`. No alignment requirement.
    ///
    /// # Safety
    /// `ptr` must be valid for reads of `BYTES` bytes.
    #[inline]
    unsafe fn read_unaligned(ptr: *const u8) -> Self {
        let mut reg = Self::ZERO;
        unsafe { ptr::copy_nonoverlapping(ptr, reg.as_bytes_mut().as_mut_ptr(), Self::BYTES) };
        reg
    }

    /// Write `BYTES` bytes to `ptr`. No alignment requirement.
    ///
    /// # Safety
    /// `ptr` must be valid for writes of `BYTES` bytes.
    #[inline]
    unsafe fn write_unaligned(self, ptr: *mut u8) {
        unsafe { ptr::copy_nonoverlapping(self.as_bytes().as_ptr(), ptr, Self::BYTES) };
    }

    /// Lane-wise unary map. `T` and `U` must have the same width.
    #[inline]
    fn map<T: Lane, U: Lane>(self, mut f: impl FnMut(T) -> U) -> Self {
        debug_assert_eq!(T::BYTES, U::BYTES);
        (0..Self::lane_count::<T>()).fold(Self::ZERO, |out, i| out.with_lane(i, f(self.lane(i))))
    }

    /// Lane-wise binary map. `T` and `U` must have the same width.
    #[inline]
    fn zip_map<T: Lane, U: Lane>(self, other: Self, mut f: impl FnMut(T, T) -> U) -> Self {
        debug_assert_eq!(T::BYTES, U::BYTES);
        (0..Self::lane_count::<T>()).fold(Self::ZERO, |out, i| {
            out.with_lane(i, f(self.lane(i), other.lane(i)))
        })
    }

    /// Lane-wise ternary map over `(self, b, c)`.
    #[inline]
    fn zip3_map<T: Lane>(self, b: Self, c: Self, mut f: impl FnMut(T, T, T) -> T) -> Self {
        (0..Self::lane_count::<T>()).fold(Self::ZERO, |out, i| {
            out.with_lane(i, f(self.lane(i), b.lane(i), c.lane(i)))
        })
    }
}

impl sealed::Sealed for V128 {}
impl sealed::Sealed for V64 {}

impl Register for V128 {
    const BYTES: usize = 16;
    const ZERO: Self = V128::ZERO;

    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[inline]
    fn to_v128(self) -> V128 {
        self
    }

    #[inline]
    fn from_v128(v: V128) -> Self {
        v
    }
}

impl Register for V64 {
    const BYTES: usize = 8;
    const ZERO: Self = V64::ZERO;

    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    #[inline]
    fn to_v128(self) -> V128 {
        V128::combine(self, V64::ZERO)
    }

    #[inline]
    fn from_v128(v: V128) -> Self {
        v.low()
    }
}
