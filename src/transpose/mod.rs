//! Structured memory transpose engine
//!
//! Loads that split a stream of `N`-element tuples into `N` registers and
//! stores that merge them back (`vld2`..`vld4` / `vst2`..`vst4` and their
//! duplicate and single-lane forms).
//!
//! ```
//! use neon_shim::{Register, V128, transpose};
//!
//! let rgb: Vec<u8> = (0..48).collect();
//! let [r, g, b]: [V128; 3] = transpose::deinterleave_slice::<u8, 3, V128>(&rgb).unwrap();
//! assert_eq!(r.lane::<u8>(1), 3);
//! assert_eq!(g.lane::<u8>(1), 4);
//! assert_eq!(b.lane::<u8>(15), 47);
//! ```
//!
//! ## Layout
//!
//! For element type `T`, register `R` with `n = R::lane_count::<T>()` lanes
//! and arity `N`, memory holds `N * n` elements: tuple `i` is elements
//! `i*N .. i*N + N`. After a load, lane `i` of register `k` is element
//! `i*N + k`. A store is the exact inverse.
//!
//! ## Implementation
//!
//! The `N` source registers are read as-is and each output is assembled from
//! per-source byte permutations (see `plan`), one pass per (output, source)
//! pair that shares any bytes, OR-merged. The permutation itself is supplied
//! by a `BytePermute` backend; the plain entry points use the process-wide
//! backend from `permute::permute_backend()`, the `_with` entry points take
//! one explicitly.
//!
//! ## Safety
//!
//! Pointer entry points do no length validation: the caller guarantees the
//! pointer is valid for the documented number of elements. No alignment is
//! required. `deinterleave_slice` / `interleave_into_slice` are the checked
//! wrappers.

pub mod plan;

use crate::error::{Result, ShimError};
use crate::lane::Lane;
use crate::permute::{BytePermute, permute_backend, with_permute_backend};
use crate::register::{Register, V128};

use plan::{MAX_ARITY, PermuteMaskRow, plan_for};

/// OR together `permute(sources[j], masks[j])` for every source in use.
#[inline(always)]
unsafe fn gather<P: BytePermute>(sources: &[V128], masks: &PermuteMaskRow, uses: &[bool; MAX_ARITY]) -> V128 {
    let mut out = V128::ZERO;
    for (j, &source) in sources.iter().enumerate() {
        if uses[j] {
            out = out | unsafe { P::permute(source, &masks[j]) };
        }
    }
    out
}

/// Deinterleaving load with an explicit permute backend.
///
/// # Safety
/// `ptr` must be valid for reads of `N * R::lane_count::<T>()` elements and
/// the running CPU must support `P`.
#[inline]
pub unsafe fn load_deinterleaved_with<P: BytePermute, T: Lane, const N: usize, R: Register>(
    ptr: *const T,
) -> [R; N] {
    const { assert!(N >= 2 && N <= MAX_ARITY, "structure arity must be 2, 3 or 4") };
    let plan = plan_for::<T, R, N>();
    #[cfg(feature = "debug-logging")]
    plan.trace("deinterleave");

    let base = ptr.cast::<u8>();
    let sources: [V128; N] =
        std::array::from_fn(|j| unsafe { R::read_unaligned(base.add(j * R::BYTES)) }.to_v128());
    std::array::from_fn(|k| {
        let merged = unsafe { gather::<P>(&sources, &plan.deinterleave[k], &plan.deinterleave_uses[k]) };
        R::from_v128(merged)
    })
}

/// Interleaving store with an explicit permute backend.
///
/// # Safety
/// `ptr` must be valid for writes of `N * R::lane_count::<T>()` elements and
/// the running CPU must support `P`.
#[inline]
pub unsafe fn store_interleaved_with<P: BytePermute, T: Lane, const N: usize, R: Register>(
    ptr: *mut T,
    regs: [R; N],
) {
    const { assert!(N >= 2 && N <= MAX_ARITY, "structure arity must be 2, 3 or 4") };
    let plan = plan_for::<T, R, N>();
    #[cfg(feature = "debug-logging")]
    plan.trace("interleave");

    let base = ptr.cast::<u8>();
    let sources: [V128; N] = regs.map(R::to_v128);
    for k in 0..N {
        let merged = unsafe { gather::<P>(&sources, &plan.interleave[k], &plan.interleave_uses[k]) };
        unsafe { R::from_v128(merged).write_unaligned(base.add(k * R::BYTES)) };
    }
}

/// Deinterleaving load (`vldN`): lane `i` of register `k` is element `i*N + k`.
///
/// # Safety
/// `ptr` must be valid for reads of `N * R::lane_count::<T>()` elements.
#[inline]
pub unsafe fn load_deinterleaved<T: Lane, const N: usize, R: Register>(ptr: *const T) -> [R; N] {
    with_permute_backend!(permute_backend(), P => unsafe {
        load_deinterleaved_with::<P, T, N, R>(ptr)
    })
}

/// Interleaving store (`vstN`), the inverse of `load_deinterleaved`.
///
/// # Safety
/// `ptr` must be valid for writes of `N * R::lane_count::<T>()` elements.
#[inline]
pub unsafe fn store_interleaved<T: Lane, const N: usize, R: Register>(ptr: *mut T, regs: [R; N]) {
    with_permute_backend!(permute_backend(), P => unsafe {
        store_interleaved_with::<P, T, N, R>(ptr, regs)
    })
}

/// Load one tuple and broadcast element `k` to every lane of register `k`
/// (`vldN_dup`).
///
/// # Safety
/// `ptr` must be valid for reads of `N` elements.
#[inline]
pub unsafe fn load_duplicate<T: Lane, const N: usize, R: Register>(ptr: *const T) -> [R; N] {
    const { assert!(N >= 2 && N <= MAX_ARITY, "structure arity must be 2, 3 or 4") };
    std::array::from_fn(|k| R::splat(unsafe { ptr.add(k).read_unaligned() }))
}

/// Load one tuple into lane `L` of each register (`vldN_lane`). Every other
/// lane keeps its value from `regs`.
///
/// # Safety
/// `ptr` must be valid for reads of `N` elements.
#[inline]
pub unsafe fn load_lane<T: Lane, const N: usize, R: Register, const L: usize>(
    ptr: *const T,
    regs: [R; N],
) -> [R; N] {
    const { assert!(N >= 2 && N <= MAX_ARITY, "structure arity must be 2, 3 or 4") };
    const { assert!(L < R::BYTES / T::BYTES, "lane index out of range") };
    let mut out = regs;
    for (k, reg) in out.iter_mut().enumerate() {
        *reg = reg.with_lane(L, unsafe { ptr.add(k).read_unaligned() });
    }
    out
}

/// Store lane `L` of each register as one tuple (`vstN_lane`). Writes
/// exactly `N` elements.
///
/// # Safety
/// `ptr` must be valid for writes of `N` elements.
#[inline]
pub unsafe fn store_lane<T: Lane, const N: usize, R: Register, const L: usize>(
    ptr: *mut T,
    regs: [R; N],
) {
    const { assert!(N >= 2 && N <= MAX_ARITY, "structure arity must be 2, 3 or 4") };
    const { assert!(L < R::BYTES / T::BYTES, "lane index out of range") };
    for (k, reg) in regs.iter().enumerate() {
        unsafe { ptr.add(k).write_unaligned(reg.lane::<T>(L)) };
    }
}

fn check_len<T: Lane, const N: usize, R: Register>(actual: usize) -> Result<()> {
    let expected = N * R::lane_count::<T>();
    if actual != expected {
        return Err(ShimError::LengthMismatch { arity: N, expected, actual });
    }
    Ok(())
}

/// Checked `load_deinterleaved`: `src` must hold exactly
/// `N * R::lane_count::<T>()` elements.
pub fn deinterleave_slice<T: Lane, const N: usize, R: Register>(src: &[T]) -> Result<[R; N]> {
    check_len::<T, N, R>(src.len())?;
    // SAFETY: length checked above.
    Ok(unsafe { load_deinterleaved::<T, N, R>(src.as_ptr()) })
}

/// Checked `store_interleaved`: `dst` must hold exactly
/// `N * R::lane_count::<T>()` elements.
pub fn interleave_into_slice<T: Lane, const N: usize, R: Register>(
    regs: [R; N],
    dst: &mut [T],
) -> Result<()> {
    check_len::<T, N, R>(dst.len())?;
    // SAFETY: length checked above.
    unsafe { store_interleaved::<T, N, R>(dst.as_mut_ptr(), regs) };
    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================
