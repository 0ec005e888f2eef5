//! Byte permutation capability
//!
//! The transpose engine needs exactly one platform primitive: "build a
//! register whose byte `i` is byte `mask[i]` of the input, or zero". x86
//! spells it `pshufb` (SSSE3), aarch64 spells it `tbl`. Hosts without either
//! fall back to a 16-iteration gather loop. Every backend produces identical
//! bytes; only speed differs.
//!
//! ## Mask convention
//!
//! A mask byte in `0..16` selects that input byte. `0x80` produces zero.
//! Those are the only values the engine emits, and they mean the same thing
//! to `pshufb` (high bit set => zero) and `tbl` (index >= 16 => zero). Other
//! values are outside the contract.
//!
//! ## Runtime dispatch
//!
//! `detect_permute_backend()` probes the CPU once; `permute_backend()`
//! caches that answer for the life of the process. Public transpose entry
//! points dispatch on the cached value. The `_with` variants in
//! `transpose` take a backend type parameter directly, which is how tests
//! and benchmarks compare backends.
//!
//! Environment override (useful for testing/debugging):
//! - `NEON_SHIM_FORCE_SCALAR=1`: ignore SIMD backends and use the gather loop.

use std::sync::OnceLock;

use crate::register::V128;

/// A byte permutation mask, see the module docs.
pub type PermuteMask = [u8; 16];

/// Mask value that yields a zero byte.
pub const ZERO_LANE: u8 = 0x80;

/// Applies a byte permutation to a 128-bit register.
pub trait BytePermute: Copy {
    /// Short name for diagnostics.
    const NAME: &'static str;

    /// Permute the bytes of `table` according to `mask`.
    ///
    /// # Safety
    /// The running CPU must support the backend's instruction set. The
    /// scalar backend has no requirement.
    unsafe fn permute(table: V128, mask: &PermuteMask) -> V128;
}

/// Portable gather loop. Available everywhere.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarPermute;

impl BytePermute for ScalarPermute {
    const NAME: &'static str = "scalar";

    #[inline]
    unsafe fn permute(table: V128, mask: &PermuteMask) -> V128 {
        scalar_permute(table, mask)
    }
}

/// Safe reference implementation of the permute capability.
#[inline]
pub fn scalar_permute(table: V128, mask: &PermuteMask) -> V128 {
    let src = table.to_bytes();
    let mut out = [0u8; 16];
    for (o, &m) in out.iter_mut().zip(mask) {
        *o = if m < 16 { src[m as usize] } else { 0 };
    }
    V128::from_bytes(out)
}

/// `pshufb` backend (x86_64 with SSSE3).
#[cfg(all(target_arch = "x86_64", feature = "native-permute"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct Ssse3Permute;

#[cfg(all(target_arch = "x86_64", feature = "native-permute"))]
impl BytePermute for Ssse3Permute {
    const NAME: &'static str = "ssse3";

    #[inline]
    unsafe fn permute(table: V128, mask: &PermuteMask) -> V128 {
        unsafe { ssse3_shuffle(table, mask) }
    }
}

#[cfg(all(target_arch = "x86_64", feature = "native-permute"))]
#[target_feature(enable = "ssse3")]
#[allow(unused_unsafe)]
unsafe fn ssse3_shuffle(table: V128, mask: &PermuteMask) -> V128 {
    use std::arch::x86_64::{__m128i, _mm_loadu_si128, _mm_shuffle_epi8, _mm_storeu_si128};

    let src = table.to_bytes();
    let mut out = [0u8; 16];
    unsafe {
        let t = _mm_loadu_si128(src.as_ptr() as *const __m128i);
        let m = _mm_loadu_si128(mask.as_ptr() as *const __m128i);
        _mm_storeu_si128(out.as_mut_ptr() as *mut __m128i, _mm_shuffle_epi8(t, m));
    }
    V128::from_bytes(out)
}

/// `tbl` backend (aarch64 NEON).
#[cfg(all(target_arch = "aarch64", feature = "native-permute"))]
#[derive(Clone, Copy, Debug, Default)]
pub struct NeonPermute;

#[cfg(all(target_arch = "aarch64", feature = "native-permute"))]
impl BytePermute for NeonPermute {
    const NAME: &'static str = "neon";

    #[inline]
    unsafe fn permute(table: V128, mask: &PermuteMask) -> V128 {
        use std::arch::aarch64::{vld1q_u8, vqtbl1q_u8, vst1q_u8};

        let src = table.to_bytes();
        let mut out = [0u8; 16];
        unsafe {
            let t = vld1q_u8(src.as_ptr());
            let m = vld1q_u8(mask.as_ptr());
            vst1q_u8(out.as_mut_ptr(), vqtbl1q_u8(t, m));
        }
        V128::from_bytes(out)
    }
}

/// Available permute backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermuteBackend {
    /// Gather loop - always available
    Scalar,
    /// SSSE3 `pshufb` - x86_64 only
    #[cfg(all(target_arch = "x86_64", feature = "native-permute"))]
    Ssse3,
    /// NEON `tbl` - aarch64 only
    #[cfg(all(target_arch = "aarch64", feature = "native-permute"))]
    Neon,
}

/// Environment variable that forces the scalar backend when set to `1`.
pub const FORCE_SCALAR_ENV: &str = "NEON_SHIM_FORCE_SCALAR";

/// Detects the best permute backend for this CPU.
///
/// Honors `NEON_SHIM_FORCE_SCALAR=1`.
pub fn detect_permute_backend() -> PermuteBackend {
    if std::env::var(FORCE_SCALAR_ENV).map(|v| v == "1").unwrap_or(false) {
        log::info!("{FORCE_SCALAR_ENV}=1: using scalar byte permute");
        return PermuteBackend::Scalar;
    }

    #[cfg(all(target_arch = "x86_64", feature = "native-permute"))]
    {
        if is_x86_feature_detected!("ssse3") {
            return PermuteBackend::Ssse3;
        }
        log::debug!("SSSE3 not detected, falling back to scalar byte permute");
        PermuteBackend::Scalar
    }

    #[cfg(all(target_arch = "aarch64", feature = "native-permute"))]
    {
        // NEON is part of the aarch64 baseline
        PermuteBackend::Neon
    }

    #[cfg(not(all(
        any(target_arch = "x86_64", target_arch = "aarch64"),
        feature = "native-permute"
    )))]
    {
        PermuteBackend::Scalar
    }
}

/// Process-wide backend, detected on first use.
pub fn permute_backend() -> PermuteBackend {
    static BACKEND: OnceLock<PermuteBackend> = OnceLock::new();
    *BACKEND.get_or_init(|| {
        let backend = detect_permute_backend();
        log::debug!("byte permute backend: {}", permute_backend_description(backend));
        backend
    })
}

/// Returns a human-readable description of the backend
pub fn permute_backend_description(backend: PermuteBackend) -> &'static str {
    match backend {
        PermuteBackend::Scalar => "scalar gather loop (portable)",
        #[cfg(all(target_arch = "x86_64", feature = "native-permute"))]
        PermuteBackend::Ssse3 => "SSSE3 pshufb (128-bit)",
        #[cfg(all(target_arch = "aarch64", feature = "native-permute"))]
        PermuteBackend::Neon => "NEON tbl (128-bit)",
    }
}

/// Run `$body` with `$P` bound to the backend type selected by `$backend`.
macro_rules! with_permute_backend {
    ($backend:expr, $P:ident => $body:expr) => {
        match $backend {
            $crate::permute::PermuteBackend::Scalar => {
                type $P = $crate::permute::ScalarPermute;
                $body
            }
            #[cfg(all(target_arch = "x86_64", feature = "native-permute"))]
            $crate::permute::PermuteBackend::Ssse3 => {
                type $P = $crate::permute::Ssse3Permute;
                $body
            }
            #[cfg(all(target_arch = "aarch64", feature = "native-permute"))]
            $crate::permute::PermuteBackend::Neon => {
                type $P = $crate::permute::NeonPermute;
                $body
            }
        }
    };
}

pub(crate) use with_permute_backend;

// ============================================================================
// Unit Tests
// ============================================================================
