//! Transpose permutation tables
//!
//! A structured load reads `N` registers' worth of contiguous bytes and has
//! to route every byte to its place in one of `N` output registers. The
//! route depends only on the register width, the element width and `N`, so
//! it is computed once, at compile time, as a set of byte masks.
//!
//! For output register `k` and source register `j`, `mask[k][j]` holds, for
//! each output byte, the index of the source byte inside register `j`, or
//! `ZERO_LANE` if that output byte comes from another source. Output `k` is
//! then the OR of `permute(source_j, mask[k][j])` over `j`. Each output byte
//! is claimed by exactly one source, so the OR never mixes data.
//!
//! Even arities happen to map each output to one or two sources. `N = 3`
//! scatters every output across all three sources, which is why the general
//! "one partial shuffle per source, merged" shape is used throughout.

use crate::lane::Lane;
use crate::permute::{PermuteMask, ZERO_LANE};
use crate::register::Register;

/// Largest supported structure arity.
pub const MAX_ARITY: usize = 4;

/// One mask per source register.
pub type PermuteMaskRow = [PermuteMask; MAX_ARITY];

/// Byte routing for one (register width, element width, arity) triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransposePlan {
    pub reg_bytes: usize,
    pub elem_bytes: usize,
    pub arity: usize,
    /// Load side, indexed `[output][source]`.
    pub deinterleave: [PermuteMaskRow; MAX_ARITY],
    /// `deinterleave_uses[k][j]`: whether output `k` takes any byte from source `j`.
    pub deinterleave_uses: [[bool; MAX_ARITY]; MAX_ARITY],
    /// Store side, indexed `[memory chunk][register]`.
    pub interleave: [PermuteMaskRow; MAX_ARITY],
    pub interleave_uses: [[bool; MAX_ARITY]; MAX_ARITY],
}

impl TransposePlan {
    /// Build the plan. `reg_bytes` is 8 or 16, `elem_bytes` divides it and
    /// `arity` is in `2..=MAX_ARITY`.
    pub const fn new(reg_bytes: usize, elem_bytes: usize, arity: usize) -> Self {
        assert!(reg_bytes == 8 || reg_bytes == 16, "register must be 8 or 16 bytes");
        assert!(
            elem_bytes == 1 || elem_bytes == 2 || elem_bytes == 4 || elem_bytes == 8,
            "element must be 1, 2, 4 or 8 bytes"
        );
        assert!(elem_bytes <= reg_bytes);
        assert!(arity >= 2 && arity <= MAX_ARITY, "structure arity must be 2, 3 or 4");

        let mut deinterleave = [[[ZERO_LANE; 16]; MAX_ARITY]; MAX_ARITY];
        let mut deinterleave_uses = [[false; MAX_ARITY]; MAX_ARITY];
        let mut interleave = [[[ZERO_LANE; 16]; MAX_ARITY]; MAX_ARITY];
        let mut interleave_uses = [[false; MAX_ARITY]; MAX_ARITY];

        let mut k = 0;
        while k < arity {
            let mut pos = 0;
            while pos < reg_bytes {
                let b = pos % elem_bytes;

                // Load: lane `pos / elem_bytes` of output k is element `lane * N + k`.
                let lane = pos / elem_bytes;
                let src = (lane * arity + k) * elem_bytes + b;
                let j = src / reg_bytes;
                deinterleave[k][j][pos] = (src % reg_bytes) as u8;
                deinterleave_uses[k][j] = true;

                // Store: memory element `e` is field `e % N` of tuple `e / N`.
                let e = (k * reg_bytes + pos) / elem_bytes;
                let field = e % arity;
                let tuple = e / arity;
                interleave[k][field][pos] = (tuple * elem_bytes + b) as u8;
                interleave_uses[k][field] = true;

                pos += 1;
            }
            k += 1;
        }

        Self {
            reg_bytes,
            elem_bytes,
            arity,
            deinterleave,
            deinterleave_uses,
            interleave,
            interleave_uses,
        }
    }

    /// Number of permute passes a full load performs.
    pub fn deinterleave_passes(&self) -> usize {
        self.deinterleave_uses[..self.arity]
            .iter()
            .map(|row| row.iter().filter(|&&used| used).count())
            .sum()
    }

    #[cfg(feature = "debug-logging")]
    pub(crate) fn trace(&self, role: &str) {
        let (masks, uses) = match role {
            "interleave" => (&self.interleave, &self.interleave_uses),
            _ => (&self.deinterleave, &self.deinterleave_uses),
        };
        log::trace!(
            "{role} plan: reg={}B elem={}B arity={} passes={}",
            self.reg_bytes,
            self.elem_bytes,
            self.arity,
            self.deinterleave_passes()
        );
        for k in 0..self.arity {
            for j in 0..self.arity {
                if uses[k][j] {
                    log::trace!("  out[{k}] <- src[{j}] {:02x?}", &masks[k][j][..self.reg_bytes]);
                }
            }
        }
    }
}

/// Compile-time plan for element type `T`, register `R`, arity `N`.
#[inline(always)]
pub fn plan_for<T: Lane, R: Register, const N: usize>() -> &'static TransposePlan {
    const { &TransposePlan::new(R::BYTES, T::BYTES, N) }
}
