//! Bit-exact NEON integer semantics on any host.
//!
//! Two engines: saturating/rounding lane arithmetic (`arith`) and structured
//! interleaved loads/stores (`transpose`). Register values are plain
//! `V64`/`V128` byte containers; the lane interpretation is picked per call.

pub mod arith;
pub mod error;
pub mod lane; // Lane model: Lane / IntLane / Widen traits
pub mod permute; // Byte permute backends and runtime detection
pub mod register;
pub mod transpose;

pub use error::{Result, ShimError};
pub use lane::{DoublingMul, IntLane, Lane, SignedLane, UnsignedLane, Widen};
pub use permute::{
    BytePermute, PermuteBackend, ScalarPermute, detect_permute_backend, permute_backend,
    permute_backend_description,
};
pub use register::{Register, V128, V64};
pub use transpose::{
    deinterleave_slice, interleave_into_slice, load_deinterleaved, load_duplicate, load_lane,
    store_interleaved, store_lane,
};
