//! Error type for the checked (slice based) transpose entry points.
//!
//! The arithmetic engine and the pointer based transpose calls are total and
//! never fail; only the slice wrappers validate their inputs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShimError {
    #[error("{arity}-way structure needs exactly {expected} elements, got {actual}")]
    LengthMismatch {
        arity: usize,
        expected: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, ShimError>;
