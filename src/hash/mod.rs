//! Hash algorithms exposed by the crate.
//!
//! Currently includes BLAKE2b and the variable-length H′ construction
//! built on it, with a pure-Rust implementation.

pub mod blake2b;

/// Re-export of the BLAKE2b convenience functions.
pub use blake2b::{Blake2b, blake2b, blake2b_long, blake2b_long_into};
