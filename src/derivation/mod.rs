//! Key derivation functions.
//!
//! Currently provides Argon2 (d, i and id) as a pure-Rust implementation.

pub mod argon2;

pub use argon2::{Argon2Params, Variant, Version, argon2};
