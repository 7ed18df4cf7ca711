//! Low-level, non-cryptographic helpers shared by the rest of the crate.

pub mod ct;
