//! Argon2 password hashing function (RFC 9106).
//!
//! Argon2 is a memory-hard password hashing function designed to resist
//! GPU-based brute-force attacks and, depending on the variant,
//! side-channel attacks.
//!
//! # Variants
//!
//! - **Argon2d**: data-dependent addressing. Fastest and most resistant to
//!   time-memory trade-offs, but reference positions leak through cache
//!   timing.
//! - **Argon2i**: data-independent addressing throughout.
//! - **Argon2id**: data-independent addressing for the first half of the
//!   first pass, data-dependent afterwards.
//!
//! Both version 1.0 (0x10) and version 1.3 (0x13) are supported. Version
//! 1.0 overwrites blocks on later passes; 1.3 XORs new blocks into the
//! previous contents.
//!
//! # Algorithm Overview
//!
//! 1. **Initialization**: Compute H0 = BLAKE2b(params || password || salt || ...)
//! 2. **Lane initialization**: Generate the first two blocks of each lane
//!    using H' (variable-length BLAKE2b).
//! 3. **Memory filling**: Fill the remaining blocks using the compression
//!    function G, which is based on the BLAKE2b round function with
//!    additional multiplication for diffusion.
//! 4. **Finalization**: XOR the last block of each lane together and apply
//!    H' to produce the final tag.
//!
//! # Memory Organization
//!
//! Memory is organized as a matrix of 1024-byte blocks:
//! - **Lanes**: independent rows that can be processed in parallel.
//! - **Slices**: each lane is divided into 4 slices (sync points).
//! - **Segments**: blocks of one lane within a slice.

pub(crate) mod block;
pub(crate) mod boundary;
pub mod core;
pub(crate) mod fill;
pub(crate) mod memory;
pub mod params;
pub(crate) mod reference;

pub use self::block::BLOCK_SIZE;
pub use self::core::argon2;
pub use self::params::{
    Argon2Params, DEFAULT_SALT_LEN, LIMITS, Limit, Limits, MIN_SALT_LEN, Variant, Version,
};
