//! Pure-Rust Argon2 password hashing with PHC string encoding.
//!
//! This crate implements the Argon2 memory-hard key derivation function
//! (Argon2d, Argon2i and Argon2id, versions 1.0 and 1.3) together with the
//! BLAKE2b primitive it is built on and the textual PHC format used to
//! store password hashes.
//!
//! The focus is on **clarity, predictability, and auditability**. The
//! hashing core is a pure function library: no process-wide state, every
//! parameter passed explicitly per call.
//!
//! # Module overview
//!
//! - `hash`
//!   BLAKE2b and the variable-length construction H′ built on it.
//!
//! - `derivation`
//!   The Argon2 algorithm itself: parameters and their limits, the block
//!   compression function, reference addressing, the memory-filling
//!   engine (optionally spread over threads, one group of lanes per
//!   worker), and finalization.
//!
//! - `encoding`
//!   PHC string encoding and decoding, including the unpadded Base64
//!   dialect used inside it.
//!
//! - `password`
//!   The everyday API: hash a password to a PHC string, verify a password
//!   against one, decide whether a stored hash needs to be recomputed with
//!   current parameters, and generate salts.
//!
//! - `error`
//!   [`ValidationError`], [`FormatError`] and the [`Error`] wrapper.
//!
//! # Example
//!
//! ```rust
//! use argon2_phc::{Argon2Params, Variant, hash, needs_rehash, verify};
//!
//! let params = Argon2Params::default()
//!     .with_variant(Variant::Argon2id)
//!     .with_mem_kib(1024)
//!     .with_time(2)
//!     .with_lanes(2);
//!
//! let encoded = hash(b"correct horse", &params).unwrap();
//! assert!(verify(&encoded, b"correct horse"));
//! assert!(!verify(&encoded, b"battery staple"));
//! assert!(!needs_rehash(&encoded, &params).unwrap());
//! ```
//!
//! # Features
//!
//! - `parallel` (default): fill lanes on a pool of scoped threads.
//! - `serde`: `Serialize`/`Deserialize` for parameters, so cost settings
//!   can be loaded from configuration files.
//!
//! # Design goals
//!
//! - Minimal and explicit APIs
//! - Stable, well-defined semantics
//! - Password-derived memory wiped after use
//! - Constant-time digest comparison

mod utils;

pub mod derivation;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod password;

pub use derivation::argon2::{
    Argon2Params, DEFAULT_SALT_LEN, LIMITS, Limit, Limits, MIN_SALT_LEN, Variant, Version,
};
pub use encoding::PhcHash;
pub use error::{Error, FormatError, ValidationError};
pub use password::{
    generate_salt, hash, hash_raw, hash_with_salt, needs_rehash, verify, verify_with_secret,
};
pub use utils::ct::ConstantTimeEq;
