//! Error types.
//!
//! Parameter problems are reported as [`ValidationError`] before any memory
//! is allocated. Malformed encoded hashes are reported as [`FormatError`].
//! [`Error`] wraps both together with the failures that can only happen
//! while hashing.

use thiserror::Error;

/// A numeric parameter or input length outside its allowed range.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} {value}, must be between {min} and {max}")]
pub struct ValidationError {
    /// Name of the offending parameter (`"time"`, `"mem_kib"`, ...).
    pub field: &'static str,
    /// The rejected value.
    pub value: u64,
    /// Smallest accepted value.
    pub min: u64,
    /// Largest accepted value.
    pub max: u64,
}

/// Reasons a PHC string can fail to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The string does not start with `$`.
    #[error("encoded hash must start with '$'")]
    MissingPrefix,
    /// A required `$`-separated segment is absent or empty.
    #[error("missing {0} segment")]
    MissingSegment(&'static str),
    /// Extra `$`-separated segments after the hash.
    #[error("unexpected data after hash segment")]
    TrailingData,
    /// The algorithm identifier is not an Argon2 variant.
    #[error("unknown algorithm identifier {0:?}")]
    UnknownVariant(String),
    /// The `v=` segment is malformed or names an unsupported version.
    #[error("invalid version {0:?}")]
    InvalidVersion(String),
    /// A parameter is not of the form `key=value` or its value is malformed.
    #[error("invalid value for parameter {0:?}")]
    InvalidParam(String),
    /// A required parameter is absent.
    #[error("missing parameter {0:?}")]
    MissingParam(&'static str),
    /// A parameter appears more than once.
    #[error("duplicate parameter {0:?}")]
    DuplicateParam(String),
    /// A parameter not defined for Argon2.
    #[error("unknown parameter {0:?}")]
    UnknownParam(String),
    /// A Base64 field does not decode.
    #[error("invalid base64 in {0} segment")]
    InvalidBase64(&'static str),
}

/// Errors returned by the hashing entry points.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter is out of range.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The salt given to a raw hash call is shorter than 8 bytes.
    #[error("salt must be at least 8 bytes, got {len}")]
    SaltTooShort {
        /// Length of the rejected salt.
        len: usize,
    },
    /// An encoded hash could not be decoded.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The memory matrix could not be allocated.
    #[error("failed to allocate {blocks} memory blocks")]
    Allocation {
        /// Number of 1 KiB blocks requested.
        blocks: u64,
    },
}
