//! Password hashing API.
//!
//! Thin layer over [`crate::derivation::argon2`] that produces and checks
//! PHC strings:
//!
//! - [`hash`] / [`hash_with_salt`] derive a digest and encode it
//! - [`verify`] / [`verify_with_secret`] check a password against an
//!   encoded hash, returning `false` rather than an error for anything
//!   that does not match
//! - [`needs_rehash`] tells whether a stored hash was made with outdated
//!   cost parameters
//! - [`generate_salt`] draws a fresh salt from the operating system

use log::{debug, warn};
use rand::RngCore;
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::derivation::argon2::core::derive;
use crate::derivation::argon2::{Argon2Params, DEFAULT_SALT_LEN, argon2};
use crate::encoding::PhcHash;
use crate::error::{Error, FormatError};
use crate::utils::ct::ConstantTimeEq;

/// Returns `len` cryptographically secure random bytes.
pub fn generate_salt(len: usize) -> Vec<u8> {
    let mut salt = vec![0u8; len];
    OsRng.fill_bytes(&mut salt);
    salt
}

/// Hashes `password` with a fresh 16-byte salt and returns the PHC string.
///
/// # Example
///
/// ```rust
/// use argon2_phc::{Argon2Params, hash, verify};
///
/// let params = Argon2Params::default().with_mem_kib(256).with_lanes(2).with_time(1);
/// let encoded = hash(b"hunter2", &params).unwrap();
/// assert!(encoded.starts_with("$argon2id$v=19$m=256,t=1,p=2$"));
/// assert!(verify(&encoded, b"hunter2"));
/// ```
pub fn hash(password: &[u8], params: &Argon2Params) -> Result<String, Error> {
    let salt = generate_salt(DEFAULT_SALT_LEN);
    hash_with_salt(password, &salt, params)
}

/// Hashes `password` with a caller-supplied salt and returns the PHC string.
pub fn hash_with_salt(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<String, Error> {
    let tag = argon2(password, salt, params)?;
    Ok(PhcHash::new(params, salt, tag).encode())
}

/// Hashes `password` and returns the raw digest instead of a PHC string.
pub fn hash_raw(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>, Error> {
    argon2(password, salt, params)
}

/// Checks `password` against an encoded hash.
///
/// Returns `false` when the hash does not decode, carries out-of-range
/// parameters, cannot be recomputed, or does not match.
pub fn verify(encoded: &str, password: &[u8]) -> bool {
    verify_with_secret(encoded, password, None)
}

/// Like [`verify`], for hashes created with a secret key.
pub fn verify_with_secret(encoded: &str, password: &[u8], secret: Option<&[u8]>) -> bool {
    let record = match PhcHash::decode(encoded) {
        Ok(record) => record,
        Err(err) => {
            debug!("rejecting undecodable hash: {err}");
            return false;
        }
    };

    let mut params = record.params();
    params.secret = secret.map(<[u8]>::to_vec);

    match derive(password, &record.salt, &params) {
        Ok(tag) => {
            let tag = Zeroizing::new(tag);
            tag.as_slice().ct_eq(&record.hash)
        }
        Err(Error::Validation(err)) => {
            debug!("rejecting hash with unusable parameters: {err}");
            false
        }
        Err(err) => {
            warn!("argon2 verification could not run: {err}");
            false
        }
    }
}

/// Tells whether `encoded` was produced with a different version, memory
/// cost or time cost than `params`.
///
/// Parallelism, tag length and variant are not compared: changing them
/// does not strengthen an existing hash.
pub fn needs_rehash(encoded: &str, params: &Argon2Params) -> Result<bool, FormatError> {
    let record = PhcHash::decode(encoded)?;

    Ok(record.version != params.version
        || record.mem_kib != params.mem_kib
        || record.time != params.time)
}
