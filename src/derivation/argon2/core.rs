use std::time::Instant;

use log::debug;

use super::boundary::{finalize, init, init_lanes};
use super::fill::Filler;
use super::memory::{Memory, MemoryLayout};
use super::params::{Argon2Params, MIN_SALT_LEN, check_input_len};
use crate::error::Error;

/// Computes an Argon2 hash of the given password.
///
/// The variant, version, costs and optional secret/associated data all
/// come from `params`.
///
/// # Arguments
///
/// * `password` - The password to hash
/// * `salt` - A random salt (minimum 8 bytes, recommended 16+ bytes)
/// * `params` - Argon2 parameters
///
/// # Returns
///
/// The derived key (tag) as a byte vector of `params.tag_len` bytes.
///
/// # Errors
///
/// * [`Error::Validation`] if a parameter or input length is out of range
/// * [`Error::SaltTooShort`] if the salt is shorter than 8 bytes
/// * [`Error::Allocation`] if the memory matrix cannot be allocated
///
/// # Example
///
/// ```rust
/// use argon2_phc::derivation::{Argon2Params, argon2};
///
/// let params = Argon2Params::default().with_mem_kib(64).with_lanes(1).with_time(1);
/// let tag = argon2(b"my_password", b"random_salt_16b!", &params).unwrap();
/// assert_eq!(tag.len(), 32);
/// ```
pub fn argon2(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>, Error> {
    if salt.len() < MIN_SALT_LEN {
        return Err(Error::SaltTooShort { len: salt.len() });
    }

    derive(password, salt, params)
}

/// Runs the full computation without the raw-API salt length policy.
///
/// Salts taken from an encoded hash may be shorter than [`MIN_SALT_LEN`].
pub(crate) fn derive(password: &[u8], salt: &[u8], params: &Argon2Params) -> Result<Vec<u8>, Error> {
    params.validate()?;
    check_input_len("password", password)?;
    check_input_len("salt", salt)?;
    if let Some(secret) = &params.secret {
        check_input_len("secret", secret)?;
    }
    if let Some(data) = &params.associated_data {
        check_input_len("associated_data", data)?;
    }

    let layout = MemoryLayout::new(params);
    debug!(
        "argon2 start: variant={} version={} m={} ({} blocks) t={} p={} tag_len={}",
        params.variant,
        params.version,
        params.mem_kib,
        layout.total_blocks,
        params.time,
        params.lanes,
        params.tag_len
    );
    let started = Instant::now();

    let mut memory = Memory::allocate(&layout)?;

    let mut tag = Vec::new();
    tag.try_reserve_exact(params.tag_len as usize)
        .map_err(|_| Error::Allocation {
            blocks: (params.tag_len as u64).div_ceil(1024),
        })?;
    tag.resize(params.tag_len as usize, 0);

    let h0 = init(password, salt, params);
    init_lanes(&mut memory, &layout, &h0);

    Filler::new(&layout, params).fill(&mut memory);

    finalize(&memory, &layout, &mut tag);

    debug!("argon2 done in {:?}", started.elapsed());

    Ok(tag)
}
