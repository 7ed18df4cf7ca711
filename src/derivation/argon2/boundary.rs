//! Initialization and finalization for Argon2.
//!
//! This module handles the boundary operations of the Argon2 algorithm:
//! computing the initial hash H0 from all inputs, seeding the first two
//! blocks of every lane, and deriving the final tag from the filled memory.

use zeroize::Zeroizing;

use super::block::{BLOCK_SIZE, Block};
use super::memory::{Memory, MemoryLayout};
use super::params::Argon2Params;
use crate::hash::{Blake2b, blake2b_long_into};

/// Length of H0 in bytes.
pub(crate) const PREHASH_LEN: usize = 64;

fn absorb_prefixed(hasher: &mut Blake2b, input: &[u8]) {
    hasher.update(&(input.len() as u32).to_le_bytes());
    hasher.update(input);
}

/// Computes the initial hash H0 from all Argon2 inputs.
///
/// H0 is a 64-byte BLAKE2b hash of the concatenation of all parameters
/// and inputs, each variable-length input prefixed with its length:
/// ```text
/// H0 = BLAKE2b(p || T || m || t || v || y || |P| || P || |S| || S || |K| || K || |X| || X)
/// ```
/// `m` is the requested memory size, before rounding. Input lengths have
/// already been validated to fit in 32 bits.
pub(crate) fn init(
    password: &[u8],
    salt: &[u8],
    params: &Argon2Params,
) -> Zeroizing<[u8; PREHASH_LEN]> {
    let mut hasher = Blake2b::new(PREHASH_LEN);

    hasher.update(&params.lanes.to_le_bytes());
    hasher.update(&params.tag_len.to_le_bytes());
    hasher.update(&params.mem_kib.to_le_bytes());
    hasher.update(&params.time.to_le_bytes());
    hasher.update(&params.version.as_u32().to_le_bytes());
    hasher.update(&params.variant.as_u32().to_le_bytes());

    absorb_prefixed(&mut hasher, password);
    absorb_prefixed(&mut hasher, salt);
    absorb_prefixed(&mut hasher, params.secret.as_deref().unwrap_or_default());
    absorb_prefixed(&mut hasher, params.associated_data.as_deref().unwrap_or_default());

    let mut h0 = Zeroizing::new([0u8; PREHASH_LEN]);
    hasher.finalize_into(&mut h0[..]);
    h0
}

/// Seeds the first two blocks of every lane:
/// `B[i][j] = H'^(1024)(H0 || LE32(j) || LE32(i))` for `j ∈ {0, 1}`.
pub(crate) fn init_lanes(memory: &mut Memory, layout: &MemoryLayout, h0: &[u8; PREHASH_LEN]) {
    let mut bytes = Zeroizing::new([0u8; BLOCK_SIZE]);

    for lane in 0..layout.lanes {
        for j in 0..2u32 {
            blake2b_long_into(
                &mut bytes[..],
                &[&h0[..], &j.to_le_bytes(), &lane.to_le_bytes()],
            );
            *memory.block_mut(layout.index(lane, j)) = Block::from_bytes(&bytes);
        }
    }
}

/// Finalizes the Argon2 computation into `tag`.
///
/// The finalization XORs together the last block of each lane (forming
/// a single 1024-byte block), then applies the variable-length hash
/// function H' to produce `tag.len()` bytes.
pub(crate) fn finalize(memory: &Memory, layout: &MemoryLayout, tag: &mut [u8]) {
    let mut final_block = Block::ZERO;

    for lane in 0..layout.lanes {
        final_block.in_place_xor(memory.block(layout.last_in_lane(lane)));
    }

    let mut bytes = Zeroizing::new([0u8; BLOCK_SIZE]);
    final_block.write_bytes(&mut bytes);

    blake2b_long_into(tag, &[&bytes[..]]);
}
