//! Block operations for Argon2.
//!
//! This module defines the fundamental 1024-byte block structure and the
//! compression function G that forms the core of the Argon2 algorithm.
//! The compression function is based on the BLAKE2b round function but
//! uses additional multiplication operations for enhanced diffusion.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::params::Variant;

/// Number of 64-bit words in a block.
pub(crate) const BLOCK_WORDS: usize = 128;

/// Size of a block in bytes.
pub const BLOCK_SIZE: usize = BLOCK_WORDS * 8;

/// A 1024-byte memory block (128 × 64-bit words).
///
/// Blocks are the fundamental unit of memory in Argon2. The algorithm
/// operates by filling and mixing these blocks using the compression
/// function G. Each block is zeroed on drop for security.
#[derive(Debug, Clone, Zeroize, ZeroizeOnDrop)]
pub struct Block(pub [u64; BLOCK_WORDS]);

impl Block {
    pub(crate) const ZERO: Self = Self([0u64; BLOCK_WORDS]);

    pub(crate) fn in_place_xor(&mut self, other: &Block) {
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a ^= b);
    }

    pub(crate) fn from_bytes(bytes: &[u8; BLOCK_SIZE]) -> Self {
        let mut block = Block::ZERO;
        block
            .0
            .iter_mut()
            .zip(bytes.chunks_exact(8))
            .for_each(|(word, chunk)| {
                let mut le = [0u8; 8];
                le.copy_from_slice(chunk);
                *word = u64::from_le_bytes(le);
            });
        block
    }

    pub(crate) fn write_bytes(&self, out: &mut [u8; BLOCK_SIZE]) {
        out.chunks_exact_mut(8)
            .zip(self.0.iter())
            .for_each(|(chunk, word)| chunk.copy_from_slice(&word.to_le_bytes()));
    }

    /// Compression function G (RFC 9106 §3.5).
    ///
    /// Computes G(X, Y) = P(P(X ⊕ Y)) ⊕ X ⊕ Y, where P is a permutation
    /// based on the BLAKE2b round function. The permutation is applied
    /// twice: first on rows of 16 words, then on columns.
    pub(crate) fn compress(x: &Self, y: &Self) -> Self {
        let mut out = Block::ZERO;
        Block::compress_into(&mut out, x, y, false);
        out
    }

    /// Writes G(`x`, `y`) into `dst`, or XORs it into `dst` when
    /// `with_xor` is set.
    ///
    /// `dst` may hold the previous contents of the block being refilled;
    /// it must not alias `x` or `y`.
    pub(crate) fn compress_into(dst: &mut Self, x: &Self, y: &Self, with_xor: bool) {
        let mut r = Block::ZERO;
        for i in 0..BLOCK_WORDS {
            r.0[i] = x.0[i] ^ y.0[i];
        }

        let mut z = r.clone();

        // Rows: 8 groups of 16 consecutive words
        for i in 0..8 {
            let base = 16 * i;
            let mut v = [0u64; 16];
            v.copy_from_slice(&z.0[base..base + 16]);
            permute_p(&mut v);
            z.0[base..base + 16].copy_from_slice(&v);
        }

        // Columns: 8 groups of interleaved word pairs
        for i in 0..8 {
            let cols: [usize; 16] = core::array::from_fn(|k| 2 * i + (k / 2) * 16 + (k % 2));
            let mut v = cols.map(|c| z.0[c]);
            permute_p(&mut v);
            for (word, c) in v.iter().zip(cols) {
                z.0[c] = *word;
            }
            v.zeroize();
        }

        if with_xor {
            for i in 0..BLOCK_WORDS {
                dst.0[i] ^= z.0[i] ^ r.0[i];
            }
        } else {
            for i in 0..BLOCK_WORDS {
                dst.0[i] = z.0[i] ^ r.0[i];
            }
        }
    }
}

/// Source of pseudo-random words for data-independent addressing.
///
/// The address block is computed as G(0, G(0, Z)) where Z holds the
/// current position, the memory geometry, the variant and a counter.
/// One address block supplies 128 reference words.
pub(crate) struct AddressBlock {
    input: Block,
    address: Block,
}

impl AddressBlock {
    pub(crate) fn new(
        pass: u32,
        lane: u32,
        slice: u32,
        total_blocks: u32,
        time: u32,
        variant: Variant,
    ) -> Self {
        let mut input = Block::ZERO;
        input.0[0] = pass as u64;
        input.0[1] = lane as u64;
        input.0[2] = slice as u64;
        input.0[3] = total_blocks as u64;
        input.0[4] = time as u64;
        input.0[5] = variant.as_u32() as u64;

        Self {
            input,
            address: Block::ZERO,
        }
    }

    /// Bumps the counter and regenerates the address block.
    pub(crate) fn advance(&mut self) {
        self.input.0[6] += 1;
        let tmp = Block::compress(&Block::ZERO, &self.input);
        Block::compress_into(&mut self.address, &Block::ZERO, &tmp, false);
    }

    #[inline]
    pub(crate) fn word(&self, index_in_segment: u32) -> u64 {
        self.address.0[index_in_segment as usize % BLOCK_WORDS]
    }
}

/// GB mixing function (Argon2 variant of BLAKE2b's G).
///
/// Unlike the original BLAKE2b G function which adds message words,
/// Argon2's GB function uses multiplication of the lower 32 bits to
/// achieve better diffusion. The formula for each step is:
///
/// ```text
/// a = a + b + 2 × trunc(a) × trunc(b)
/// d = (d ⊕ a) >>> rotation
/// ```
///
/// where trunc() extracts the lower 32 bits. The rotation amounts are
/// 32, 24, 16, and 63 bits respectively.
#[inline(always)]
fn gb(a: u64, b: u64, c: u64, d: u64) -> (u64, u64, u64, u64) {
    let a = fbla_mka(a, b);
    let d = (d ^ a).rotate_right(32);

    let c = fbla_mka(c, d);
    let b = (b ^ c).rotate_right(24);

    let a = fbla_mka(a, b);
    let d = (d ^ a).rotate_right(16);

    let c = fbla_mka(c, d);
    let b = (b ^ c).rotate_right(63);

    (a, b, c, d)
}

#[inline(always)]
fn fbla_mka(x: u64, y: u64) -> u64 {
    let m = (x & 0xffff_ffff).wrapping_mul(y & 0xffff_ffff);
    x.wrapping_add(y).wrapping_add(m.wrapping_mul(2))
}

/// P permutation: one round of the BLAKE2-like mixing.
///
/// Applies GB to a 4×4 matrix of 64-bit words, first along columns,
/// then along diagonals.
#[inline(always)]
fn permute_p(v: &mut [u64; 16]) {
    (v[0], v[4], v[8], v[12]) = gb(v[0], v[4], v[8], v[12]);
    (v[1], v[5], v[9], v[13]) = gb(v[1], v[5], v[9], v[13]);
    (v[2], v[6], v[10], v[14]) = gb(v[2], v[6], v[10], v[14]);
    (v[3], v[7], v[11], v[15]) = gb(v[3], v[7], v[11], v[15]);

    (v[0], v[5], v[10], v[15]) = gb(v[0], v[5], v[10], v[15]);
    (v[1], v[6], v[11], v[12]) = gb(v[1], v[6], v[11], v[12]);
    (v[2], v[7], v[8], v[13]) = gb(v[2], v[7], v[8], v[13]);
    (v[3], v[4], v[9], v[14]) = gb(v[3], v[4], v[9], v[14]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compress_with_xor_accumulates() {
        let x = Block(core::array::from_fn(|i| i as u64));
        let y = Block(core::array::from_fn(|i| (i as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15)));

        let fresh = Block::compress(&x, &y);

        let mut acc = Block(core::array::from_fn(|i| !(i as u64)));
        let before = acc.clone();
        Block::compress_into(&mut acc, &x, &y, true);

        let mut expected = before;
        expected.in_place_xor(&fresh);
        assert_eq!(acc.0, expected.0);
    }

    #[test]
    fn compress_of_zero_blocks_is_zero() {
        let z = Block::compress(&Block::ZERO, &Block::ZERO);
        assert!(z.0.iter().all(|&w| w == 0));
    }

    #[test]
    fn bytes_round_trip() {
        let block = Block(core::array::from_fn(|i| (i as u64) << 40 | 0xab));
        let mut bytes = [0u8; BLOCK_SIZE];
        block.write_bytes(&mut bytes);
        assert_eq!(Block::from_bytes(&bytes).0, block.0);
    }

    #[test]
    fn address_counter_changes_words() {
        let mut addr = AddressBlock::new(0, 0, 0, 32, 3, Variant::Argon2i);
        addr.advance();
        let first = addr.word(0);
        addr.advance();
        assert_ne!(first, addr.word(0));
    }
}
