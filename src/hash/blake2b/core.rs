//! BLAKE2b core hashing functions.
//!
//! This module provides:
//! - an incremental [`Blake2b`] hasher for digests of 1 to 64 bytes
//! - the one-shot [`blake2b`] convenience function
//! - the variable-length hash H′ ([`blake2b_long`]) from RFC 9106 §3.3
//!
//! Keyed hashing is not exposed: Argon2 never keys BLAKE2b, so the key
//! length in the parameter block is the constant zero.

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::computations::compress;
use super::{BLOCK_LEN, IV, MAX_OUT_LEN};

/// Incremental BLAKE2b hasher.
///
/// The final (possibly partial) block is kept buffered until
/// [`Blake2b::finalize_into`] so it can be compressed with the
/// finalization flag set. Internal state is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Blake2b {
    h: [u64; 8],
    buf: [u8; BLOCK_LEN],
    buf_len: usize,
    counter: u128,
    out_len: usize,
}

impl Blake2b {
    /// Creates a hasher producing `out_len` bytes (1..=64).
    pub fn new(out_len: usize) -> Self {
        debug_assert!(
            (1..=MAX_OUT_LEN).contains(&out_len),
            "BLAKE2b output length must be between 1 and 64"
        );

        let mut h = IV;
        // Parameter block word 0: digest length, key length 0, fanout 1, depth 1.
        h[0] ^= 0x0101_0000 ^ out_len as u64;

        Self {
            h,
            buf: [0u8; BLOCK_LEN],
            buf_len: 0,
            counter: 0,
            out_len,
        }
    }

    /// Absorbs `data` into the hash state.
    pub fn update(&mut self, mut data: &[u8]) {
        while !data.is_empty() {
            if self.buf_len == BLOCK_LEN {
                self.counter += BLOCK_LEN as u128;
                compress(&mut self.h, &self.buf, self.counter, false);
                self.buf_len = 0;
            }

            let take = (BLOCK_LEN - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];
        }
    }

    /// Finishes the computation and writes the digest into `out`.
    ///
    /// `out` must be exactly the output length given to [`Blake2b::new`].
    pub fn finalize_into(mut self, out: &mut [u8]) {
        debug_assert_eq!(out.len(), self.out_len);

        self.counter += self.buf_len as u128;
        self.buf[self.buf_len..].fill(0);
        compress(&mut self.h, &self.buf, self.counter, true);

        let mut bytes = Zeroizing::new([0u8; MAX_OUT_LEN]);
        for (chunk, word) in bytes.chunks_exact_mut(8).zip(self.h.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }

        let n = self.out_len.min(out.len());
        out[..n].copy_from_slice(&bytes[..n]);
    }

    /// Output length this hasher was configured with.
    pub fn output_len(&self) -> usize {
        self.out_len
    }
}

/// Computes the BLAKE2b digest of `input` with an `out_len`-byte output.
///
/// # Parameters
/// - `out_len`: digest length in bytes, between 1 and 64
/// - `input`: arbitrary-length message
pub fn blake2b(out_len: usize, input: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; out_len];
    let mut hasher = Blake2b::new(out_len);
    hasher.update(input);
    hasher.finalize_into(&mut out);
    out
}

/// Variable-length hash H′ writing `out.len()` bytes into `out`.
///
/// The message is the concatenation of `inputs`, prefixed with the output
/// length as a 32-bit little-endian integer. Outputs longer than 64 bytes
/// are produced by chaining 64-byte BLAKE2b digests and keeping the first
/// half of each, with a final digest sized to the remaining length.
pub fn blake2b_long_into(out: &mut [u8], inputs: &[&[u8]]) {
    let out_len = out.len();
    let prefix = (out_len as u32).to_le_bytes();

    if out_len <= MAX_OUT_LEN {
        let mut hasher = Blake2b::new(out_len);
        hasher.update(&prefix);
        inputs.iter().for_each(|input| hasher.update(input));
        hasher.finalize_into(out);
        return;
    }

    let mut v = Zeroizing::new([0u8; MAX_OUT_LEN]);
    let mut next = Zeroizing::new([0u8; MAX_OUT_LEN]);

    let mut hasher = Blake2b::new(MAX_OUT_LEN);
    hasher.update(&prefix);
    inputs.iter().for_each(|input| hasher.update(input));
    hasher.finalize_into(&mut v[..]);

    out[..32].copy_from_slice(&v[..32]);
    let mut pos = 32;

    while out_len - pos > MAX_OUT_LEN {
        let mut hasher = Blake2b::new(MAX_OUT_LEN);
        hasher.update(&v[..]);
        hasher.finalize_into(&mut next[..]);
        std::mem::swap(&mut *v, &mut *next);

        out[pos..pos + 32].copy_from_slice(&v[..32]);
        pos += 32;
    }

    let mut hasher = Blake2b::new(out_len - pos);
    hasher.update(&v[..]);
    hasher.finalize_into(&mut out[pos..]);
}

/// Variable-length hash H′ (RFC 9106 §3.3) returning `out_len` bytes.
pub fn blake2b_long(out_len: usize, input: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; out_len];
    blake2b_long_into(&mut out, &[input]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_updates_match_one_shot() {
        let data: Vec<u8> = (0..=255u8).cycle().take(1000).collect();
        let expected = blake2b(64, &data);

        for split in [0, 1, 127, 128, 129, 256, 999, 1000] {
            let mut hasher = Blake2b::new(64);
            hasher.update(&data[..split]);
            hasher.update(&data[split..]);
            let mut out = [0u8; 64];
            hasher.finalize_into(&mut out);
            assert_eq!(out.to_vec(), expected, "split at {split}");
        }
    }

    #[test]
    fn long_output_uses_short_path_up_to_64() {
        let direct = {
            let mut hasher = Blake2b::new(64);
            hasher.update(&64u32.to_le_bytes());
            hasher.update(b"abc");
            let mut out = [0u8; 64];
            hasher.finalize_into(&mut out);
            out
        };
        assert_eq!(blake2b_long(64, b"abc"), direct.to_vec());
    }

    #[test]
    fn long_output_prefix_is_first_half_of_v1() {
        let long = blake2b_long(1024, b"seed");

        let mut hasher = Blake2b::new(64);
        hasher.update(&1024u32.to_le_bytes());
        hasher.update(b"seed");
        let mut v1 = [0u8; 64];
        hasher.finalize_into(&mut v1);

        assert_eq!(&long[..32], &v1[..32]);
        assert_eq!(long.len(), 1024);
    }
}
