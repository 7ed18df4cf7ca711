use argon2_phc::hash::{Blake2b, blake2b, blake2b_long};
use blake2::Blake2bVar;
use blake2::digest::{Update, VariableOutput};

fn reference(out_len: usize, input: &[u8]) -> Vec<u8> {
    let mut hasher = Blake2bVar::new(out_len).unwrap();
    hasher.update(input);
    let mut out = vec![0u8; out_len];
    hasher.finalize_variable(&mut out).unwrap();
    out
}

/// H′ spelled out with the reference crate, for cross-checking.
fn reference_long(out_len: usize, input: &[u8]) -> Vec<u8> {
    let mut prefixed = (out_len as u32).to_le_bytes().to_vec();
    prefixed.extend_from_slice(input);

    if out_len <= 64 {
        return reference(out_len, &prefixed);
    }

    let r = out_len.div_ceil(32) - 2;
    let mut out = Vec::with_capacity(out_len);
    let mut v = reference(64, &prefixed);
    out.extend_from_slice(&v[..32]);
    for _ in 1..r {
        v = reference(64, &v);
        out.extend_from_slice(&v[..32]);
    }
    out.extend_from_slice(&reference(out_len - 32 * r, &v));
    out
}

// -------------------------------------------------------
// OFFICIAL BLAKE2b-512 TEST VECTORS
// -------------------------------------------------------

#[test]
fn blake2b_empty_vector() {
    let expected = hex::decode(
        "786a02f742015903c6c6fd852552d272912f4740e15847618a86e217f71f5419\
         d25e1031afee585313896444934eb04b903a685b1448b755d56f701afe9be2ce",
    )
    .unwrap();
    assert_eq!(blake2b(64, b""), expected);
}

#[test]
fn blake2b_abc_vector() {
    let expected = hex::decode(
        "ba80a53f981c4d0d6a2797b69f12f6e94c212f14685ac4b74b12bb6fdbffa2d1\
         7d87c5392aab792dc252d5de4533cc9518d38aa8dbf1925ab92386edd4009923",
    )
    .unwrap();
    assert_eq!(blake2b(64, b"abc"), expected);
}

// -------------------------------------------------------
// CROSS-CHECK AGAINST THE blake2 CRATE
// -------------------------------------------------------

#[test]
fn blake2b_matches_reference_for_all_output_lengths() {
    let input: Vec<u8> = (0..200u32).map(|i| (i * 7 + 3) as u8).collect();
    for out_len in 1..=64 {
        assert_eq!(
            blake2b(out_len, &input),
            reference(out_len, &input),
            "output length {out_len}"
        );
    }
}

#[test]
fn blake2b_matches_reference_across_block_boundaries() {
    for len in [0usize, 1, 63, 64, 111, 112, 127, 128, 129, 255, 256, 257, 1024, 1025] {
        let input: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        assert_eq!(blake2b(64, &input), reference(64, &input), "input length {len}");
        assert_eq!(blake2b(32, &input), reference(32, &input), "input length {len}");
    }
}

#[test]
fn incremental_matches_reference() {
    let input = vec![0xa5u8; 777];
    let mut hasher = Blake2b::new(48);
    for chunk in input.chunks(50) {
        hasher.update(chunk);
    }
    let mut out = [0u8; 48];
    hasher.finalize_into(&mut out);
    assert_eq!(out.to_vec(), reference(48, &input));
}

// -------------------------------------------------------
// H′ (VARIABLE-LENGTH HASH)
// -------------------------------------------------------

#[test]
fn blake2b_long_matches_construction() {
    for out_len in [4usize, 32, 63, 64, 65, 96, 97, 128, 200, 1024] {
        assert_eq!(
            blake2b_long(out_len, b"argon2 input"),
            reference_long(out_len, b"argon2 input"),
            "output length {out_len}"
        );
    }
}

#[test]
fn blake2b_long_respects_length() {
    for out_len in [4usize, 64, 65, 1024, 4096] {
        assert_eq!(blake2b_long(out_len, b"x").len(), out_len);
    }
}
