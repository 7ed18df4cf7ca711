use argon2_phc::encoding::PhcHash;
use argon2_phc::{FormatError, Variant, Version};
use proptest::prelude::*;

const SPEC_ID: &str =
    "$argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0c2FsdA$rBWULD5jOGpQy32rLvGcmvQMVqIVNAmrCtekWvUA8bw";

#[test]
fn decodes_standard_string() {
    let record = PhcHash::decode(SPEC_ID).unwrap();
    assert_eq!(record.variant, Variant::Argon2id);
    assert_eq!(record.version, Version::V0x13);
    assert_eq!((record.mem_kib, record.time, record.lanes), (65536, 3, 4));
    assert_eq!(record.salt, b"saltsaltsaltsalt");
    assert_eq!(record.hash.len(), 32);
    assert!(record.associated_data.is_none());
}

#[test]
fn encodes_back_to_the_same_string() {
    let record: PhcHash = SPEC_ID.parse().unwrap();
    assert_eq!(record.encode(), SPEC_ID);
    assert_eq!(record.to_string(), SPEC_ID);
}

#[test]
fn associated_data_is_encoded_after_costs() {
    let record = PhcHash {
        variant: Variant::Argon2i,
        version: Version::V0x13,
        mem_kib: 4096,
        time: 3,
        lanes: 1,
        associated_data: Some(b"somedata".to_vec()),
        salt: b"somesalt".to_vec(),
        hash: vec![0u8; 4],
    };
    let encoded = record.encode();
    assert_eq!(
        encoded,
        "$argon2i$v=19$m=4096,t=3,p=1,data=c29tZWRhdGE$c29tZXNhbHQ$AAAAAA"
    );
    assert_eq!(PhcHash::decode(&encoded).unwrap(), record);
}

#[test]
fn legacy_string_without_version_is_v10() {
    let record =
        PhcHash::decode("$argon2i$m=65536,t=2,p=1$c29tZXNhbHQ$9sTbSlTio3Biev89thdrlKKiCaYsjjYVJxGAL3swxpQ")
            .unwrap();
    assert_eq!(record.version, Version::V0x10);
    assert_eq!(record.variant, Variant::Argon2i);
}

#[test]
fn padding_is_tolerated() {
    let padded =
        "$argon2i$v=19$m=256,t=2,p=1$c29tZXNhbHQ=$iekCn0Y3spW+sCcFanM2xBT63UP2sghkUoHLIUpWRS8=";
    let record = PhcHash::decode(padded).unwrap();
    assert_eq!(record.salt, b"somesalt");
    assert_eq!(
        record.encode(),
        "$argon2i$v=19$m=256,t=2,p=1$c29tZXNhbHQ$iekCn0Y3spW+sCcFanM2xBT63UP2sghkUoHLIUpWRS8"
    );
}

#[test]
fn params_record_uses_digest_length() {
    let record = PhcHash::decode(SPEC_ID).unwrap();
    let params = record.params();
    assert_eq!(params.tag_len, 32);
    assert_eq!(params.mem_kib, 65536);
    assert!(params.secret.is_none());
}

// -------------------------------------------------------
// REJECTIONS
// -------------------------------------------------------

fn decode_err(encoded: &str) -> FormatError {
    PhcHash::decode(encoded).unwrap_err()
}

#[test]
fn rejects_unknown_variant() {
    assert_eq!(
        decode_err("$argon2x$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::UnknownVariant("argon2x".into())
    );
    assert!(matches!(
        decode_err("$2b$10$abcdefghijklmnopqrstuu5Jt0GvZ2z/7nqfC0qBa.h0o8GQSZxW"),
        FormatError::UnknownVariant(_)
    ));
}

#[test]
fn rejects_missing_salt_or_hash() {
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=1,p=1"),
        FormatError::MissingSegment("salt")
    );
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ"),
        FormatError::MissingSegment("hash")
    );
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$"),
        FormatError::MissingSegment("hash")
    );
}

#[test]
fn rejects_non_numeric_params() {
    assert_eq!(
        decode_err("$argon2id$v=19$m=lots,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::InvalidParam("m".into())
    );
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=-1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::InvalidParam("t".into())
    );
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=1,p=99999999999$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::InvalidParam("p".into())
    );
}

#[test]
fn rejects_missing_unknown_and_duplicate_params() {
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=1$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::MissingParam("p")
    );
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=1,p=1,x=2$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::UnknownParam("x".into())
    );
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::DuplicateParam("m".into())
    );
}

#[test]
fn rejects_bad_version() {
    assert_eq!(
        decode_err("$argon2id$v=18$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::InvalidVersion("18".into())
    );
    assert_eq!(
        decode_err("$argon2id$v=nineteen$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g"),
        FormatError::InvalidVersion("nineteen".into())
    );
}

#[test]
fn rejects_bad_base64_and_trailing_data() {
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=1,p=1$c2Fs*HNhbHQ$aGFzaGhhc2g"),
        FormatError::InvalidBase64("salt")
    );
    assert_eq!(
        decode_err("$argon2id$v=19$m=8,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2g$extra"),
        FormatError::TrailingData
    );
    assert_eq!(decode_err("argon2id$v=19"), FormatError::MissingPrefix);
    assert_eq!(decode_err("$"), FormatError::MissingSegment("algorithm"));
}

// -------------------------------------------------------
// ROUND TRIP PROPERTIES
// -------------------------------------------------------

fn variant() -> impl Strategy<Value = Variant> {
    prop_oneof![
        Just(Variant::Argon2d),
        Just(Variant::Argon2i),
        Just(Variant::Argon2id),
    ]
}

fn version() -> impl Strategy<Value = Version> {
    prop_oneof![Just(Version::V0x10), Just(Version::V0x13)]
}

prop_compose! {
    fn record()(
        variant in variant(),
        version in version(),
        mem_kib in any::<u32>(),
        time in any::<u32>(),
        lanes in any::<u32>(),
        associated_data in proptest::option::of(proptest::collection::vec(any::<u8>(), 0..40)),
        salt in proptest::collection::vec(any::<u8>(), 1..64),
        hash in proptest::collection::vec(any::<u8>(), 1..128),
    ) -> PhcHash {
        PhcHash { variant, version, mem_kib, time, lanes, associated_data, salt, hash }
    }
}

proptest! {
    #[test]
    fn decode_inverts_encode(record in record()) {
        let encoded = record.encode();
        let binary = encoded.rsplitn(3, '$').take(2).collect::<Vec<_>>();
        prop_assert!(binary.iter().all(|segment| !segment.contains('=')));
        prop_assert_eq!(PhcHash::decode(&encoded).unwrap(), record);
    }

    #[test]
    fn decode_never_panics(input in "\\PC*") {
        let _ = PhcHash::decode(&input);
    }

    #[test]
    fn decode_never_panics_on_near_misses(record in record(), cut in 0usize..200) {
        let encoded = record.encode();
        let cut = cut.min(encoded.len());
        if encoded.is_char_boundary(cut) {
            let _ = PhcHash::decode(&encoded[..cut]);
        }
    }
}
