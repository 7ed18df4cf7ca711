//! Base64 as used by PHC strings: standard alphabet, no padding emitted,
//! padding accepted but not required on input.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

const PHC_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

pub fn encode(bytes: &[u8]) -> String {
    PHC_BASE64.encode(bytes)
}

pub fn decode(text: &str) -> Result<Vec<u8>, base64::DecodeError> {
    PHC_BASE64.decode(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_padding_on_output() {
        assert_eq!(encode(b"somesalt"), "c29tZXNhbHQ");
        assert_eq!(encode(b"saltsaltsaltsalt"), "c2FsdHNhbHRzYWx0c2FsdA");
    }

    #[test]
    fn padding_is_optional_on_input() {
        assert_eq!(decode("c29tZXNhbHQ").unwrap(), b"somesalt");
        assert_eq!(decode("c29tZXNhbHQ=").unwrap(), b"somesalt");
    }

    #[test]
    fn rejects_url_safe_alphabet() {
        assert!(decode("ab-_").is_err());
    }
}
