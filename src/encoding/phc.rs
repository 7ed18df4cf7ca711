//! PHC string format for Argon2 hashes.
//!
//! ```text
//! $<variant>$v=<version>$m=<m>,t=<t>,p=<p>[,data=<b64>]$<b64 salt>$<b64 hash>
//! ```
//!
//! The `v=` segment is always written. When reading, it may be absent, in
//! which case the hash is taken to be version 1.0 (0x10), the format used
//! before the version field was introduced.

use core::fmt;
use core::str::FromStr;

use super::b64;
use crate::derivation::argon2::{Argon2Params, Variant, Version};
use crate::error::FormatError;

/// Structured form of an encoded Argon2 hash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhcHash {
    pub variant: Variant,
    pub version: Version,
    /// Memory cost `m` in KiB.
    pub mem_kib: u32,
    /// Time cost `t`.
    pub time: u32,
    /// Parallelism `p`.
    pub lanes: u32,
    pub associated_data: Option<Vec<u8>>,
    pub salt: Vec<u8>,
    pub hash: Vec<u8>,
}

impl PhcHash {
    /// Builds a record from the parameters a digest was computed with.
    pub fn new(params: &Argon2Params, salt: &[u8], hash: Vec<u8>) -> Self {
        Self {
            variant: params.variant,
            version: params.version,
            mem_kib: params.mem_kib,
            time: params.time,
            lanes: params.lanes,
            associated_data: params.associated_data.clone(),
            salt: salt.to_vec(),
            hash,
        }
    }

    /// Serializes the record as a PHC string.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parses a PHC string.
    pub fn decode(encoded: &str) -> Result<Self, FormatError> {
        let rest = encoded
            .strip_prefix('$')
            .ok_or(FormatError::MissingPrefix)?;
        let mut segments = rest.split('$');

        let id = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(FormatError::MissingSegment("algorithm"))?;
        let variant: Variant = id.parse()?;

        let mut segment = segments
            .next()
            .ok_or(FormatError::MissingSegment("parameters"))?;

        let version = match segment.strip_prefix("v=") {
            Some(v) => {
                let number =
                    parse_decimal(v).ok_or_else(|| FormatError::InvalidVersion(v.to_owned()))?;
                segment = segments
                    .next()
                    .ok_or(FormatError::MissingSegment("parameters"))?;
                Version::try_from(number)?
            }
            None => Version::V0x10,
        };

        let params = parse_params(segment)?;

        let salt = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(FormatError::MissingSegment("salt"))?;
        let hash = segments
            .next()
            .filter(|s| !s.is_empty())
            .ok_or(FormatError::MissingSegment("hash"))?;

        if segments.next().is_some() {
            return Err(FormatError::TrailingData);
        }

        Ok(Self {
            variant,
            version,
            mem_kib: params.m,
            time: params.t,
            lanes: params.p,
            associated_data: params.data,
            salt: b64::decode(salt).map_err(|_| FormatError::InvalidBase64("salt"))?,
            hash: b64::decode(hash).map_err(|_| FormatError::InvalidBase64("hash"))?,
        })
    }

    /// Parameters needed to recompute this hash.
    ///
    /// The tag length is the length of the stored digest. No secret is
    /// set; callers holding one add it themselves.
    pub fn params(&self) -> Argon2Params {
        Argon2Params {
            variant: self.variant,
            version: self.version,
            mem_kib: self.mem_kib,
            time: self.time,
            lanes: self.lanes,
            tag_len: u32::try_from(self.hash.len()).unwrap_or(u32::MAX),
            secret: None,
            associated_data: self.associated_data.clone(),
        }
    }
}

impl fmt::Display for PhcHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}",
            self.variant, self.version, self.mem_kib, self.time, self.lanes
        )?;

        if let Some(data) = &self.associated_data {
            write!(f, ",data={}", b64::encode(data))?;
        }

        write!(f, "${}${}", b64::encode(&self.salt), b64::encode(&self.hash))
    }
}

impl FromStr for PhcHash {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

struct Params {
    m: u32,
    t: u32,
    p: u32,
    data: Option<Vec<u8>>,
}

fn parse_params(segment: &str) -> Result<Params, FormatError> {
    let mut m = None;
    let mut t = None;
    let mut p = None;
    let mut data = None;

    for pair in segment.split(',') {
        let (key, value) = pair
            .split_once('=')
            .ok_or_else(|| FormatError::InvalidParam(pair.to_owned()))?;

        let slot = match key {
            "m" => &mut m,
            "t" => &mut t,
            "p" => &mut p,
            "data" => {
                if data.is_some() {
                    return Err(FormatError::DuplicateParam(key.to_owned()));
                }
                data = Some(b64::decode(value).map_err(|_| FormatError::InvalidBase64("data"))?);
                continue;
            }
            other => return Err(FormatError::UnknownParam(other.to_owned())),
        };

        if slot.is_some() {
            return Err(FormatError::DuplicateParam(key.to_owned()));
        }
        *slot = Some(parse_decimal(value).ok_or_else(|| FormatError::InvalidParam(key.to_owned()))?);
    }

    Ok(Params {
        m: m.ok_or(FormatError::MissingParam("m"))?,
        t: t.ok_or(FormatError::MissingParam("t"))?,
        p: p.ok_or(FormatError::MissingParam("p"))?,
        data,
    })
}

/// Decimal `u32` without sign or leading zeros.
fn parse_decimal(text: &str) -> Option<u32> {
    let canonical = !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && (text == "0" || !text.starts_with('0'));

    if !canonical {
        return None;
    }

    text.parse().ok()
}
