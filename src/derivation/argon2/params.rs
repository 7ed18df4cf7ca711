//! Parameter definitions and validation for Argon2.
//!
//! This module defines the configurable parameters for Argon2d, Argon2i and
//! Argon2id, their defaults, their allowed ranges, and the validation that
//! runs before any memory is allocated.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{FormatError, ValidationError};

/// Argon2 addressing mode.
///
/// The discriminant is the type identifier `y` committed to in H0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    /// Data-dependent addressing.
    Argon2d = 0,
    /// Data-independent addressing.
    Argon2i = 1,
    /// Data-independent for the first half of pass 0, data-dependent after.
    #[default]
    Argon2id = 2,
}

impl Variant {
    /// Name used as the PHC algorithm identifier.
    pub const fn name(self) -> &'static str {
        match self {
            Variant::Argon2d => "argon2d",
            Variant::Argon2i => "argon2i",
            Variant::Argon2id => "argon2id",
        }
    }

    /// Type identifier `y` as used in H0 and in address blocks.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Variant {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "argon2d" => Ok(Variant::Argon2d),
            "argon2i" => Ok(Variant::Argon2i),
            "argon2id" => Ok(Variant::Argon2id),
            other => Err(FormatError::UnknownVariant(other.to_owned())),
        }
    }
}

/// Argon2 algorithm revision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub enum Version {
    /// Version 1.0. Later passes overwrite blocks instead of XOR-ing.
    V0x10 = 0x10,
    /// Version 1.3.
    #[default]
    V0x13 = 0x13,
}

impl Version {
    /// Numeric version as encoded in H0 and in the `v=` PHC segment.
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

impl From<Version> for u32 {
    fn from(version: Version) -> u32 {
        version.as_u32()
    }
}

impl TryFrom<u32> for Version {
    type Error = FormatError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0x10 => Ok(Version::V0x10),
            0x13 => Ok(Version::V0x13),
            other => Err(FormatError::InvalidVersion(other.to_string())),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Inclusive numeric range for one parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limit {
    pub min: u64,
    pub max: u64,
}

/// Allowed ranges for every numeric parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub time: Limit,
    /// The minimum is per lane: the effective bound is `8 × lanes`.
    pub mem_kib: Limit,
    pub lanes: Limit,
    pub tag_len: Limit,
}

/// Parameter limits enforced by [`Argon2Params::validate`].
pub const LIMITS: Limits = Limits {
    time: Limit {
        min: 1,
        max: u32::MAX as u64,
    },
    mem_kib: Limit {
        min: 8,
        max: u32::MAX as u64,
    },
    lanes: Limit {
        min: 1,
        max: 0x00ff_ffff,
    },
    tag_len: Limit {
        min: 4,
        max: u32::MAX as u64,
    },
};

/// Length of a freshly generated salt in bytes.
pub const DEFAULT_SALT_LEN: usize = 16;

/// Minimum salt length accepted by the raw hashing API.
pub const MIN_SALT_LEN: usize = 8;

/// Configuration parameters for the Argon2 algorithm.
///
/// These parameters control the memory and time cost of the hash function,
/// allowing the security level to be tuned for the target hardware and
/// threat model.
///
/// # Defaults
///
/// Argon2id v1.3, 64 MiB of memory, 3 passes, 4 lanes and a 32-byte tag.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Argon2Params {
    /// Addressing mode.
    pub variant: Variant,
    /// Algorithm revision.
    pub version: Version,
    /// Memory size in KiB (minimum 8 × lanes).
    pub mem_kib: u32,
    /// Number of passes over memory (minimum 1).
    pub time: u32,
    /// Degree of parallelism (number of lanes, 1..2²⁴).
    pub lanes: u32,
    /// Length of the output tag in bytes (minimum 4).
    pub tag_len: u32,
    /// Optional secret key K. Never encoded in a PHC string.
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    pub secret: Option<Vec<u8>>,
    /// Optional associated data X. Encoded as `data=` in PHC strings.
    pub associated_data: Option<Vec<u8>>,
}

impl Argon2Params {
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    pub fn with_mem_kib(mut self, mem_kib: u32) -> Self {
        self.mem_kib = mem_kib;
        self
    }

    pub fn with_time(mut self, time: u32) -> Self {
        self.time = time;
        self
    }

    pub fn with_lanes(mut self, lanes: u32) -> Self {
        self.lanes = lanes;
        self
    }

    pub fn with_tag_len(mut self, tag_len: u32) -> Self {
        self.tag_len = tag_len;
        self
    }

    pub fn with_secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_associated_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.associated_data = Some(data.into());
        self
    }

    /// Checks every numeric parameter against [`LIMITS`].
    ///
    /// Lanes are checked first because the memory lower bound depends on
    /// them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        check("lanes", self.lanes as u64, LIMITS.lanes)?;
        check("time", self.time as u64, LIMITS.time)?;

        let mem = Limit {
            min: LIMITS.mem_kib.min * self.lanes as u64,
            max: LIMITS.mem_kib.max,
        };
        check("mem_kib", self.mem_kib as u64, mem)?;

        check("tag_len", self.tag_len as u64, LIMITS.tag_len)
    }

    /// Memory actually used, in 1 KiB blocks: `m` rounded down to a
    /// multiple of `4 × lanes`, never below `8 × lanes`.
    pub fn block_count(&self) -> u32 {
        let sync = 4 * self.lanes;
        let m = self.mem_kib.max(2 * sync);
        (m / sync) * sync
    }
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            variant: Variant::Argon2id,
            version: Version::V0x13,
            mem_kib: 64 * 1024,
            time: 3,
            lanes: 4,
            tag_len: 32,
            secret: None,
            associated_data: None,
        }
    }
}

pub(crate) fn check(field: &'static str, value: u64, limit: Limit) -> Result<(), ValidationError> {
    if value < limit.min || value > limit.max {
        return Err(ValidationError {
            field,
            value,
            min: limit.min,
            max: limit.max,
        });
    }

    Ok(())
}

/// Checks that an input buffer fits its 32-bit length prefix.
pub(crate) fn check_input_len(field: &'static str, input: &[u8]) -> Result<(), ValidationError> {
    check(
        field,
        input.len() as u64,
        Limit {
            min: 0,
            max: u32::MAX as u64,
        },
    )
}
