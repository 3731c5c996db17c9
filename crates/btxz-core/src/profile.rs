//! Adaptive cost profiles.
//!
//! A profile selects the Argon2id cost and the xz dictionary used when an
//! archive is created. Only the resulting numbers are written to the header;
//! the one-byte tag is informational and never consulted when reading.

use std::fmt;
use std::str::FromStr;

use crate::ArchiveError;
use crate::crypto::KdfParams;

/// Argon2id lanes used by every profile.
pub const KDF_PARALLELISM: u8 = 4;

const MIB: u32 = 1024 * 1024;

/// Hardware/security trade-off chosen at creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Profile {
    /// Low-end hardware: 64 MiB KDF memory, 1 MiB dictionary.
    Low,
    /// Balanced: 128 MiB KDF memory, 8 MiB dictionary.
    #[default]
    Default,
    /// Maximum security and ratio: 512 MiB, 4 passes, 64 MiB dictionary.
    Max,
}

/// Concrete parameters a profile expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileParams {
    /// Key derivation cost.
    pub kdf: KdfParams,
    /// LZMA2 dictionary size in bytes.
    pub dict_size: u32,
    /// xz preset (0-9) the dictionary is applied on top of.
    pub xz_preset: u32,
}

impl Profile {
    /// All profiles, weakest first.
    pub const ALL: [Self; 3] = [Self::Low, Self::Default, Self::Max];

    /// Returns the parameter set for this profile.
    ///
    /// # Examples
    ///
    /// ```
    /// use btxz_core::Profile;
    ///
    /// let params = Profile::Low.params();
    /// assert_eq!(params.kdf.memory_cost_kib, 64 * 1024);
    /// assert_eq!(params.dict_size, 1024 * 1024);
    /// ```
    #[must_use]
    pub const fn params(self) -> ProfileParams {
        match self {
            Self::Low => ProfileParams {
                kdf: KdfParams::new(1, 64 * 1024, KDF_PARALLELISM),
                dict_size: MIB,
                xz_preset: 3,
            },
            Self::Default => ProfileParams {
                kdf: KdfParams::new(1, 128 * 1024, KDF_PARALLELISM),
                dict_size: 8 * MIB,
                xz_preset: 6,
            },
            Self::Max => ProfileParams {
                kdf: KdfParams::new(4, 512 * 1024, KDF_PARALLELISM),
                dict_size: 64 * MIB,
                xz_preset: 9,
            },
        }
    }

    /// The tag byte stored in the header.
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Default => 2,
            Self::Max => 3,
        }
    }

    /// Maps a header tag back to a profile, if it is a known one.
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Low),
            2 => Some(Self::Default),
            3 => Some(Self::Max),
            _ => None,
        }
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Default => "default",
            Self::Max => "max",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profile {
    type Err = ArchiveError;

    /// Accepts `low`/`fast`, `default`, and `max`/`best`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "fast" => Ok(Self::Low),
            "default" => Ok(Self::Default),
            "max" | "best" => Ok(Self::Max),
            _ => Err(ArchiveError::InvalidProfile(s.to_string())),
        }
    }
}
