//! Key derivation: Argon2id password → archive key.

use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;
use secrecy::ExposeSecret;
use secrecy::SecretString;
use zeroize::Zeroize;

use super::KEY_SIZE;
use crate::ArchiveError;
use crate::Result;

/// Upper bound on the memory cost accepted from a header (4 GiB).
///
/// A corrupted or hostile header must not be able to make the reader
/// allocate an arbitrary amount of memory before authentication.
pub const MAX_MEMORY_COST_KIB: u32 = 4 * 1024 * 1024;

/// Upper bound on the number of passes accepted from a header.
///
/// The costliest profile uses 4; the ceiling keeps a hostile header from
/// stalling a reader in Argon2 before authentication.
pub const MAX_TIME_COST: u32 = 64;

/// Argon2id cost parameters, stored verbatim in every archive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KdfParams {
    /// Number of passes over memory.
    pub time_cost: u32,
    /// Memory cost in KiB.
    pub memory_cost_kib: u32,
    /// Degree of parallelism (lanes).
    pub parallelism: u8,
}

impl KdfParams {
    /// Creates a new parameter set. Validation happens at derivation time.
    #[must_use]
    pub const fn new(time_cost: u32, memory_cost_kib: u32, parallelism: u8) -> Self {
        Self {
            time_cost,
            memory_cost_kib,
            parallelism,
        }
    }

    /// Rejects parameters that would yield a weak key or an unbounded
    /// allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use btxz_core::crypto::KdfParams;
    ///
    /// assert!(KdfParams::new(1, 64 * 1024, 4).validate().is_ok());
    /// assert!(KdfParams::new(0, 64 * 1024, 4).validate().is_err());
    /// assert!(KdfParams::new(1, 16, 4).validate().is_err());
    /// assert!(KdfParams::new(u32::MAX, 64 * 1024, 4).validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.time_cost == 0 {
            return Err(invalid("time cost must be at least 1"));
        }
        if self.time_cost > MAX_TIME_COST {
            return Err(invalid(format!(
                "time cost {} exceeds the maximum of {MAX_TIME_COST}",
                self.time_cost
            )));
        }
        if self.parallelism == 0 {
            return Err(invalid("parallelism must be at least 1"));
        }
        let min_memory = 8 * u32::from(self.parallelism);
        if self.memory_cost_kib < min_memory {
            return Err(invalid(format!(
                "memory cost {} KiB is below the minimum of {min_memory} KiB",
                self.memory_cost_kib
            )));
        }
        if self.memory_cost_kib > MAX_MEMORY_COST_KIB {
            return Err(invalid(format!(
                "memory cost {} KiB exceeds the maximum of {MAX_MEMORY_COST_KIB} KiB",
                self.memory_cost_kib
            )));
        }
        Ok(())
    }
}

fn invalid(reason: impl Into<String>) -> ArchiveError {
    ArchiveError::InvalidKdfParams {
        reason: reason.into(),
    }
}

/// A 256-bit key derived for a single seal or open operation.
///
/// Zeroized on drop. Not `Clone`: each operation derives its own.
pub struct DerivedKey {
    bytes: [u8; KEY_SIZE],
}

impl DerivedKey {
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derives a 256-bit key from a password and salt using Argon2id (v0x13).
///
/// Identical inputs always yield the identical key. The cost depends only on
/// `params`, never on whether the password later proves correct.
///
/// # Errors
///
/// Returns `InvalidKdfParams` for degenerate parameters or a salt the
/// Argon2 implementation rejects.
pub fn derive_key(password: &SecretString, salt: &[u8], params: &KdfParams) -> Result<DerivedKey> {
    params.validate()?;

    let argon2_params = Params::new(
        params.memory_cost_kib,
        params.time_cost,
        u32::from(params.parallelism),
        Some(KEY_SIZE),
    )
    .map_err(|e| invalid(format!("argon2 rejected parameters: {e}")))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, argon2_params);

    let mut key = DerivedKey {
        bytes: [0u8; KEY_SIZE],
    };
    argon2
        .hash_password_into(
            password.expose_secret().as_bytes(),
            salt,
            &mut key.bytes,
        )
        .map_err(|e| invalid(format!("argon2id derivation failed: {e}")))?;

    tracing::debug!(
        time_cost = params.time_cost,
        memory_cost_kib = params.memory_cost_kib,
        parallelism = params.parallelism,
        "derived archive key"
    );

    Ok(key)
}
