//! Configuration for archive creation operations.

use crate::Profile;
use crate::Result;
use crate::crypto::KdfParams;

/// Configuration for archive creation operations.
///
/// # Examples
///
/// ```
/// use btxz_core::CreationConfig;
/// use btxz_core::Profile;
///
/// // Balanced profile, every file included
/// let config = CreationConfig::default();
///
/// // Weak hardware, skip dotfiles
/// let custom = CreationConfig::default()
///     .with_profile(Profile::Low)
///     .with_include_hidden(false);
/// ```
#[derive(Debug, Clone)]
pub struct CreationConfig {
    /// Cost profile for key derivation and compression.
    ///
    /// Default: [`Profile::Default`].
    pub profile: Profile,

    /// Follow symlinks when adding files to the archive.
    ///
    /// Default: `false`. Symlinks are then skipped with a warning, since
    /// the container has no symlink entry type.
    pub follow_symlinks: bool,

    /// Include hidden files (names starting with '.').
    ///
    /// Applies to walked entries and to file inputs named directly. A
    /// directory input is always walked, whatever its own name.
    ///
    /// Default: `true`.
    pub include_hidden: bool,

    /// Preserve file permission bits in the archive.
    ///
    /// When `false`, files are stored as `0o644` and directories as
    /// `0o755`.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,

    /// Overrides the profile's key derivation cost.
    ///
    /// The profile still decides compression and the header tag. Intended
    /// for tests and for callers with their own cost policy.
    ///
    /// Default: `None`.
    pub kdf_override: Option<KdfParams>,
}

impl Default for CreationConfig {
    fn default() -> Self {
        Self {
            profile: Profile::Default,
            follow_symlinks: false,
            include_hidden: true,
            preserve_permissions: true,
            kdf_override: None,
        }
    }
}

impl CreationConfig {
    /// Creates a new `CreationConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cost profile.
    #[must_use]
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether to include hidden files.
    #[must_use]
    pub fn with_include_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Overrides the key derivation cost.
    #[must_use]
    pub fn with_kdf_override(mut self, params: Option<KdfParams>) -> Self {
        self.kdf_override = params;
        self
    }

    /// Key derivation cost that will be written to the header.
    #[must_use]
    pub fn kdf_params(&self) -> KdfParams {
        self.kdf_override
            .unwrap_or_else(|| self.profile.params().kdf)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKdfParams` if the effective KDF cost is degenerate.
    pub fn validate(&self) -> Result<()> {
        self.kdf_params().validate()
    }
}
