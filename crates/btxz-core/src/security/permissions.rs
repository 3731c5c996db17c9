//! File permission sanitization.

/// Mask of the bits an extracted entry may carry.
pub const PERMISSION_MASK: u32 = 0o777;

/// Strips setuid, setgid, and sticky bits from a stored mode.
///
/// Owner, group, and other bits are kept as stored.
///
/// # Examples
///
/// ```
/// use btxz_core::security::sanitize_permissions;
///
/// assert_eq!(sanitize_permissions(0o4755), 0o755);
/// assert_eq!(sanitize_permissions(0o100644), 0o644);
/// ```
#[must_use]
pub const fn sanitize_permissions(mode: u32) -> u32 {
    mode & PERMISSION_MASK
}
