//! Extraction-time safety checks.

pub mod path;
pub mod permissions;

pub use permissions::sanitize_permissions;
