//! Type-safe wrappers for extraction.
//!
//! Containment is enforced at the type level: a [`SafePath`] can only be
//! obtained by validating an entry name against a [`DestDir`].

pub mod dest_dir;
pub mod entry_type;
pub mod safe_path;

pub use dest_dir::DestDir;
pub use entry_type::EntryType;
pub use safe_path::PathViolation;
pub use safe_path::SafePath;
