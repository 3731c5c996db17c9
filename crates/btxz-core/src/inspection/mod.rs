//! Archive inspection without extraction.
//!
//! `list` and `test` authenticate the payload before reading the container;
//! `inspect_archive` reads only the public header.

pub mod info;
pub mod list;
pub mod manifest;
pub mod verify;

pub use info::ArchiveInfo;
pub use info::inspect_archive;
pub use list::list_archive;
pub use manifest::ArchiveManifest;
pub use manifest::ManifestEntry;
pub use verify::VerificationReport;
pub use verify::test_archive;
