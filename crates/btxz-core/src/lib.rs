//! Versioned, password-encrypted archive codec.
//!
//! `btxz-core` packs files and directories into a tar container, compresses
//! it with xz, seals it with XChaCha20-Poly1305 under an Argon2id-derived
//! key, and prepends a small self-describing header. Reading dispatches on
//! the header version, so archives written by older releases (v1, v2) stay
//! extractable while new archives are always v3.
//!
//! Extraction never writes outside the destination directory: entries with
//! absolute names, `..` escapes, or symlinked parents leading elsewhere are
//! skipped and reported.
//!
//! # Examples
//!
//! ```no_run
//! use btxz_core::CreationConfig;
//! use btxz_core::Profile;
//! use btxz_core::create_archive;
//! use btxz_core::extract_archive;
//! use secrecy::SecretString;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let password = SecretString::from("correct horse".to_string());
//! let config = CreationConfig::default().with_profile(Profile::Max);
//!
//! create_archive("backup.btxz", &["projects/"], &password, &config)?;
//! let report = extract_archive("backup.btxz", "restore/", &password)?;
//! println!("Extracted {} files", report.files_extracted);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod creation;
pub mod crypto;
pub mod error;
pub mod extraction;
pub mod formats;
pub mod inspection;
pub mod io;
pub mod profile;
pub mod report;
pub mod security;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use archive::Archive;
pub use archive::OpenedArchive;
pub use creation::CreationConfig;
pub use creation::CreationReport;
pub use creation::create_archive;
pub use creation::seal_container;
pub use crypto::KdfParams;
pub use error::ArchiveError;
pub use error::Result;
pub use extraction::extract_archive;
pub use formats::CURRENT_VERSION;
pub use inspection::ArchiveInfo;
pub use inspection::ArchiveManifest;
pub use inspection::ManifestEntry;
pub use inspection::VerificationReport;
pub use inspection::inspect_archive;
pub use inspection::list_archive;
pub use inspection::test_archive;
pub use profile::Profile;
pub use profile::ProfileParams;
pub use report::ExtractionReport;
pub use types::DestDir;
pub use types::EntryType;
pub use types::SafePath;
