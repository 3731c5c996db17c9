//! I/O wrappers shared by the read paths.

pub mod counting;

pub use counting::CountingReader;
