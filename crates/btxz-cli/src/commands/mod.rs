//! Command implementations.

pub mod create;
pub mod extract;
pub mod info;
pub mod list;
