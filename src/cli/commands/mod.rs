//! Command implementations for the porosity CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod key;
pub mod sweep;
pub mod version;
