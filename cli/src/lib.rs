//! # stubcheck CLI Library
//!
//! This crate provides the command-line front end of stubcheck, which
//! typechecks a pinned upstream checkout against external type stubs and
//! separates regressions from known noise.
//!
//! ## Modules
//!
//! - [`commands`] - CLI command implementations
//! - [`config`] - Project settings (`stubcheck.toml`)
//! - [`errors`] - Error handling and display
//! - [`exit_codes`] - Standard exit codes
//! - [`sources`] - Upstream checkout sync and stub merging

pub mod commands;
pub mod config;
pub mod errors;
pub mod exit_codes;
pub mod sources;

// Re-export commonly used types
pub use config::{ProjectConfig, Settings};
