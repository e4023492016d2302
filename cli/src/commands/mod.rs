//! # CLI Command Implementations
//!
//! This module contains the implementation of all CLI commands.
//! Each submodule represents a top-level command.
//!
//! ## Available Commands
//!
//! - [`sync`] - Bring the upstream checkout to the pinned commit
//! - [`merge`] - Merge the stubs into the upstream sources
//! - [`check`] - Typecheck the target directories and triage the diagnostics
//! - [`triage`] - Triage diagnostic lines from a file or stdin
//! - [`rules`] - List the suppression rules
//! - [`targets`] - List the target directories

pub mod check;
pub mod merge;
pub mod rules;
pub mod sync;
pub mod targets;
pub mod triage;

use std::path::Path;

use crate::config::ProjectConfig;
use crate::errors::display_config_error;

/// Load the project settings, reporting a configuration error on failure.
fn load_project(project_dir: &Path) -> Option<ProjectConfig> {
    match ProjectConfig::load(project_dir) {
        Ok(config) => {
            if let Some(source) = &config.source {
                log::debug!("loaded settings from {}", source.display());
            }
            Some(config)
        }
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            None
        }
    }
}
