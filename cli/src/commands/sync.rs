//! # Sync Command
//!
//! Brings the upstream checkout to the pinned commit. `merge` and `check`
//! run the same step first unless `--no-sync` is given.
//!
//! ## Usage
//!
//! ```bash
//! stubcheck sync
//! stubcheck --project-dir ../django-stubs sync
//! ```

use anyhow::Result;
use std::path::PathBuf;

use crate::config::ProjectConfig;
use crate::errors::{display_info, display_success, display_sync_error};
use crate::exit_codes::*;
use crate::sources::{SyncOutcome, sync_upstream};

/// Arguments for the sync command
#[derive(Debug)]
pub struct SyncArgs {
    pub project_dir: PathBuf,
}

/// Execute the sync command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - The checkout is at the pinned commit
/// * `Ok(EXIT_CONFIG_ERROR)` - The settings file could not be loaded
/// * `Ok(EXIT_SYNC_ERROR)` - Cloning, fetching, or checking out failed
pub fn execute(args: SyncArgs) -> Result<i32> {
    let Some(config) = super::load_project(&args.project_dir) else {
        return Ok(EXIT_CONFIG_ERROR);
    };
    Ok(sync_checkout(&config))
}

/// Sync the checkout described by `config` and report the outcome.
///
/// Returns `EXIT_SUCCESS` or `EXIT_SYNC_ERROR`.
pub(crate) fn sync_checkout(config: &ProjectConfig) -> i32 {
    let checkout = config.sources_dir();
    let upstream = &config.settings.upstream;
    let short: String = upstream.commit.chars().take(10).collect();

    match sync_upstream(&checkout, upstream) {
        Ok(SyncOutcome::Cloned) => {
            display_success(&format!("Cloned {} at {}", upstream.url, short));
            EXIT_SUCCESS
        }
        Ok(SyncOutcome::Updated) => {
            display_success(&format!("Checked out {} ({})", short, upstream.branch));
            EXIT_SUCCESS
        }
        Ok(SyncOutcome::AlreadyPinned) => {
            display_info(&format!("{} already at {}", checkout.display(), short));
            EXIT_SUCCESS
        }
        Err(e) => {
            display_sync_error(&format!("{:#}", e));
            EXIT_SYNC_ERROR
        }
    }
}
