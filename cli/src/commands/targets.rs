//! # Targets Command
//!
//! Lists the target directories in check order, marking the pending ones and
//! whether each exists in the current checkout.
//!
//! ## Usage
//!
//! ```bash
//! stubcheck targets
//! stubcheck targets --active
//! ```

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::errors::display_config_error;
use crate::exit_codes::*;

/// Arguments for the targets command
#[derive(Debug)]
pub struct TargetsArgs {
    pub project_dir: PathBuf,
    /// Hide pending targets
    pub active_only: bool,
}

/// Execute the targets command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - The list was printed
/// * `Ok(EXIT_CONFIG_ERROR)` - Bad settings or unknown target name
pub fn execute(args: TargetsArgs) -> Result<i32> {
    let Some(config) = super::load_project(&args.project_dir) else {
        return Ok(EXIT_CONFIG_ERROR);
    };
    let targets = match config.targets(&[]) {
        Ok(targets) => targets,
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    let tests_root = config.tests_root();
    for target in targets.all() {
        if args.active_only && !target.is_active() {
            continue;
        }
        let state = if target.is_active() {
            "active".green()
        } else {
            "pending".dimmed()
        };
        let missing = if tests_root.join(&target.name).is_dir() {
            "".normal()
        } else {
            "(not in checkout)".yellow()
        };
        println!("{:<8} {:<32} {}", state, target.name, missing);
    }

    println!();
    println!(
        "{} active, {} pending, under {}",
        targets.active().count(),
        targets.len() - targets.active().count(),
        tests_root.display()
    );
    Ok(EXIT_SUCCESS)
}
