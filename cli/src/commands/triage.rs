//! # Triage Command
//!
//! Classifies diagnostic lines that were produced elsewhere, such as a saved
//! checker log or a CI artifact, with the same rules `check` uses.
//!
//! ## Usage
//!
//! ```bash
//! stubcheck triage mypy.log
//! mypy --config-file scripts/mypy.ini tests/basic | stubcheck triage
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use stubcheck_analysis::{DiagnosticClassifier, Triage};

use crate::errors::{display_config_error, display_success};
use crate::exit_codes::*;

/// Arguments for the triage command
#[derive(Debug)]
pub struct TriageArgs {
    pub project_dir: PathBuf,
    /// Diagnostic log to read; stdin when absent
    pub input: Option<PathBuf>,
}

/// Execute the triage command
///
/// Unsuppressed lines are printed to stdout in input order.
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Every line was suppressed
/// * `Ok(EXIT_DIAGNOSTICS_FOUND)` - At least one line was not
/// * `Ok(EXIT_CONFIG_ERROR)` - Bad settings or suppression rule
/// * `Err(_)` - The input could not be read
pub fn execute(args: TriageArgs) -> Result<i32> {
    let Some(config) = super::load_project(&args.project_dir) else {
        return Ok(EXIT_CONFIG_ERROR);
    };
    let classifier = match config.registry() {
        Ok(registry) => DiagnosticClassifier::new(Arc::new(registry)),
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read diagnostics from {}", path.display()))?,
        None => io::read_to_string(io::stdin()).context("Failed to read diagnostics from stdin")?,
    };

    let triage = triage_text(&classifier, &text);
    for line in &triage.unsuppressed {
        println!("{}", line);
    }

    if triage.has_unsuppressed() {
        eprintln!(
            "{} unsuppressed, {} suppressed",
            triage.unsuppressed.len(),
            triage.suppressed_count()
        );
        Ok(EXIT_DIAGNOSTICS_FOUND)
    } else {
        display_success(&format!("{} diagnostics suppressed", triage.suppressed_count()));
        Ok(EXIT_SUCCESS)
    }
}

/// Classify the non-blank lines of `text`.
fn triage_text(classifier: &DiagnosticClassifier, text: &str) -> Triage {
    classifier.partition(
        text.lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty()),
    )
}
