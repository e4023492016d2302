//! # Check Command
//!
//! Typechecks every active target directory of the upstream test tree against
//! the stubs and prints the diagnostics no suppression rule accounts for.
//!
//! The exit code is the suite verdict: `0` when every diagnostic was
//! suppressed, `1` when at least one directory produced an unsuppressed one.
//!
//! ## Usage
//!
//! ```bash
//! stubcheck check
//! stubcheck check --no-sync --only basic --only dates
//! STUBCHECK_MYPY=.venv/bin/mypy stubcheck check -v
//! ```

use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use stubcheck_analysis::{
    DiagnosticClassifier, DirectoryRunner, MypyChecker, PatternRegistry, SuiteAggregator,
    SuiteReporter, SuiteResult, Target, TriageError,
};

use crate::errors::{
    display_checker_error, display_config_error, display_error, display_success, display_warning,
};
use crate::exit_codes::*;

/// Arguments for the check command
#[derive(Debug)]
pub struct CheckArgs {
    pub project_dir: PathBuf,
    /// Use the checkout as it is
    pub no_sync: bool,
    /// Restrict the run to these target directories
    pub only: Vec<String>,
    /// Report per-directory counts and rules that never matched
    pub verbose: bool,
}

/// Prints suite progress to the terminal.
///
/// Unsuppressed lines go to stdout uncolored so they can be piped into
/// `stubcheck triage` or diffed between runs.
struct TerminalReporter {
    verbose: bool,
}

impl SuiteReporter for TerminalReporter {
    fn checking(&mut self, _target: &Target, path: &Path) {
        println!("{} {}", "Checking".bold(), path.display().to_string().cyan());
    }

    fn unsuppressed(&mut self, _target: &Target, line: &str) {
        println!("{}", line);
    }

    fn skipped(&mut self, target: &Target) {
        if self.verbose {
            println!("{} {} (pending)", "Skipping".dimmed(), target.name.dimmed());
        }
    }
}

/// Execute the check command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - Every diagnostic was suppressed
/// * `Ok(EXIT_DIAGNOSTICS_FOUND)` - At least one unsuppressed diagnostic
/// * `Ok(EXIT_CONFIG_ERROR)` - Bad settings, rule, or target name
/// * `Ok(EXIT_SYNC_ERROR)` - The checkout could not be synced
/// * `Ok(EXIT_CHECKER_ERROR)` - The typechecker could not be run or crashed
pub fn execute(args: CheckArgs) -> Result<i32> {
    let Some(config) = super::load_project(&args.project_dir) else {
        return Ok(EXIT_CONFIG_ERROR);
    };

    let registry = match config.registry() {
        Ok(registry) => Arc::new(registry),
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            return Ok(EXIT_CONFIG_ERROR);
        }
    };
    let targets = match config.targets(&args.only) {
        Ok(targets) => targets,
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    if !args.no_sync {
        let code = super::sync::sync_checkout(&config);
        if code != EXIT_SUCCESS {
            return Ok(code);
        }
    }

    let checker_config = config.checker_config();
    log::debug!(
        "checking with {} (config {})",
        checker_config.program,
        checker_config.config_file.display()
    );

    let suite = SuiteAggregator::new(
        DirectoryRunner::new(MypyChecker::new(), checker_config),
        DiagnosticClassifier::new(Arc::clone(&registry)),
        config.tests_root(),
    );
    let mut reporter = TerminalReporter {
        verbose: args.verbose,
    };

    match suite.run(&targets, &mut reporter) {
        Ok(result) => {
            print_summary(&result, &registry, args.verbose);
            Ok(result.exit_code())
        }
        Err(TriageError::Checker(e)) => {
            display_checker_error(&e.to_string());
            Ok(EXIT_CHECKER_ERROR)
        }
        Err(e) => {
            display_error(&e.to_string());
            Ok(EXIT_ERROR)
        }
    }
}

fn print_summary(result: &SuiteResult, registry: &PatternRegistry, verbose: bool) {
    println!();

    if verbose {
        for dir in &result.directories {
            let status = if dir.failed() {
                "✗".red().bold()
            } else {
                "✓".green().bold()
            };
            println!(
                "  {} {:<32} {} unsuppressed, {} suppressed",
                status,
                dir.target,
                dir.unsuppressed.len(),
                dir.suppressed
            );
        }
        println!();
    }

    let checked = result.directories.len();
    if result.failed() {
        let failed: Vec<&str> = result
            .failed_directories()
            .map(|d| d.target.as_str())
            .collect();
        eprintln!(
            "{} {} unsuppressed diagnostic(s) in {} of {} directories: {}",
            "✗".red().bold(),
            result.unsuppressed_count(),
            failed.len(),
            checked,
            failed.join(", ")
        );
    } else {
        display_success(&format!(
            "{} directories clean ({} diagnostics suppressed)",
            checked,
            result.suppressed_count()
        ));
    }

    if verbose {
        let unused = result.unused_rules();
        if !unused.is_empty() {
            display_warning(&format!("{} suppression rule(s) never matched", unused.len()));
            for index in unused {
                if let Some(rule) = registry.get(index) {
                    println!(
                        "  {:>3} [{}] {}",
                        index,
                        rule.lifetime.as_str(),
                        rule.matcher.as_str().dimmed()
                    );
                }
            }
        }
    }
}
