//! # Error Handling
//!
//! User-friendly error display functions for the stubcheck CLI.

use colored::Colorize;

/// Display a source-control sync error with helpful suggestions
///
/// # Arguments
///
/// * `message` - The error message to display
pub fn display_sync_error(message: &str) {
    eprintln!("{} Sync error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!("{}", "Possible causes:".yellow());
    eprintln!("  • No network connection to the upstream repository");
    eprintln!("  • The pinned commit is not on the configured branch");
    eprintln!("  • The local checkout has uncommitted changes");
    eprintln!();
    eprintln!(
        "{} Check `[upstream]` in stubcheck.toml, or delete the checkout to re-clone.",
        "Tip:".cyan().bold()
    );
}

/// Display a typechecker failure with helpful suggestions
///
/// # Arguments
///
/// * `message` - The error message to display
pub fn display_checker_error(message: &str) {
    eprintln!("{} Typechecker error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!("{}", "Possible causes:".yellow());
    eprintln!("  • The checker is not installed or not on PATH");
    eprintln!("  • The checker crashed on the stubs");
    eprintln!();
    eprintln!(
        "{} Set STUBCHECK_MYPY to the checker executable of your virtualenv.",
        "Tip:".cyan().bold()
    );
}

/// Display a configuration error with helpful suggestions
///
/// # Arguments
///
/// * `message` - The error message to display
pub fn display_config_error(message: &str) {
    eprintln!("{} Configuration error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!("{}", "Possible causes:".yellow());
    eprintln!("  • stubcheck.toml is malformed");
    eprintln!("  • A suppression rule is empty or not a valid regular expression");
    eprintln!("  • A requested target directory is not in the target list");
    eprintln!();
    eprintln!(
        "{} Run `stubcheck rules` and `stubcheck targets` to inspect the configuration.",
        "Tip:".cyan().bold()
    );
}

/// Display a stub-merge tool error with helpful suggestions
///
/// # Arguments
///
/// * `message` - The error message to display
pub fn display_merge_error(message: &str) {
    eprintln!("{} Merge error: {}", "✗".red().bold(), message);
    eprintln!();
    eprintln!(
        "{} Install the merge tool or set `[merge] program` in stubcheck.toml.",
        "Tip:".cyan().bold()
    );
}

/// Display a generic error
pub fn display_error(message: &str) {
    eprintln!("{} Error: {}", "✗".red().bold(), message);
}

/// Display a warning
pub fn display_warning(message: &str) {
    eprintln!("{} Warning: {}", "⚠".yellow().bold(), message);
}

/// Display a success message
pub fn display_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Display an info message
pub fn display_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
