//! # Rules Command
//!
//! Lists the suppression rules in registration order, with their index and
//! lifetime. Indices match the ones `check -v` reports for unused rules.
//!
//! ## Usage
//!
//! ```bash
//! stubcheck rules
//! stubcheck rules --lifetime stub-gap
//! ```

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use stubcheck_analysis::{PatternRegistry, RuleLifetime, SuppressionRule};

use crate::errors::display_config_error;
use crate::exit_codes::*;

/// Arguments for the rules command
#[derive(Debug)]
pub struct RulesArgs {
    pub project_dir: PathBuf,
    /// Only list rules with this lifetime
    pub lifetime: Option<RuleLifetime>,
}

/// Execute the rules command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - The registry was listed
/// * `Ok(EXIT_CONFIG_ERROR)` - Bad settings or suppression rule
pub fn execute(args: RulesArgs) -> Result<i32> {
    let Some(config) = super::load_project(&args.project_dir) else {
        return Ok(EXIT_CONFIG_ERROR);
    };
    let registry = match config.registry() {
        Ok(registry) => registry,
        Err(e) => {
            display_config_error(&format!("{:#}", e));
            return Ok(EXIT_CONFIG_ERROR);
        }
    };

    let shown = select(&registry, args.lifetime);
    for (index, rule) in &shown {
        print_rule(*index, rule);
    }

    println!();
    println!(
        "{} of {} rules ({} from {})",
        shown.len(),
        registry.len(),
        config.settings.rules.len(),
        config
            .source
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "no settings file".to_string())
    );
    Ok(EXIT_SUCCESS)
}

fn select(
    registry: &PatternRegistry,
    lifetime: Option<RuleLifetime>,
) -> Vec<(usize, &SuppressionRule)> {
    registry
        .all()
        .iter()
        .enumerate()
        .filter(|(_, rule)| lifetime.is_none_or(|l| rule.lifetime == l))
        .collect()
}

fn print_rule(index: usize, rule: &SuppressionRule) {
    let kind = if rule.matcher.is_pattern() {
        "regex".magenta()
    } else {
        "text".blue()
    };
    let lifetime = match rule.lifetime {
        RuleLifetime::StubGap => rule.lifetime.as_str().yellow(),
        RuleLifetime::Dynamic => rule.lifetime.as_str().dimmed(),
    };

    println!("{:>3} {:<5} {:<8} {}", index, kind, lifetime, rule.matcher.as_str());
    if let Some(note) = &rule.note {
        println!("              {} {}", "→".cyan(), note.dimmed());
    }
}
