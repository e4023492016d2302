//! # stubcheck CLI
//!
//! Typecheck a pinned upstream checkout against external type stubs and
//! report only the diagnostics no suppression rule accounts for.
//!
//! ## Usage
//!
//! ```bash
//! # Bring the upstream checkout to the pinned commit
//! stubcheck sync
//!
//! # Merge the stubs into the sources
//! stubcheck merge
//!
//! # Typecheck the test tree and triage the diagnostics
//! stubcheck check
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use stubcheck::commands;
use stubcheck_analysis::RuleLifetime;

/// Initialize logger based on verbose flag
fn init_logger(verbose: bool) {
    let mut log_builder = env_logger::Builder::from_default_env();
    if verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    } else {
        log_builder.filter_level(log::LevelFilter::Info);
    }
    log_builder.init();
}

/// Suppression rule lifetime filter
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum LifetimeArg {
    /// Noise from gaps in the stubs
    StubGap,
    /// Noise from dynamic patterns stubs cannot model
    Dynamic,
}

impl From<LifetimeArg> for RuleLifetime {
    fn from(arg: LifetimeArg) -> Self {
        match arg {
            LifetimeArg::StubGap => RuleLifetime::StubGap,
            LifetimeArg::Dynamic => RuleLifetime::Dynamic,
        }
    }
}

/// Main CLI structure
#[derive(Parser)]
#[command(name = "stubcheck")]
#[command(about = "Typecheck upstream sources against type stubs and triage the diagnostics", long_about = None)]
#[command(version)]
struct Cli {
    /// Project directory holding stubcheck.toml and the stubs
    #[arg(long, global = true, value_name = "PATH", default_value = ".")]
    project_dir: PathBuf,
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
enum Commands {
    /// Bring the upstream checkout to the pinned commit
    Sync,
    /// Merge the stubs into the upstream sources
    Merge {
        /// Use the checkout as it is instead of syncing first
        #[arg(long)]
        no_sync: bool,
        /// Re-merge every file
        #[arg(long)]
        no_incremental: bool,
    },
    /// Typecheck the target directories and report unsuppressed diagnostics
    Check {
        /// Use the checkout as it is instead of syncing first
        #[arg(long)]
        no_sync: bool,
        /// Only check this target directory (can be specified multiple times)
        #[arg(long, value_name = "DIR")]
        only: Vec<String>,
    },
    /// Triage diagnostic lines from a file or stdin
    Triage {
        /// Diagnostic log (defaults to stdin)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
    /// List the suppression rules in registration order
    Rules {
        /// Only list rules with this lifetime
        #[arg(long, value_name = "LIFETIME")]
        lifetime: Option<LifetimeArg>,
    },
    /// List the target directories in check order
    Targets {
        /// Hide pending targets
        #[arg(long)]
        active: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);
    let exit_code = run_command(cli);
    std::process::exit(exit_code);
}

fn run_command(cli: Cli) -> i32 {
    use stubcheck::exit_codes::*;

    let project_dir = cli.project_dir;

    let (name, result) = match cli.command {
        Commands::Sync => (
            "Sync",
            commands::sync::execute(commands::sync::SyncArgs { project_dir }),
        ),
        Commands::Merge {
            no_sync,
            no_incremental,
        } => (
            "Merge",
            commands::merge::execute(commands::merge::MergeArgs {
                project_dir,
                no_sync,
                no_incremental,
            }),
        ),
        Commands::Check { no_sync, only } => (
            "Check",
            commands::check::execute(commands::check::CheckArgs {
                project_dir,
                no_sync,
                only,
                verbose: cli.verbose,
            }),
        ),
        Commands::Triage { input } => (
            "Triage",
            commands::triage::execute(commands::triage::TriageArgs { project_dir, input }),
        ),
        Commands::Rules { lifetime } => (
            "Rules",
            commands::rules::execute(commands::rules::RulesArgs {
                project_dir,
                lifetime: lifetime.map(RuleLifetime::from),
            }),
        ),
        Commands::Targets { active } => (
            "Targets",
            commands::targets::execute(commands::targets::TargetsArgs {
                project_dir,
                active_only: active,
            }),
        ),
    };

    match result {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} error: {:#}", name, e);
            EXIT_ERROR
        }
    }
}
