//! stubcheck-analysis: diagnostic triage for stub typechecking runs
//!
//! This crate decides which typechecker diagnostics are regressions in the
//! stubs and which are accepted noise, and folds the per-directory verdicts
//! into a suite result:
//! - Suppression rules (literal substrings and regular expressions)
//! - A classifier over an injected, immutable rule registry
//! - A directory runner around the external typechecker
//! - A sequential suite aggregator
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use stubcheck_analysis::*;
//!
//! let registry = PatternRegistry::builder().with_builtin_rules().build()?;
//! let classifier = DiagnosticClassifier::new(Arc::new(registry));
//! let runner = DirectoryRunner::new(MypyChecker::new(), CheckerConfig::new("mypy", "mypy.ini"));
//! let suite = SuiteAggregator::new(runner, classifier, "django-sources/tests");
//! let result = suite.run(&TargetList::builtin(), &mut reporter)?;
//! std::process::exit(result.exit_code());
//! ```

pub mod config;
pub mod error;
pub mod mypy;
pub mod runner;
pub mod suite;
pub mod suppression;
pub mod targets;

pub use config::CheckerConfig;
pub use error::{CheckerError, TriageError};
pub use mypy::MypyChecker;
pub use runner::{DirectoryRunner, Typechecker, WorkingDirGuard};
pub use suite::{DirectoryResult, SuiteAggregator, SuiteReporter, SuiteResult};
pub use suppression::{
    DiagnosticClassifier, PatternRegistry, RuleLifetime, RuleSpec, SuppressionRule, Triage, Verdict,
};
pub use targets::{Target, TargetList, TargetState};
