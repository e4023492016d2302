//! Suppression of known-noise diagnostics.
//!
//! The typechecker reports plenty of errors that are not regressions in the
//! stubs: mocks, metaclass magic and monkeypatched attributes in the checked
//! code base. Those are described here as suppression rules:
//!
//! - **Literal**: suppresses any line containing the text
//! - **Pattern**: suppresses any line the regular expression matches
//!   anywhere (unanchored)
//!
//! Rules live in an immutable [`PatternRegistry`] which a
//! [`DiagnosticClassifier`] consults line by line.

mod builtin;
mod classifier;
mod model;
mod registry;

pub use builtin::builtin_rule_specs;
pub use classifier::{DiagnosticClassifier, Triage, Verdict};
pub use model::{RuleLifetime, RuleMatcher, RuleSource, RuleSpec, SuppressionRule};
pub use registry::{PatternRegistry, RegistryBuilder};
