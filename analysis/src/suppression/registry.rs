use log::debug;
use regex::Regex;

use crate::error::TriageError;
use crate::suppression::builtin::builtin_rule_specs;
use crate::suppression::model::{RuleMatcher, RuleSource, RuleSpec, SuppressionRule};

/// Ordered, immutable set of suppression rules.
///
/// Built once at startup through [`RegistryBuilder`] and shared read-only
/// with the classifier. Every pattern is compiled, and no rule matches every
/// line: literals contain non-whitespace and patterns reject the empty string.
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    rules: Vec<SuppressionRule>,
}

impl PatternRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Validate and compile `specs`, keeping their order.
    pub fn from_specs(specs: impl IntoIterator<Item = RuleSpec>) -> Result<Self, TriageError> {
        Self::builder().extend(specs).build()
    }

    pub fn all(&self) -> &[SuppressionRule] {
        &self.rules
    }

    pub fn get(&self, index: usize) -> Option<&SuppressionRule> {
        self.rules.get(index)
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Collects rule specs and validates them all at [`build`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct RegistryBuilder {
    specs: Vec<RuleSpec>,
}

impl RegistryBuilder {
    /// Append the Django test-suite noise list.
    pub fn with_builtin_rules(mut self) -> Self {
        self.specs.extend(builtin_rule_specs());
        self
    }

    pub fn rule(mut self, spec: RuleSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn extend(mut self, specs: impl IntoIterator<Item = RuleSpec>) -> Self {
        self.specs.extend(specs);
        self
    }

    /// Compile every rule, failing on the first empty or invalid one.
    ///
    /// Matching is unanchored, so a whitespace-only literal or a pattern that
    /// matches the empty string would suppress everything; both count as empty.
    pub fn build(self) -> Result<PatternRegistry, TriageError> {
        let mut rules = Vec::with_capacity(self.specs.len());

        for (index, spec) in self.specs.into_iter().enumerate() {
            if spec.source.text().trim().is_empty() {
                return Err(TriageError::EmptyRule { index });
            }

            let matcher = match spec.source {
                RuleSource::Literal(text) => RuleMatcher::Literal(text),
                RuleSource::Pattern(pattern) => match Regex::new(&pattern) {
                    Ok(regex) if regex.is_match("") => {
                        return Err(TriageError::MatchesEverything { index, pattern });
                    }
                    Ok(regex) => RuleMatcher::Pattern(regex),
                    Err(source) => {
                        return Err(TriageError::InvalidPattern {
                            index,
                            pattern,
                            source,
                        });
                    }
                },
            };

            rules.push(SuppressionRule {
                matcher,
                lifetime: spec.lifetime,
                note: spec.note,
            });
        }

        debug!("registered {} suppression rules", rules.len());
        Ok(PatternRegistry { rules })
    }
}
