//! Data structures for diagnostic suppression rules.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// How long a suppression rule is expected to stay in the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleLifetime {
    /// Noise caused by a gap in the stubs; should disappear as the stubs improve.
    #[default]
    StubGap,
    /// Noise caused by dynamic patterns (mocks, metaclasses, monkeypatching)
    /// that static stubs can never model.
    Dynamic,
}

impl RuleLifetime {
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleLifetime::StubGap => "stub-gap",
            RuleLifetime::Dynamic => "dynamic",
        }
    }
}

/// Uncompiled text of a rule, as written in code or in project settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleSource {
    /// Matched by substring containment.
    Literal(String),
    /// Matched by unanchored regular expression search.
    Pattern(String),
}

impl RuleSource {
    pub fn text(&self) -> &str {
        match self {
            RuleSource::Literal(text) | RuleSource::Pattern(text) => text,
        }
    }
}

/// A suppression rule before validation.
///
/// In `stubcheck.toml` this is one `[[rules]]` table:
///
/// ```toml
/// [[rules]]
/// pattern = '"HttpRequest" has no attribute "[a-z_]+"'
/// lifetime = "stub_gap"
/// note = "custom request attributes set by middleware"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSpec {
    #[serde(flatten)]
    pub source: RuleSource,
    #[serde(default)]
    pub lifetime: RuleLifetime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl RuleSpec {
    pub fn literal(text: impl Into<String>, lifetime: RuleLifetime) -> Self {
        Self {
            source: RuleSource::Literal(text.into()),
            lifetime,
            note: None,
        }
    }

    pub fn pattern(pattern: impl Into<String>, lifetime: RuleLifetime) -> Self {
        Self {
            source: RuleSource::Pattern(pattern.into()),
            lifetime,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// The compiled matching half of a rule.
#[derive(Debug, Clone)]
pub enum RuleMatcher {
    Literal(String),
    Pattern(Regex),
}

impl RuleMatcher {
    /// Case- and whitespace-sensitive, unanchored.
    pub fn matches(&self, line: &str) -> bool {
        match self {
            RuleMatcher::Literal(text) => line.contains(text.as_str()),
            RuleMatcher::Pattern(regex) => regex.is_match(line),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            RuleMatcher::Literal(text) => text,
            RuleMatcher::Pattern(regex) => regex.as_str(),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, RuleMatcher::Pattern(_))
    }
}

/// A validated suppression rule, owned by a
/// [`PatternRegistry`](super::PatternRegistry).
#[derive(Debug, Clone)]
pub struct SuppressionRule {
    pub matcher: RuleMatcher,
    pub lifetime: RuleLifetime,
    pub note: Option<String>,
}

impl SuppressionRule {
    pub fn matches(&self, line: &str) -> bool {
        self.matcher.matches(line)
    }
}
