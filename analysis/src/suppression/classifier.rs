//! Classification of diagnostic lines against a [`PatternRegistry`].

use std::sync::Arc;

use crate::suppression::registry::PatternRegistry;

/// Outcome of classifying one diagnostic line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Matched the rule at this registry index (the first match wins).
    Suppressed { rule: usize },
    Unsuppressed,
}

impl Verdict {
    pub fn is_suppressed(&self) -> bool {
        matches!(self, Verdict::Suppressed { .. })
    }
}

/// Result of classifying a batch of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Triage {
    /// Lines no rule matched, in input order.
    pub unsuppressed: Vec<String>,
    /// Hits per registry index.
    pub rule_hits: Vec<usize>,
}

impl Triage {
    pub fn suppressed_count(&self) -> usize {
        self.rule_hits.iter().sum()
    }

    pub fn has_unsuppressed(&self) -> bool {
        !self.unsuppressed.is_empty()
    }
}

/// Decides whether diagnostic lines are known noise.
///
/// The registry is injected at construction so the classifier can be
/// exercised against synthetic rule sets.
#[derive(Debug, Clone)]
pub struct DiagnosticClassifier {
    registry: Arc<PatternRegistry>,
}

impl DiagnosticClassifier {
    pub fn new(registry: Arc<PatternRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Find the first rule matching `line`, in registration order.
    ///
    /// No normalization is applied: a reworded checker message must come
    /// back as unsuppressed.
    pub fn classify(&self, line: &str) -> Verdict {
        self.registry
            .all()
            .iter()
            .position(|rule| rule.matches(line))
            .map_or(Verdict::Unsuppressed, |rule| Verdict::Suppressed { rule })
    }

    pub fn is_suppressed(&self, line: &str) -> bool {
        self.classify(line).is_suppressed()
    }

    /// Classify every line, keeping unsuppressed ones and counting hits.
    pub fn partition<I, S>(&self, lines: I) -> Triage
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut triage = Triage {
            unsuppressed: Vec::new(),
            rule_hits: vec![0; self.registry.len()],
        };

        for line in lines {
            let line = line.into();
            match self.classify(&line) {
                Verdict::Suppressed { rule } => triage.rule_hits[rule] += 1,
                Verdict::Unsuppressed => triage.unsuppressed.push(line),
            }
        }

        triage
    }
}
