use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type exposed by the triage engine.
///
/// This is what bubbles out to the CLI. Unsuppressed diagnostics are never
/// errors; they are results.
#[derive(Debug, Error)]
pub enum TriageError {
    #[error("suppression rule #{index} is empty")]
    EmptyRule { index: usize },

    #[error("suppression rule #{index} matches the empty string `{pattern}`")]
    MatchesEverything { index: usize, pattern: String },

    #[error("suppression rule #{index} is not a valid pattern `{pattern}`: {source}")]
    InvalidPattern {
        index: usize,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot enter {}: {source}", path.display())]
    WorkingDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("typechecker error: {0}")]
    Checker(#[from] CheckerError),
}

/// Failures of the external typechecker itself, as opposed to the
/// diagnostics it reports.
#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("failed to launch `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` crashed on {} ({status}): {stderr}", path.display())]
    Crashed {
        program: String,
        path: PathBuf,
        status: String,
        stderr: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_rule_display() {
        let err = TriageError::EmptyRule { index: 3 };
        assert_eq!(err.to_string(), "suppression rule #3 is empty");
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        use std::error::Error;

        let source = regex::Regex::new("(unclosed").unwrap_err();
        let err = TriageError::InvalidPattern {
            index: 0,
            pattern: "(unclosed".to_string(),
            source,
        };
        assert!(err.to_string().contains("`(unclosed`"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_working_dir_display() {
        let err = TriageError::WorkingDir {
            path: PathBuf::from("/nowhere/tests/basic"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/nowhere/tests/basic"));
        assert!(msg.contains("no such directory"));
    }

    #[test]
    fn test_checker_error_converts() {
        let checker = CheckerError::Crashed {
            program: "mypy".to_string(),
            path: PathBuf::from("tests/basic"),
            status: "exit status: 2".to_string(),
            stderr: "INTERNAL ERROR".to_string(),
        };
        let err: TriageError = checker.into();
        let msg = err.to_string();
        assert!(msg.starts_with("typechecker error"));
        assert!(msg.contains("INTERNAL ERROR"));
    }

    #[test]
    fn test_spawn_error_debug() {
        let err = CheckerError::Spawn {
            program: "mypy".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Spawn"));
        assert!(debug_str.contains("mypy"));
    }
}
