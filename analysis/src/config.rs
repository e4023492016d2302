use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How the external typechecker is invoked for each target directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckerConfig {
    /// Executable to launch (resolved through `PATH` when not absolute).
    pub program: String,
    /// Checker configuration file, passed through untouched.
    pub config_file: PathBuf,
    /// Extra arguments placed before the target path.
    #[serde(default)]
    pub extra_args: Vec<String>,
}

impl CheckerConfig {
    pub fn new(program: impl Into<String>, config_file: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            config_file: config_file.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn with_extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_no_extra_args() {
        let config = CheckerConfig::new("mypy", "/project/scripts/mypy.ini");
        assert_eq!(config.program, "mypy");
        assert_eq!(config.config_file, PathBuf::from("/project/scripts/mypy.ini"));
        assert!(config.extra_args.is_empty());
    }

    #[test]
    fn test_deserialize_without_extra_args() {
        let json = r#"{"program": "mypy", "config_file": "mypy.ini"}"#;
        let config: CheckerConfig =
            serde_json::from_str(json).expect("deserialization should succeed");
        assert!(config.extra_args.is_empty());
    }

    #[test]
    fn test_with_extra_args() {
        let config = CheckerConfig::new("mypy", "mypy.ini")
            .with_extra_args(vec!["--show-traceback".to_string()]);
        assert_eq!(config.extra_args, vec!["--show-traceback"]);
    }
}
