//! # Project Settings
//!
//! This module loads the project layout and upstream pin from an optional
//! `stubcheck.toml` at the project root. Every key has a default matching the
//! django-stubs layout, so a missing file is not an error:
//!
//! ```toml
//! [upstream]
//! url = "https://github.com/django/django.git"
//! branch = "stable/2.1.x"
//! commit = "03219b5f709dcd5b0bfacd963508625557ec1ef0"
//!
//! [paths]
//! sources = "django-sources"
//! stubs = "django-stubs"
//! typed_output = "django-sources-typed"
//! checker_config = "scripts/mypy.ini"
//!
//! [checker]
//! program = "mypy"
//!
//! [[rules]]
//! literal = "some accepted message"
//! lifetime = "dynamic"
//! ```
//!
//! Relative paths resolve against the project directory. The
//! `STUBCHECK_MYPY` environment variable takes precedence over
//! `checker.program`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use stubcheck_analysis::{CheckerConfig, PatternRegistry, RuleSpec, TargetList};

/// Settings file name, looked up in the project directory.
pub const SETTINGS_FILE: &str = "stubcheck.toml";

/// Environment variable for overriding the checker executable
const CHECKER_ENV_VAR: &str = "STUBCHECK_MYPY";

const DEFAULT_UPSTREAM_URL: &str = "https://github.com/django/django.git";
const DEFAULT_UPSTREAM_BRANCH: &str = "stable/2.1.x";
const DEFAULT_UPSTREAM_COMMIT: &str = "03219b5f709dcd5b0bfacd963508625557ec1ef0";

/// Upstream repository and the revision results are pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamSettings {
    pub url: String,
    pub branch: String,
    pub commit: String,
}

impl Default for UpstreamSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            branch: DEFAULT_UPSTREAM_BRANCH.to_string(),
            commit: DEFAULT_UPSTREAM_COMMIT.to_string(),
        }
    }
}

/// Directory layout, relative to the project directory unless absolute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Upstream checkout.
    pub sources: PathBuf,
    /// Stub files to merge and check against.
    pub stubs: PathBuf,
    /// Merged output tree, recreated on every merge.
    pub typed_output: PathBuf,
    /// Checker configuration file.
    pub checker_config: PathBuf,
    /// Package directory inside the checkout.
    pub package: String,
    /// Test root inside the checkout.
    pub tests: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            sources: PathBuf::from("django-sources"),
            stubs: PathBuf::from("django-stubs"),
            typed_output: PathBuf::from("django-sources-typed"),
            checker_config: PathBuf::from("scripts/mypy.ini"),
            package: "django".to_string(),
            tests: "tests".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerSettings {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CheckerSettings {
    fn default() -> Self {
        Self {
            program: "mypy".to_string(),
            args: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeSettings {
    pub program: String,
    /// Skip files unchanged since the previous merge.
    pub incremental: bool,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            program: "retype".to_string(),
            incremental: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    /// Restrict the run to these target directories.
    pub only: Vec<String>,
}

/// Contents of `stubcheck.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub upstream: UpstreamSettings,
    pub paths: PathSettings,
    pub checker: CheckerSettings,
    pub merge: MergeSettings,
    pub targets: TargetSettings,
    /// Extra suppression rules, registered after the built-in ones.
    pub rules: Vec<RuleSpec>,
}

/// Settings resolved against a project directory.
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    root: PathBuf,
    pub settings: Settings,
    /// Settings file that was loaded, if any.
    pub source: Option<PathBuf>,
}

impl ProjectConfig {
    /// Project with default settings rooted at `root`.
    pub fn with_defaults(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            settings: Settings::default(),
            source: None,
        }
    }

    /// Load `stubcheck.toml` from `project_dir`, falling back to defaults
    /// when the file does not exist.
    ///
    /// # Returns
    ///
    /// * `Ok(ProjectConfig)` - Settings loaded or defaulted
    /// * `Err(_)` - The project directory cannot be resolved, or the file is unreadable or malformed
    pub fn load(project_dir: &Path) -> Result<Self> {
        let root = std::path::absolute(project_dir).with_context(|| {
            format!("Failed to resolve project directory: {}", project_dir.display())
        })?;
        let path = root.join(SETTINGS_FILE);

        if !path.exists() {
            log::debug!("no {} in {}, using defaults", SETTINGS_FILE, root.display());
            return Ok(Self::with_defaults(root));
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;

        Ok(Self {
            root,
            settings,
            source: Some(path),
        })
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn sources_dir(&self) -> PathBuf {
        self.resolve(&self.settings.paths.sources)
    }

    pub fn stubs_dir(&self) -> PathBuf {
        self.resolve(&self.settings.paths.stubs)
    }

    pub fn typed_output_dir(&self) -> PathBuf {
        self.resolve(&self.settings.paths.typed_output)
    }

    /// Upstream package directory the stubs are merged into.
    pub fn package_dir(&self) -> PathBuf {
        self.sources_dir().join(&self.settings.paths.package)
    }

    pub fn tests_root(&self) -> PathBuf {
        self.sources_dir().join(&self.settings.paths.tests)
    }

    /// Checker executable; `STUBCHECK_MYPY` takes precedence over the settings file.
    pub fn checker_program(&self) -> String {
        std::env::var(CHECKER_ENV_VAR).unwrap_or_else(|_| self.settings.checker.program.clone())
    }

    pub fn checker_config(&self) -> CheckerConfig {
        CheckerConfig::new(
            self.checker_program(),
            self.resolve(&self.settings.paths.checker_config),
        )
        .with_extra_args(self.settings.checker.args.clone())
    }

    /// Built-in suppression rules followed by the project's own.
    pub fn registry(&self) -> Result<PatternRegistry> {
        PatternRegistry::builder()
            .with_builtin_rules()
            .extend(self.settings.rules.iter().cloned())
            .build()
            .context("Invalid suppression rule")
    }

    /// Built-in target list narrowed by `targets.only` and then by `only`.
    ///
    /// Fails when a requested name is not in the list.
    pub fn targets(&self, only: &[String]) -> Result<TargetList> {
        let mut targets = TargetList::builtin();

        for filter in [&self.settings.targets.only[..], only] {
            if filter.is_empty() {
                continue;
            }
            let (restricted, unknown) = targets.restrict_to(filter);
            if !unknown.is_empty() {
                anyhow::bail!("Unknown target directories: {}", unknown.join(", "));
            }
            targets = restricted;
        }

        Ok(targets)
    }
}
