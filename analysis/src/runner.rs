use std::env;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::CheckerConfig;
use crate::error::{CheckerError, TriageError};

/// The external typechecker.
///
/// Implementations return every diagnostic line the checker reported for
/// `path`. Diagnostics are data, not errors: `Err` is reserved for the
/// checker failing to run or crashing.
pub trait Typechecker {
    fn check(&self, path: &Path, config: &CheckerConfig) -> Result<Vec<String>, CheckerError>;
}

impl<T: Typechecker + ?Sized> Typechecker for &T {
    fn check(&self, path: &Path, config: &CheckerConfig) -> Result<Vec<String>, CheckerError> {
        (**self).check(path, config)
    }
}

/// Changes the process working directory and restores the previous one
/// when dropped, including on early return and unwinding.
#[derive(Debug)]
pub struct WorkingDirGuard {
    previous: PathBuf,
}

impl WorkingDirGuard {
    pub fn enter(path: &Path) -> Result<Self, TriageError> {
        let to_err = |source| TriageError::WorkingDir {
            path: path.to_path_buf(),
            source,
        };
        let previous = env::current_dir().map_err(to_err)?;
        env::set_current_dir(path).map_err(to_err)?;
        Ok(Self { previous })
    }

    pub fn previous(&self) -> &Path {
        &self.previous
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.previous) {
            warn!(
                "failed to restore working directory {}: {}",
                self.previous.display(),
                e
            );
        }
    }
}

/// Runs the typechecker on one target directory at a time.
pub struct DirectoryRunner<C> {
    checker: C,
    config: CheckerConfig,
}

impl<C: Typechecker> DirectoryRunner<C> {
    pub fn new(checker: C, config: CheckerConfig) -> Self {
        Self { checker, config }
    }

    /// Check `path` with the working directory scoped to it.
    ///
    /// Returns the raw diagnostic lines; an empty vector means a clean
    /// directory. Checker failures propagate unchanged.
    pub fn run(&self, path: &Path) -> Result<Vec<String>, TriageError> {
        let _cwd = WorkingDirGuard::enter(path)?;
        debug!("running {} in {}", self.config.program, path.display());
        let lines = self.checker.check(path, &self.config)?;
        debug!("{} reported {} lines", self.config.program, lines.len());
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::cell::RefCell;
    use tempfile::TempDir;

    /// Records the working directory seen by each check.
    struct RecordingChecker {
        seen: RefCell<Vec<PathBuf>>,
        outcome: fn() -> Result<Vec<String>, CheckerError>,
    }

    impl RecordingChecker {
        fn new(outcome: fn() -> Result<Vec<String>, CheckerError>) -> Self {
            Self {
                seen: RefCell::new(Vec::new()),
                outcome,
            }
        }
    }

    impl Typechecker for RecordingChecker {
        fn check(&self, _path: &Path, _config: &CheckerConfig) -> Result<Vec<String>, CheckerError> {
            self.seen.borrow_mut().push(env::current_dir().unwrap());
            (self.outcome)()
        }
    }

    fn config() -> CheckerConfig {
        CheckerConfig::new("fake-checker", "mypy.ini")
    }

    fn canonical(path: &Path) -> PathBuf {
        path.canonicalize().unwrap()
    }

    #[test]
    #[serial]
    fn test_runs_inside_target_and_restores() {
        let temp_dir = TempDir::new().unwrap();
        let before = env::current_dir().unwrap();

        let checker = RecordingChecker::new(|| Ok(vec!["a.py:1: error: boom".to_string()]));
        let runner = DirectoryRunner::new(&checker, config());
        let lines = runner.run(temp_dir.path()).unwrap();

        assert_eq!(lines, vec!["a.py:1: error: boom"]);
        assert_eq!(canonical(&checker.seen.borrow()[0]), canonical(temp_dir.path()));
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_restores_working_dir_when_checker_crashes() {
        let temp_dir = TempDir::new().unwrap();
        let before = env::current_dir().unwrap();

        let checker = RecordingChecker::new(|| {
            Err(CheckerError::Crashed {
                program: "fake-checker".to_string(),
                path: PathBuf::from("x"),
                status: "exit status: 2".to_string(),
                stderr: "INTERNAL ERROR".to_string(),
            })
        });
        let runner = DirectoryRunner::new(&checker, config());
        let err = runner.run(temp_dir.path()).unwrap_err();

        assert!(matches!(err, TriageError::Checker(CheckerError::Crashed { .. })));
        assert_eq!(checker.seen.borrow().len(), 1);
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_missing_directory_is_an_error_without_running() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("does_not_exist");
        let before = env::current_dir().unwrap();

        let checker = RecordingChecker::new(|| Ok(vec![]));
        let runner = DirectoryRunner::new(&checker, config());
        let err = runner.run(&missing).unwrap_err();

        assert!(matches!(err, TriageError::WorkingDir { .. }));
        assert!(checker.seen.borrow().is_empty());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_clean_directory_yields_no_lines() {
        let temp_dir = TempDir::new().unwrap();
        let checker = RecordingChecker::new(|| Ok(vec![]));
        let runner = DirectoryRunner::new(&checker, config());
        assert!(runner.run(temp_dir.path()).unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_guard_restores_on_panic() {
        let temp_dir = TempDir::new().unwrap();
        let before = env::current_dir().unwrap();
        let target = temp_dir.path().to_path_buf();

        let result = std::panic::catch_unwind(move || {
            let _guard = WorkingDirGuard::enter(&target).unwrap();
            panic!("checker blew up");
        });

        assert!(result.is_err());
        assert_eq!(env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_guard_remembers_previous() {
        let temp_dir = TempDir::new().unwrap();
        let before = env::current_dir().unwrap();
        let guard = WorkingDirGuard::enter(temp_dir.path()).unwrap();
        assert_eq!(guard.previous(), before.as_path());
        drop(guard);
        assert_eq!(env::current_dir().unwrap(), before);
    }
}
