use std::path::{Path, PathBuf};

use log::debug;

use crate::error::TriageError;
use crate::runner::{DirectoryRunner, Typechecker};
use crate::suppression::DiagnosticClassifier;
use crate::targets::{Target, TargetList};

/// Receives the observable side effects of a suite run.
pub trait SuiteReporter {
    /// A target directory is about to be checked.
    fn checking(&mut self, target: &Target, path: &Path);

    /// A diagnostic no rule matched.
    fn unsuppressed(&mut self, target: &Target, line: &str);

    fn skipped(&mut self, _target: &Target) {}

    fn finished(&mut self, _result: &SuiteResult) {}
}

/// Outcome for one target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryResult {
    pub target: String,
    pub path: PathBuf,
    pub unsuppressed: Vec<String>,
    pub suppressed: usize,
}

impl DirectoryResult {
    /// True iff at least one unsuppressed line was produced.
    pub fn failed(&self) -> bool {
        !self.unsuppressed.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteResult {
    pub directories: Vec<DirectoryResult>,
    pub skipped: Vec<String>,
    /// Hits per registry index, summed over all directories.
    pub rule_hits: Vec<usize>,
}

impl SuiteResult {
    /// Logical OR of the directory results.
    pub fn failed(&self) -> bool {
        self.directories.iter().any(DirectoryResult::failed)
    }

    /// 0 when no directory produced an unsuppressed diagnostic, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.failed() { 1 } else { 0 }
    }

    pub fn failed_directories(&self) -> impl Iterator<Item = &DirectoryResult> {
        self.directories.iter().filter(|d| d.failed())
    }

    pub fn unsuppressed_count(&self) -> usize {
        self.directories.iter().map(|d| d.unsuppressed.len()).sum()
    }

    pub fn suppressed_count(&self) -> usize {
        self.directories.iter().map(|d| d.suppressed).sum()
    }

    /// Registry indices of rules that matched nothing during this run.
    pub fn unused_rules(&self) -> Vec<usize> {
        self.rule_hits
            .iter()
            .enumerate()
            .filter(|(_, hits)| **hits == 0)
            .map(|(index, _)| index)
            .collect()
    }
}

/// Checks every active target in list order and folds the results.
///
/// Strictly sequential: each check scopes a change of the process working
/// directory.
pub struct SuiteAggregator<C> {
    runner: DirectoryRunner<C>,
    classifier: DiagnosticClassifier,
    tests_root: PathBuf,
}

impl<C: Typechecker> SuiteAggregator<C> {
    pub fn new(
        runner: DirectoryRunner<C>,
        classifier: DiagnosticClassifier,
        tests_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            classifier,
            tests_root: tests_root.into(),
        }
    }

    /// Run the suite.
    ///
    /// A directory with unsuppressed diagnostics never stops the run; every
    /// active target is attempted. Checker failures abort with an error.
    pub fn run(
        &self,
        targets: &TargetList,
        reporter: &mut dyn SuiteReporter,
    ) -> Result<SuiteResult, TriageError> {
        let root = std::path::absolute(&self.tests_root).map_err(|source| {
            TriageError::WorkingDir {
                path: self.tests_root.clone(),
                source,
            }
        })?;

        let mut result = SuiteResult {
            directories: Vec::new(),
            skipped: Vec::new(),
            rule_hits: vec![0; self.classifier.registry().len()],
        };

        for target in targets.all() {
            if !target.is_active() {
                debug!("skipping pending target {}", target.name);
                reporter.skipped(target);
                result.skipped.push(target.name.clone());
                continue;
            }

            let path = root.join(&target.name);
            reporter.checking(target, &path);

            let lines = self.runner.run(&path)?;
            let triage = self.classifier.partition(lines);

            for line in &triage.unsuppressed {
                reporter.unsuppressed(target, line);
            }
            for (total, hits) in result.rule_hits.iter_mut().zip(&triage.rule_hits) {
                *total += hits;
            }

            debug!(
                "{}: {} unsuppressed, {} suppressed",
                target.name,
                triage.unsuppressed.len(),
                triage.suppressed_count()
            );

            result.directories.push(DirectoryResult {
                target: target.name.clone(),
                path,
                suppressed: triage.suppressed_count(),
                unsuppressed: triage.unsuppressed,
            });
        }

        reporter.finished(&result);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckerConfig;
    use crate::error::CheckerError;
    use crate::suppression::{PatternRegistry, RuleLifetime, RuleSpec};
    use crate::targets::Target;
    use serial_test::serial;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    /// Canned output per directory name; names listed in `crash` fail.
    #[derive(Default)]
    struct FakeChecker {
        output: HashMap<String, Vec<String>>,
        crash: Vec<String>,
        calls: RefCell<Vec<String>>,
    }

    impl FakeChecker {
        fn with(mut self, dir: &str, lines: &[&str]) -> Self {
            self.output
                .insert(dir.to_string(), lines.iter().map(|l| l.to_string()).collect());
            self
        }

        fn crashing(mut self, dir: &str) -> Self {
            self.crash.push(dir.to_string());
            self
        }
    }

    impl Typechecker for FakeChecker {
        fn check(&self, path: &Path, config: &CheckerConfig) -> Result<Vec<String>, CheckerError> {
            let name = path.file_name().unwrap().to_string_lossy().to_string();
            self.calls.borrow_mut().push(name.clone());
            if self.crash.contains(&name) {
                return Err(CheckerError::Crashed {
                    program: config.program.clone(),
                    path: path.to_path_buf(),
                    status: "exit status: 2".to_string(),
                    stderr: "Traceback".to_string(),
                });
            }
            Ok(self.output.get(&name).cloned().unwrap_or_default())
        }
    }

    #[derive(Default)]
    struct RecordingReporter {
        checking: Vec<String>,
        unsuppressed: Vec<(String, String)>,
        skipped: Vec<String>,
        finished: bool,
    }

    impl SuiteReporter for RecordingReporter {
        fn checking(&mut self, target: &Target, path: &Path) {
            assert!(path.is_absolute());
            self.checking.push(target.name.clone());
        }

        fn unsuppressed(&mut self, target: &Target, line: &str) {
            self.unsuppressed.push((target.name.clone(), line.to_string()));
        }

        fn skipped(&mut self, target: &Target) {
            self.skipped.push(target.name.clone());
        }

        fn finished(&mut self, _result: &SuiteResult) {
            self.finished = true;
        }
    }

    fn tests_root(dirs: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for dir in dirs {
            fs::create_dir_all(temp_dir.path().join(dir)).unwrap();
        }
        temp_dir
    }

    fn classifier() -> DiagnosticClassifier {
        DiagnosticClassifier::new(Arc::new(
            PatternRegistry::from_specs([
                RuleSpec::literal("Need type annotation for", RuleLifetime::Dynamic),
                RuleSpec::pattern(
                    r#""HttpResponseBase" has no attribute "[A-Za-z_]+""#,
                    RuleLifetime::StubGap,
                ),
                RuleSpec::literal("never matches", RuleLifetime::StubGap),
            ])
            .unwrap(),
        ))
    }

    fn aggregator<'a>(checker: &'a FakeChecker, root: &Path) -> SuiteAggregator<&'a FakeChecker> {
        SuiteAggregator::new(
            DirectoryRunner::new(checker, CheckerConfig::new("fake", "mypy.ini")),
            classifier(),
            root,
        )
    }

    fn targets(names: &[&str]) -> TargetList {
        TargetList::new(names.iter().map(|n| Target::active(*n)).collect())
    }

    #[test]
    #[serial]
    fn test_only_suppressed_diagnostics_pass() {
        let root = tests_root(&["basic", "dates"]);
        let checker = FakeChecker::default()
            .with("basic", &[r#"basic/tests.py:1: error: Need type annotation for "x""#])
            .with(
                "dates",
                &[r#"dates/tests.py:7: error: "HttpResponseBase" has no attribute "close""#],
            );
        let mut reporter = RecordingReporter::default();

        let result = aggregator(&checker, root.path())
            .run(&targets(&["basic", "dates"]), &mut reporter)
            .unwrap();

        assert!(!result.failed());
        assert_eq!(result.exit_code(), 0);
        assert_eq!(result.suppressed_count(), 2);
        assert!(reporter.unsuppressed.is_empty());
        assert!(reporter.finished);
    }

    #[test]
    #[serial]
    fn test_one_unsuppressed_line_fails_suite_but_all_dirs_run() {
        let root = tests_root(&["basic", "choices", "dates"]);
        let checker = FakeChecker::default()
            .with("basic", &[r#"basic/tests.py:3: error: "Foo" has no attribute "bar""#])
            .with("dates", &[r#"dates/tests.py:1: error: Need type annotation for "y""#]);
        let mut reporter = RecordingReporter::default();

        let result = aggregator(&checker, root.path())
            .run(&targets(&["basic", "choices", "dates"]), &mut reporter)
            .unwrap();

        assert_eq!(result.exit_code(), 1);
        assert_eq!(*checker.calls.borrow(), vec!["basic", "choices", "dates"]);
        assert_eq!(reporter.checking, vec!["basic", "choices", "dates"]);
        assert_eq!(
            reporter.unsuppressed,
            vec![(
                "basic".to_string(),
                r#"basic/tests.py:3: error: "Foo" has no attribute "bar""#.to_string()
            )]
        );
        let failed: Vec<&str> = result.failed_directories().map(|d| d.target.as_str()).collect();
        assert_eq!(failed, vec!["basic"]);
        assert_eq!(result.unsuppressed_count(), 1);
    }

    #[test]
    #[serial]
    fn test_case_changed_message_resurfaces() {
        let root = tests_root(&["basic"]);
        let checker = FakeChecker::default()
            .with("basic", &[r#"basic/tests.py:1: error: need type annotation for "x""#]);
        let mut reporter = RecordingReporter::default();

        let result = aggregator(&checker, root.path())
            .run(&targets(&["basic"]), &mut reporter)
            .unwrap();
        assert!(result.failed());
    }

    #[test]
    #[serial]
    fn test_pending_targets_are_not_checked() {
        let root = tests_root(&["basic", "dates"]);
        let checker = FakeChecker::default();
        let list = TargetList::new(vec![
            Target::active("basic"),
            Target::pending("cache"),
            Target::active("dates"),
        ]);
        let mut reporter = RecordingReporter::default();

        let result = aggregator(&checker, root.path()).run(&list, &mut reporter).unwrap();

        assert_eq!(*checker.calls.borrow(), vec!["basic", "dates"]);
        assert_eq!(result.skipped, vec!["cache"]);
        assert_eq!(reporter.skipped, vec!["cache"]);
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    #[serial]
    fn test_checker_crash_aborts_and_restores_cwd() {
        let root = tests_root(&["basic", "dates"]);
        let before = std::env::current_dir().unwrap();
        let checker = FakeChecker::default().crashing("basic");
        let mut reporter = RecordingReporter::default();

        let err = aggregator(&checker, root.path())
            .run(&targets(&["basic", "dates"]), &mut reporter)
            .unwrap_err();

        assert!(matches!(err, TriageError::Checker(_)));
        assert_eq!(std::env::current_dir().unwrap(), before);
        assert!(!reporter.finished);
    }

    #[test]
    #[serial]
    fn test_rule_hits_are_summed_across_directories() {
        let root = tests_root(&["basic", "dates"]);
        let checker = FakeChecker::default()
            .with("basic", &[r#"a.py:1: error: Need type annotation for "x""#])
            .with(
                "dates",
                &[
                    r#"b.py:1: error: Need type annotation for "y""#,
                    r#"b.py:2: error: "HttpResponseBase" has no attribute "streaming""#,
                ],
            );
        let mut reporter = RecordingReporter::default();

        let result = aggregator(&checker, root.path())
            .run(&targets(&["basic", "dates"]), &mut reporter)
            .unwrap();

        assert_eq!(result.rule_hits, vec![2, 1, 0]);
        assert_eq!(result.unused_rules(), vec![2]);
        assert_eq!(result.directories[1].suppressed, 2);
    }

    #[test]
    #[serial]
    fn test_empty_target_list_passes() {
        let root = tests_root(&[]);
        let checker = FakeChecker::default();
        let mut reporter = RecordingReporter::default();
        let result = aggregator(&checker, root.path())
            .run(&TargetList::default(), &mut reporter)
            .unwrap();
        assert_eq!(result.exit_code(), 0);
        assert!(result.directories.is_empty());
    }
}
