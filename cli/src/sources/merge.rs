//! Merging stubs into the upstream sources.
//!
//! The merge tool (retype) writes annotated copies of the upstream package
//! into the typed output tree. The tree is deleted and recreated before every
//! run. A file the tool cannot merge is reported and the run moves on.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One merge run over an upstream package.
#[derive(Debug, Clone)]
pub struct MergeJob {
    /// Merge tool executable.
    pub program: String,
    /// Upstream package directory, e.g. `django-sources/django`.
    pub package_dir: PathBuf,
    pub stubs_dir: PathBuf,
    /// Root of the typed output tree; the package lands in a subdirectory.
    pub output_dir: PathBuf,
    pub incremental: bool,
}

/// A file the merge tool reported as failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeFailure {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Top-level package entries handed to the merge tool.
    pub entries: usize,
    pub failures: Vec<MergeFailure>,
}

impl MergeJob {
    /// Where the merged package is written.
    pub fn package_output_dir(&self) -> PathBuf {
        match self.package_dir.file_name() {
            Some(name) => self.output_dir.join(name),
            None => self.output_dir.clone(),
        }
    }

    fn command(&self, entry: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        if self.incremental {
            cmd.arg("--incremental");
        }
        cmd.arg("--pyi-dir")
            .arg(&self.stubs_dir)
            .arg("--target-dir")
            .arg(self.package_output_dir())
            .arg(entry);
        cmd
    }

    /// Recreate the output tree and merge every entry of the package.
    ///
    /// Per-file failures are collected in the report and passed to
    /// `on_failure` as they are found. Failing to launch the tool at all is
    /// an error.
    pub fn run(&self, mut on_failure: impl FnMut(&MergeFailure)) -> Result<MergeReport> {
        recreate_dir(&self.output_dir)?;

        let mut entries: Vec<PathBuf> = fs::read_dir(&self.package_dir)
            .with_context(|| {
                format!("Failed to read package directory: {}", self.package_dir.display())
            })?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<_>>()
            .with_context(|| {
                format!("Failed to list package directory: {}", self.package_dir.display())
            })?;
        entries.sort();

        let mut report = MergeReport::default();
        for entry in &entries {
            debug!("merging stubs into {}", entry.display());
            let output = self
                .command(entry)
                .output()
                .with_context(|| format!("Failed to launch `{}`", self.program))?;
            report.entries += 1;

            let stderr = String::from_utf8_lossy(&output.stderr);
            let mut failures: Vec<MergeFailure> = stderr.lines().filter_map(parse_failure).collect();

            if failures.is_empty() && !output.status.success() {
                failures.push(MergeFailure {
                    file: entry.display().to_string(),
                    message: format!("{} exited with {}", self.program, output.status),
                });
            }

            for failure in failures {
                on_failure(&failure);
                report.failures.push(failure);
            }
        }

        info!(
            "merged {} entries into {} ({} failures)",
            report.entries,
            self.output_dir.display(),
            report.failures.len()
        );
        Ok(report)
    }
}

/// Delete `dir` if present and create it empty.
pub fn recreate_dir(dir: &Path) -> Result<()> {
    match fs::remove_dir_all(dir) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to remove output directory: {}", dir.display()));
        }
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))
}

/// Parse one `error: <file>: <message>` line from the merge tool.
fn parse_failure(line: &str) -> Option<MergeFailure> {
    let rest = line.trim_end().strip_prefix("error: ")?;
    let (file, message) = rest.split_once(": ")?;
    Some(MergeFailure {
        file: file.to_string(),
        message: message.to_string(),
    })
}
