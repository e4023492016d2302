//! # Merge Command
//!
//! Merges the stubs into the pinned upstream sources, writing the typed
//! output tree. Files the merge tool rejects are printed to stderr and do not
//! fail the command.
//!
//! ## Usage
//!
//! ```bash
//! stubcheck merge
//! stubcheck merge --no-sync --no-incremental
//! ```

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use crate::errors::{display_merge_error, display_success, display_warning};
use crate::exit_codes::*;
use crate::sources::MergeJob;

/// Arguments for the merge command
#[derive(Debug)]
pub struct MergeArgs {
    pub project_dir: PathBuf,
    /// Use the checkout as it is
    pub no_sync: bool,
    /// Re-merge every file even when `merge.incremental` is set
    pub no_incremental: bool,
}

/// Execute the merge command
///
/// # Returns
///
/// * `Ok(EXIT_SUCCESS)` - The merge ran (individual files may have failed)
/// * `Ok(EXIT_CONFIG_ERROR)` - The settings file could not be loaded
/// * `Ok(EXIT_SYNC_ERROR)` - The checkout could not be synced
/// * `Ok(EXIT_MERGE_ERROR)` - The merge tool could not be run
pub fn execute(args: MergeArgs) -> Result<i32> {
    let Some(config) = super::load_project(&args.project_dir) else {
        return Ok(EXIT_CONFIG_ERROR);
    };

    if !args.no_sync {
        let code = super::sync::sync_checkout(&config);
        if code != EXIT_SUCCESS {
            return Ok(code);
        }
    }

    let job = MergeJob {
        program: config.settings.merge.program.clone(),
        package_dir: config.package_dir(),
        stubs_dir: config.stubs_dir(),
        output_dir: config.typed_output_dir(),
        incremental: config.settings.merge.incremental && !args.no_incremental,
    };

    let report = job.run(|failure| {
        eprintln!("{} {}: {}", "error:".red().bold(), failure.file, failure.message);
    });

    match report {
        Ok(report) if report.failures.is_empty() => {
            display_success(&format!(
                "Merged {} entries into {}",
                report.entries,
                job.package_output_dir().display()
            ));
            Ok(EXIT_SUCCESS)
        }
        Ok(report) => {
            display_warning(&format!(
                "{} file(s) could not be merged into {}",
                report.failures.len(),
                job.package_output_dir().display()
            ));
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            display_merge_error(&format!("{:#}", e));
            Ok(EXIT_MERGE_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    fn write_settings(root: &std::path::Path, merge_program: &str) {
        fs::write(
            root.join("stubcheck.toml"),
            format!("[merge]\nprogram = '{}'\n", merge_program),
        )
        .unwrap();
    }

    #[test]
    #[serial]
    fn test_missing_merge_tool_is_merge_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("django-sources/django/db")).unwrap();
        let missing = temp_dir.path().join("no-such-retype");
        write_settings(temp_dir.path(), &missing.to_string_lossy());

        let code = execute(MergeArgs {
            project_dir: temp_dir.path().to_path_buf(),
            no_sync: true,
            no_incremental: false,
        })
        .unwrap();
        assert_eq!(code, EXIT_MERGE_ERROR);
    }

    #[test]
    #[serial]
    fn test_missing_package_dir_is_merge_error() {
        let temp_dir = TempDir::new().unwrap();

        let code = execute(MergeArgs {
            project_dir: temp_dir.path().to_path_buf(),
            no_sync: true,
            no_incremental: false,
        })
        .unwrap();
        assert_eq!(code, EXIT_MERGE_ERROR);
    }

    #[cfg(unix)]
    #[test]
    #[serial]
    fn test_per_file_failures_do_not_fail_the_command() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("django-sources/django/db")).unwrap();
        let script = temp_dir.path().join("fake-retype");
        fs::write(
            &script,
            "#!/bin/sh\necho 'error: django/db/models.py: cannot merge' >&2\nexit 1\n",
        )
        .unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        write_settings(temp_dir.path(), &script.to_string_lossy());

        let code = execute(MergeArgs {
            project_dir: temp_dir.path().to_path_buf(),
            no_sync: true,
            no_incremental: true,
        })
        .unwrap();
        assert_eq!(code, EXIT_SUCCESS);
        assert!(temp_dir.path().join("django-sources-typed").is_dir());
    }
}
