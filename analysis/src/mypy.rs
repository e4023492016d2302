//! mypy as a subprocess.

use std::path::Path;
use std::process::Command;

use log::debug;

use crate::config::CheckerConfig;
use crate::error::CheckerError;
use crate::runner::Typechecker;

/// mypy exits 0 when clean and 1 when it reported errors; anything else is a
/// crash or a usage error.
const CLEAN_EXIT: i32 = 0;
const ERRORS_EXIT: i32 = 1;

/// Runs `<program> --config-file <config> --no-error-summary [args] <path>`.
///
/// The target is also passed as the child's working directory, so the
/// invocation does not depend on the parent's.
#[derive(Debug, Clone, Copy, Default)]
pub struct MypyChecker;

impl MypyChecker {
    pub fn new() -> Self {
        Self
    }

    fn command(path: &Path, config: &CheckerConfig) -> Command {
        let mut cmd = Command::new(&config.program);
        cmd.arg("--config-file")
            .arg(&config.config_file)
            .arg("--no-error-summary")
            .args(&config.extra_args)
            .arg(path)
            .current_dir(path);
        cmd
    }
}

impl Typechecker for MypyChecker {
    fn check(&self, path: &Path, config: &CheckerConfig) -> Result<Vec<String>, CheckerError> {
        let output = Self::command(path, config)
            .output()
            .map_err(|source| CheckerError::Spawn {
                program: config.program.clone(),
                source,
            })?;

        match output.status.code() {
            Some(CLEAN_EXIT) | Some(ERRORS_EXIT) => {
                let lines = diagnostic_lines(&String::from_utf8_lossy(&output.stdout));
                debug!(
                    "{} exited with {} ({} lines)",
                    config.program,
                    output.status,
                    lines.len()
                );
                Ok(lines)
            }
            _ => Err(CheckerError::Crashed {
                program: config.program.clone(),
                path: path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }),
        }
    }
}

/// Split checker stdout into diagnostic lines, dropping blank ones.
fn diagnostic_lines(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
