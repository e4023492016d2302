//! Upstream checkout pinned to a fixed revision.
//!
//! The checkout is cloned on first use. Afterwards the configured branch is
//! fetched only when HEAD is not already at the pinned commit, so repeated
//! runs work offline.

use anyhow::{Context, Result, bail};
use log::{debug, info};
use std::path::Path;
use std::process::Command;

use crate::config::UpstreamSettings;

/// What [`sync_upstream`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The checkout did not exist and was cloned.
    Cloned,
    /// The branch was fetched and the pinned commit checked out.
    Updated,
    /// HEAD was already at the pinned commit.
    AlreadyPinned,
}

/// Ensure `checkout` exists and HEAD is at `upstream.commit`.
///
/// Any git failure (network, unknown revision, dirty tree) is returned as an
/// error; the caller aborts the run. So is an existing `checkout` without its
/// own `.git`, since git would otherwise act on an enclosing repository.
pub fn sync_upstream(checkout: &Path, upstream: &UpstreamSettings) -> Result<SyncOutcome> {
    let outcome = if !checkout.exists() {
        info!("cloning {} into {}", upstream.url, checkout.display());
        run_git(
            Command::new("git")
                .arg("clone")
                .arg("--branch")
                .arg(&upstream.branch)
                .arg(&upstream.url)
                .arg(checkout),
        )?;
        SyncOutcome::Cloned
    } else if !is_checkout(checkout) {
        bail!("{} exists but is not a git checkout", checkout.display());
    } else if current_revision(checkout).as_deref() == Some(upstream.commit.as_str()) {
        debug!("{} already at {}", checkout.display(), upstream.commit);
        return Ok(SyncOutcome::AlreadyPinned);
    } else {
        info!("fetching {} from origin", upstream.branch);
        run_git(git_in(checkout).args(["fetch", "origin", upstream.branch.as_str()]))?;
        SyncOutcome::Updated
    };

    run_git(git_in(checkout).args(["checkout", "--quiet", upstream.commit.as_str()]))
        .with_context(|| format!("Failed to check out pinned commit {}", upstream.commit))?;

    Ok(outcome)
}

/// Full hash of HEAD, or `None` when `checkout` is not a usable repository.
pub fn current_revision(checkout: &Path) -> Option<String> {
    if !is_checkout(checkout) {
        return None;
    }
    let output = git_in(checkout).args(["rev-parse", "HEAD"]).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if rev.is_empty() { None } else { Some(rev) }
}

/// True when `dir` is the top of a repository (`.git` is a directory, or a
/// file for worktrees and submodules).
fn is_checkout(dir: &Path) -> bool {
    dir.join(".git").exists()
}

fn git_in(dir: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    cmd
}

/// Run a git command, returning trimmed stdout.
fn run_git(cmd: &mut Command) -> Result<String> {
    let args = cmd
        .get_args()
        .map(|a| a.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(" ");
    debug!("git {}", args);

    let output = cmd
        .output()
        .with_context(|| format!("Failed to run `git {}`", args))?;

    if !output.status.success() {
        bail!(
            "`git {}` failed ({}): {}",
            args,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
