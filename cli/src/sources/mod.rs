//! # Upstream Sources
//!
//! Getting the upstream checkout to the pinned revision and merging the stubs
//! into it.

pub mod git;
pub mod merge;

pub use git::{SyncOutcome, current_revision, sync_upstream};
pub use merge::{MergeFailure, MergeJob, MergeReport, recreate_dir};
