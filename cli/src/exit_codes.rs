//! # Exit Codes
//!
//! Standard exit codes for the stubcheck CLI.
//!
//! `0` and `1` are the suite verdict CI pipelines rely on; the remaining
//! codes distinguish runs that aborted before a verdict was reached.

/// Successful execution, no unsuppressed diagnostics
pub const EXIT_SUCCESS: i32 = 0;

/// At least one target directory produced an unsuppressed diagnostic
pub const EXIT_DIAGNOSTICS_FOUND: i32 = 1;

/// General error (unspecified)
pub const EXIT_ERROR: i32 = 2;

/// Configuration error (malformed settings, invalid rule, unknown target)
pub const EXIT_CONFIG_ERROR: i32 = 3;

/// Source-control sync failed (clone, fetch, or checkout)
pub const EXIT_SYNC_ERROR: i32 = 4;

/// The typechecker could not be launched or crashed
pub const EXIT_CHECKER_ERROR: i32 = 5;

/// The stub-merge tool could not be launched
pub const EXIT_MERGE_ERROR: i32 = 6;
