//! Error types for autochangelog modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from reading the repository history.
///
/// This is the only fatal error kind produced while collecting commits and
/// tags. Malformed commit messages never end up here.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Failed to open repository at {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    #[error("No commits reachable from '{0}'")]
    NoCommits(String),

    #[error("Failed to resolve revision '{0}': {1}")]
    RevisionNotFound(String, #[source] git2::Error),

    #[error("Failed to read commit: {0}")]
    ParseCommit(#[source] git2::Error),

    #[error("Failed to walk commit history: {0}")]
    RevwalkError(#[source] git2::Error),

    #[error("Commit {hash} has invalid timestamp (seconds={seconds})")]
    InvalidTimestamp { hash: String, seconds: i64 },

    #[error("Failed to enumerate tags: {0}")]
    TagError(#[source] git2::Error),
}

/// Errors from assembling, rendering and writing the changelog.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Template directory {} does not exist", .0.display())]
    TemplateDirMissing(PathBuf),

    #[error("Failed to serialize changelog: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write changelog: {0}")]
    WriteFailed(#[source] std::io::Error),
}
