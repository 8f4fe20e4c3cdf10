//! Reading the commit history of a repository.

use std::path::Path;

use chrono::{DateTime, Utc};
use git2::{Commit, Oid, Repository, Sort};
use tracing::{debug, info};

use crate::error::RepositoryError;
use crate::release::{RawCommit, TagMarker};

use super::tags::get_all_tags;

/// Everything the grouper needs from a repository, read in one pass.
#[derive(Debug, Clone)]
pub struct RepositoryHistory {
    /// Commits reachable from the walked revision, oldest first.
    pub commits: Vec<RawCommit>,
    pub tags: Vec<TagMarker>,
}

/// Open the repository at `path`.
pub fn open_repository(path: &Path) -> Result<Repository, RepositoryError> {
    Repository::open(path).map_err(|source| RepositoryError::Open {
        path: path.to_path_buf(),
        source,
    })
}

/// Open the repository at `path` and read commits reachable from `rev` plus all tags.
pub fn load_history(path: &Path, rev: &str) -> Result<RepositoryHistory, RepositoryError> {
    let repo = open_repository(path)?;
    let commits = read_history(&repo, rev)?;
    let tags = get_all_tags(&repo)?;

    info!(
        path = %path.display(),
        commits = commits.len(),
        tags = tags.len(),
        "Loaded repository history"
    );

    Ok(RepositoryHistory { commits, tags })
}

/// Walk every commit reachable from `rev`, returning them oldest first.
///
/// Parents always come before their children in the result.
pub fn read_history(repo: &Repository, rev: &str) -> Result<Vec<RawCommit>, RepositoryError> {
    let start = resolve_revision(repo, rev)?;

    let mut revwalk = repo.revwalk().map_err(RepositoryError::RevwalkError)?;
    revwalk
        .set_sorting(Sort::TOPOLOGICAL | Sort::TIME | Sort::REVERSE)
        .map_err(RepositoryError::RevwalkError)?;
    revwalk.push(start).map_err(RepositoryError::RevwalkError)?;

    let mut commits = Vec::new();

    for oid_result in revwalk {
        let oid = oid_result.map_err(RepositoryError::RevwalkError)?;
        let commit = repo.find_commit(oid).map_err(RepositoryError::ParseCommit)?;
        commits.push(to_raw_commit(&commit)?);
    }

    if commits.is_empty() {
        return Err(RepositoryError::NoCommits(rev.to_string()));
    }

    debug!(rev, count = commits.len(), "Read commit history");
    Ok(commits)
}

/// Resolve a revision (branch, tag, hash, `HEAD`) to a commit OID.
fn resolve_revision(repo: &Repository, rev: &str) -> Result<Oid, RepositoryError> {
    // An unborn HEAD has nothing to walk.
    if repo.is_empty().unwrap_or(false) {
        return Err(RepositoryError::NoCommits(rev.to_string()));
    }

    let object = repo
        .revparse_single(rev)
        .map_err(|e| RepositoryError::RevisionNotFound(rev.to_string(), e))?;

    let commit = object
        .peel_to_commit()
        .map_err(|e| RepositoryError::RevisionNotFound(rev.to_string(), e))?;

    Ok(commit.id())
}

/// Convert a git2 commit into the grouper's input record.
fn to_raw_commit(commit: &Commit) -> Result<RawCommit, RepositoryError> {
    let hash = commit.id().to_string();
    let timestamp = commit_time(commit)?;
    let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
    let parents = commit.parent_ids().map(|id| id.to_string()).collect();

    Ok(RawCommit {
        hash,
        timestamp,
        message,
        parents,
    })
}

/// Commit time of a commit in UTC.
pub(crate) fn commit_time(commit: &Commit) -> Result<DateTime<Utc>, RepositoryError> {
    let seconds = commit.time().seconds();
    DateTime::from_timestamp(seconds, 0).ok_or_else(|| RepositoryError::InvalidTimestamp {
        hash: commit.id().to_string(),
        seconds,
    })
}
