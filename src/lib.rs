//! autochangelog - A CLI tool that generates a changelog from git tags and conventional commits.
//!
//! # Overview
//!
//! autochangelog reads the commit history of a git repository, classifies each
//! commit by its conventional-commit subject, groups commits by the release tag
//! that first reaches them, and renders the result through a template.

pub mod changelog;
pub mod error;
pub mod git;
pub mod release;

// Re-export commonly used types
pub use changelog::{AssembleOptions, ChangelogDocument, Renderer};
pub use error::{ChangelogError, RepositoryError};
pub use git::{load_history, RepositoryHistory};
pub use release::{group, CommitRecord, Grouping, RawCommit, Release, TagMarker, Unreleased};
