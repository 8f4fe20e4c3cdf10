//! Commit classification and grouping by release.

pub mod grouper;
pub mod groups;
pub mod record;
pub mod version;

pub use grouper::{display_name, group, Grouping, Release, TagMarker, Unreleased, UNRELEASED_LABEL};
pub use groups::CategorizedCommits;
pub use record::{
    classify_subject, split_lines, split_message, Classification, CommitRecord, RawCommit,
};
pub use version::get_version_from_tag;
