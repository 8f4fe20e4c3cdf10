//! Tag enumeration.

use git2::Repository;
use tracing::{debug, warn};

use crate::error::RepositoryError;
use crate::release::TagMarker;

use super::history::commit_time;

/// Get all tags from the repository that point at a commit.
///
/// Annotated tags are peeled to the commit they mark. Tags with non-UTF-8
/// names or pointing at trees/blobs are skipped.
pub fn get_all_tags(repo: &Repository) -> Result<Vec<TagMarker>, RepositoryError> {
    let mut names = Vec::new();

    repo.tag_foreach(|oid, name_bytes| {
        if let Ok(name_str) = std::str::from_utf8(name_bytes) {
            // Remove refs/tags/ prefix
            let name = name_str.strip_prefix("refs/tags/").unwrap_or(name_str);
            names.push(name.to_string());
        } else {
            warn!("Skipping tag with OID {} - name is not valid UTF-8", oid);
        }
        true // Continue iteration
    })
    .map_err(RepositoryError::TagError)?;

    let mut tags = Vec::with_capacity(names.len());

    for name in names {
        let reference = format!("refs/tags/{name}");
        let commit = match repo
            .revparse_single(&reference)
            .and_then(|object| object.peel_to_commit())
        {
            Ok(commit) => commit,
            Err(e) => {
                warn!(tag = %name, error = %e, "Skipping tag that does not point at a commit");
                continue;
            }
        };

        debug!(tag = %name, target = %commit.id(), "Found tag");

        tags.push(TagMarker {
            name,
            target: commit.id().to_string(),
            timestamp: commit_time(&commit)?,
        });
    }

    Ok(tags)
}
