//! Persisting the rendered changelog.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::ChangelogError;
use crate::release::Grouping;

/// Write the changelog to `path`, replacing any existing file atomically.
///
/// The content goes to a temporary file next to `path` first, so readers
/// never observe a half-written changelog.
pub fn write_changelog(path: &Path, content: &str) -> Result<(), ChangelogError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir).map_err(ChangelogError::WriteFailed)?;
    file.write_all(content.as_bytes())
        .map_err(ChangelogError::WriteFailed)?;
    file.persist(path)
        .map_err(|e| ChangelogError::WriteFailed(e.error))?;

    debug!(path = %path.display(), bytes = content.len(), "Wrote changelog");
    Ok(())
}

/// Generate a summary message for the user.
pub fn generate_summary(grouping: &Grouping, destination: &str) -> String {
    let releases = grouping.releases.len();
    let unreleased = grouping.unreleased.commits().len();

    let release_word = if releases == 1 { "release" } else { "releases" };
    let commit_word = if unreleased == 1 { "commit" } else { "commits" };

    format!(
        "Wrote {} {} and {} unreleased {} to {}",
        releases, release_word, unreleased, commit_word, destination
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_changelog_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");

        write_changelog(&path, "# Changelog\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Changelog\n");
    }

    #[test]
    fn test_write_changelog_replaces_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("CHANGELOG.md");
        std::fs::write(&path, "old content that is longer than the new one").unwrap();

        write_changelog(&path, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        // No temp files left behind.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_changelog_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("CHANGELOG.md");

        let result = write_changelog(&path, "x");
        assert!(matches!(result, Err(ChangelogError::WriteFailed(_))));
    }

    #[test]
    fn test_generate_summary() {
        let grouping = Grouping::default();
        assert_eq!(
            generate_summary(&grouping, "CHANGELOG.md"),
            "Wrote 0 releases and 0 unreleased commits to CHANGELOG.md"
        );
    }
}
