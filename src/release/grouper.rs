//! Partitioning of the commit history into releases and an unreleased bucket.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::groups::CategorizedCommits;
use super::record::{CommitRecord, RawCommit};
use super::version::get_version_from_tag;

/// Label of the bucket holding commits that no tag reaches.
pub const UNRELEASED_LABEL: &str = "Unreleased";

/// A tag as read from the repository: its name and the commit it marks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMarker {
    pub name: String,
    /// Hash of the tagged commit (annotated tags already peeled).
    pub target: String,
    /// Commit time of the tagged commit.
    pub timestamp: DateTime<Utc>,
}

/// Display name for a tag: `"Version <name>"` unless it already starts with `v`/`V`.
pub fn display_name(tag: &str) -> String {
    if tag.chars().next().is_some_and(|c| c.eq_ignore_ascii_case(&'v')) {
        tag.to_string()
    } else {
        format!("Version {tag}")
    }
}

/// The commits introduced by one tag.
#[derive(Debug, Clone)]
pub struct Release {
    /// Raw tag name as found in the repository.
    pub tag: String,
    /// Normalized name for display.
    pub name: String,
    pub date: DateTime<Utc>,
    pub target: String,
    commits: CategorizedCommits,
}

impl Release {
    pub fn new(marker: &TagMarker) -> Self {
        Self {
            tag: marker.name.clone(),
            name: display_name(&marker.name),
            date: marker.timestamp,
            target: marker.target.clone(),
            commits: CategorizedCommits::new(),
        }
    }

    /// Take ownership of a commit and point its back-reference at this release.
    pub fn add_commit(&mut self, mut record: CommitRecord) {
        record.set_tag(&self.tag);
        self.commits.push(record);
    }

    pub fn commits(&self) -> &[CommitRecord] {
        self.commits.commits()
    }

    pub fn groups(&self) -> &CategorizedCommits {
        &self.commits
    }
}

/// Commits not reachable from any tag.
#[derive(Debug, Clone, Default)]
pub struct Unreleased {
    commits: CategorizedCommits,
}

impl Unreleased {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &'static str {
        UNRELEASED_LABEL
    }

    pub fn add_commit(&mut self, record: CommitRecord) {
        self.commits.push(record);
    }

    pub fn commits(&self) -> &[CommitRecord] {
        self.commits.commits()
    }

    pub fn groups(&self) -> &CategorizedCommits {
        &self.commits
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Result of grouping a history.
#[derive(Debug, Clone, Default)]
pub struct Grouping {
    /// Releases, most recent tag first.
    pub releases: Vec<Release>,
    pub unreleased: Unreleased,
}

impl Grouping {
    /// Total number of commits across all releases and the unreleased bucket.
    pub fn commit_count(&self) -> usize {
        let released: usize = self.releases.iter().map(|r| r.commits().len()).sum();
        released + self.unreleased.commits().len()
    }

    /// Find a release by its raw tag name.
    pub fn release(&self, tag: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.tag == tag)
    }
}

/// Group a chronological (oldest first) commit list by the tags that reach it.
///
/// Tags claim commits in order of their date, oldest first; ties are broken by
/// semantic version, then by name. Each tag claims every commit reachable from
/// its target through parent links that an earlier tag has not claimed yet.
/// Within a release, commits keep the order of `commits`.
pub fn group(commits: &[RawCommit], tags: &[TagMarker]) -> Grouping {
    let mut ordered: Vec<&TagMarker> = tags.iter().collect();
    ordered.sort_by_cached_key(|t| (t.timestamp, get_version_from_tag(&t.name), t.name.clone()));

    let owners = claim_commits(commits, &ordered);

    let mut releases: Vec<Release> = ordered.iter().map(|t| Release::new(t)).collect();
    let mut unreleased = Unreleased::new();

    for raw in commits {
        let record = CommitRecord::parse(raw);
        match owners.get(raw.hash.as_str()) {
            Some(&index) => releases[index].add_commit(record),
            None => unreleased.add_commit(record),
        }
    }

    releases.reverse();

    info!(
        commits = commits.len(),
        releases = releases.len(),
        unreleased = unreleased.commits().len(),
        "Grouped commit history"
    );

    Grouping {
        releases,
        unreleased,
    }
}

/// Map each commit hash to the index (in claim order) of the tag that owns it.
fn claim_commits<'a>(commits: &'a [RawCommit], ordered: &[&TagMarker]) -> HashMap<&'a str, usize> {
    let parents: HashMap<&str, &[String]> = commits
        .iter()
        .map(|c| (c.hash.as_str(), c.parents.as_slice()))
        .collect();

    let mut owners: HashMap<&'a str, usize> = HashMap::new();

    for (index, tag) in ordered.iter().enumerate() {
        let Some((&start, _)) = parents.get_key_value(tag.target.as_str()) else {
            debug!(tag = %tag.name, target = %tag.target, "Tag target is not part of the history");
            continue;
        };

        let mut claimed = 0usize;
        let mut stack = vec![start];

        while let Some(hash) = stack.pop() {
            // An owned commit's ancestors were all reachable by its owner too.
            if owners.contains_key(hash) {
                continue;
            }
            let Some((&known, &parent_hashes)) = parents.get_key_value(hash) else {
                continue;
            };
            owners.insert(known, index);
            claimed += 1;
            stack.extend(parent_hashes.iter().map(String::as_str));
        }

        debug!(tag = %tag.name, claimed, "Claimed commits for tag");
    }

    owners
}
