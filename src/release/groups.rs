//! Category-grouped commit collections shared by releases and the unreleased bucket.

use indexmap::IndexMap;

use super::record::CommitRecord;

/// An ordered list of commits plus a category index over it.
///
/// Categories keep the order in which they were first seen. Uncategorized
/// commits live under the `None` key.
#[derive(Debug, Clone, Default)]
pub struct CategorizedCommits {
    commits: Vec<CommitRecord>,
    groups: IndexMap<Option<String>, Vec<usize>>,
}

impl CategorizedCommits {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a commit to the flat list and to its category group.
    pub fn push(&mut self, record: CommitRecord) {
        let index = self.commits.len();
        let key = record.category().map(str::to_string);
        self.groups.entry(key).or_default().push(index);
        self.commits.push(record);
    }

    pub fn commits(&self) -> &[CommitRecord] {
        &self.commits
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// Categories in first-insertion order.
    pub fn categories(&self) -> impl Iterator<Item = Option<&str>> {
        self.groups.keys().map(|k| k.as_deref())
    }

    /// Commits of one category, in insertion order. Empty for unseen categories.
    pub fn group(&self, category: Option<&str>) -> Vec<&CommitRecord> {
        self.groups
            .get(&category.map(str::to_string))
            .map(|indices| self.resolve(indices))
            .unwrap_or_default()
    }

    /// Every category with its commits, in first-insertion order.
    pub fn groups(&self) -> impl Iterator<Item = (Option<&str>, Vec<&CommitRecord>)> {
        self.groups
            .iter()
            .map(|(category, indices)| (category.as_deref(), self.resolve(indices)))
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&CommitRecord> {
        indices.iter().map(|&i| &self.commits[i]).collect()
    }
}
