//! The document model handed to templates.

use serde::Serialize;

use crate::error::ChangelogError;
use crate::release::{display_name, CategorizedCommits, CommitRecord, Grouping};

/// Heading used for commits whose subject has no category.
pub const UNCATEGORIZED_HEADING: &str = "Other Changes";

/// Caller-supplied metadata and flags that shape the document.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub title: String,
    pub description: Option<String>,
    /// Include commit bodies.
    pub include_body: bool,
    /// Include commit footers.
    pub include_footer: bool,
    /// Present unreleased commits as this version instead of "Unreleased".
    pub assume_version: Option<String>,
    /// Emit only the unreleased section.
    pub only_unreleased: bool,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            title: "Changelog".to_string(),
            description: None,
            include_body: false,
            include_footer: false,
            assume_version: None,
            only_unreleased: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitView {
    pub hash: String,
    pub short_hash: String,
    pub subject: String,
    pub scope: Option<String>,
    /// Conventional description, or the whole subject for uncategorized commits.
    pub description: String,
    pub body: Option<String>,
    pub footer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub category: Option<String>,
    pub heading: String,
    pub commits: Vec<CommitView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionView {
    pub name: String,
    pub tag: Option<String>,
    /// `YYYY-MM-DD`
    pub date: Option<String>,
    pub groups: Vec<GroupView>,
}

/// Everything a template needs to render the changelog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangelogDocument {
    pub title: String,
    pub description: Option<String>,
    pub unreleased: Option<SectionView>,
    pub releases: Vec<SectionView>,
}

impl ChangelogDocument {
    /// Build the document from a grouped history.
    ///
    /// The grouping always carries the full history; `options` only decide
    /// what ends up in the document.
    pub fn assemble(grouping: &Grouping, options: &AssembleOptions) -> Self {
        let unreleased = (!grouping.unreleased.is_empty()).then(|| {
            let (name, tag) = match &options.assume_version {
                Some(version) => (display_name(version), Some(version.clone())),
                None => (grouping.unreleased.name().to_string(), None),
            };
            SectionView {
                name,
                tag,
                date: None,
                groups: group_views(grouping.unreleased.groups(), options),
            }
        });

        let releases = if options.only_unreleased {
            Vec::new()
        } else {
            grouping
                .releases
                .iter()
                .map(|release| SectionView {
                    name: release.name.clone(),
                    tag: Some(release.tag.clone()),
                    date: Some(release.date.format("%Y-%m-%d").to_string()),
                    groups: group_views(release.groups(), options),
                })
                .collect()
        };

        Self {
            title: options.title.clone(),
            description: options.description.clone(),
            unreleased,
            releases,
        }
    }

    pub fn to_json(&self) -> Result<String, ChangelogError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn group_views(commits: &CategorizedCommits, options: &AssembleOptions) -> Vec<GroupView> {
    commits
        .groups()
        .map(|(category, records)| GroupView {
            category: category.map(str::to_string),
            heading: category_heading(category),
            commits: records
                .into_iter()
                .map(|record| commit_view(record, options))
                .collect(),
        })
        .collect()
}

fn commit_view(record: &CommitRecord, options: &AssembleOptions) -> CommitView {
    let non_empty = |text: &str| (!text.is_empty()).then(|| text.to_string());

    CommitView {
        hash: record.hash.clone(),
        short_hash: record.short_hash().to_string(),
        subject: record.subject.clone(),
        scope: record.scope().map(str::to_string),
        description: record
            .description()
            .unwrap_or(record.subject.as_str())
            .to_string(),
        body: options
            .include_body
            .then(|| non_empty(&record.body))
            .flatten(),
        footer: options
            .include_footer
            .then(|| non_empty(&record.footer))
            .flatten(),
    }
}

/// Section heading for a commit category.
///
/// Well-known conventional types get a descriptive heading; anything else is
/// capitalized as-is.
pub fn category_heading(category: Option<&str>) -> String {
    let Some(category) = category else {
        return UNCATEGORIZED_HEADING.to_string();
    };

    let known = match category.to_lowercase().as_str() {
        "feat" => Some("Features"),
        "fix" => Some("Bug Fixes"),
        "docs" => Some("Documentation"),
        "style" => Some("Styles"),
        "refactor" => Some("Code Refactoring"),
        "perf" => Some("Performance Improvements"),
        "test" => Some("Tests"),
        "build" => Some("Build System"),
        "ci" => Some("Continuous Integration"),
        "chore" => Some("Chores"),
        "revert" => Some("Reverts"),
        _ => None,
    };

    match known {
        Some(heading) => heading.to_string(),
        None => {
            let mut chars = category.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
