//! Commit records: message segmentation and conventional-commit classification.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;

/// Pattern: category: description or category(scope): description
///
/// `\w` and `\s` are Unicode-aware, so non-ASCII categories and scopes match.
static SUBJECT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)(\(\w+\))?:\s*(.*)$").expect("subject pattern is a valid regex")
});

/// A commit as read from the repository, before any parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawCommit {
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// Hashes of the parent commits, used to follow ancestry when grouping.
    pub parents: Vec<String>,
}

/// The parsed `category(scope): description` triple of a subject line.
///
/// Either the whole subject matched or there is no classification at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub category: String,
    pub scope: Option<String>,
    pub description: String,
}

/// A single commit with its message split into conventional segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    pub hash: String,
    pub timestamp: DateTime<Utc>,
    pub subject: String,
    pub body: String,
    pub footer: String,
    classification: Option<Classification>,
    tag: Option<String>,
}

impl CommitRecord {
    /// Parse a raw commit. Never fails: a subject that does not follow the
    /// convention simply has no classification.
    pub fn parse(raw: &RawCommit) -> Self {
        let segments = split_message(&raw.message);

        Self {
            hash: raw.hash.clone(),
            timestamp: raw.timestamp,
            classification: classify_subject(&segments.subject),
            subject: segments.subject,
            body: segments.body,
            footer: segments.footer,
            tag: None,
        }
    }

    pub fn classification(&self) -> Option<&Classification> {
        self.classification.as_ref()
    }

    pub fn category(&self) -> Option<&str> {
        self.classification.as_ref().map(|c| c.category.as_str())
    }

    pub fn scope(&self) -> Option<&str> {
        self.classification.as_ref().and_then(|c| c.scope.as_deref())
    }

    pub fn description(&self) -> Option<&str> {
        self.classification.as_ref().map(|c| c.description.as_str())
    }

    pub fn is_categorized(&self) -> bool {
        self.classification.is_some()
    }

    /// Raw name of the tag whose release owns this commit, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub(crate) fn set_tag(&mut self, tag: &str) {
        self.tag = Some(tag.to_string());
    }

    /// Abbreviated hash as shown in rendered output.
    pub fn short_hash(&self) -> &str {
        let end = self
            .hash
            .char_indices()
            .nth(7)
            .map(|(idx, _)| idx)
            .unwrap_or(self.hash.len());
        &self.hash[..end]
    }
}

/// Subject, body and footer of a commit message.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MessageSegments {
    pub subject: String,
    pub body: String,
    pub footer: String,
}

/// Split a commit message into subject, body and footer.
///
/// Line 0 is the subject and line 1 is taken to be the blank separator. The
/// body is every line from line 2 up to the next empty line, each trimmed and
/// concatenated without a separator. A whitespace-only line does not end the
/// body; it contributes nothing to it. Only the one line after the empty line
/// that ends the body becomes the footer; anything below it is dropped.
pub fn split_message(message: &str) -> MessageSegments {
    let lines = split_lines(message);

    let Some(first) = lines.first() else {
        return MessageSegments::default();
    };

    let mut segments = MessageSegments {
        subject: first.trim().to_string(),
        ..Default::default()
    };

    if lines.len() == 1 {
        return segments;
    }

    let mut line = 2;
    while line < lines.len() && !lines[line].is_empty() {
        segments.body.push_str(lines[line].trim());
        line += 1;
    }

    if let Some(footer) = lines.get(line + 1) {
        segments.footer = footer.to_string();
    }

    segments
}

/// Split text into lines on every line boundary, not only `\n`.
///
/// `\r\n` counts as one boundary. A trailing boundary does not produce an
/// empty last line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if !is_line_boundary(c) {
            continue;
        }
        lines.push(&text[start..idx]);

        let mut end = idx + c.len_utf8();
        if c == '\r' {
            if let Some(&(next, '\n')) = chars.peek() {
                chars.next();
                end = next + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }

    lines
}

fn is_line_boundary(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Match a subject line against the conventional `category(scope): description` form.
pub fn classify_subject(subject: &str) -> Option<Classification> {
    let caps = SUBJECT_PATTERN.captures(subject.trim())?;

    let category = caps.get(1)?.as_str().to_string();
    let scope = caps.get(2).map(|m| {
        let raw = m.as_str();
        raw[1..raw.len() - 1].to_string()
    });
    let description = caps.get(3).map_or("", |m| m.as_str()).to_string();

    Some(Classification {
        category,
        scope,
        description,
    })
}
