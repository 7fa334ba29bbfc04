//! core::config::schema
//!
//! File names and validation rules for the configuration directory.
//!
//! # Layout
//!
//! ```text
//! config/
//!   issues.json        [{title, body, labels[], assignees[]}]
//!   discussions.json   [{title, body, category, labels[]}]
//!   prs.json           [{title, body, head, base, labels[], assignees[]}]
//!   labels.json        [{name, color, description?}]        (optional)
//!   preserve.json      {issues, discussions, pull_requests, labels} (optional)
//! ```

use super::ConfigError;
use crate::core::types::{Discussion, Issue, Label, PullRequest};

pub const ISSUES_FILE: &str = "issues.json";
pub const DISCUSSIONS_FILE: &str = "discussions.json";
pub const PULL_REQUESTS_FILE: &str = "prs.json";
pub const LABELS_FILE: &str = "labels.json";
pub const PRESERVE_FILE: &str = "preserve.json";

fn require(value: &str, what: &str, file: &str, index: usize) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidValue(format!(
            "{} entry {}: {} cannot be empty",
            file,
            index + 1,
            what
        )));
    }
    Ok(())
}

pub fn validate_issues(issues: &[Issue]) -> Result<(), ConfigError> {
    for (i, issue) in issues.iter().enumerate() {
        require(&issue.title, "title", ISSUES_FILE, i)?;
    }
    Ok(())
}

pub fn validate_discussions(discussions: &[Discussion]) -> Result<(), ConfigError> {
    for (i, discussion) in discussions.iter().enumerate() {
        require(&discussion.title, "title", DISCUSSIONS_FILE, i)?;
        require(&discussion.category, "category", DISCUSSIONS_FILE, i)?;
    }
    Ok(())
}

pub fn validate_pull_requests(prs: &[PullRequest]) -> Result<(), ConfigError> {
    for (i, pr) in prs.iter().enumerate() {
        require(&pr.title, "title", PULL_REQUESTS_FILE, i)?;
        require(&pr.head, "head", PULL_REQUESTS_FILE, i)?;
        require(&pr.base, "base", PULL_REQUESTS_FILE, i)?;
    }
    Ok(())
}

/// Validate label names and normalize colors (strip `#`, lowercase).
pub fn normalize_labels(labels: &mut [Label]) -> Result<(), ConfigError> {
    for (i, label) in labels.iter_mut().enumerate() {
        require(&label.name, "name", LABELS_FILE, i)?;

        let color = label.color.trim().trim_start_matches('#').to_ascii_lowercase();
        if color.len() != 6 || !color.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidValue(format!(
                "{} entry {}: invalid color '{}' for label '{}', expected six hex digits",
                LABELS_FILE,
                i + 1,
                label.color,
                label.name
            )));
        }
        label.color = color;
    }
    Ok(())
}
