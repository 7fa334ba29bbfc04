//! core::preserve
//!
//! Preservation rules for cleanup.
//!
//! # Overview
//!
//! `preserve.json` lists, per content type, which existing items must
//! survive cleanup. [`PreserveConfig`] is the deserialized file;
//! [`PreservePolicy`] is the compiled form the cleanup engine evaluates.
//!
//! An item is preserved if any applicable rule matches:
//!
//! | type          | rules                          |
//! |---------------|--------------------------------|
//! | issues        | id, title, label               |
//! | pull requests | id, title, label               |
//! | discussions   | id, title, category            |
//! | labels        | name                           |
//!
//! No policy at all means nothing is preserved.
//!
//! # Title patterns
//!
//! Titles are matched by [`TitleMatcher`]: exact equality first, then, if
//! the pattern contains regex syntax, a regex match. A pattern that fails
//! to compile only ever matches exactly.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::{Discussion, Issue, Label, PullRequest};

/// Rules for issues and pull requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRules {
    #[serde(default)]
    pub preserve_by_title: Vec<String>,
    #[serde(default)]
    pub preserve_by_label: Vec<String>,
    #[serde(default)]
    pub preserve_by_id: Vec<String>,
}

/// Rules for discussions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionRules {
    #[serde(default)]
    pub preserve_by_title: Vec<String>,
    #[serde(default)]
    pub preserve_by_category: Vec<String>,
    #[serde(default)]
    pub preserve_by_id: Vec<String>,
}

/// Rules for labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelRules {
    #[serde(default)]
    pub preserve_by_name: Vec<String>,
}

/// Contents of `preserve.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreserveConfig {
    #[serde(default)]
    pub issues: ItemRules,
    #[serde(default)]
    pub discussions: DiscussionRules,
    #[serde(default)]
    pub pull_requests: ItemRules,
    #[serde(default)]
    pub labels: LabelRules,
}

/// Title pattern: exact match, else regex, else nothing.
#[derive(Debug, Clone)]
pub struct TitleMatcher {
    pattern: String,
    regex: Option<Regex>,
}

impl TitleMatcher {
    pub fn new(pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        let regex = if looks_like_regex(&pattern) {
            Regex::new(&pattern).ok()
        } else {
            None
        };
        Self { pattern, regex }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern compiled as a regular expression.
    pub fn is_regex(&self) -> bool {
        self.regex.is_some()
    }

    pub fn matches(&self, title: &str) -> bool {
        if self.pattern == title {
            return true;
        }
        self.regex.as_ref().is_some_and(|re| re.is_match(title))
    }
}

/// A pattern is treated as a regex if escaping would change it.
fn looks_like_regex(pattern: &str) -> bool {
    pattern.starts_with('^') || regex::escape(pattern) != pattern
}

fn compile(patterns: &[String]) -> Vec<TitleMatcher> {
    patterns.iter().map(TitleMatcher::new).collect()
}

fn any_title(matchers: &[TitleMatcher], title: &str) -> bool {
    matchers.iter().any(|m| m.matches(title))
}

fn contains(values: &[String], value: &str) -> bool {
    values.iter().any(|v| v == value)
}

/// Compiled rules for issues or pull requests.
#[derive(Debug, Clone, Default)]
struct ItemPolicy {
    titles: Vec<TitleMatcher>,
    labels: Vec<String>,
    ids: Vec<String>,
}

impl ItemPolicy {
    fn compile(rules: &ItemRules) -> Self {
        Self {
            titles: compile(&rules.preserve_by_title),
            labels: rules.preserve_by_label.clone(),
            ids: rules.preserve_by_id.clone(),
        }
    }

    fn matches<'a>(
        &self,
        node_id: &str,
        title: &str,
        mut labels: impl Iterator<Item = &'a String>,
    ) -> bool {
        contains(&self.ids, node_id)
            || any_title(&self.titles, title)
            || labels.any(|l| contains(&self.labels, l))
    }
}

/// Compiled preservation rules evaluated during cleanup.
#[derive(Debug, Clone, Default)]
pub struct PreservePolicy {
    issues: ItemPolicy,
    pull_requests: ItemPolicy,
    discussion_titles: Vec<TitleMatcher>,
    discussion_categories: Vec<String>,
    discussion_ids: Vec<String>,
    label_names: Vec<String>,
}

impl PreservePolicy {
    pub fn new(config: &PreserveConfig) -> Self {
        Self {
            issues: ItemPolicy::compile(&config.issues),
            pull_requests: ItemPolicy::compile(&config.pull_requests),
            discussion_titles: compile(&config.discussions.preserve_by_title),
            discussion_categories: config.discussions.preserve_by_category.clone(),
            discussion_ids: config.discussions.preserve_by_id.clone(),
            label_names: config.labels.preserve_by_name.clone(),
        }
    }

    pub fn preserves_issue(&self, issue: &Issue) -> bool {
        self.issues
            .matches(&issue.node_id, &issue.title, issue.labels.iter())
    }

    pub fn preserves_pull_request(&self, pr: &PullRequest) -> bool {
        self.pull_requests
            .matches(&pr.node_id, &pr.title, pr.labels.iter())
    }

    pub fn preserves_discussion(&self, discussion: &Discussion) -> bool {
        contains(&self.discussion_ids, &discussion.node_id)
            || any_title(&self.discussion_titles, &discussion.title)
            || contains(&self.discussion_categories, &discussion.category)
    }

    pub fn preserves_label(&self, label: &Label) -> bool {
        contains(&self.label_names, &label.name)
    }
}

impl From<&PreserveConfig> for PreservePolicy {
    fn from(config: &PreserveConfig) -> Self {
        Self::new(config)
    }
}

/// Item kinds that preservation rules apply to.
pub trait Preservable {
    fn is_preserved_by(&self, policy: &PreservePolicy) -> bool;
}

impl Preservable for Issue {
    fn is_preserved_by(&self, policy: &PreservePolicy) -> bool {
        policy.preserves_issue(self)
    }
}

impl Preservable for PullRequest {
    fn is_preserved_by(&self, policy: &PreservePolicy) -> bool {
        policy.preserves_pull_request(self)
    }
}

impl Preservable for Discussion {
    fn is_preserved_by(&self, policy: &PreservePolicy) -> bool {
        policy.preserves_discussion(self)
    }
}

impl Preservable for Label {
    fn is_preserved_by(&self, policy: &PreservePolicy) -> bool {
        policy.preserves_label(self)
    }
}

/// Whether `item` must survive cleanup. `None` preserves nothing.
pub fn should_preserve<T: Preservable>(policy: Option<&PreservePolicy>, item: &T) -> bool {
    policy.is_some_and(|p| item.is_preserved_by(p))
}
