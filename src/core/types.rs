//! core::types
//!
//! Content model for hydration and cleanup.
//!
//! # Design
//!
//! These are plain data types. They deserialize directly from the JSON
//! configuration files and are also what the forge layer returns when it
//! lists existing repository content. A node identifier is empty until the
//! item exists remotely.
//!
//! Labels on content items are a set: order is irrelevant and duplicates
//! in the configuration collapse.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of repository content handled by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Label,
    Issue,
    Discussion,
    PullRequest,
}

impl ContentKind {
    /// Plural noun used in summaries ("issues", "pull requests").
    pub fn plural(&self) -> &'static str {
        match self {
            ContentKind::Label => "labels",
            ContentKind::Issue => "issues",
            ContentKind::Discussion => "discussions",
            ContentKind::PullRequest => "pull requests",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Label => write!(f, "label"),
            ContentKind::Issue => write!(f, "issue"),
            ContentKind::Discussion => write!(f, "discussion"),
            ContentKind::PullRequest => write!(f, "pull request"),
        }
    }
}

/// A repository issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    /// Usernames, in the order they should be assigned.
    #[serde(default)]
    pub assignees: Vec<String>,
    /// GraphQL node ID, empty until created.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node_id: String,
}

/// A repository discussion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discussion {
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Discussion category name; must match a category configured on the repository.
    pub category: String,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node_id: String,
}

/// A pull request between two existing branches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub head: String,
    pub base: String,
    #[serde(default)]
    pub labels: BTreeSet<String>,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub node_id: String,
}

/// A repository label. Two labels are the same label iff their names match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    /// Hex color without the leading `#`.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Label {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Common view over declared content items.
///
/// Lets the engine run one creation loop for every kind of item.
pub trait Content {
    const KIND: ContentKind;

    fn title(&self) -> &str;

    fn labels(&self) -> &BTreeSet<String>;

    fn node_id(&self) -> &str;
}

impl Content for Issue {
    const KIND: ContentKind = ContentKind::Issue;

    fn title(&self) -> &str {
        &self.title
    }

    fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    fn node_id(&self) -> &str {
        &self.node_id
    }
}

impl Content for Discussion {
    const KIND: ContentKind = ContentKind::Discussion;

    fn title(&self) -> &str {
        &self.title
    }

    fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    fn node_id(&self) -> &str {
        &self.node_id
    }
}

impl Content for PullRequest {
    const KIND: ContentKind = ContentKind::PullRequest;

    fn title(&self) -> &str {
        &self.title
    }

    fn labels(&self) -> &BTreeSet<String> {
        &self.labels
    }

    fn node_id(&self) -> &str {
        &self.node_id
    }
}

/// Remote identity of a freshly created item, as reported by the forge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedRef {
    /// GraphQL node ID
    pub node_id: String,
    /// Issue/PR number (discussions have one too; labels do not)
    pub number: Option<u64>,
    /// Web URL
    pub url: Option<String>,
    /// Steps after creation that failed. The item exists regardless.
    pub incomplete: Vec<FollowUpFailure>,
}

/// A step run after an item was created (attaching labels or assignees)
/// that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowUpFailure {
    /// What was attempted, e.g. "add labels".
    pub step: String,
    pub message: String,
}

impl FollowUpFailure {
    pub fn new(step: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            step: step.into(),
            message: message.into(),
        }
    }
}

/// Record of an item created during a single hydration run.
///
/// Used to associate new content with a project board afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedItem {
    pub node_id: String,
    pub title: String,
    pub kind: ContentKind,
}

/// A Projects (V2) board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectV2 {
    pub id: String,
    pub number: u64,
    pub title: String,
    pub url: Option<String>,
}

/// Which content sections a hydration run includes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sections {
    pub issues: bool,
    pub discussions: bool,
    pub pull_requests: bool,
}

impl Sections {
    pub fn all() -> Self {
        Self {
            issues: true,
            discussions: true,
            pull_requests: true,
        }
    }
}

impl Default for Sections {
    fn default() -> Self {
        Self::all()
    }
}

/// Everything declared in a configuration directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSet {
    pub labels: Vec<Label>,
    pub issues: Vec<Issue>,
    pub discussions: Vec<Discussion>,
    pub pull_requests: Vec<PullRequest>,
}
