//! forge::mock
//!
//! Mock GitHub client for deterministic testing.
//!
//! # Design
//!
//! `MockForge` keeps repository content in memory, records every call it
//! receives and can be configured to fail specific calls. Like GitHub it
//! rejects issues and PRs that reference labels which do not exist, and
//! discussions whose category is unknown.
//!
//! # Example
//!
//! ```
//! use gh_hydrate::forge::mock::MockForge;
//! use gh_hydrate::forge::GitHubClient;
//! use gh_hydrate::core::types::Issue;
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new();
//!
//! let created = forge.create_issue(&Issue {
//!     title: "Add dark mode".to_string(),
//!     ..Default::default()
//! }).await.unwrap();
//!
//! assert_eq!(created.node_id, "I_1");
//! assert_eq!(forge.list_issues().await.unwrap().len(), 1);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

use super::traits::{ForgeError, GitHubClient};
use crate::core::labels::same_label;
use crate::core::types::{
    CreatedRef, Discussion, FollowUpFailure, Issue, Label, ProjectV2, PullRequest,
};

/// Discussion categories a fresh mock repository has.
pub const DEFAULT_CATEGORIES: &[&str] = &["Announcements", "General", "Ideas", "Q&A"];

/// Mock GitHub client for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct MockForge {
    inner: Arc<Mutex<MockForgeInner>>,
}

#[derive(Debug)]
struct MockForgeInner {
    labels: Vec<Label>,
    issues: Vec<Issue>,
    discussions: Vec<Discussion>,
    prs: Vec<PullRequest>,
    categories: Vec<String>,
    projects: Vec<ProjectV2>,
    /// (project ID, content ID) pairs
    project_items: Vec<(String, String)>,
    next_id: u64,
    failures: Vec<FailOn>,
    operations: Vec<MockOperation>,
    /// Cancel the token once this many mutating calls have been made.
    cancel_after: Option<(usize, CancellationToken)>,
}

/// Configuration for which call should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    CreateIssue { title: String, error: ForgeError },
    CreateDiscussion { title: String, error: ForgeError },
    CreatePr { title: String, error: ForgeError },
    CreateLabel { name: String, error: ForgeError },
    /// The pull request or discussion is created, but attaching its labels fails.
    AttachLabels { title: String, error: ForgeError },
    ListLabels(ForgeError),
    ListIssues(ForgeError),
    ListDiscussions(ForgeError),
    ListPrs(ForgeError),
    DeleteIssue { node_id: String, error: ForgeError },
    DeleteDiscussion { node_id: String, error: ForgeError },
    DeletePr { node_id: String, error: ForgeError },
    DeleteLabel { name: String, error: ForgeError },
    CreateProject(ForgeError),
    GetProject(ForgeError),
    AddProjectItem { content_id: String, error: ForgeError },
}

/// Recorded call for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    CreateIssue { title: String },
    CreateDiscussion { title: String, category: String },
    CreatePr { title: String, head: String, base: String },
    CreateLabel { name: String },
    ListLabels,
    ListIssues,
    ListDiscussions,
    ListPrs,
    DeleteIssue { node_id: String },
    DeleteDiscussion { node_id: String },
    DeletePr { node_id: String },
    DeleteLabel { name: String },
    CreateProject { title: String },
    GetProject { number: u64 },
    AddProjectItem { project_id: String, content_id: String },
}

impl MockOperation {
    /// Whether this call changes repository state.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            MockOperation::ListLabels
                | MockOperation::ListIssues
                | MockOperation::ListDiscussions
                | MockOperation::ListPrs
                | MockOperation::GetProject { .. }
        )
    }
}

impl MockForge {
    /// Create an empty repository with the default discussion categories.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(MockForgeInner {
                labels: Vec::new(),
                issues: Vec::new(),
                discussions: Vec::new(),
                prs: Vec::new(),
                categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
                projects: Vec::new(),
                project_items: Vec::new(),
                next_id: 1,
                failures: Vec::new(),
                operations: Vec::new(),
                cancel_after: None,
            })),
        }
    }

    /// Seed existing labels.
    pub fn with_labels(self, labels: Vec<Label>) -> Self {
        self.inner.lock().unwrap().labels.extend(labels);
        self
    }

    /// Seed existing issues. Node IDs are kept as given.
    pub fn with_issues(self, issues: Vec<Issue>) -> Self {
        self.inner.lock().unwrap().issues.extend(issues);
        self
    }

    /// Seed existing discussions.
    pub fn with_discussions(self, discussions: Vec<Discussion>) -> Self {
        self.inner.lock().unwrap().discussions.extend(discussions);
        self
    }

    /// Seed existing open pull requests.
    pub fn with_prs(self, prs: Vec<PullRequest>) -> Self {
        self.inner.lock().unwrap().prs.extend(prs);
        self
    }

    /// Seed an existing project board.
    pub fn with_project(self, project: ProjectV2) -> Self {
        self.inner.lock().unwrap().projects.push(project);
        self
    }

    /// Replace the repository's discussion categories.
    pub fn with_categories(self, categories: &[&str]) -> Self {
        self.inner.lock().unwrap().categories =
            categories.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Configure the mock to fail a specific call. May be repeated.
    ///
    /// # Example
    ///
    /// ```
    /// use gh_hydrate::forge::mock::{MockForge, FailOn};
    /// use gh_hydrate::forge::ForgeError;
    ///
    /// let forge = MockForge::new().fail_on(FailOn::CreateIssue {
    ///     title: "Second".to_string(),
    ///     error: ForgeError::RateLimited,
    /// });
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        self.inner.lock().unwrap().failures.push(fail_on);
        self
    }

    /// Cancel `token` once `count` mutating calls have completed.
    pub fn cancel_after(self, count: usize, token: CancellationToken) -> Self {
        self.inner.lock().unwrap().cancel_after = Some((count, token));
        self
    }

    /// All recorded calls.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }

    /// Recorded calls that change repository state.
    pub fn mutating_operations(&self) -> Vec<MockOperation> {
        self.operations()
            .into_iter()
            .filter(MockOperation::is_mutating)
            .collect()
    }

    /// Clear recorded calls.
    pub fn clear_operations(&self) {
        self.inner.lock().unwrap().operations.clear();
    }

    pub fn labels(&self) -> Vec<Label> {
        self.inner.lock().unwrap().labels.clone()
    }

    pub fn issues(&self) -> Vec<Issue> {
        self.inner.lock().unwrap().issues.clone()
    }

    pub fn discussions(&self) -> Vec<Discussion> {
        self.inner.lock().unwrap().discussions.clone()
    }

    pub fn prs(&self) -> Vec<PullRequest> {
        self.inner.lock().unwrap().prs.clone()
    }

    pub fn projects(&self) -> Vec<ProjectV2> {
        self.inner.lock().unwrap().projects.clone()
    }

    /// (project ID, content ID) pairs added to boards.
    pub fn project_items(&self) -> Vec<(String, String)> {
        self.inner.lock().unwrap().project_items.clone()
    }

    fn record(&self, op: MockOperation) {
        let mut inner = self.inner.lock().unwrap();
        let mutating = op.is_mutating();
        inner.operations.push(op);

        if mutating {
            let made = inner.operations.iter().filter(|o| o.is_mutating()).count();
            if let Some((count, token)) = &inner.cancel_after {
                if made >= *count {
                    token.cancel();
                }
            }
        }
    }

    /// Return the configured error for a call, if any.
    fn check_fail(
        &self,
        matches: impl Fn(&FailOn) -> Option<&ForgeError>,
    ) -> Result<(), ForgeError> {
        let inner = self.inner.lock().unwrap();
        match inner.failures.iter().find_map(|f| matches(f)) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn missing_label(inner: &MockForgeInner, labels: &BTreeSet<String>) -> Option<String> {
        labels
            .iter()
            .find(|name| !inner.labels.iter().any(|l| same_label(&l.name, name)))
            .cloned()
    }
}

impl Default for MockForge {
    fn default() -> Self {
        Self::new()
    }
}

impl MockForgeInner {
    fn next(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Configured error for attaching `labels` to the item titled `title`.
    fn attach_failure(&self, title: &str, labels: &BTreeSet<String>) -> Option<ForgeError> {
        if labels.is_empty() {
            return None;
        }
        self.failures.iter().find_map(|f| match f {
            FailOn::AttachLabels { title: t, error } if t == title => Some(error.clone()),
            _ => None,
        })
    }
}

#[async_trait]
impl GitHubClient for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn create_issue(&self, issue: &Issue) -> Result<CreatedRef, ForgeError> {
        self.record(MockOperation::CreateIssue {
            title: issue.title.clone(),
        });
        self.check_fail(|f| match f {
            FailOn::CreateIssue { title, error } if *title == issue.title => Some(error),
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        if let Some(name) = Self::missing_label(&inner, &issue.labels) {
            return Err(ForgeError::ApiError {
                status: 422,
                message: format!("label '{}' does not exist", name),
            });
        }

        let number = inner.next();
        let node_id = format!("I_{}", number);
        inner.issues.push(Issue {
            node_id: node_id.clone(),
            ..issue.clone()
        });

        Ok(CreatedRef {
            node_id,
            number: Some(number),
            url: Some(format!("https://github.com/mock/repo/issues/{}", number)),
            ..Default::default()
        })
    }

    async fn create_discussion(&self, discussion: &Discussion) -> Result<CreatedRef, ForgeError> {
        self.record(MockOperation::CreateDiscussion {
            title: discussion.title.clone(),
            category: discussion.category.clone(),
        });
        self.check_fail(|f| match f {
            FailOn::CreateDiscussion { title, error } if *title == discussion.title => {
                Some(error)
            }
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        if !inner.categories.contains(&discussion.category) {
            return Err(ForgeError::NotFound(format!(
                "discussion category '{}'",
                discussion.category
            )));
        }
        if let Some(name) = Self::missing_label(&inner, &discussion.labels) {
            return Err(ForgeError::NotFound(format!("label '{}'", name)));
        }

        let number = inner.next();
        let node_id = format!("D_{}", number);
        let attach_error = inner.attach_failure(&discussion.title, &discussion.labels);
        inner.discussions.push(Discussion {
            node_id: node_id.clone(),
            labels: if attach_error.is_some() {
                Default::default()
            } else {
                discussion.labels.clone()
            },
            ..discussion.clone()
        });

        Ok(CreatedRef {
            node_id,
            number: Some(number),
            url: Some(format!("https://github.com/mock/repo/discussions/{}", number)),
            incomplete: attach_error
                .map(|e| FollowUpFailure::new("add labels", e.to_string()))
                .into_iter()
                .collect(),
        })
    }

    async fn create_pr(&self, pr: &PullRequest) -> Result<CreatedRef, ForgeError> {
        self.record(MockOperation::CreatePr {
            title: pr.title.clone(),
            head: pr.head.clone(),
            base: pr.base.clone(),
        });
        self.check_fail(|f| match f {
            FailOn::CreatePr { title, error } if *title == pr.title => Some(error),
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        if let Some(name) = Self::missing_label(&inner, &pr.labels) {
            return Err(ForgeError::ApiError {
                status: 422,
                message: format!("label '{}' does not exist", name),
            });
        }

        let number = inner.next();
        let node_id = format!("PR_{}", number);
        let attach_error = inner.attach_failure(&pr.title, &pr.labels);
        inner.prs.push(PullRequest {
            node_id: node_id.clone(),
            labels: if attach_error.is_some() {
                Default::default()
            } else {
                pr.labels.clone()
            },
            ..pr.clone()
        });

        Ok(CreatedRef {
            node_id,
            number: Some(number),
            url: Some(format!("https://github.com/mock/repo/pull/{}", number)),
            incomplete: attach_error
                .map(|e| FollowUpFailure::new("add labels", e.to_string()))
                .into_iter()
                .collect(),
        })
    }

    async fn create_label(&self, label: &Label) -> Result<(), ForgeError> {
        self.record(MockOperation::CreateLabel {
            name: label.name.clone(),
        });
        self.check_fail(|f| match f {
            FailOn::CreateLabel { name, error } if *name == label.name => Some(error),
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        if inner.labels.iter().any(|l| same_label(&l.name, &label.name)) {
            return Err(ForgeError::ApiError {
                status: 422,
                message: format!("label '{}' already_exists", label.name),
            });
        }
        inner.labels.push(label.clone());
        Ok(())
    }

    async fn list_labels(&self) -> Result<Vec<Label>, ForgeError> {
        self.record(MockOperation::ListLabels);
        self.check_fail(|f| match f {
            FailOn::ListLabels(error) => Some(error),
            _ => None,
        })?;
        Ok(self.labels())
    }

    async fn list_issues(&self) -> Result<Vec<Issue>, ForgeError> {
        self.record(MockOperation::ListIssues);
        self.check_fail(|f| match f {
            FailOn::ListIssues(error) => Some(error),
            _ => None,
        })?;
        Ok(self.issues())
    }

    async fn list_discussions(&self) -> Result<Vec<Discussion>, ForgeError> {
        self.record(MockOperation::ListDiscussions);
        self.check_fail(|f| match f {
            FailOn::ListDiscussions(error) => Some(error),
            _ => None,
        })?;
        Ok(self.discussions())
    }

    async fn list_prs(&self) -> Result<Vec<PullRequest>, ForgeError> {
        self.record(MockOperation::ListPrs);
        self.check_fail(|f| match f {
            FailOn::ListPrs(error) => Some(error),
            _ => None,
        })?;
        Ok(self.prs())
    }

    async fn delete_issue(&self, node_id: &str) -> Result<(), ForgeError> {
        self.record(MockOperation::DeleteIssue {
            node_id: node_id.to_string(),
        });
        self.check_fail(|f| match f {
            FailOn::DeleteIssue { node_id: id, error } if id == node_id => Some(error),
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        let before = inner.issues.len();
        inner.issues.retain(|i| i.node_id != node_id);
        if inner.issues.len() == before {
            return Err(ForgeError::NotFound(format!("issue {}", node_id)));
        }
        Ok(())
    }

    async fn delete_discussion(&self, node_id: &str) -> Result<(), ForgeError> {
        self.record(MockOperation::DeleteDiscussion {
            node_id: node_id.to_string(),
        });
        self.check_fail(|f| match f {
            FailOn::DeleteDiscussion { node_id: id, error } if id == node_id => Some(error),
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        let before = inner.discussions.len();
        inner.discussions.retain(|d| d.node_id != node_id);
        if inner.discussions.len() == before {
            return Err(ForgeError::NotFound(format!("discussion {}", node_id)));
        }
        Ok(())
    }

    async fn delete_pr(&self, node_id: &str) -> Result<(), ForgeError> {
        self.record(MockOperation::DeletePr {
            node_id: node_id.to_string(),
        });
        self.check_fail(|f| match f {
            FailOn::DeletePr { node_id: id, error } if id == node_id => Some(error),
            _ => None,
        })?;

        // Closed PRs drop out of the open list.
        let mut inner = self.inner.lock().unwrap();
        let before = inner.prs.len();
        inner.prs.retain(|p| p.node_id != node_id);
        if inner.prs.len() == before {
            return Err(ForgeError::NotFound(format!("pull request {}", node_id)));
        }
        Ok(())
    }

    async fn delete_label(&self, name: &str) -> Result<(), ForgeError> {
        self.record(MockOperation::DeleteLabel {
            name: name.to_string(),
        });
        self.check_fail(|f| match f {
            FailOn::DeleteLabel { name: n, error } if n == name => Some(error),
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        let before = inner.labels.len();
        inner.labels.retain(|l| l.name != name);
        if inner.labels.len() == before {
            return Err(ForgeError::NotFound(format!("label '{}'", name)));
        }
        Ok(())
    }

    async fn create_project_v2(&self, title: &str) -> Result<ProjectV2, ForgeError> {
        self.record(MockOperation::CreateProject {
            title: title.to_string(),
        });
        self.check_fail(|f| match f {
            FailOn::CreateProject(error) => Some(error),
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        let number = inner.projects.iter().map(|p| p.number).max().unwrap_or(0) + 1;
        let project = ProjectV2 {
            id: format!("PVT_{}", inner.next()),
            number,
            title: title.to_string(),
            url: Some(format!("https://github.com/users/mock/projects/{}", number)),
        };
        inner.projects.push(project.clone());
        Ok(project)
    }

    async fn get_project_v2(&self, number: u64) -> Result<ProjectV2, ForgeError> {
        self.record(MockOperation::GetProject { number });
        self.check_fail(|f| match f {
            FailOn::GetProject(error) => Some(error),
            _ => None,
        })?;

        let inner = self.inner.lock().unwrap();
        inner
            .projects
            .iter()
            .find(|p| p.number == number)
            .cloned()
            .ok_or_else(|| ForgeError::NotFound(format!("project #{}", number)))
    }

    async fn add_item_to_project_v2(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> Result<String, ForgeError> {
        self.record(MockOperation::AddProjectItem {
            project_id: project_id.to_string(),
            content_id: content_id.to_string(),
        });
        self.check_fail(|f| match f {
            FailOn::AddProjectItem { content_id: id, error } if id == content_id => Some(error),
            _ => None,
        })?;

        let mut inner = self.inner.lock().unwrap();
        if !inner.projects.iter().any(|p| p.id == project_id) {
            return Err(ForgeError::NotFound(format!("project {}", project_id)));
        }
        let item_id = format!("PVTI_{}", inner.next());
        inner
            .project_items
            .push((project_id.to_string(), content_id.to_string()));
        Ok(item_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Issue {
        Issue {
            title: title.into(),
            ..Default::default()
        }
    }

    fn labelled_issue(title: &str, label: &str) -> Issue {
        Issue {
            title: title.into(),
            labels: [label.to_string()].into_iter().collect(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn issue_with_unknown_label_is_rejected() {
        let forge = MockForge::new();
        let err = forge
            .create_issue(&labelled_issue("a", "bug"))
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::ApiError { status: 422, .. }));

        forge.create_label(&Label::new("bug", "d73a4a")).await.unwrap();
        assert!(forge.create_issue(&labelled_issue("a", "bug")).await.is_ok());
    }

    #[tokio::test]
    async fn label_names_ignore_case() {
        let forge = MockForge::new().with_labels(vec![Label::new("enhancement", "a2eeef")]);

        let err = forge
            .create_label(&Label::new("Enhancement", "ededed"))
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::ApiError { status: 422, .. }));
        assert!(forge
            .create_issue(&labelled_issue("a", "ENHANCEMENT"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn attach_failure_still_creates_pr() {
        let forge = MockForge::new()
            .with_labels(vec![Label::new("demo", "ededed")])
            .fail_on(FailOn::AttachLabels {
                title: "Feature".into(),
                error: ForgeError::RateLimited,
            });
        let pr = PullRequest {
            title: "Feature".into(),
            head: "feature".into(),
            base: "main".into(),
            labels: ["demo".to_string()].into_iter().collect(),
            ..Default::default()
        };

        let created = forge.create_pr(&pr).await.unwrap();

        assert_eq!(created.incomplete.len(), 1);
        assert_eq!(created.incomplete[0].step, "add labels");
        assert_eq!(forge.prs().len(), 1);
        assert!(forge.prs()[0].labels.is_empty());
    }

    #[tokio::test]
    async fn unknown_category_is_not_found() {
        let forge = MockForge::new().with_categories(&["General"]);
        let err = forge
            .create_discussion(&Discussion {
                title: "Idea".into(),
                category: "Ideas".into(),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ForgeError::NotFound(_)));
    }

    #[tokio::test]
    async fn fail_on_targets_one_title() {
        let forge = MockForge::new().fail_on(FailOn::CreateIssue {
            title: "bad".into(),
            error: ForgeError::RateLimited,
        });

        assert!(forge.create_issue(&titled("good")).await.is_ok());
        assert_eq!(
            forge.create_issue(&titled("bad")).await.unwrap_err(),
            ForgeError::RateLimited
        );
        assert_eq!(forge.issues().len(), 1);
    }

    #[tokio::test]
    async fn delete_removes_items() {
        let forge = MockForge::new().with_issues(vec![Issue {
            title: "old".into(),
            node_id: "I_old".into(),
            ..Default::default()
        }]);

        forge.delete_issue("I_old").await.unwrap();
        assert!(forge.issues().is_empty());
        assert!(matches!(
            forge.delete_issue("I_old").await,
            Err(ForgeError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_calls_are_not_mutating() {
        let forge = MockForge::new();
        forge.list_issues().await.unwrap();
        forge.list_labels().await.unwrap();
        assert_eq!(forge.operations().len(), 2);
        assert!(forge.mutating_operations().is_empty());
    }

    #[tokio::test]
    async fn cancel_after_fires_on_mutations() {
        let token = CancellationToken::new();
        let forge = MockForge::new().cancel_after(2, token.clone());

        forge.create_issue(&titled("1")).await.unwrap();
        forge.list_issues().await.unwrap();
        assert!(!token.is_cancelled());
        forge.create_issue(&titled("2")).await.unwrap();
        assert!(token.is_cancelled());
    }

    #[tokio::test]
    async fn projects_collect_items() {
        let forge = MockForge::new();
        let project = forge.create_project_v2("Demo").await.unwrap();
        assert_eq!(forge.get_project_v2(project.number).await.unwrap(), project);

        forge.add_item_to_project_v2(&project.id, "I_1").await.unwrap();
        assert_eq!(
            forge.project_items(),
            vec![(project.id.clone(), "I_1".to_string())]
        );
        assert!(forge.add_item_to_project_v2("PVT_missing", "I_1").await.is_err());
    }
}
