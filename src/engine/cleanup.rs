//! engine::cleanup
//!
//! Removes existing repository content, keeping whatever the preservation
//! rules protect.
//!
//! # Design
//!
//! Each selected content type is processed in turn: issues, discussions,
//! pull requests, then labels. For each type the current items are listed
//! once; every listed item is either preserved (counted and skipped) or
//! deleted.
//!
//! - A failure to list a type is recorded and that type is skipped
//! - A failure to delete an item is recorded and the next item is tried
//! - Cancellation stops the run immediately
//!
//! Pull requests cannot be deleted on GitHub, so they are closed instead;
//! only open pull requests are listed.

use tracing::{debug, info, warn};

use super::summary::CleanupSummary;
use super::{Context, ForgeFuture};
use crate::core::errors::{ErrorCollector, ErrorLayer, HydrateError, RunError};
use crate::core::preserve::{should_preserve, Preservable, PreservePolicy};
use crate::core::types::{ContentKind, Discussion, Issue, Label, PullRequest};
use crate::forge::GitHubClient;

/// Which content types to clean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupOptions {
    pub issues: bool,
    pub discussions: bool,
    pub pull_requests: bool,
    pub labels: bool,
}

impl CleanupOptions {
    /// Every content type.
    pub fn all() -> Self {
        Self {
            issues: true,
            discussions: true,
            pull_requests: true,
            labels: true,
        }
    }

    /// True if at least one type is selected.
    pub fn any(&self) -> bool {
        self.issues || self.discussions || self.pull_requests || self.labels
    }
}

/// Result of a cleanup run that was not cancelled.
#[derive(Debug)]
pub struct CleanupReport {
    pub issues: CleanupSummary,
    pub discussions: CleanupSummary,
    pub pull_requests: CleanupSummary,
    pub labels: CleanupSummary,
    errors: ErrorCollector,
}

impl CleanupReport {
    fn new() -> Self {
        Self {
            issues: CleanupSummary::default(),
            discussions: CleanupSummary::default(),
            pull_requests: CleanupSummary::default(),
            labels: CleanupSummary::default(),
            errors: ErrorCollector::new("cleanup"),
        }
    }

    /// Summaries in processing order, with display names.
    pub fn sections(&self) -> [(&'static str, &CleanupSummary); 4] {
        [
            ("issues", &self.issues),
            ("discussions", &self.discussions),
            ("pull requests", &self.pull_requests),
            ("labels", &self.labels),
        ]
    }

    pub fn errors(&self) -> &[HydrateError] {
        self.errors.errors()
    }

    pub fn has_failures(&self) -> bool {
        !self.errors.is_empty()
    }

    /// `Ok` if nothing failed, otherwise the single error or a partial failure.
    pub fn into_result(self) -> Result<(), RunError> {
        self.errors.into_result()
    }
}

/// A content type that cleanup can list and delete.
trait Cleanable: Preservable + Sized {
    const KIND: ContentKind;

    fn list(client: &dyn GitHubClient) -> ForgeFuture<'_, Vec<Self>>;

    fn delete<'a>(client: &'a dyn GitHubClient, item: &'a Self) -> ForgeFuture<'a, ()>;

    /// Identity passed to `delete`: node ID, or name for labels.
    fn key(&self) -> &str;

    /// Human-readable name for logs and errors.
    fn describe(&self) -> &str;
}

impl Cleanable for Issue {
    const KIND: ContentKind = ContentKind::Issue;

    fn list(client: &dyn GitHubClient) -> ForgeFuture<'_, Vec<Self>> {
        client.list_issues()
    }

    fn delete<'a>(client: &'a dyn GitHubClient, item: &'a Self) -> ForgeFuture<'a, ()> {
        client.delete_issue(&item.node_id)
    }

    fn key(&self) -> &str {
        &self.node_id
    }

    fn describe(&self) -> &str {
        &self.title
    }
}

impl Cleanable for Discussion {
    const KIND: ContentKind = ContentKind::Discussion;

    fn list(client: &dyn GitHubClient) -> ForgeFuture<'_, Vec<Self>> {
        client.list_discussions()
    }

    fn delete<'a>(client: &'a dyn GitHubClient, item: &'a Self) -> ForgeFuture<'a, ()> {
        client.delete_discussion(&item.node_id)
    }

    fn key(&self) -> &str {
        &self.node_id
    }

    fn describe(&self) -> &str {
        &self.title
    }
}

impl Cleanable for PullRequest {
    const KIND: ContentKind = ContentKind::PullRequest;

    fn list(client: &dyn GitHubClient) -> ForgeFuture<'_, Vec<Self>> {
        client.list_prs()
    }

    fn delete<'a>(client: &'a dyn GitHubClient, item: &'a Self) -> ForgeFuture<'a, ()> {
        client.delete_pr(&item.node_id)
    }

    fn key(&self) -> &str {
        &self.node_id
    }

    fn describe(&self) -> &str {
        &self.title
    }
}

impl Cleanable for Label {
    const KIND: ContentKind = ContentKind::Label;

    fn list(client: &dyn GitHubClient) -> ForgeFuture<'_, Vec<Self>> {
        client.list_labels()
    }

    fn delete<'a>(client: &'a dyn GitHubClient, item: &'a Self) -> ForgeFuture<'a, ()> {
        client.delete_label(&item.name)
    }

    fn key(&self) -> &str {
        &self.name
    }

    fn describe(&self) -> &str {
        &self.name
    }
}

/// Delete existing content of the selected types.
///
/// `policy` of `None` preserves nothing.
///
/// # Errors
///
/// Returns `Err` only on cancellation. List and delete failures are
/// reported through [`CleanupReport`].
pub async fn cleanup(
    client: &dyn GitHubClient,
    ctx: &Context,
    options: &CleanupOptions,
    policy: Option<&PreservePolicy>,
) -> Result<CleanupReport, RunError> {
    let mut report = CleanupReport::new();

    if options.issues {
        clean_section::<Issue>(client, ctx, policy, &mut report.issues, &mut report.errors)
            .await?;
    }
    if options.discussions {
        clean_section::<Discussion>(
            client,
            ctx,
            policy,
            &mut report.discussions,
            &mut report.errors,
        )
        .await?;
    }
    if options.pull_requests {
        clean_section::<PullRequest>(
            client,
            ctx,
            policy,
            &mut report.pull_requests,
            &mut report.errors,
        )
        .await?;
    }
    if options.labels {
        clean_section::<Label>(client, ctx, policy, &mut report.labels, &mut report.errors)
            .await?;
    }

    info!(
        failed = report.errors.len(),
        dry_run = ctx.dry_run,
        "cleanup finished"
    );
    Ok(report)
}

async fn clean_section<T: Cleanable>(
    client: &dyn GitHubClient,
    ctx: &Context,
    policy: Option<&PreservePolicy>,
    summary: &mut CleanupSummary,
    errors: &mut ErrorCollector,
) -> Result<(), HydrateError> {
    let kind = T::KIND;

    if ctx.is_cancelled() {
        return Err(HydrateError::cancelled(format!("list {}", kind.plural())));
    }
    let items = match T::list(client).await {
        Ok(items) => items,
        Err(e) => {
            let err = HydrateError::new(
                ErrorLayer::Cleanup,
                format!("list {}", kind.plural()),
                format!("failed to list {}: {}", kind.plural(), e),
            )
            .with_cause(e);
            warn!("{}", err);
            summary.errors.push(err.to_string());
            errors.push(err);
            return Ok(());
        }
    };
    debug!(%kind, count = items.len(), "listed existing items");

    for item in &items {
        if ctx.is_cancelled() {
            return Err(HydrateError::cancelled(format!("delete {}", kind)));
        }

        if should_preserve(policy, item) {
            debug!(%kind, name = item.describe(), "preserved");
            summary.preserved += 1;
            continue;
        }

        if ctx.dry_run {
            info!(%kind, name = item.describe(), id = item.key(), "dry run: would delete");
            summary.deleted += 1;
            continue;
        }

        match T::delete(client, item).await {
            Ok(()) => {
                info!(%kind, name = item.describe(), id = item.key(), "deleted");
                summary.deleted += 1;
            }
            Err(e) => {
                let err = HydrateError::new(
                    ErrorLayer::Cleanup,
                    format!("delete {}", kind),
                    format!("{} \"{}\" ({}): {}", kind, item.describe(), item.key(), e),
                )
                .with_context("id", item.key())
                .with_context("title", item.describe())
                .with_cause(e);
                warn!("{}", err);
                summary.errors.push(err.to_string());
                errors.push(err);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::preserve::{ItemRules, LabelRules, PreserveConfig};
    use crate::forge::mock::{FailOn, MockForge, MockOperation};
    use crate::forge::ForgeError;

    fn existing_issue(node_id: &str, title: &str, labels: &[&str]) -> Issue {
        Issue {
            title: title.to_string(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            node_id: node_id.to_string(),
            ..Default::default()
        }
    }

    fn existing_discussion(node_id: &str, title: &str) -> Discussion {
        Discussion {
            title: title.to_string(),
            category: "General".to_string(),
            node_id: node_id.to_string(),
            ..Default::default()
        }
    }

    fn seeded() -> MockForge {
        MockForge::new()
            .with_issues(vec![
                existing_issue("I_1", "Old bug", &["bug"]),
                existing_issue("I_2", "Keep me", &["permanent"]),
            ])
            .with_discussions(vec![existing_discussion("D_1", "Welcome")])
            .with_labels(vec![
                Label::new("bug", "d73a4a"),
                Label::new("permanent", "000000"),
            ])
    }

    #[test]
    fn options_any() {
        assert!(!CleanupOptions::default().any());
        assert!(CleanupOptions::all().any());
        assert!(CleanupOptions {
            labels: true,
            ..Default::default()
        }
        .any());
    }

    #[tokio::test]
    async fn without_policy_everything_is_deleted() {
        let forge = seeded();

        let report = cleanup(&forge, &Context::default(), &CleanupOptions::all(), None)
            .await
            .unwrap();

        assert_eq!(report.issues.deleted, 2);
        assert_eq!(report.discussions.deleted, 1);
        assert_eq!(report.labels.deleted, 2);
        assert!(forge.issues().is_empty());
        assert!(forge.labels().is_empty());
        assert!(report.into_result().is_ok());
    }

    #[tokio::test]
    async fn preserved_items_are_counted_and_kept() {
        let forge = seeded();
        let policy = PreservePolicy::new(&PreserveConfig {
            issues: ItemRules {
                preserve_by_label: vec!["permanent".into()],
                ..Default::default()
            },
            labels: LabelRules {
                preserve_by_name: vec!["permanent".into()],
            },
            ..Default::default()
        });

        let report = cleanup(
            &forge,
            &Context::default(),
            &CleanupOptions::all(),
            Some(&policy),
        )
        .await
        .unwrap();

        assert_eq!(report.issues.deleted, 1);
        assert_eq!(report.issues.preserved, 1);
        assert_eq!(report.labels.preserved, 1);
        let left: Vec<String> = forge.issues().into_iter().map(|i| i.title).collect();
        assert_eq!(left, vec!["Keep me"]);
        assert!(!forge.operations().contains(&MockOperation::DeleteIssue {
            node_id: "I_2".into()
        }));
    }

    #[tokio::test]
    async fn list_failure_skips_only_that_type() {
        let forge = seeded().fail_on(FailOn::ListIssues(ForgeError::RateLimited));

        let report = cleanup(&forge, &Context::default(), &CleanupOptions::all(), None)
            .await
            .unwrap();

        assert_eq!(report.issues.deleted, 0);
        assert_eq!(report.issues.errors.len(), 1);
        assert_eq!(report.discussions.deleted, 1);

        match report.into_result() {
            Err(RunError::Single(err)) => {
                assert_eq!(err.layer, ErrorLayer::Cleanup);
                assert_eq!(err.operation, "list issues");
            }
            other => panic!("expected a single error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn delete_failure_continues_with_next_item() {
        let forge = seeded()
            .fail_on(FailOn::DeleteIssue {
                node_id: "I_1".into(),
                error: ForgeError::AuthFailed("Permission denied".into()),
            })
            .fail_on(FailOn::DeleteLabel {
                name: "bug".into(),
                error: ForgeError::RateLimited,
            });

        let report = cleanup(&forge, &Context::default(), &CleanupOptions::all(), None)
            .await
            .unwrap();

        assert_eq!(report.issues.deleted, 1);
        assert_eq!(report.issues.errors.len(), 1);
        assert!(report.issues.errors[0].contains("\"Old bug\" (I_1)"));

        match report.into_result() {
            Err(RunError::Partial(partial)) => assert_eq!(partial.messages.len(), 2),
            other => panic!("expected a partial failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn dry_run_lists_but_never_deletes() {
        let forge = seeded();

        let report = cleanup(&forge, &Context::dry_run(), &CleanupOptions::all(), None)
            .await
            .unwrap();

        assert!(forge.mutating_operations().is_empty());
        assert_eq!(report.issues.deleted, 2);
        assert_eq!(report.labels.deleted, 2);
        assert_eq!(forge.issues().len(), 2);
    }

    #[tokio::test]
    async fn unselected_types_are_untouched() {
        let forge = seeded();
        let options = CleanupOptions {
            discussions: true,
            ..Default::default()
        };

        let report = cleanup(&forge, &Context::default(), &options, None)
            .await
            .unwrap();

        assert!(report.issues.is_empty());
        assert!(report.labels.is_empty());
        assert_eq!(
            forge.operations(),
            vec![
                MockOperation::ListDiscussions,
                MockOperation::DeleteDiscussion {
                    node_id: "D_1".into()
                }
            ]
        );
    }

    #[tokio::test]
    async fn pull_requests_are_closed() {
        let forge = MockForge::new().with_prs(vec![PullRequest {
            title: "Stale".into(),
            head: "feature".into(),
            base: "main".into(),
            node_id: "PR_7".into(),
            ..Default::default()
        }]);
        let options = CleanupOptions {
            pull_requests: true,
            ..Default::default()
        };

        let report = cleanup(&forge, &Context::default(), &options, None)
            .await
            .unwrap();

        assert_eq!(report.pull_requests.deleted, 1);
        assert!(forge.prs().is_empty());
    }

    #[tokio::test]
    async fn cancelled_before_start_deletes_nothing() {
        let forge = seeded();
        let ctx = Context::default();
        ctx.cancel.cancel();

        let err = cleanup(&forge, &ctx, &CleanupOptions::all(), None)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(forge.operations().is_empty());
    }

    #[tokio::test]
    async fn cancelled_mid_batch_stops_further_deletes() {
        let ctx = Context::default();
        let forge = seeded().cancel_after(1, ctx.cancel.clone());

        let err = cleanup(&forge, &ctx, &CleanupOptions::all(), None)
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert_eq!(forge.issues().len(), 1);
        assert_eq!(forge.discussions().len(), 1);
    }
}
