//! engine::hydrate
//!
//! Content creation: labels, then issues, discussions and pull requests.
//!
//! # Design
//!
//! Labels go first because content that references a label can only be
//! created once the label exists. The label step lists existing labels
//! once and creates the missing ones. Any label that fails to be created
//! makes every item referencing it fail without a network call.
//!
//! Issues, discussions and pull requests share one creation loop,
//! [`create_section`], parameterized by the forge call for that kind.
//! A failing item is recorded and the loop moves on; only cancellation or
//! a failure to list labels stops the run.
//!
//! # Example
//!
//! ```
//! use gh_hydrate::core::types::{ContentSet, Issue};
//! use gh_hydrate::engine::{hydrate, Context, HydrateOptions};
//! use gh_hydrate::forge::mock::MockForge;
//!
//! let forge = MockForge::new();
//! let content = ContentSet {
//!     issues: vec![Issue {
//!         title: "Add dark mode".to_string(),
//!         labels: ["ui".to_string()].into_iter().collect(),
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//!
//! let report = tokio_test::block_on(hydrate(
//!     &forge,
//!     &Context::default(),
//!     &content,
//!     &HydrateOptions::default(),
//! ))
//! .unwrap();
//! assert_eq!(report.issues.succeeded, 1);
//! assert_eq!(forge.labels()[0].name, "ui");
//! ```

use std::collections::HashSet;

use tracing::{debug, info, warn};

use super::project::{self, ProjectTarget};
use super::summary::SectionSummary;
use super::{Context, ForgeFuture};
use crate::core::errors::{ErrorCollector, ErrorLayer, HydrateError, RunError};
use crate::core::labels::{label_key, reconcile_content_labels};
use crate::core::types::{
    Content, ContentKind, ContentSet, CreatedItem, CreatedRef, Label, ProjectV2, Sections,
};
use crate::forge::{ForgeError, GitHubClient};

/// What a hydration run should do beyond creating labels.
#[derive(Debug, Clone, Default)]
pub struct HydrateOptions {
    /// Content sections to create.
    pub sections: Sections,
    /// Board to add created content to.
    pub project: Option<ProjectTarget>,
}

/// Result of a hydration run that was not stopped early.
///
/// Per-item failures live here; [`HydrationReport::into_result`] reduces
/// them to the single failure shape shared with cleanup.
#[derive(Debug)]
pub struct HydrationReport {
    pub labels: SectionSummary,
    pub issues: SectionSummary,
    pub discussions: SectionSummary,
    pub pull_requests: SectionSummary,
    pub project_items: SectionSummary,
    /// Board the created content was added to, if any.
    pub project: Option<ProjectV2>,
    /// Items created by this run, in creation order.
    pub created: Vec<CreatedItem>,
    errors: ErrorCollector,
}

impl HydrationReport {
    fn new() -> Self {
        Self {
            labels: SectionSummary::default(),
            issues: SectionSummary::default(),
            discussions: SectionSummary::default(),
            pull_requests: SectionSummary::default(),
            project_items: SectionSummary::default(),
            project: None,
            created: Vec::new(),
            errors: ErrorCollector::new("hydration"),
        }
    }

    /// Sections in processing order, with display names.
    pub fn sections(&self) -> [(&'static str, &SectionSummary); 5] {
        [
            ("labels", &self.labels),
            ("issues", &self.issues),
            ("discussions", &self.discussions),
            ("pull requests", &self.pull_requests),
            ("project items", &self.project_items),
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

/// Create labels and content from `content`.
///
/// # Errors
///
/// Returns `Err` only when the run stops early: cancellation, or failure
/// to list the repository's existing labels. Per-item failures are
/// reported through [`HydrationReport`].
pub async fn hydrate(
    client: &dyn GitHubClient,
    ctx: &Context,
    content: &ContentSet,
    options: &HydrateOptions,
) -> Result<HydrationReport, RunError> {
    let mut report = HydrationReport::new();

    let labels = reconcile_content_labels(content);
    let unavailable = ensure_labels(client, ctx, &labels, &mut report).await?;

    let sections = options.sections;
    if sections.issues {
        create_section(
            ctx,
            &content.issues,
            &unavailable,
            &mut report.issues,
            &mut report.errors,
            &mut report.created,
            |issue| client.create_issue(issue),
        )
        .await?;
    }
    if sections.discussions {
        create_section(
            ctx,
            &content.discussions,
            &unavailable,
            &mut report.discussions,
            &mut report.errors,
            &mut report.created,
            |discussion| client.create_discussion(discussion),
        )
        .await?;
    }
    if sections.pull_requests {
        create_section(
            ctx,
            &content.pull_requests,
            &unavailable,
            &mut report.pull_requests,
            &mut report.errors,
            &mut report.created,
            |pr| client.create_pr(pr),
        )
        .await?;
    }

    if let Some(target) = &options.project {
        report.project = project::associate(
            client,
            ctx,
            target,
            &report.created,
            &mut report.project_items,
            &mut report.errors,
        )
        .await?;
    }

    info!(
        created = report.created.len(),
        failed = report.errors.len(),
        dry_run = ctx.dry_run,
        "hydration finished"
    );
    Ok(report)
}

/// Make sure every label in `labels` exists.
///
/// Names are compared case-insensitively, as GitHub does. Returns the
/// [`label_key`]s of labels that could not be created.
async fn ensure_labels(
    client: &dyn GitHubClient,
    ctx: &Context,
    labels: &[Label],
    report: &mut HydrationReport,
) -> Result<HashSet<String>, HydrateError> {
    let mut unavailable = HashSet::new();
    if labels.is_empty() {
        return Ok(unavailable);
    }

    if ctx.dry_run {
        for label in labels {
            if ctx.is_cancelled() {
                return Err(HydrateError::cancelled("create label"));
            }
            info!(name = %label.name, color = %label.color, "dry run: would ensure label");
            report.labels.record_success();
        }
        return Ok(unavailable);
    }

    if ctx.is_cancelled() {
        return Err(HydrateError::cancelled("list labels"));
    }
    let mut existing: HashSet<String> = client
        .list_labels()
        .await
        .map_err(|e| {
            HydrateError::new(
                ErrorLayer::Api,
                "list labels",
                format!("failed to list existing labels: {}", e),
            )
            .with_cause(e)
        })?
        .into_iter()
        .map(|l| label_key(&l.name))
        .collect();

    for (i, label) in labels.iter().enumerate() {
        let key = label_key(&label.name);
        if existing.contains(&key) {
            debug!(name = %label.name, "label already exists");
            report.labels.record_success();
            continue;
        }
        if ctx.is_cancelled() {
            return Err(HydrateError::cancelled("create label"));
        }

        match client.create_label(label).await {
            Ok(()) => {
                info!(name = %label.name, "created label");
                report.labels.record_success();
                existing.insert(key);
            }
            Err(e) => {
                let err = item_error(ContentKind::Label, i + 1, &label.name, e);
                warn!(name = %label.name, "{}", err);
                report.labels.record_failure(err.to_string());
                report.errors.push(err);
                unavailable.insert(key);
            }
        }
    }

    Ok(unavailable)
}

/// Create every item of one kind, in declaration order.
///
/// `unavailable` holds keys of labels that failed to be created; items
/// referencing one of them fail without a call to `create`. An item that is
/// created but whose follow-up steps fail counts as created and is reported
/// as incomplete.
async fn create_section<'a, T, F>(
    ctx: &Context,
    items: &'a [T],
    unavailable: &HashSet<String>,
    summary: &mut SectionSummary,
    errors: &mut ErrorCollector,
    created: &mut Vec<CreatedItem>,
    create: F,
) -> Result<(), HydrateError>
where
    T: Content,
    F: Fn(&'a T) -> ForgeFuture<'a, CreatedRef>,
{
    let kind = T::KIND;

    for (i, item) in items.iter().enumerate() {
        let index = i + 1;
        if ctx.is_cancelled() {
            return Err(HydrateError::cancelled(format!("create {}", kind)));
        }

        if ctx.dry_run {
            info!(%kind, index, title = item.title(), "dry run: would create");
            summary.record_success();
            continue;
        }

        if let Some(label) = item.labels().iter().find(|l| unavailable.contains(&label_key(l))) {
            let err = HydrateError::new(
                ErrorLayer::Api,
                format!("create {}", kind),
                format!(
                    "{} {} (\"{}\"): label '{}' could not be created",
                    kind,
                    index,
                    item.title(),
                    label
                ),
            )
            .with_context("index", index.to_string())
            .with_context("title", item.title())
            .with_context("label", label.as_str());
            warn!(%kind, index, "{}", err);
            summary.record_failure(err.to_string());
            errors.push(err);
            continue;
        }

        match create(item).await {
            Ok(created_ref) => {
                info!(%kind, index, title = item.title(), node_id = %created_ref.node_id, "created");
                summary.record_success();
                for failure in &created_ref.incomplete {
                    let err = HydrateError::new(
                        ErrorLayer::Api,
                        failure.step.clone(),
                        format!(
                            "{} {} (\"{}\"): created, but {} failed: {}",
                            kind,
                            index,
                            item.title(),
                            failure.step,
                            failure.message
                        ),
                    )
                    .with_context("index", index.to_string())
                    .with_context("title", item.title())
                    .with_context("node_id", created_ref.node_id.as_str());
                    warn!(%kind, index, "{}", err);
                    summary.record_incomplete(err.to_string());
                    errors.push(err);
                }
                created.push(CreatedItem {
                    node_id: created_ref.node_id,
                    title: item.title().to_string(),
                    kind,
                });
            }
            Err(e) => {
                let err = item_error(kind, index, item.title(), e);
                warn!(%kind, index, "{}", err);
                summary.record_failure(err.to_string());
                errors.push(err);
            }
        }
    }

    Ok(())
}

/// Error for a single failed creation, tagged with its 1-based position.
fn item_error(kind: ContentKind, index: usize, title: &str, cause: ForgeError) -> HydrateError {
    HydrateError::new(
        ErrorLayer::Api,
        format!("create {}", kind),
        format!("{} {} (\"{}\"): {}", kind, index, title, cause),
    )
    .with_context("index", index.to_string())
    .with_context("title", title)
    .with_cause(cause)
}
