//! engine::project
//!
//! Adds content created by a hydration run to a Projects (V2) board.

use std::fmt;

use tracing::{debug, info, warn};

use super::summary::SectionSummary;
use super::Context;
use crate::core::errors::{ErrorCollector, ErrorLayer, HydrateError};
use crate::core::types::{CreatedItem, ProjectV2};
use crate::forge::{ForgeError, GitHubClient};

/// Which board to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectTarget {
    /// An existing board, by number.
    Existing(u64),
    /// A new board with this title.
    New(String),
}

impl fmt::Display for ProjectTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectTarget::Existing(number) => write!(f, "project #{}", number),
            ProjectTarget::New(title) => write!(f, "new project '{}'", title),
        }
    }
}

async fn resolve(
    client: &dyn GitHubClient,
    target: &ProjectTarget,
) -> Result<ProjectV2, ForgeError> {
    match target {
        ProjectTarget::Existing(number) => client.get_project_v2(*number).await,
        ProjectTarget::New(title) => client.create_project_v2(title).await,
    }
}

/// Add every item in `items` to the target board.
///
/// A board that cannot be resolved is recorded once and association is
/// skipped. Each add is a separate step: a failure is recorded and the
/// next item is tried.
pub(crate) async fn associate(
    client: &dyn GitHubClient,
    ctx: &Context,
    target: &ProjectTarget,
    items: &[CreatedItem],
    summary: &mut SectionSummary,
    errors: &mut ErrorCollector,
) -> Result<Option<ProjectV2>, HydrateError> {
    if ctx.dry_run {
        info!(%target, "dry run: would add created content to project");
        return Ok(None);
    }
    if ctx.is_cancelled() {
        return Err(HydrateError::cancelled("resolve project"));
    }

    let project = match resolve(client, target).await {
        Ok(project) => project,
        Err(e) => {
            let err = HydrateError::new(
                ErrorLayer::Api,
                "resolve project",
                format!("{}: {}", target, e),
            )
            .with_cause(e);
            warn!("{}", err);
            errors.push(err);
            return Ok(None);
        }
    };
    info!(project = %project.title, number = project.number, "adding created content to project");

    for (i, item) in items.iter().enumerate() {
        if ctx.is_cancelled() {
            return Err(HydrateError::cancelled("add project item"));
        }

        match client.add_item_to_project_v2(&project.id, &item.node_id).await {
            Ok(item_id) => {
                debug!(node_id = %item.node_id, item_id = %item_id, "added to project");
                summary.record_success();
            }
            Err(e) => {
                let err = HydrateError::new(
                    ErrorLayer::Api,
                    "add project item",
                    format!("{} {} (\"{}\"): {}", item.kind, i + 1, item.title, e),
                )
                .with_context("node_id", item.node_id.as_str())
                .with_context("title", item.title.as_str())
                .with_cause(e);
                warn!("{}", err);
                summary.record_failure(err.to_string());
                errors.push(err);
            }
        }
    }

    Ok(Some(project))
}
