//! engine
//!
//! Orchestrates hydration and cleanup against a `GitHubClient`.
//!
//! # Architecture
//!
//! The engine sits between the CLI and the forge. It never reads files or
//! parses flags; it receives an already-loaded [`ContentSet`] or cleanup
//! selection plus a [`Context`], and drives the forge one call at a time.
//!
//! ```text
//! cleanup (optional) -> labels -> issues -> discussions -> pull requests -> project items
//! ```
//!
//! # Invariants
//!
//! - Calls are sequential; every item is attempted at most once per run
//! - Cancellation is checked before every network call and stops the run
//! - A failing item never aborts its batch
//! - Dry-run never invokes a mutating forge method
//!
//! [`ContentSet`]: crate::core::types::ContentSet

pub mod cleanup;
pub mod hydrate;
pub mod project;
pub mod summary;

pub use cleanup::{cleanup, CleanupOptions, CleanupReport};
pub use hydrate::{hydrate, HydrateOptions, HydrationReport};
pub use project::ProjectTarget;
pub use summary::{CleanupSummary, SectionSummary};

use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::forge::ForgeError;

/// A pending forge call, as returned by `GitHubClient` methods.
pub(crate) type ForgeFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, ForgeError>> + Send + 'a>>;

/// Execution context for engine runs.
///
/// Contains global settings derived from CLI flags that affect engine behavior.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Preview only: no mutating calls are made.
    pub dry_run: bool,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Cancelled when the user interrupts the run.
    pub cancel: CancellationToken,
}

impl Context {
    /// Context for a dry run.
    pub fn dry_run() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// True once the run has been asked to stop.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
