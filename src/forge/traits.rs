//! forge::traits
//!
//! The `GitHubClient` trait: everything the engine needs from GitHub.
//!
//! # Design
//!
//! The trait is async because every operation is network I/O. All methods
//! return `Result` so the engine can record a failure against one item and
//! carry on with the next.
//!
//! Creation methods return the new item's remote identity. List methods
//! return the current collection, with node IDs filled in. Delete methods
//! take a node ID (labels are keyed by name).
//!
//! # Example
//!
//! ```ignore
//! use gh_hydrate::forge::{GitHubClient, ForgeError};
//! use gh_hydrate::core::types::Issue;
//!
//! async fn open(client: &dyn GitHubClient) -> Result<(), ForgeError> {
//!     let issue = Issue {
//!         title: "Add dark mode".to_string(),
//!         body: "Users keep asking".to_string(),
//!         ..Default::default()
//!     };
//!     let created = client.create_issue(&issue).await?;
//!     println!("Created {}", created.node_id);
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{CreatedRef, Discussion, Issue, Label, ProjectV2, PullRequest};

/// Errors from GitHub operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code (200 for GraphQL-level errors)
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// The GitHub operations used by hydration and cleanup.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a client can be shared behind
/// `&dyn GitHubClient` inside async code.
///
/// # Error Handling
///
/// Callers treat every error from a create/delete call as a failure of
/// that single item. List failures fail the whole content type.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Client name (e.g., "github", "mock").
    fn name(&self) -> &'static str;

    /// Create an issue with its labels and assignees.
    async fn create_issue(&self, issue: &Issue) -> Result<CreatedRef, ForgeError>;

    /// Create a discussion in the named category.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the repository has no category with that name
    async fn create_discussion(&self, discussion: &Discussion) -> Result<CreatedRef, ForgeError>;

    /// Open a pull request, then apply its labels and assignees.
    ///
    /// # Errors
    ///
    /// - `ApiError` with status 422 if head/base don't exist or there is no diff
    async fn create_pr(&self, pr: &PullRequest) -> Result<CreatedRef, ForgeError>;

    /// Create a label.
    async fn create_label(&self, label: &Label) -> Result<(), ForgeError>;

    /// All labels in the repository.
    async fn list_labels(&self) -> Result<Vec<Label>, ForgeError>;

    /// All issues in the repository (pull requests excluded).
    async fn list_issues(&self) -> Result<Vec<Issue>, ForgeError>;

    /// All discussions in the repository.
    async fn list_discussions(&self) -> Result<Vec<Discussion>, ForgeError>;

    /// All open pull requests.
    async fn list_prs(&self) -> Result<Vec<PullRequest>, ForgeError>;

    /// Delete an issue by node ID.
    async fn delete_issue(&self, node_id: &str) -> Result<(), ForgeError>;

    /// Delete a discussion by node ID.
    async fn delete_discussion(&self, node_id: &str) -> Result<(), ForgeError>;

    /// Remove a pull request by node ID.
    ///
    /// GitHub cannot delete pull requests; implementations close them.
    async fn delete_pr(&self, node_id: &str) -> Result<(), ForgeError>;

    /// Delete a label by name.
    async fn delete_label(&self, name: &str) -> Result<(), ForgeError>;

    /// Create a Projects (V2) board owned by the repository owner.
    async fn create_project_v2(&self, title: &str) -> Result<ProjectV2, ForgeError>;

    /// Look up an existing Projects (V2) board by number.
    async fn get_project_v2(&self, number: u64) -> Result<ProjectV2, ForgeError>;

    /// Add an issue, PR or discussion to a board. Returns the project item ID.
    async fn add_item_to_project_v2(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> Result<String, ForgeError>;
}
