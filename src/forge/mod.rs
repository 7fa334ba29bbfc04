//! forge
//!
//! Abstraction over the GitHub API.
//!
//! # Architecture
//!
//! The `GitHubClient` trait defines every remote operation the engine
//! performs. The engine only ever sees `&dyn GitHubClient`, so tests run the
//! same orchestration against [`mock::MockForge`].
//!
//! - Forge failures are returned, never retried
//! - The engine decides whether a failure is per-item or fatal
//!
//! # Modules
//!
//! - `traits`: Core `GitHubClient` trait and `ForgeError`
//! - [`github`]: GitHub implementation using REST and GraphQL APIs
//! - [`mock`]: Mock implementation for deterministic testing
//!
//! # Example
//!
//! ```ignore
//! use gh_hydrate::forge::{github::GitHubForge, GitHubClient};
//!
//! let forge = GitHubForge::new(token, "octocat", "demo");
//! for label in forge.list_labels().await? {
//!     println!("{}", label.name);
//! }
//! ```

pub mod github;
pub mod mock;
mod traits;

pub use traits::*;
