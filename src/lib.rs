//! gh-hydrate - Populate a GitHub repository with demo content
//!
//! gh-hydrate reads declarative JSON files describing labels, issues,
//! discussions and pull requests, and creates them in a repository. It can
//! also tear previously created content down, keeping whatever the
//! preservation rules protect.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - Hydration and cleanup orchestration
//! - [`core`] - Content model, configuration, label reconciliation, preservation, errors
//! - [`forge`] - The `GitHubClient` abstraction, its GitHub implementation and a mock
//! - [`ui`] - Terminal output
//!
//! # Correctness Invariants
//!
//! 1. Every label referenced by content exists before that content is created
//! 2. Each declared item is attempted at most once per run
//! 3. One item's failure never aborts its batch
//! 4. Dry-run never performs a mutating call

pub mod cli;
pub mod core;
pub mod engine;
pub mod forge;
pub mod ui;
