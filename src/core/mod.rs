//! core
//!
//! Domain types, configuration and pure decision logic.
//!
//! # Modules
//!
//! - [`types`] - Content model: issues, discussions, pull requests, labels
//! - [`labels`] - Label reconciliation
//! - [`preserve`] - Preservation rules for cleanup
//! - [`errors`] - Structured errors and error collection
//! - [`config`] - Loading and validating the JSON configuration
//!
//! # Design Principles
//!
//! - Nothing in this module performs network I/O
//! - Decisions (which labels, what to keep) are deterministic

pub mod config;
pub mod errors;
pub mod labels;
pub mod preserve;
pub mod types;
