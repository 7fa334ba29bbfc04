//! ui
//!
//! User-facing terminal output.
//!
//! # Modules
//!
//! - [`output`] - Output formatting and display
//!
//! # Design
//!
//! All human-readable output goes through this module so quiet and debug
//! modes are honoured consistently. Diagnostic logging uses `tracing`
//! instead and is configured by the binary.

pub mod output;
