//! core::errors
//!
//! Structured errors and per-operation error collection.
//!
//! # Design
//!
//! A [`HydrateError`] records which layer failed, the operation that was
//! running, a human message, an optional cause and a small key/value
//! context map (item title, node ID, file path).
//!
//! An [`ErrorCollector`] gathers the errors of one logical operation and
//! reduces them to a single shape:
//!
//! - no errors: `Ok(())`
//! - exactly one error: that error
//! - more than one: a [`PartialFailure`] carrying every message
//!
//! Both orchestrators use the same reduction, so callers handle one
//! [`RunError`] type.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

/// Layer in which an error originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorLayer {
    /// Remote API call failed
    Api,
    /// Missing or invalid command-line parameters
    Validation,
    /// Configuration file could not be read or parsed
    File,
    /// Configuration could not be assembled
    Config,
    /// Operation was cancelled
    Context,
    /// Listing or deleting during cleanup failed
    Cleanup,
}

impl fmt::Display for ErrorLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorLayer::Api => "api",
            ErrorLayer::Validation => "validation",
            ErrorLayer::File => "file",
            ErrorLayer::Config => "config",
            ErrorLayer::Context => "context",
            ErrorLayer::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

/// A structured error with debugging context.
#[derive(Debug, Error)]
#[error("{layer} error during {operation}: {message}")]
pub struct HydrateError {
    pub layer: ErrorLayer,
    pub operation: String,
    pub message: String,
    #[source]
    pub cause: Option<Box<dyn StdError + Send + Sync + 'static>>,
    pub context: BTreeMap<String, String>,
}

impl HydrateError {
    pub fn new(
        layer: ErrorLayer,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            layer,
            operation: operation.into(),
            message: message.into(),
            cause: None,
            context: BTreeMap::new(),
        }
    }

    /// Error signalling that the run was cancelled.
    pub fn cancelled(operation: impl Into<String>) -> Self {
        Self::new(ErrorLayer::Context, operation, "operation cancelled")
    }

    /// Attach the underlying error.
    pub fn with_cause(mut self, cause: impl StdError + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Attach a debugging key/value pair.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.layer == ErrorLayer::Context
    }
}

/// Several independent failures within one operation.
///
/// Items that did not fail are unaffected; this is never a total failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} partially failed ({} errors):\n  {}", .messages.len(), .messages.join("\n  "))]
pub struct PartialFailure {
    pub operation: String,
    pub messages: Vec<String>,
}

/// The single failure shape returned by the orchestrators.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Single(#[from] HydrateError),

    #[error(transparent)]
    Partial(#[from] PartialFailure),
}

impl RunError {
    /// True when the run stopped because of cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunError::Single(e) if e.is_cancelled())
    }

    /// Every failure message carried by this error.
    pub fn messages(&self) -> Vec<String> {
        match self {
            RunError::Single(e) => vec![e.to_string()],
            RunError::Partial(p) => p.messages.clone(),
        }
    }
}

/// Accumulates errors for a single logical operation.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    operation: String,
    errors: Vec<HydrateError>,
}

impl ErrorCollector {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            errors: Vec::new(),
        }
    }

    pub fn push(&mut self, error: HydrateError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn errors(&self) -> &[HydrateError] {
        &self.errors
    }

    /// Reduce to `Ok`, the single error, or a partial failure.
    pub fn into_result(mut self) -> Result<(), RunError> {
        match self.errors.len() {
            0 => Ok(()),
            1 => Err(RunError::Single(self.errors.remove(0))),
            _ => Err(RunError::Partial(PartialFailure {
                messages: self.errors.iter().map(ToString::to_string).collect(),
                operation: self.operation,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_layer_and_operation() {
        let err = HydrateError::new(ErrorLayer::Api, "create issue", "boom");
        assert_eq!(err.to_string(), "api error during create issue: boom");
    }

    #[test]
    fn context_and_cause_are_attached() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = HydrateError::new(ErrorLayer::File, "read issues", "cannot read")
            .with_cause(io)
            .with_context("path", "config/issues.json");

        assert_eq!(err.context.get("path").unwrap(), "config/issues.json");
        assert_eq!(err.source().unwrap().to_string(), "missing");
    }

    #[test]
    fn empty_collector_is_ok() {
        assert!(ErrorCollector::new("hydrate").into_result().is_ok());
    }

    #[test]
    fn single_error_is_returned_as_is() {
        let mut errors = ErrorCollector::new("hydrate");
        errors.push(HydrateError::new(ErrorLayer::Api, "create issue", "boom"));

        match errors.into_result() {
            Err(RunError::Single(e)) => assert_eq!(e.message, "boom"),
            other => panic!("expected single error, got {:?}", other),
        }
    }

    #[test]
    fn several_errors_become_partial_failure() {
        let mut errors = ErrorCollector::new("hydrate");
        errors.push(HydrateError::new(ErrorLayer::Api, "create issue", "first"));
        errors.push(HydrateError::new(ErrorLayer::Api, "create issue", "second"));

        let err = errors.into_result().unwrap_err();
        assert!(!err.is_cancelled());
        match &err {
            RunError::Partial(p) => {
                assert_eq!(p.operation, "hydrate");
                assert_eq!(p.messages.len(), 2);
                assert!(p.messages[1].contains("second"));
            }
            other => panic!("expected partial failure, got {:?}", other),
        }
        assert!(err.to_string().contains("2 errors"));
    }

    #[test]
    fn cancellation_is_detected() {
        let err = RunError::from(HydrateError::cancelled("create issues"));
        assert!(err.is_cancelled());
        assert_eq!(
            err.messages(),
            vec!["context error during create issues: operation cancelled"]
        );
    }
}
