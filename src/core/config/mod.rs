//! core::config
//!
//! Loading the declarative JSON configuration.
//!
//! # Overview
//!
//! A configuration directory holds one JSON file per content type (see
//! [`schema`] for the layout). Only the sections enabled for a run are
//! read; a disabled section's file may be absent. `labels.json` is always
//! optional.
//!
//! Preservation rules live in `preserve.json`, either at an explicit path
//! or inside the configuration directory.
//!
//! # Errors
//!
//! Read and parse failures are [`ConfigError::ReadError`] and
//! [`ConfigError::ParseError`] (the `file` layer). Validation failures are
//! [`ConfigError::InvalidValue`] (the `config` layer). Both abort a run
//! before any API call.
//!
//! # Example
//!
//! ```no_run
//! use gh_hydrate::core::config::load_content;
//! use gh_hydrate::core::types::Sections;
//! use std::path::Path;
//!
//! let content = load_content(Path::new("config"), &Sections::all()).unwrap();
//! println!("{} issues declared", content.issues.len());
//! ```

pub mod schema;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::core::errors::{ErrorLayer, HydrateError};
use crate::core::preserve::PreserveConfig;
use crate::core::types::{ContentSet, Sections};

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration directory '{0}' does not exist")]
    MissingDirectory(PathBuf),

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

impl ConfigError {
    /// Layer this error belongs to.
    pub fn layer(&self) -> ErrorLayer {
        match self {
            ConfigError::MissingDirectory(_)
            | ConfigError::ReadError { .. }
            | ConfigError::ParseError { .. } => ErrorLayer::File,
            ConfigError::InvalidValue(_) => ErrorLayer::Config,
        }
    }

    fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::MissingDirectory(path)
            | ConfigError::ReadError { path, .. }
            | ConfigError::ParseError { path, .. } => Some(path),
            ConfigError::InvalidValue(_) => None,
        }
    }
}

impl From<ConfigError> for HydrateError {
    fn from(err: ConfigError) -> Self {
        let mut out = HydrateError::new(err.layer(), "load configuration", err.to_string());
        if let Some(path) = err.path() {
            out = out.with_context("path", path.display().to_string());
        }
        out.with_cause(err)
    }
}

/// Read and deserialize one JSON file.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read an optional JSON file, returning the default when it is absent.
fn read_optional_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    if path.exists() {
        read_json(path)
    } else {
        Ok(T::default())
    }
}

/// Load and validate the content declared in `dir`.
///
/// Files for disabled sections are not read.
pub fn load_content(dir: &Path, sections: &Sections) -> Result<ContentSet, ConfigError> {
    if !dir.is_dir() {
        return Err(ConfigError::MissingDirectory(dir.to_path_buf()));
    }

    let mut content = ContentSet {
        labels: read_optional_json(&dir.join(schema::LABELS_FILE))?,
        ..Default::default()
    };
    schema::normalize_labels(&mut content.labels)?;

    if sections.issues {
        content.issues = read_json(&dir.join(schema::ISSUES_FILE))?;
        schema::validate_issues(&content.issues)?;
    }
    if sections.discussions {
        content.discussions = read_json(&dir.join(schema::DISCUSSIONS_FILE))?;
        schema::validate_discussions(&content.discussions)?;
    }
    if sections.pull_requests {
        content.pull_requests = read_json(&dir.join(schema::PULL_REQUESTS_FILE))?;
        schema::validate_pull_requests(&content.pull_requests)?;
    }

    Ok(content)
}

/// Where to read preservation rules from.
///
/// An explicit path always wins; otherwise `preserve.json` in the
/// configuration directory is used if it exists.
pub fn preserve_path(dir: &Path, explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let candidate = dir.join(schema::PRESERVE_FILE);
            candidate.exists().then_some(candidate)
        }
    }
}

/// Load preservation rules from `path`.
pub fn load_preserve(path: &Path) -> Result<PreserveConfig, ConfigError> {
    read_json(path)
}
