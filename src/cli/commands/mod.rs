//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Validates command-specific arguments
//! 2. Loads configuration
//! 3. Calls the engine to execute the command
//! 4. Formats and displays output
//!
//! Handlers do NOT talk to GitHub directly; every call goes through the
//! engine.
//!
//! # Async Commands
//!
//! `hydrate` and `clean` are async because they involve network I/O. They
//! build a tokio runtime with [`block_on`], which also cancels the run's
//! token when Ctrl-C is pressed.

mod clean;
mod completion;
mod hydrate;

// Re-export command functions for testing and direct invocation
pub use clean::clean;
pub use completion::completion;
pub use hydrate::hydrate;

use std::future::Future;
use std::path::Path;

use anyhow::{Context as _, Result};

use crate::cli::args::{Command, RepoArgs};
use crate::core::config;
use crate::core::errors::{ErrorLayer, HydrateError, RunError};
use crate::core::preserve::PreservePolicy;
use crate::engine::Context;
use crate::forge::github::GitHubForge;
use crate::ui::output::{self, Verbosity};

/// Dispatch a command to its handler.
pub fn dispatch(command: Command, ctx: &Context) -> Result<()> {
    match command {
        Command::Hydrate(args) => hydrate::hydrate(ctx, &args),
        Command::Clean(args) => clean::clean(ctx, &args),
        Command::Completion { shell } => completion::completion(shell),
    }
}

/// Owner and repository name, both required.
fn repository(args: &RepoArgs) -> Result<(String, String), HydrateError> {
    let missing = |flag: &str| {
        HydrateError::new(
            ErrorLayer::Validation,
            "parse arguments",
            format!("{} is required", flag),
        )
        .with_context("flag", flag)
    };

    let owner = args
        .owner
        .as_deref()
        .filter(|o| !o.trim().is_empty())
        .ok_or_else(|| missing("--owner"))?;
    let repo = args
        .repo
        .as_deref()
        .filter(|r| !r.trim().is_empty())
        .ok_or_else(|| missing("--repo"))?;

    Ok((owner.to_string(), repo.to_string()))
}

/// Token from `--token`/`GITHUB_TOKEN`, else `GH_TOKEN`.
///
/// Returns an empty token when none is found and `required` is false.
fn token(args: &RepoArgs, required: bool) -> Result<String, HydrateError> {
    let token = args
        .token
        .clone()
        .or_else(|| std::env::var("GH_TOKEN").ok())
        .filter(|t| !t.trim().is_empty());

    match token {
        Some(token) => Ok(token),
        None if !required => Ok(String::new()),
        None => Err(HydrateError::new(
            ErrorLayer::Validation,
            "parse arguments",
            "a GitHub token is required: pass --token or set GITHUB_TOKEN or GH_TOKEN",
        )),
    }
}

fn client(args: &RepoArgs, owner: &str, repo: &str, token: String) -> GitHubForge {
    GitHubForge::with_api_base(token, owner, repo, args.api_url.clone())
}

/// Preservation policy from `explicit`, else `<config_path>/preserve.json` if present.
fn preserve_policy(
    config_path: &Path,
    explicit: Option<&Path>,
) -> Result<Option<PreservePolicy>> {
    let Some(path) = config::preserve_path(config_path, explicit) else {
        return Ok(None);
    };
    let rules = config::load_preserve(&path)
        .map_err(HydrateError::from)
        .with_context(|| format!("Failed to load preservation rules from {}", path.display()))?;
    Ok(Some(PreservePolicy::new(&rules)))
}

/// Report a reduced run result. Per-item failures are shown, never fatal.
fn report_outcome(what: &str, result: Result<(), RunError>, verbosity: Verbosity) {
    match result {
        Ok(()) => output::success(format!("{} completed", what), verbosity),
        Err(err) => {
            let messages = err.messages();
            output::failures(
                &format!("{} completed with {} failure(s):", what, messages.len()),
                &messages,
            );
        }
    }
}

/// Run `future` on a fresh runtime, cancelling `ctx` on Ctrl-C.
fn block_on<F>(ctx: &Context, future: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    let rt = tokio::runtime::Runtime::new()?;
    let cancel = ctx.cancel.clone();

    rt.block_on(async move {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, stopping after the current call");
                cancel.cancel();
            }
        });
        future.await
    })
}
