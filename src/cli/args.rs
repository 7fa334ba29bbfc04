//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::core::types::Sections;
use crate::engine::{CleanupOptions, ProjectTarget};
use crate::forge::github::DEFAULT_API_BASE;

/// gh-hydrate - Populate a GitHub repository with demo content
#[derive(Parser, Debug)]
#[command(name = "gh-hydrate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create labels, issues, discussions and pull requests from configuration
    #[command(
        name = "hydrate",
        long_about = "Create labels, issues, discussions and pull requests from configuration.\n\n\
            Reads issues.json, discussions.json, prs.json and the optional labels.json \
            from the configuration directory. Labels referenced by content but not \
            declared are created with a default color first. A failing item is \
            reported and the run continues with the next one.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Preview what would be created
    gh-hydrate hydrate --owner octocat --repo demo --dry-run

    # Create everything from ./config
    gh-hydrate hydrate --owner octocat --repo demo

    # Only issues, from another directory
    gh-hydrate hydrate --owner octocat --repo demo --config-path demo-data \\
        --discussions=false --prs=false

    # Wipe previous demo content first, keeping anything preserve.json protects
    gh-hydrate hydrate --owner octocat --repo demo --clean

    # Add everything created to project board #3
    gh-hydrate hydrate --owner octocat --repo demo --project 3"
    )]
    Hydrate(HydrateArgs),

    /// Delete existing issues, discussions, pull requests and labels
    #[command(
        name = "clean",
        long_about = "Delete existing repository content.\n\n\
            Without --clean-* flags every content type is cleaned. Items matched by \
            preserve.json are kept. Pull requests are closed rather than deleted.",
        after_help = "\
WORKFLOW EXAMPLES:
    # See what would be removed
    gh-hydrate clean --owner octocat --repo demo --dry-run

    # Remove only issues and labels
    gh-hydrate clean --owner octocat --repo demo --clean-issues --clean-labels"
    )]
    Clean(CleanArgs),

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    gh-hydrate completion bash > ~/.local/share/bash-completion/completions/gh-hydrate

    # Zsh
    gh-hydrate completion zsh > ~/.zfunc/_gh-hydrate

    # Fish
    gh-hydrate completion fish > ~/.config/fish/completions/gh-hydrate.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Target repository and credentials.
#[derive(Args, Debug, Clone)]
pub struct RepoArgs {
    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: Option<String>,

    /// Repository name
    #[arg(long)]
    pub repo: Option<String>,

    /// GitHub token (falls back to GITHUB_TOKEN, then GH_TOKEN)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// REST API base URL (GitHub Enterprise: https://HOST/api/v3)
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_BASE)]
    pub api_url: String,

    /// Directory containing the JSON configuration files
    #[arg(long, value_name = "DIR", default_value = "config")]
    pub config_path: PathBuf,
}

/// Content types to clean.
#[derive(Args, Debug, Clone, Default)]
pub struct CleanSelection {
    /// Clean issues
    #[arg(long)]
    pub clean_issues: bool,

    /// Clean discussions
    #[arg(long)]
    pub clean_discussions: bool,

    /// Close open pull requests
    #[arg(long)]
    pub clean_prs: bool,

    /// Clean labels
    #[arg(long)]
    pub clean_labels: bool,
}

impl CleanSelection {
    /// Selected types, as given.
    pub fn options(&self) -> CleanupOptions {
        CleanupOptions {
            issues: self.clean_issues,
            discussions: self.clean_discussions,
            pull_requests: self.clean_prs,
            labels: self.clean_labels,
        }
    }
}

/// Arguments for `hydrate`.
#[derive(Args, Debug, Clone)]
pub struct HydrateArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    /// Create issues from issues.json
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set,
          num_args = 0..=1, default_missing_value = "true")]
    pub issues: bool,

    /// Create discussions from discussions.json
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set,
          num_args = 0..=1, default_missing_value = "true")]
    pub discussions: bool,

    /// Create pull requests from prs.json
    #[arg(long, value_name = "BOOL", default_value_t = true, action = ArgAction::Set,
          num_args = 0..=1, default_missing_value = "true")]
    pub prs: bool,

    /// Show what would be done without making changes
    #[arg(long)]
    pub dry_run: bool,

    /// Clean every content type before hydrating
    #[arg(long)]
    pub clean: bool,

    #[command(flatten)]
    pub clean_selection: CleanSelection,

    /// Preservation rules for cleanup (default: <config-path>/preserve.json if present)
    #[arg(long, value_name = "FILE")]
    pub preserve_config: Option<PathBuf>,

    /// Add created content to this existing project board
    #[arg(long, value_name = "NUMBER", conflicts_with = "new_project")]
    pub project: Option<u64>,

    /// Create a project board with this title and add created content to it
    #[arg(long, value_name = "TITLE")]
    pub new_project: Option<String>,
}

impl HydrateArgs {
    /// Content sections to create.
    pub fn sections(&self) -> Sections {
        Sections {
            issues: self.issues,
            discussions: self.discussions,
            pull_requests: self.prs,
        }
    }

    /// Cleanup to run before hydration; nothing selected means no cleanup.
    pub fn cleanup_options(&self) -> CleanupOptions {
        if self.clean {
            CleanupOptions::all()
        } else {
            self.clean_selection.options()
        }
    }

    pub fn project_target(&self) -> Option<ProjectTarget> {
        match (&self.project, &self.new_project) {
            (Some(number), _) => Some(ProjectTarget::Existing(*number)),
            (None, Some(title)) => Some(ProjectTarget::New(title.clone())),
            (None, None) => None,
        }
    }
}

/// Arguments for `clean`.
#[derive(Args, Debug, Clone)]
pub struct CleanArgs {
    #[command(flatten)]
    pub repo: RepoArgs,

    #[command(flatten)]
    pub selection: CleanSelection,

    /// Show what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,

    /// Preservation rules (default: <config-path>/preserve.json if present)
    #[arg(long, value_name = "FILE")]
    pub preserve_config: Option<PathBuf>,
}

impl CleanArgs {
    /// Selected types; nothing selected means everything.
    pub fn cleanup_options(&self) -> CleanupOptions {
        let options = self.selection.options();
        if options.any() {
            options
        } else {
            CleanupOptions::all()
        }
    }
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    fn hydrate_args(args: &[&str]) -> HydrateArgs {
        match parse(args).command {
            Command::Hydrate(args) => args,
            other => panic!("expected hydrate, got {:?}", other),
        }
    }

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sections_default_to_true() {
        let args = hydrate_args(&["gh-hydrate", "hydrate", "--owner", "o", "--repo", "r"]);
        assert_eq!(args.sections(), Sections::all());
        assert_eq!(args.repo.config_path, PathBuf::from("config"));
        assert_eq!(args.repo.api_url, DEFAULT_API_BASE);
        assert!(!args.cleanup_options().any());
        assert!(args.project_target().is_none());
    }

    #[test]
    fn sections_can_be_disabled() {
        let args = hydrate_args(&[
            "gh-hydrate",
            "hydrate",
            "--discussions=false",
            "--prs",
            "false",
            "--issues",
        ]);
        assert!(args.issues);
        assert!(!args.discussions);
        assert!(!args.prs);
    }

    #[test]
    fn clean_flag_selects_everything() {
        let args = hydrate_args(&["gh-hydrate", "hydrate", "--clean"]);
        assert_eq!(args.cleanup_options(), CleanupOptions::all());

        let args = hydrate_args(&["gh-hydrate", "hydrate", "--clean-labels"]);
        let options = args.cleanup_options();
        assert!(options.labels);
        assert!(!options.issues);
    }

    #[test]
    fn clean_command_defaults_to_all_types() {
        let cli = parse(&["gh-hydrate", "clean", "--owner", "o", "--repo", "r"]);
        let Command::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert_eq!(args.cleanup_options(), CleanupOptions::all());
    }

    #[test]
    fn project_flags() {
        let args = hydrate_args(&["gh-hydrate", "hydrate", "--project", "3"]);
        assert_eq!(args.project_target(), Some(ProjectTarget::Existing(3)));

        let args = hydrate_args(&["gh-hydrate", "hydrate", "--new-project", "Demo"]);
        assert_eq!(args.project_target(), Some(ProjectTarget::New("Demo".into())));

        assert!(Cli::try_parse_from([
            "gh-hydrate",
            "hydrate",
            "--project",
            "3",
            "--new-project",
            "Demo"
        ])
        .is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["gh-hydrate", "hydrate", "--debug", "-q"]);
        assert!(cli.debug);
        assert!(cli.quiet);
    }
}
