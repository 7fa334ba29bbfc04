//! hydrate command - Populate a repository from JSON configuration

use anyhow::Result;

use super::{block_on, client, preserve_policy, report_outcome, repository, token};
use crate::cli::args::HydrateArgs;
use crate::core::config;
use crate::core::errors::HydrateError;
use crate::engine::{self, Context, HydrateOptions};
use crate::ui::output::{self, Verbosity};

/// Run cleanup (if requested), then hydration.
///
/// Configuration and argument problems fail before any API call. Per-item
/// failures are reported and do not fail the command.
pub fn hydrate(ctx: &Context, args: &HydrateArgs) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let ctx = Context {
        dry_run: args.dry_run,
        ..ctx.clone()
    };

    let (owner, repo) = repository(&args.repo)?;
    let sections = args.sections();
    let content =
        config::load_content(&args.repo.config_path, &sections).map_err(HydrateError::from)?;

    let cleanup_options = args.cleanup_options();
    let policy = if cleanup_options.any() {
        preserve_policy(&args.repo.config_path, args.preserve_config.as_deref())?
    } else {
        None
    };

    let options = HydrateOptions {
        sections,
        project: args.project_target(),
    };
    let pure_preview = ctx.dry_run && !cleanup_options.any() && options.project.is_none();
    let forge = client(&args.repo, &owner, &repo, token(&args.repo, !pure_preview)?);

    output::debug(
        format!(
            "{}/{}: {} label(s), {} issue(s), {} discussion(s), {} pull request(s) declared",
            owner,
            repo,
            content.labels.len(),
            content.issues.len(),
            content.discussions.len(),
            content.pull_requests.len()
        ),
        verbosity,
    );

    block_on(&ctx, async {
        if cleanup_options.any() {
            let report = engine::cleanup(&forge, &ctx, &cleanup_options, policy.as_ref()).await?;
            output::print(output::format_cleanup(&report, ctx.dry_run), verbosity);
            report_outcome("Cleanup", report.into_result(), verbosity);
        }

        let report = engine::hydrate(&forge, &ctx, &content, &options).await?;
        output::print(output::format_hydration(&report, ctx.dry_run), verbosity);
        report_outcome("Hydration", report.into_result(), verbosity);
        Ok::<_, anyhow::Error>(())
    })
}
