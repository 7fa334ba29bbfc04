//! clean command - Delete existing repository content

use anyhow::Result;

use super::{block_on, client, preserve_policy, report_outcome, repository, token};
use crate::cli::args::CleanArgs;
use crate::engine::{self, Context};
use crate::ui::output::{self, Verbosity};

/// Delete (or preview deleting) the selected content types.
pub fn clean(ctx: &Context, args: &CleanArgs) -> Result<()> {
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);
    let ctx = Context {
        dry_run: args.dry_run,
        ..ctx.clone()
    };

    let (owner, repo) = repository(&args.repo)?;
    let options = args.cleanup_options();
    let policy = preserve_policy(&args.repo.config_path, args.preserve_config.as_deref())?;
    if policy.is_none() {
        output::debug("no preservation rules; every listed item is eligible", verbosity);
    }
    let forge = client(&args.repo, &owner, &repo, token(&args.repo, true)?);

    block_on(&ctx, async {
        let report = engine::cleanup(&forge, &ctx, &options, policy.as_ref()).await?;
        output::print(output::format_cleanup(&report, ctx.dry_run), verbosity);
        report_outcome("Cleanup", report.into_result(), verbosity);
        Ok::<_, anyhow::Error>(())
    })
}
