use anyhow::Result;

use super::super::args::SyncCommand;
use super::{
    CatalogKeys, CommandResult, CommandSummary, SyncSummary,
    helper::{finish, unreadable_issues},
};
use crate::core::{RunContext, sync::run_sync};

/// Removes unused keys, then back-fills keys missing from some locales.
pub fn sync(cmd: SyncCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    run_catalog_pass(&ctx, true, cmd.apply, CommandSummary::Sync)
}

pub(super) fn run_catalog_pass(
    ctx: &RunContext,
    backfill: bool,
    apply: bool,
    wrap: fn(SyncSummary) -> CommandSummary,
) -> Result<CommandResult> {
    let outcome = run_sync(ctx, backfill, apply)?;

    let summary = SyncSummary {
        catalogs: outcome
            .changes
            .iter()
            .map(|change| CatalogKeys {
                file_path: ctx.display_path(&change.path),
                removed: change.removed_keys.clone(),
                added: change.added_keys.clone(),
            })
            .collect(),
        unread_sources: if outcome.audit_skipped {
            outcome.unreadable.len()
        } else {
            0
        },
        is_apply: apply,
    };
    let pending = if apply {
        0
    } else {
        summary.removed_count() + summary.added_count()
    };

    Ok(finish(
        wrap(summary),
        unreadable_issues(ctx, &outcome.unreadable),
        pending,
        outcome.files_scanned,
        outcome.catalogs_checked,
    ))
}
