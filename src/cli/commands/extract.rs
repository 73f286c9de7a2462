use anyhow::Result;

use super::super::args::ExtractCommand;
use super::{
    CatalogKeys, CommandResult, CommandSummary, ExtractSummary, FileEdits,
    helper::{finish, unreadable_issues},
};
use crate::{
    core::{RunContext, extract::extract as extract_project},
    issues::Issue,
};

pub fn extract(cmd: ExtractCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let apply = cmd.apply;
    let outcome = extract_project(&ctx, apply)?;

    let summary = ExtractSummary {
        files: outcome
            .rewrites
            .iter()
            .map(|rewrite| FileEdits {
                file_path: ctx.display_path(&rewrite.path),
                edits: rewrite.edits.clone(),
            })
            .collect(),
        catalogs: outcome
            .catalogs
            .iter()
            .map(|catalog| CatalogKeys {
                file_path: ctx.display_path(&catalog.path),
                removed: Vec::new(),
                added: catalog.keys.clone(),
            })
            .collect(),
        simple_count: outcome.simple,
        templated_count: outcome.templated,
        is_apply: apply,
    };
    let pending = if apply { 0 } else { summary.edit_count() };

    let mut issues = unreadable_issues(&ctx, &outcome.unreadable);
    issues.extend(outcome.unsupported.into_iter().map(Issue::UnsupportedTemplate));

    Ok(finish(
        CommandSummary::Extract(summary),
        issues,
        pending,
        outcome.files_scanned,
        0,
    ))
}
