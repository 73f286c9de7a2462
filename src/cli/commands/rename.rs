use anyhow::Result;

use super::super::args::RenameCommand;
use super::{CommandResult, CommandSummary, RenameSummary, RenamedFile, helper::finish};
use crate::core::{
    RunContext,
    rename::{KeyRename, rename_keys},
};

pub fn rename(cmd: RenameCommand) -> Result<CommandResult> {
    let rename = KeyRename::new(&cmd.from, &cmd.to)?;
    let ctx = RunContext::new(&cmd.common)?;
    let apply = cmd.apply;
    let outcome = rename_keys(&ctx, &rename, apply)?;

    let summary = RenameSummary {
        sources: outcome
            .sources
            .iter()
            .map(|source| RenamedFile {
                file_path: ctx.display_path(&source.path),
                count: source.references,
            })
            .collect(),
        catalogs: outcome
            .catalogs
            .iter()
            .map(|catalog| RenamedFile {
                file_path: ctx.display_path(&catalog.path),
                count: catalog.outcome.renamed,
            })
            .collect(),
        from: rename.from,
        to: rename.to,
        is_apply: apply,
    };
    let pending = if apply {
        0
    } else {
        summary.reference_count() + summary.entry_count()
    };

    Ok(finish(
        CommandSummary::Rename(summary),
        Vec::new(),
        pending,
        outcome.files_scanned,
        0,
    ))
}
