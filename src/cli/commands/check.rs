use anyhow::Result;

use super::super::args::CheckCommand;
use super::{CommandResult, CommandSummary, helper::finish};
use crate::{
    core::{RunContext, check::check as check_project},
    issues::{Report, Severity},
};

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    let outcome = check_project(&ctx)?;

    // every reported problem fails the run, warnings included
    let warnings = outcome
        .issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count();

    Ok(finish(
        CommandSummary::Check,
        outcome.issues,
        warnings,
        outcome.source_files_checked,
        outcome.catalog_files_checked,
    ))
}
