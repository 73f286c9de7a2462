use anyhow::Result;

use super::super::args::CleanCommand;
use super::{CommandResult, CommandSummary, sync::run_catalog_pass};
use crate::core::RunContext;

/// Removes keys no lookup call references; never adds keys.
pub fn clean(cmd: CleanCommand) -> Result<CommandResult> {
    let ctx = RunContext::new(&cmd.common)?;
    run_catalog_pass(&ctx, false, cmd.apply, CommandSummary::Clean)
}
