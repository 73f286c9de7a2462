//! Dispatches a parsed command to its handler.
//!
//! Handlers return a [`CommandResult`] describing what was found and done;
//! printing it is left to `report`. `Err` is reserved for failures that stop
//! the command (config errors, failed writes).

use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, check::check, clean::clean, extract::extract, init::init, rename::rename,
        sync::sync,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Clean(cmd)) => clean(cmd),
        Some(Command::Sync(cmd)) => sync(cmd),
        Some(Command::Rename(cmd)) => rename(cmd),
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Init) => init(),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
