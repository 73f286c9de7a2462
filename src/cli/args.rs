//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `extract`: Rewrite hardcoded UI text into lookup calls and catalog entries
//! - `clean`: Remove catalog keys no lookup call references
//! - `sync`: `clean`, then back-fill keys missing from some locales
//! - `rename`: Move keys from one prefix to another in source and catalogs
//! - `check`: Report hardcoded text, unused keys and missing keys
//! - `init`: Write a default `.locsyncrc.json`
//!
//! Mutating commands are dry-run unless `--apply` is given.

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Extract(cmd)) => cmd.common.verbose,
            Some(Command::Clean(cmd)) => cmd.common.verbose,
            Some(Command::Sync(cmd)) => cmd.common.verbose,
            Some(Command::Rename(cmd)) => cmd.common.verbose,
            Some(Command::Check(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Directory to start the config search from (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Primary locale (overrides config file)
    #[arg(long)]
    pub primary_locale: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ExtractCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite sources and catalogs (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct CleanCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually delete keys (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct SyncCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually update catalogs (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct RenameCommand {
    /// Prefix to move keys away from, e.g. `dashboard`
    #[arg(long)]
    pub from: String,

    /// Prefix the keys move to, e.g. `mastercontrol`
    #[arg(long)]
    pub to: String,

    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually rewrite sources and catalogs (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace hardcoded UI text with catalog lookups and add the keys to the primary catalog
    Extract(ExtractCommand),
    /// Remove catalog keys that no lookup call references
    Clean(CleanCommand),
    /// Remove unused keys, then add keys missing from some locales
    Sync(SyncCommand),
    /// Rename keys under one prefix to another prefix
    Rename(RenameCommand),
    /// Report hardcoded text, unused keys and keys missing from some locales
    Check(CheckCommand),
    /// Initialize a new .locsyncrc.json configuration file
    Init,
}
