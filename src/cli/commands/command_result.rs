use super::super::exit_status::ExitStatus;
use super::CommandSummary;
use crate::issues::Issue;

/// Result of running a locsync command.
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Problems that make the command fail: every issue for `check`, pending
    /// changes for a dry-run, error-severity issues for all commands.
    pub error_count: usize,
    /// Issues found along the way (unsupported templates, unreadable files)
    /// or, for `check`, the full report.
    pub issues: Vec<Issue>,
    /// Number of Java source files that were read.
    pub source_files_checked: usize,
    /// Number of `.properties` catalogs that were read. 0 if none were.
    pub catalog_files_checked: usize,
}

impl CommandResult {
    pub fn exit_status(&self) -> ExitStatus {
        if self.error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}
