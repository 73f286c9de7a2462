use super::{CommandResult, CommandSummary};
use crate::{
    core::{RunContext, check::unreadable_issue, fs::FileError},
    issues::{Issue, Report, Severity},
};

/// Sorts the issues and counts what makes the command fail.
///
/// `pending` is the amount of work a dry-run left undone; it is 0 after
/// `--apply` and for commands that never write.
pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    pending: usize,
    source_files_checked: usize,
    catalog_files_checked: usize,
) -> CommandResult {
    issues.sort();

    let error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count()
        + pending;

    CommandResult {
        summary,
        error_count,
        issues,
        source_files_checked,
        catalog_files_checked,
    }
}

pub fn unreadable_issues(ctx: &RunContext, errors: &[FileError]) -> Vec<Issue> {
    errors.iter().map(|err| unreadable_issue(ctx, err)).collect()
}
