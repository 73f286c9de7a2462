//! Report formatting and printing utilities.
//!
//! Issues are printed in cargo style; command summaries (what was, or would
//! be, rewritten) follow the same layout. Every function has a `_to`
//! variant taking a writer so output can be tested.

use std::io::{self, Write};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use super::commands::{
    CatalogKeys, CommandResult, CommandSummary, ExtractSummary, InitSummary, RenameSummary,
    SyncSummary,
};
use crate::config::CONFIG_FILE_NAME;
use crate::core::extract::EditPreview;
use crate::issues::{Issue, Report, Severity};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Print issues in cargo-style format, sorted by location.
pub fn report_to<W: Write>(issues: &[Issue], writer: &mut W) {
    if issues.is_empty() {
        return;
    }

    let mut sorted = issues.to_vec();
    sorted.sort();

    let max_line_width = calculate_max_line_width(&sorted);

    for issue in &sorted {
        print_issue(issue, writer, max_line_width);
    }

    print_summary(&sorted, writer);
}

/// Print a success message when nothing was found.
pub fn print_success_to<W: Write>(
    source_files: usize,
    catalog_files: usize,
    tail: &str,
    writer: &mut W,
) {
    let checked = if catalog_files == 0 {
        format!("Checked {} source {}", source_files, plural(source_files, "file"))
    } else {
        format!(
            "Checked {} source {}, {} catalog {}",
            source_files,
            plural(source_files, "file"),
            catalog_files,
            plural(catalog_files, "file")
        )
    };
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!("{} - {}", checked, tail).green()
    );
}

pub fn print(result: &CommandResult, verbose: bool) {
    let mut out = io::stdout().lock();
    print_to(result, verbose, &mut out);
}

pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Check => {
            report_to(&result.issues, writer);
            if result.issues.is_empty() {
                print_success_to(
                    result.source_files_checked,
                    result.catalog_files_checked,
                    "no issues found",
                    writer,
                );
            }
        }
        CommandSummary::Extract(summary) => {
            report_to(&result.issues, writer);
            print_extract(result, summary, verbose, writer);
        }
        CommandSummary::Clean(summary) | CommandSummary::Sync(summary) => {
            report_to(&result.issues, writer);
            let backfill = matches!(result.summary, CommandSummary::Sync(_));
            print_sync(result, summary, backfill, writer);
        }
        CommandSummary::Rename(summary) => {
            report_to(&result.issues, writer);
            print_rename(result, summary, writer);
        }
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

// ============================================================
// Issues
// ============================================================

fn print_issue<W: Write>(issue: &Issue, writer: &mut W, max_line_width: usize) {
    let loc = issue.location();
    let severity = issue.severity();
    let severity_str = match severity {
        Severity::Error => "error".bold().red(),
        Severity::Warning => "warning".bold().yellow(),
    };

    let _ = writeln!(
        writer,
        "{}: \"{}\"  {}",
        severity_str,
        issue.message(),
        issue.rule().to_string().dimmed().cyan()
    );

    // Clickable location: --> path:line:col
    if loc.line() == 0 {
        let _ = writeln!(writer, "  {} {}", "-->".blue(), loc.file_path());
    } else {
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            loc.file_path(),
            loc.line(),
            loc.col()
        );
    }

    if let Some(source_line) = loc.source_line() {
        let caret = match severity {
            Severity::Error => "^".red(),
            Severity::Warning => "^".yellow(),
        };
        print_source_context(
            writer,
            loc.line(),
            loc.col(),
            source_line,
            caret,
            max_line_width,
        );
    }

    if let Some(details) = issue.details() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "note:".bold(),
            details,
            width = max_line_width
        );
    }

    if let Some(hint) = issue.hint() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "hint:".bold().cyan(),
            hint,
            width = max_line_width
        );
    }

    let _ = writeln!(writer); // Empty line between issues
}

/// The `|` gutter, the numbered source line, and a caret under `col` (1-based).
fn print_source_context<W: Write>(
    writer: &mut W,
    line: usize,
    col: usize,
    source_line: &str,
    caret: colored::ColoredString,
    width: usize,
) {
    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);
    let _ = writeln!(
        writer,
        "{:>width$} {} {}",
        line.to_string().blue(),
        "|".blue(),
        source_line,
        width = width
    );

    let prefix: String = source_line.chars().take(col.saturating_sub(1)).collect();
    let caret_padding = UnicodeWidthStr::width(prefix.as_str());
    let _ = writeln!(
        writer,
        "{:>width$} {} {:>padding$}{}",
        "",
        "|".blue(),
        "",
        caret,
        width = width,
        padding = caret_padding
    );
}

fn print_summary<W: Write>(issues: &[Issue], writer: &mut W) {
    let total_errors = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();
    let total_warnings = issues.len() - total_errors;

    let _ = writeln!(
        writer,
        "{} {} {} ({} {}, {} {})\n",
        FAILURE_MARK.red(),
        issues.len(),
        plural(issues.len(), "problem"),
        total_errors,
        plural(total_errors, "error").red(),
        total_warnings,
        plural(total_warnings, "warning").yellow()
    );
}

fn calculate_max_line_width(issues: &[Issue]) -> usize {
    issues
        .iter()
        .map(|i| i.location().line())
        .max()
        .map(|n| n.to_string().len())
        .unwrap_or(1)
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

// ============================================================
// Command summaries
// ============================================================

fn print_extract<W: Write>(
    result: &CommandResult,
    summary: &ExtractSummary,
    verbose: bool,
    writer: &mut W,
) {
    let edit_count = summary.edit_count();
    if edit_count == 0 {
        print_success_to(
            result.source_files_checked,
            0,
            "no hardcoded text to extract",
            writer,
        );
        return;
    }

    // dry-run always previews; --apply lists the edits only with -v
    if !summary.is_apply || verbose {
        for file in &summary.files {
            print_edits(&file.file_path, &file.edits, writer);
        }
    }
    print_catalog_keys(&summary.catalogs, writer);

    let verb = if summary.is_apply {
        "Rewrote".green().bold()
    } else {
        "Would rewrite".yellow().bold()
    };
    let _ = writeln!(
        writer,
        "{} {} call site(s) in {} file(s), {} key(s) for {} catalog(s).",
        verb,
        edit_count,
        summary.files.len(),
        summary.key_count(),
        summary.catalogs.len()
    );
    let _ = writeln!(writer, "  - simple: {}", summary.simple_count);
    let _ = writeln!(writer, "  - templated: {}", summary.templated_count);
    if !summary.is_apply {
        let _ = writeln!(
            writer,
            "Run with {} to rewrite these call sites.",
            "--apply".cyan()
        );
    }
}

fn print_edits<W: Write>(file_path: &str, edits: &[EditPreview], writer: &mut W) {
    let _ = writeln!(writer, "{}:", file_path.blue());
    let width = edits
        .iter()
        .map(|e| e.context.line().to_string().len())
        .max()
        .unwrap_or(1)
        + 2;

    for edit in edits {
        let ctx = &edit.context;
        let _ = writeln!(
            writer,
            "  {} {}:{}:{}",
            "-->".blue(),
            ctx.file_path(),
            ctx.line(),
            ctx.col()
        );
        print_source_context(
            writer,
            ctx.line(),
            ctx.col(),
            &ctx.source_line,
            "^".green(),
            width,
        );
        let _ = writeln!(
            writer,
            "{:>width$} {} {} {}",
            "",
            "=".blue(),
            "becomes:".bold(),
            edit.replacement,
            width = width
        );
    }
    let _ = writeln!(writer);
}

fn print_catalog_keys<W: Write>(catalogs: &[CatalogKeys], writer: &mut W) {
    for catalog in catalogs {
        if catalog.removed.is_empty() && catalog.added.is_empty() {
            continue;
        }
        let _ = writeln!(writer, "{}:", catalog.file_path.blue());
        for key in &catalog.removed {
            let _ = writeln!(writer, "  {} {}", "-".red(), key);
        }
        for key in &catalog.added {
            let _ = writeln!(writer, "  {} {}", "+".green(), key);
        }
        let _ = writeln!(writer);
    }
}

fn print_sync<W: Write>(
    result: &CommandResult,
    summary: &SyncSummary,
    backfill: bool,
    writer: &mut W,
) {
    let removed = summary.removed_count();
    let added = summary.added_count();
    if summary.unread_sources > 0 {
        let _ = writeln!(
            writer,
            "{} unused keys were kept, {} source file(s) could not be read",
            "warning:".bold().yellow(),
            summary.unread_sources
        );
    }
    if removed + added == 0 {
        if summary.unread_sources > 0 {
            return;
        }
        let tail = if backfill {
            "catalogs are in sync"
        } else {
            "no unused keys"
        };
        print_success_to(
            result.source_files_checked,
            result.catalog_files_checked,
            tail,
            writer,
        );
        return;
    }

    print_catalog_keys(&summary.catalogs, writer);

    let file_count = summary.catalogs.len();
    match (summary.is_apply, backfill) {
        (true, false) => {
            let _ = writeln!(
                writer,
                "{} {} key(s) in {} file(s).",
                "Deleted".green().bold(),
                removed,
                file_count
            );
        }
        (true, true) => {
            let _ = writeln!(
                writer,
                "{} {} key(s) and added {} key(s) in {} file(s).",
                "Deleted".green().bold(),
                removed,
                added,
                file_count
            );
        }
        (false, false) => {
            let _ = writeln!(
                writer,
                "{} {} key(s) in {} file(s).",
                "Would delete".yellow().bold(),
                removed,
                file_count
            );
            let _ = writeln!(writer, "Run with {} to delete these keys.", "--apply".cyan());
        }
        (false, true) => {
            let _ = writeln!(
                writer,
                "{} {} key(s) and add {} key(s) in {} file(s).",
                "Would delete".yellow().bold(),
                removed,
                added,
                file_count
            );
            let _ = writeln!(
                writer,
                "Run with {} to update these catalogs.",
                "--apply".cyan()
            );
        }
    }
}

fn print_rename<W: Write>(result: &CommandResult, summary: &RenameSummary, writer: &mut W) {
    let references = summary.reference_count();
    let entries = summary.entry_count();
    if references + entries == 0 {
        let tail = format!("no keys under \"{}\"", summary.from);
        print_success_to(result.source_files_checked, 0, &tail, writer);
        return;
    }

    for file in summary.sources.iter().chain(&summary.catalogs) {
        let _ = writeln!(writer, "  {} {}  {}", "~".cyan(), file.file_path, file.count);
    }
    let _ = writeln!(writer);

    let verb = if summary.is_apply {
        "Renamed".green().bold()
    } else {
        "Would rename".yellow().bold()
    };
    let _ = writeln!(
        writer,
        "{} \"{}\" to \"{}\": {} reference(s) in {} source file(s), {} entry(ies) in {} catalog(s).",
        verb,
        summary.from,
        summary.to,
        references,
        summary.sources.len(),
        entries,
        summary.catalogs.len()
    );
    if !summary.is_apply {
        let _ = writeln!(writer, "Run with {} to rename these keys.", "--apply".cyan());
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
    }
}

// ============================================================
// Tests
// ============================================================
