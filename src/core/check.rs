//! Read-only report of what `extract`, `clean` and `sync` would act on.

use std::collections::{BTreeSet, HashSet};

use anyhow::Result;

use super::{
    context::{ModuleCatalogs, RunContext},
    files::FileSelection,
    fs::{FileError, read_text},
    lexer::{Token, tokenize},
    rewrite::{SiteTemplate, classify},
    scanner::{LiteralSite, scan_literals},
    usage::{UsageKeySet, collect_usage},
};
use crate::{
    issues::{
        CatalogContext, HardcodedTextIssue, Issue, MissingKeyIssue, SourceContext,
        SourceLocation, UnreadableFileIssue, UnsupportedTemplateIssue, UnusedKeyIssue,
    },
    utils::LineIndex,
};

#[derive(Debug, Default)]
pub struct CheckOutcome {
    pub issues: Vec<Issue>,
    pub source_files_checked: usize,
    pub catalog_files_checked: usize,
}

pub fn check(ctx: &RunContext) -> Result<CheckOutcome> {
    let mut outcome = CheckOutcome::default();

    for path in ctx.role_files().files {
        match read_text(&path) {
            Ok(source) => {
                let display_path = ctx.display_path(&path);
                outcome.issues.extend(hardcoded_issues(ctx, &display_path, &source));
            }
            Err(err) => outcome.issues.push(unreadable_issue(ctx, &err)),
        }
    }

    let files = ctx.source_files(FileSelection::AllJava);
    let scan = collect_usage(&files.files, ctx.lookup_receivers());
    outcome.source_files_checked = scan.files_scanned;
    for err in &scan.unreadable {
        let issue = unreadable_issue(ctx, err);
        if !outcome.issues.contains(&issue) {
            outcome.issues.push(issue);
        }
    }

    // keys referenced only from an unreadable file are unknown
    let usage = scan.unreadable.is_empty().then_some(&scan.usage);
    for module in ctx.load_modules()? {
        outcome.catalog_files_checked += module
            .catalogs
            .iter()
            .filter(|c| !c.lines.is_empty())
            .count();
        if let Some(usage) = usage {
            outcome.issues.extend(unused_key_issues(ctx, &module, usage));
        }
        outcome.issues.extend(missing_key_issues(ctx, &module, usage));
    }

    outcome.issues.sort();
    Ok(outcome)
}

/// A skipped source file, as reported to the user.
pub fn unreadable_issue(ctx: &RunContext, err: &FileError) -> Issue {
    let error = match err {
        FileError::Read { source, .. } | FileError::Write { source, .. } => source.to_string(),
    };
    Issue::UnreadableFile(UnreadableFileIssue {
        file_path: ctx.display_path(err.path()),
        error,
    })
}

/// Sites the rewriter would replace, and sites it would have to leave alone.
pub fn hardcoded_issues(ctx: &RunContext, display_path: &str, source: &str) -> Vec<Issue> {
    let tokens = tokenize(source);
    let sites = scan_literals(
        display_path,
        source,
        &tokens,
        &ctx.call_shapes(),
        &ctx.text_filter(),
    );
    let index = LineIndex::new(source);
    let separators = &ctx.config.template_separators;

    sites
        .iter()
        .map(|site| {
            let (line, col) = index.line_col(source, site.span.start);
            let context = SourceContext::new(
                SourceLocation::new(display_path, line, col),
                index.line_text(source, line),
            );
            let text = site.text.clone();
            if is_rewritable(source, &tokens, site, separators) {
                Issue::HardcodedText(HardcodedTextIssue { context, text })
            } else {
                Issue::UnsupportedTemplate(UnsupportedTemplateIssue { context, text })
            }
        })
        .collect()
}

fn is_rewritable(
    source: &str,
    tokens: &[Token],
    site: &LiteralSite,
    separators: &[String],
) -> bool {
    let braces = site.text.contains(['{', '}']);
    match classify(source, tokens, site.token_index) {
        SiteTemplate::Simple => true,
        SiteTemplate::OnePlaceholder { .. } => !braces,
        SiteTemplate::TwoPlaceholders { separator, .. } => {
            let sep = tokens[separator].str_contents(source).unwrap_or_default();
            !braces && separators.iter().any(|s| s == sep)
        }
        SiteTemplate::Unsupported => false,
    }
}

fn unused_key_issues(
    ctx: &RunContext,
    module: &ModuleCatalogs,
    usage: &UsageKeySet,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for catalog in &module.catalogs {
        let file_path = ctx.display_path(&catalog.path);
        let mut seen: HashSet<&str> = HashSet::new();
        for (line, key, value) in catalog.entry_lines() {
            if !seen.insert(key) || usage.retains(key) {
                continue;
            }
            issues.push(Issue::UnusedKey(UnusedKeyIssue {
                context: CatalogContext::new(&file_path, line, key, value),
                locale: catalog.locale.clone(),
            }));
        }
    }
    issues
}

/// Retained keys some locales of the module lack, located where they are defined.
///
/// Without `usage` every defined key counts as retained.
fn missing_key_issues(
    ctx: &RunContext,
    module: &ModuleCatalogs,
    usage: Option<&UsageKeySet>,
) -> Vec<Issue> {
    let defined: Vec<HashSet<String>> = module.catalogs.iter().map(|c| c.keys()).collect();
    let union: BTreeSet<&String> = defined.iter().flatten().collect();

    // primary first, then the others in catalog order
    let mut probe: Vec<usize> = (0..module.catalogs.len()).collect();
    probe.sort_by_key(|&i| module.catalogs[i].locale != module.primary_locale);

    let mut issues = Vec::new();
    for key in union {
        if usage.is_some_and(|usage| !usage.retains(key)) {
            continue;
        }
        let missing_locales: Vec<String> = module
            .catalogs
            .iter()
            .zip(&defined)
            .filter(|(_, keys)| !keys.contains(key.as_str()))
            .map(|(catalog, _)| catalog.locale.clone())
            .collect();
        if missing_locales.is_empty() {
            continue;
        }
        let Some((catalog, line, value)) = probe.iter().find_map(|&i| {
            let catalog = &module.catalogs[i];
            catalog
                .entry_lines()
                .find(|(_, k, _)| *k == key.as_str())
                .map(|(line, _, value)| (catalog, line, value))
        }) else {
            continue;
        };
        let file_path = ctx.display_path(&catalog.path);
        issues.push(Issue::MissingKey(MissingKeyIssue {
            context: CatalogContext::new(file_path, line, key.as_str(), value),
            missing_locales,
        }));
    }
    issues
}
