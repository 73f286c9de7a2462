//! The extraction pass: hardcoded text in, lookup calls and catalog entries out.
//!
//! Files are visited in path order and sites in offset order, so the keys a
//! run mints (and their collision suffixes) do not depend on directory
//! iteration order. Every key minted in a file is appended to the primary
//! catalog of the module that owns the file.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::{
    catalog::{CatalogDelta, EXTRACT_HEADER, LocaleCatalog, NewEntry},
    context::RunContext,
    fs::{FileError, read_text, write_atomic},
    keys::{KeyAllocator, KeyRegistry},
    lexer::tokenize,
    rewrite::{MintedKey, apply_edits, plan_rewrites},
    scanner::scan_literals,
};
use crate::{
    issues::{SourceContext, SourceLocation, UnsupportedTemplateIssue},
    utils::LineIndex,
};

/// One planned replacement, located for display.
#[derive(Debug, Clone)]
pub struct EditPreview {
    pub context: SourceContext,
    pub replacement: String,
}

#[derive(Debug, Clone)]
pub struct FileRewrite {
    pub path: PathBuf,
    pub edits: Vec<EditPreview>,
    pub minted: Vec<MintedKey>,
}

#[derive(Debug, Clone)]
pub struct CatalogAppend {
    pub path: PathBuf,
    pub keys: Vec<String>,
}

#[derive(Debug, Default)]
pub struct ExtractOutcome {
    pub files_scanned: usize,
    pub rewrites: Vec<FileRewrite>,
    pub simple: usize,
    pub templated: usize,
    pub unsupported: Vec<UnsupportedTemplateIssue>,
    pub unreadable: Vec<FileError>,
    pub catalogs: Vec<CatalogAppend>,
}

impl ExtractOutcome {
    pub fn edit_count(&self) -> usize {
        self.rewrites.iter().map(|r| r.edits.len()).sum()
    }

    pub fn key_count(&self) -> usize {
        self.catalogs.iter().map(|c| c.keys.len()).sum()
    }
}

/// Rewrites hardcoded text in role files; writes sources and catalogs when `apply` is set.
///
/// An unreadable source is skipped. Catalogs are saved before any source is
/// rewritten, so a failed write never leaves source referring to keys no
/// catalog defines.
pub fn extract(ctx: &RunContext, apply: bool) -> Result<ExtractOutcome> {
    let primary = &ctx.primary_locale;
    let mut primaries = ctx
        .modules
        .iter()
        .map(|spec| LocaleCatalog::load(&spec.catalog_path(primary), primary))
        .collect::<Result<Vec<_>, _>>()?;

    let registry = KeyRegistry::seeded(primaries.iter().flat_map(|c| c.keys()));
    tracing::info!(keys = registry.len(), "seeded key registry");
    let mut allocator = KeyAllocator::new(registry, ctx.known_keys(), &ctx.config.role_suffixes);

    let shapes = ctx.call_shapes();
    let filter = ctx.text_filter();
    let options = ctx.rewrite_options();

    let mut outcome = ExtractOutcome::default();
    let mut additions: Vec<Vec<NewEntry>> = vec![Vec::new(); primaries.len()];
    let mut rewritten: Vec<(PathBuf, String)> = Vec::new();

    for path in ctx.role_files().files {
        let source = match read_text(&path) {
            Ok(source) => source,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable source");
                outcome.unreadable.push(err);
                continue;
            }
        };
        outcome.files_scanned += 1;

        let display_path = ctx.display_path(&path);
        let tokens = tokenize(&source);
        let sites = scan_literals(&display_path, &source, &tokens, &shapes, &filter);
        if sites.is_empty() {
            continue;
        }

        let plan = plan_rewrites(&source, &tokens, &sites, &mut allocator, &options);
        let index = LineIndex::new(&source);
        let locate = |offset: usize| {
            let (line, col) = index.line_col(&source, offset);
            SourceContext::new(
                SourceLocation::new(&display_path, line, col),
                index.line_text(&source, line),
            )
        };

        outcome.simple += plan.simple;
        outcome.templated += plan.templated;
        outcome
            .unsupported
            .extend(plan.unsupported.iter().map(|site| UnsupportedTemplateIssue {
                context: locate(site.span.start),
                text: site.text.clone(),
            }));
        if plan.edits.is_empty() {
            continue;
        }

        if apply {
            rewritten.push((path.clone(), apply_edits(&source, &plan.edits)));
        }

        let module = ctx.module_index_for(&path);
        additions[module].extend(
            plan.minted
                .iter()
                .map(|minted| NewEntry::new(&minted.key, &minted.text)),
        );
        outcome.rewrites.push(FileRewrite {
            edits: plan
                .edits
                .iter()
                .map(|edit| EditPreview {
                    context: locate(edit.span.start),
                    replacement: edit.replacement.clone(),
                })
                .collect(),
            minted: plan.minted,
            path,
        });
    }

    for (catalog, entries) in primaries.iter_mut().zip(additions) {
        if entries.is_empty() {
            continue;
        }
        let before = catalog.keys();
        let delta = CatalogDelta {
            header: Some(EXTRACT_HEADER.to_string()),
            additions: entries,
            ..Default::default()
        };
        let result = catalog.apply(&delta);
        if apply {
            catalog.save()?;
        }
        let mut keys: Vec<String> = Vec::new();
        for entry in &delta.additions {
            if !before.contains(&entry.key) && !keys.contains(&entry.key) {
                keys.push(entry.key.clone());
            }
        }
        tracing::info!(path = %catalog.path.display(), added = result.added, "catalog extended");
        outcome.catalogs.push(CatalogAppend {
            path: catalog.path.clone(),
            keys,
        });
    }

    for (path, content) in rewritten {
        let display_path = ctx.display_path(&path);
        write_atomic(&path, &content)
            .with_context(|| format!("Failed to rewrite {}", display_path))?;
        tracing::info!(path = %display_path, "rewrote call sites");
    }

    Ok(outcome)
}
