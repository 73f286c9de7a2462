//! Moving keys from one prefix to another.
//!
//! A rename touches two places that must agree afterwards: the key literals
//! of lookup calls in source, and the entry lines of every catalog of every
//! module. Catalog values are never touched.

use std::{collections::HashMap, path::PathBuf};

use anyhow::{Context, Result, bail};

use super::{
    catalog::{CatalogDelta, DeltaOutcome},
    context::RunContext,
    files::FileSelection,
    fs::{FileError, write_atomic},
    rewrite::{TextEdit, apply_edits},
    usage::{LookupCall, lookup_calls_in},
};

/// `from` and everything below it becomes `to`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRename {
    pub from: String,
    pub to: String,
}

impl KeyRename {
    pub fn new(from: &str, to: &str) -> Result<Self> {
        for (name, value) in [("from", from), ("to", to)] {
            if value.is_empty() {
                bail!("--{} must not be empty", name);
            }
            if value.starts_with('.') || value.ends_with('.') {
                bail!("--{} \"{}\" must not start or end with '.'", name, value);
            }
            if value
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '"' | '\\' | '=' | ':'))
            {
                bail!("--{} \"{}\" is not a valid key prefix", name, value);
            }
        }
        if from == to {
            bail!("--from and --to are the same prefix \"{}\"", from);
        }
        Ok(Self {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// New name for `key`, if it falls under `from`.
    pub fn apply(&self, key: &str) -> Option<String> {
        if key == self.from {
            return Some(self.to.clone());
        }
        let rest = key.strip_prefix(&self.from)?.strip_prefix('.')?;
        Some(format!("{}.{}", self.to, rest))
    }

    /// Edits replacing the key literal of each affected lookup call.
    ///
    /// Prefix roots such as `"dashboard.view."` move along with full keys.
    pub fn source_edits(&self, calls: &[LookupCall]) -> Vec<TextEdit> {
        calls
            .iter()
            .filter_map(|call| {
                let renamed = self.apply(&call.key)?;
                Some(TextEdit {
                    span: call.span.clone(),
                    replacement: format!("\"{}\"", renamed),
                })
            })
            .collect()
    }

    /// Old key -> new key for every affected key in `keys`.
    pub fn catalog_renames<'a, I>(&self, keys: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter()
            .filter_map(|key| Some((key.to_string(), self.apply(key)?)))
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RenamedSource {
    pub path: PathBuf,
    pub references: usize,
}

#[derive(Debug, Clone)]
pub struct RenamedCatalog {
    pub path: PathBuf,
    pub locale: String,
    pub outcome: DeltaOutcome,
}

#[derive(Debug, Default)]
pub struct RenameOutcome {
    pub files_scanned: usize,
    pub sources: Vec<RenamedSource>,
    pub catalogs: Vec<RenamedCatalog>,
}

impl RenameOutcome {
    pub fn reference_count(&self) -> usize {
        self.sources.iter().map(|s| s.references).sum()
    }

    pub fn entry_count(&self) -> usize {
        self.catalogs.iter().map(|c| c.outcome.renamed).sum()
    }
}

/// Renames keys in every source file and every catalog; writes when `apply` is set.
///
/// Every source is read before anything is written. If one cannot be read,
/// its references to the old keys are unknown, so nothing is renamed.
pub fn rename_keys(ctx: &RunContext, rename: &KeyRename, apply: bool) -> Result<RenameOutcome> {
    let mut outcome = RenameOutcome::default();

    let mut rewrites: Vec<(PathBuf, String, Vec<TextEdit>)> = Vec::new();
    let mut unreadable: Vec<FileError> = Vec::new();
    for path in ctx.source_files(FileSelection::AllJava).files {
        match lookup_calls_in(&path, ctx.lookup_receivers()) {
            Ok((source, calls)) => {
                outcome.files_scanned += 1;
                let edits = rename.source_edits(&calls);
                if !edits.is_empty() {
                    rewrites.push((path, source, edits));
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "unreadable source");
                unreadable.push(err);
            }
        }
    }
    if !unreadable.is_empty() {
        let paths: Vec<String> = unreadable
            .iter()
            .map(|err| format!("  {}", ctx.display_path(err.path())))
            .collect();
        bail!(
            "Cannot rename, {} source file(s) could not be read:\n{}\n\
             References to \"{}\" in them would be left behind.",
            unreadable.len(),
            paths.join("\n"),
            rename.from
        );
    }

    let mut modules = ctx.load_modules()?;
    for module in &mut modules {
        for catalog in &mut module.catalogs {
            let renames = rename.catalog_renames(catalog.entries().map(|(key, _)| key));
            if renames.is_empty() {
                continue;
            }
            let delta = CatalogDelta {
                renames,
                ..Default::default()
            };
            let result = catalog.apply(&delta);
            if apply {
                catalog.save()?;
            }
            tracing::info!(
                path = %catalog.path.display(),
                renamed = result.renamed,
                "catalog renamed"
            );
            outcome.catalogs.push(RenamedCatalog {
                path: catalog.path.clone(),
                locale: catalog.locale.clone(),
                outcome: result,
            });
        }
    }

    for (path, source, edits) in rewrites {
        if apply {
            write_atomic(&path, &apply_edits(&source, &edits))
                .with_context(|| format!("Failed to rewrite {}", ctx.display_path(&path)))?;
        }
        outcome.sources.push(RenamedSource {
            path,
            references: edits.len(),
        });
    }

    Ok(outcome)
}
