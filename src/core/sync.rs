//! Catalog maintenance across the locales of one module.
//!
//! Two operations share one planning step so that they can never undo each
//! other: auditing (drop keys no source references) and back-filling (give
//! every locale every key some locale defines). The back-fill union is taken
//! over the keys that survive the audit, and each catalog then receives a
//! single [`CatalogDelta`].

use std::collections::{BTreeSet, HashSet};

use anyhow::{Context, Result};

use super::{
    catalog::{CatalogDelta, DeltaOutcome, LocaleCatalog, NewEntry},
    context::{ModuleCatalogs, RunContext},
    files::FileSelection,
    fs::FileError,
    usage::{UsageKeySet, collect_usage},
};

/// Value written when no locale has text for a key.
pub fn placeholder(key: &str) -> String {
    format!("???{}???", key)
}

/// What a module-level pass should do.
#[derive(Debug, Clone, Copy)]
pub struct SyncPlan<'a> {
    /// Remove keys the usage set does not retain.
    pub audit: Option<&'a UsageKeySet>,
    /// Add keys missing from a locale but present in another.
    pub backfill: bool,
}

/// Entries each catalog is missing relative to the union of `defined`.
///
/// Values are probed in the primary locale first, then in the others in
/// order; `defined[i]` is the key set considered present in `catalogs[i]`.
pub fn plan_backfill(
    catalogs: &[LocaleCatalog],
    defined: &[HashSet<String>],
    primary_locale: &str,
) -> Vec<Vec<NewEntry>> {
    let union: BTreeSet<&String> = defined.iter().flatten().collect();

    let mut probe_order: Vec<usize> = (0..catalogs.len()).collect();
    probe_order.sort_by_key(|&i| catalogs[i].locale != primary_locale);

    catalogs
        .iter()
        .zip(defined)
        .map(|(catalog, keys)| {
            let pending = catalog.locale != primary_locale;
            union
                .iter()
                .filter(|key| !keys.contains(key.as_str()))
                .map(|key| {
                    let value = probe_order
                        .iter()
                        .filter(|&&j| defined[j].contains(key.as_str()))
                        .find_map(|&j| catalogs[j].get(key))
                        .map(str::to_string)
                        .unwrap_or_else(|| placeholder(key));
                    NewEntry {
                        key: key.to_string(),
                        value,
                        pending,
                    }
                })
                .collect()
        })
        .collect()
}

/// One delta per catalog of the module, in catalog order.
pub fn plan_module(module: &ModuleCatalogs, plan: SyncPlan<'_>) -> Vec<CatalogDelta> {
    let defined: Vec<HashSet<String>> = module.catalogs.iter().map(|c| c.keys()).collect();

    let (kept, retain): (Vec<HashSet<String>>, Vec<Option<HashSet<String>>>) = match plan.audit {
        Some(usage) => defined
            .iter()
            .map(|keys| {
                let retained = usage.retained(keys);
                (retained.clone(), Some(retained))
            })
            .unzip(),
        None => (defined.clone(), vec![None; defined.len()]),
    };

    let additions = if plan.backfill {
        plan_backfill(&module.catalogs, &kept, &module.primary_locale)
    } else {
        vec![Vec::new(); module.catalogs.len()]
    };

    retain
        .into_iter()
        .zip(additions)
        .map(|(retain, additions)| CatalogDelta {
            retain,
            additions,
            ..Default::default()
        })
        .collect()
}

/// Outcome for one catalog after a module pass.
#[derive(Debug, Clone)]
pub struct CatalogChange {
    pub path: std::path::PathBuf,
    pub locale: String,
    pub outcome: DeltaOutcome,
    /// Keys removed by the audit, sorted.
    pub removed_keys: Vec<String>,
    /// Keys added by the back-fill, in insertion order.
    pub added_keys: Vec<String>,
}

/// Applies the plan to every catalog of the module; writes when `apply` is set.
///
/// A write failure aborts the module; catalogs already written stay written.
pub fn sync_module(
    module: &mut ModuleCatalogs,
    plan: SyncPlan<'_>,
    apply: bool,
) -> Result<Vec<CatalogChange>, FileError> {
    let deltas = plan_module(module, plan);
    let mut changes = Vec::new();

    for (catalog, delta) in module.catalogs.iter_mut().zip(deltas) {
        let before = catalog.keys();
        let outcome = catalog.apply(&delta);
        if !outcome.is_change() {
            continue;
        }
        let after = catalog.keys();
        let mut removed_keys: Vec<String> = before.difference(&after).cloned().collect();
        removed_keys.sort();
        let added_keys = delta
            .additions
            .iter()
            .map(|e| e.key.clone())
            .filter(|k| !before.contains(k))
            .collect();

        if apply {
            catalog.save()?;
        }
        changes.push(CatalogChange {
            path: catalog.path.clone(),
            locale: catalog.locale.clone(),
            outcome,
            removed_keys,
            added_keys,
        });
    }

    Ok(changes)
}

#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub files_scanned: usize,
    pub catalogs_checked: usize,
    pub unreadable: Vec<FileError>,
    /// No key was removed because some source could not be read.
    pub audit_skipped: bool,
    pub changes: Vec<CatalogChange>,
}

/// Audits the catalogs of every module against source usage, back-filling
/// missing locales as well when `backfill` is set.
///
/// The audit only runs when every source file was read: keys referenced
/// from an unreadable file are unknown and must not be deleted.
pub fn run_sync(ctx: &RunContext, backfill: bool, apply: bool) -> Result<SyncOutcome> {
    let files = ctx.source_files(FileSelection::AllJava);
    let scan = collect_usage(&files.files, ctx.lookup_receivers());
    let audit_skipped = !scan.unreadable.is_empty();
    if audit_skipped {
        tracing::warn!(
            unreadable = scan.unreadable.len(),
            "key usage is incomplete, not removing unused keys"
        );
    }
    let plan = SyncPlan {
        audit: (!audit_skipped).then_some(&scan.usage),
        backfill,
    };

    let mut outcome = SyncOutcome {
        files_scanned: scan.files_scanned,
        unreadable: scan.unreadable,
        audit_skipped,
        ..Default::default()
    };

    for spec in &ctx.modules {
        let mut module = ctx.load_module(spec)?;
        outcome.catalogs_checked += module.catalogs.len();
        let changes = sync_module(&mut module, plan, apply)
            .with_context(|| format!("Failed to update catalogs of module '{}'", spec.prefix))?;
        for change in &changes {
            tracing::info!(
                path = %change.path.display(),
                removed = change.outcome.removed,
                added = change.outcome.added,
                "catalog updated"
            );
        }
        outcome.changes.extend(changes);
    }

    Ok(outcome)
}
