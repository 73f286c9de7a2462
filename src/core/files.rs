use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::Pattern;
use walkdir::WalkDir;

/// Result of scanning source roots.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted, so key assignment visits files in a stable order.
    pub files: Vec<PathBuf>,
    pub skipped_count: usize,
}

/// Which Java files a phase looks at.
#[derive(Debug, Clone, Copy)]
pub enum FileSelection<'a> {
    /// Every `.java` file.
    AllJava,
    /// `.java` files whose stem ends with one of these role suffixes.
    Roles(&'a [String]),
}

pub fn scan_source_files(
    root_paths: &[PathBuf],
    ignore_patterns: &[String],
    selection: FileSelection<'_>,
) -> ScanResult {
    let mut files: BTreeSet<PathBuf> = BTreeSet::new();
    let mut skipped_count = 0;

    let patterns: Vec<Pattern> = ignore_patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(err) => {
                tracing::warn!(pattern = %p, error = %err, "invalid ignore pattern");
                None
            }
        })
        .collect();

    for root in root_paths {
        if !root.exists() {
            tracing::warn!(path = %root.display(), "source root does not exist");
            continue;
        }
        for entry in WalkDir::new(root) {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    skipped_count += 1;
                    tracing::warn!(error = %err, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_selected(path, selection) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

fn is_selected(path: &Path, selection: FileSelection<'_>) -> bool {
    if path.extension().and_then(|e| e.to_str()) != Some("java") {
        return false;
    }
    match selection {
        FileSelection::AllJava => true,
        FileSelection::Roles(suffixes) => path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| suffixes.iter().any(|suffix| stem.ends_with(suffix.as_str()))),
    }
}
