pub mod check;
pub mod clean;
mod command_result;
pub mod extract;
pub mod helper;
pub mod init;
pub mod rename;
pub mod sync;

pub use command_result::*;

use crate::core::extract::EditPreview;

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Extract(ExtractSummary),
    Clean(SyncSummary),
    Sync(SyncSummary),
    Rename(RenameSummary),
    Init(InitSummary),
}

/// Planned or applied replacements in one source file.
#[derive(Debug)]
pub struct FileEdits {
    pub file_path: String,
    pub edits: Vec<EditPreview>,
}

/// Keys added to, or removed from, one catalog.
#[derive(Debug)]
pub struct CatalogKeys {
    pub file_path: String,
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

#[derive(Debug)]
pub struct ExtractSummary {
    pub files: Vec<FileEdits>,
    pub catalogs: Vec<CatalogKeys>,
    pub simple_count: usize,
    pub templated_count: usize,
    pub is_apply: bool,
}

impl ExtractSummary {
    pub fn edit_count(&self) -> usize {
        self.files.iter().map(|f| f.edits.len()).sum()
    }

    pub fn key_count(&self) -> usize {
        self.catalogs.iter().map(|c| c.added.len()).sum()
    }
}

/// Shared by `clean` and `sync`; `clean` never adds keys.
#[derive(Debug)]
pub struct SyncSummary {
    pub catalogs: Vec<CatalogKeys>,
    /// Unreadable sources that kept the audit from removing any key.
    pub unread_sources: usize,
    pub is_apply: bool,
}

impl SyncSummary {
    pub fn removed_count(&self) -> usize {
        self.catalogs.iter().map(|c| c.removed.len()).sum()
    }

    pub fn added_count(&self) -> usize {
        self.catalogs.iter().map(|c| c.added.len()).sum()
    }
}

/// Number of renamed occurrences in one file.
#[derive(Debug)]
pub struct RenamedFile {
    pub file_path: String,
    pub count: usize,
}

#[derive(Debug)]
pub struct RenameSummary {
    pub from: String,
    pub to: String,
    pub sources: Vec<RenamedFile>,
    pub catalogs: Vec<RenamedFile>,
    pub is_apply: bool,
}

impl RenameSummary {
    pub fn reference_count(&self) -> usize {
        self.sources.iter().map(|f| f.count).sum()
    }

    pub fn entry_count(&self) -> usize {
        self.catalogs.iter().map(|f| f.count).sum()
    }
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
}
