//! Locale catalogs (`<prefix>_<locale>.properties`).
//!
//! A catalog is kept as its original lines so that comments, blank lines and
//! every entry nobody touched are written back byte for byte. All mutations
//! go through [`LocaleCatalog::apply`], which takes one [`CatalogDelta`] and
//! changes the in-memory lines in a single step; [`LocaleCatalog::save`]
//! then replaces the file atomically.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use super::fs::{FileError, read_text_if_exists, write_atomic};

pub const CATALOG_EXTENSION: &str = "properties";

/// Comment written before a batch of freshly extracted keys.
pub const EXTRACT_HEADER: &str = "# Extracted by locsync";

/// Comment written before each entry copied into a non-primary locale.
pub const PENDING_MARKER: &str = "# pending translation";

/// Language, then an optional region (`CN`, `419`) or script (`Latn`).
static LOCALE_TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z]{2,3}([_-]([A-Z]{2}|[0-9]{3}|[A-Z][a-z]{3}))?$").unwrap()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Comment,
    Entry { key: String, value: String },
    /// Anything else (continuation lines, separators other than `=`); kept verbatim.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLine {
    /// Line text including its terminator, if it had one.
    pub raw: String,
    pub kind: LineKind,
}

impl CatalogLine {
    pub fn parse(raw: &str) -> Self {
        let content = raw.trim_end_matches(['\n', '\r']);
        let trimmed = content.trim_start();
        let kind = if trimmed.is_empty() {
            LineKind::Blank
        } else if trimmed.starts_with('#') || trimmed.starts_with('!') {
            LineKind::Comment
        } else if let Some((key, value)) = trimmed.split_once('=') {
            LineKind::Entry {
                key: key.trim().to_string(),
                value: value.trim_start().to_string(),
            }
        } else {
            LineKind::Other
        };
        Self {
            raw: raw.to_string(),
            kind,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match &self.kind {
            LineKind::Entry { key, .. } => Some(key),
            _ => None,
        }
    }

    fn terminator(&self) -> &str {
        if self.raw.ends_with("\r\n") {
            "\r\n"
        } else if self.raw.ends_with('\n') {
            "\n"
        } else {
            ""
        }
    }

    /// Same line with a different key; indentation and everything after the key is kept.
    fn with_key(&self, new_key: &str) -> Self {
        let LineKind::Entry { key, value } = &self.kind else {
            return self.clone();
        };
        let indent = self.raw.len() - self.raw.trim_start().len();
        let rest = &self.raw[indent + key.len()..];
        Self {
            raw: format!("{}{}{}", &self.raw[..indent], new_key, rest),
            kind: LineKind::Entry {
                key: new_key.to_string(),
                value: value.clone(),
            },
        }
    }
}

/// An entry to add to a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub key: String,
    pub value: String,
    /// Precede the entry with [`PENDING_MARKER`].
    pub pending: bool,
}

impl NewEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            pending: false,
        }
    }

    pub fn pending(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            pending: true,
            ..Self::new(key, value)
        }
    }
}

/// Everything that should happen to one catalog in one write.
///
/// Applied in order: retain, rename, deduplicate, append.
#[derive(Debug, Clone, Default)]
pub struct CatalogDelta {
    /// Keep only these keys; `None` keeps every key.
    pub retain: Option<HashSet<String>>,
    /// Old key -> new key.
    pub renames: HashMap<String, String>,
    /// Comment line written once before the additions.
    pub header: Option<String>,
    pub additions: Vec<NewEntry>,
}

impl CatalogDelta {
    pub fn is_empty(&self) -> bool {
        self.retain.is_none() && self.renames.is_empty() && self.additions.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeltaOutcome {
    pub removed: usize,
    pub renamed: usize,
    pub deduplicated: usize,
    pub added: usize,
}

impl DeltaOutcome {
    pub fn is_change(&self) -> bool {
        self.removed + self.renamed + self.deduplicated + self.added > 0
    }
}

#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    pub path: PathBuf,
    pub locale: String,
    pub lines: Vec<CatalogLine>,
    original: String,
}

impl LocaleCatalog {
    /// Loads a catalog; a file that does not exist yet loads empty.
    pub fn load(path: &Path, locale: &str) -> Result<Self, FileError> {
        let content = read_text_if_exists(path)?.unwrap_or_default();
        Ok(Self::parse(path, locale, &content))
    }

    pub fn parse(path: &Path, locale: &str, content: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            locale: locale.to_string(),
            lines: content.split_inclusive('\n').map(CatalogLine::parse).collect(),
            original: content.to_string(),
        }
    }

    /// Entries in file order, duplicates included.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.lines.iter().filter_map(|line| match &line.kind {
            LineKind::Entry { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        })
    }

    /// Entries with their 1-based line numbers.
    pub fn entry_lines(&self) -> impl Iterator<Item = (usize, &str, &str)> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(idx, line)| match &line.kind {
                LineKind::Entry { key, value } => Some((idx + 1, key.as_str(), value.as_str())),
                _ => None,
            })
    }

    pub fn keys(&self) -> HashSet<String> {
        self.entries().map(|(key, _)| key.to_string()).collect()
    }

    /// Value of the first entry with `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn render(&self) -> String {
        self.lines.iter().map(|line| line.raw.as_str()).collect()
    }

    pub fn is_modified(&self) -> bool {
        self.render() != self.original
    }

    /// Drops entries whose key is not retained; all other lines stay as they are.
    pub fn reconcile(&mut self, retain: &HashSet<String>) -> usize {
        let before = self.lines.len();
        self.lines
            .retain(|line| line.key().is_none_or(|key| retain.contains(key)));
        before - self.lines.len()
    }

    /// Renames entries; an entry whose new key is already defined is dropped.
    pub fn rename(&mut self, renames: &HashMap<String, String>) -> usize {
        let existing = self.keys();
        let mut renamed = 0;
        let mut lines = Vec::with_capacity(self.lines.len());

        for line in self.lines.drain(..) {
            let Some(new_key) = line.key().and_then(|key| renames.get(key)) else {
                lines.push(line);
                continue;
            };
            renamed += 1;
            if !existing.contains(new_key) {
                lines.push(line.with_key(new_key));
            }
        }

        self.lines = lines;
        renamed
    }

    /// Keeps the first entry for each key, dropping later duplicates.
    pub fn deduplicate(&mut self) -> usize {
        let mut seen: HashSet<String> = HashSet::new();
        let before = self.lines.len();
        self.lines
            .retain(|line| line.key().is_none_or(|key| seen.insert(key.to_string())));
        before - self.lines.len()
    }

    /// Appends entries not already present, after an optional header comment.
    ///
    /// Existing lines are never touched except to terminate an unterminated last line.
    pub fn append(&mut self, header: Option<&str>, entries: &[NewEntry]) -> usize {
        let mut present = self.keys();
        let fresh: Vec<&NewEntry> = entries
            .iter()
            .filter(|entry| present.insert(entry.key.clone()))
            .collect();
        if fresh.is_empty() {
            return 0;
        }

        let newline = self.newline().to_string();
        if let Some(last) = self.lines.last_mut()
            && last.terminator().is_empty()
        {
            last.raw.push_str(&newline);
        }

        let mut push = |text: String| {
            self.lines.push(CatalogLine::parse(&format!("{}{}", text, newline)));
        };
        if let Some(header) = header {
            push(header.to_string());
        }
        for entry in &fresh {
            if entry.pending {
                push(PENDING_MARKER.to_string());
            }
            push(format!("{}={}", entry.key, escape_leading_whitespace(&entry.value)));
        }

        fresh.len()
    }

    pub fn apply(&mut self, delta: &CatalogDelta) -> DeltaOutcome {
        let removed = delta
            .retain
            .as_ref()
            .map_or(0, |retain| self.reconcile(retain));
        let renamed = if delta.renames.is_empty() {
            0
        } else {
            self.rename(&delta.renames)
        };
        let deduplicated = self.deduplicate();
        let added = self.append(delta.header.as_deref(), &delta.additions);

        DeltaOutcome {
            removed,
            renamed,
            deduplicated,
            added,
        }
    }

    /// Writes the catalog back if anything changed.
    pub fn save(&mut self) -> Result<bool, FileError> {
        if !self.is_modified() {
            return Ok(false);
        }
        let content = self.render();
        write_atomic(&self.path, &content)?;
        self.original = content;
        Ok(true)
    }

    fn newline(&self) -> &'static str {
        match self.lines.first() {
            Some(line) if line.raw.ends_with("\r\n") => "\r\n",
            _ => "\n",
        }
    }
}

/// Leading whitespace of a value is dropped by `.properties` readers unless escaped.
fn escape_leading_whitespace(value: &str) -> String {
    let rest = value.trim_start_matches([' ', '\t']);
    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value[..value.len() - rest.len()].chars() {
        escaped.push_str(if c == '\t' { "\\t" } else { "\\ " });
    }
    escaped.push_str(rest);
    escaped
}

pub fn catalog_path(dir: &Path, prefix: &str, locale: &str) -> PathBuf {
    dir.join(format!("{}_{}.{}", prefix, locale, CATALOG_EXTENSION))
}

/// Locale tag of a catalog file name following the `<prefix>_<locale>` convention.
pub fn locale_from_file_name(file_name: &str, prefix: &str) -> Option<String> {
    let stem = file_name.strip_suffix(&format!(".{}", CATALOG_EXTENSION))?;
    let tag = stem.strip_prefix(prefix)?.strip_prefix('_')?;
    LOCALE_TAG_REGEX.is_match(tag).then(|| tag.to_string())
}
