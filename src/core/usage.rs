//! Keys referenced by source code.
//!
//! A reference is the first argument of a lookup call such as
//! `I18n.getInstance().get("menu.file", "File")`. When that argument is a
//! literal concatenated with something computed at runtime
//! (`get("sky.planet." + name)`) the literal is recorded as a prefix root.

use std::{
    collections::HashSet,
    ops::Range,
    path::{Path, PathBuf},
};

use super::{
    fs::{FileError, read_text},
    lexer::{Token, TokenKind, tokenize},
};

/// Receivers whose `.get(...)` is a catalog lookup.
pub const DEFAULT_LOOKUP_RECEIVERS: &[&str] =
    &["I18n.getInstance()", "I18nManager.getInstance()", "i18n"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupCall {
    pub key: String,
    /// Byte range of the key literal, quotes included.
    pub span: Range<usize>,
    /// The literal is only the start of a runtime-built key.
    pub is_prefix: bool,
}

pub fn find_lookup_calls(source: &str, tokens: &[Token], receivers: &[String]) -> Vec<LookupCall> {
    let mut calls = Vec::new();

    for (idx, token) in tokens.iter().enumerate() {
        if !token.is_keyword(source, "get") || idx < 2 || !tokens[idx - 1].is_punct('.') {
            continue;
        }
        let (Some(open), Some(arg)) = (tokens.get(idx + 1), tokens.get(idx + 2)) else {
            continue;
        };
        if !open.is_punct('(') || arg.kind != TokenKind::Str {
            continue;
        }
        let Some(receiver) = receiver_before(source, tokens, idx - 1) else {
            continue;
        };
        if !receivers.iter().any(|r| *r == receiver) {
            continue;
        }
        let Some(key) = arg.str_contents(source) else {
            continue;
        };
        let is_prefix = tokens.get(idx + 3).is_some_and(|t| t.is_punct('+'));
        calls.push(LookupCall {
            key: key.to_string(),
            span: arg.span.clone(),
            is_prefix,
        });
    }

    calls
}

/// Receiver text ending at the `.` at `dot`: `name` or `Type.method()`.
fn receiver_before(source: &str, tokens: &[Token], dot: usize) -> Option<String> {
    let last = tokens.get(dot.checked_sub(1)?)?;
    if last.is_ident() {
        return Some(last.text(source).to_string());
    }
    if !last.is_punct(')') || dot < 5 {
        return None;
    }
    let (open, method, sep, owner) = (
        &tokens[dot - 2],
        &tokens[dot - 3],
        &tokens[dot - 4],
        &tokens[dot - 5],
    );
    if open.is_punct('(') && method.is_ident() && sep.is_punct('.') && owner.is_ident() {
        Some(format!("{}.{}()", owner.text(source), method.text(source)))
    } else {
        None
    }
}

/// Keys and prefix roots referenced across all scanned source.
#[derive(Debug, Clone, Default)]
pub struct UsageKeySet {
    pub keys: HashSet<String>,
    pub prefixes: HashSet<String>,
}

impl UsageKeySet {
    pub fn record(&mut self, calls: &[LookupCall]) {
        for call in calls {
            if !call.is_prefix {
                self.keys.insert(call.key.clone());
            } else if !call.key.is_empty() {
                self.prefixes.insert(call.key.clone());
            }
        }
    }

    /// Whether a defined key must survive an audit.
    ///
    /// Retained when used exactly, when a used key extends it with a further
    /// segment, or when it extends a prefix root.
    pub fn retains(&self, defined: &str) -> bool {
        if self.keys.contains(defined) {
            return true;
        }
        let extended = format!("{}.", defined);
        self.keys.iter().any(|used| used.starts_with(&extended))
            || self.prefixes.iter().any(|prefix| defined.starts_with(prefix.as_str()))
    }

    pub fn retained<'a, I>(&self, defined: I) -> HashSet<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        defined
            .into_iter()
            .filter(|key| self.retains(key))
            .cloned()
            .collect()
    }
}

/// Lookup references gathered from a set of source files.
#[derive(Debug, Default)]
pub struct UsageScan {
    pub usage: UsageKeySet,
    pub files_scanned: usize,
    /// Files that could not be read; their references are unknown.
    pub unreadable: Vec<FileError>,
}

pub fn collect_usage(files: &[PathBuf], receivers: &[String]) -> UsageScan {
    let mut scan = UsageScan::default();
    for path in files {
        match read_text(path) {
            Ok(source) => {
                let calls = find_lookup_calls(&source, &tokenize(&source), receivers);
                scan.usage.record(&calls);
                scan.files_scanned += 1;
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable source");
                scan.unreadable.push(err);
            }
        }
    }
    tracing::info!(
        files = scan.files_scanned,
        keys = scan.usage.keys.len(),
        prefixes = scan.usage.prefixes.len(),
        "collected key usage"
    );
    scan
}

/// Lookup calls of one file, for callers that also need the source text.
pub fn lookup_calls_in(
    path: &Path,
    receivers: &[String],
) -> Result<(String, Vec<LookupCall>), FileError> {
    let source = read_text(path)?;
    let calls = find_lookup_calls(&source, &tokenize(&source), receivers);
    Ok((source, calls))
}
