//! Lookup key synthesis.
//!
//! Keys have the shape `generated.<namespace>.<slug>` where the namespace is
//! the enclosing type name minus its role suffix and the slug is a short,
//! dot-joined form of the text. Uniqueness within a run is guaranteed by the
//! [`KeyRegistry`] that every call threads through.

use std::collections::{HashMap, HashSet};

/// Prefix of every key minted by the synthesizer.
pub const GENERATED_PREFIX: &str = "generated";

/// Maximum length of the text-derived part of a key.
pub const SLUG_MAX_LEN: usize = 20;

/// Namespace used for literals outside any named type.
pub const DEFAULT_NAMESPACE: &str = "common";

/// Keys allocated so far in one run.
///
/// Seeded from the primary catalogs, then only ever grows.
#[derive(Debug, Clone, Default)]
pub struct KeyRegistry {
    keys: HashSet<String>,
}

impl KeyRegistry {
    pub fn seeded<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.keys.insert(key.into())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Sanitized, lowercased, dot-joined form of `text`, at most [`SLUG_MAX_LEN`] chars.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    let joined = kept.split_whitespace().collect::<Vec<_>>().join(".");
    let truncated: String = joined.chars().take(SLUG_MAX_LEN).collect();
    let slug = truncated.trim_end_matches('.');

    if slug.is_empty() {
        "text".to_string()
    } else {
        slug.to_string()
    }
}

/// Lowercased type name with the longest matching role suffix removed.
pub fn namespace_for(type_name: Option<&str>, role_suffixes: &[String]) -> String {
    let Some(name) = type_name else {
        return DEFAULT_NAMESPACE.to_string();
    };

    let mut suffixes: Vec<&String> = role_suffixes.iter().collect();
    suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));

    let stem = suffixes
        .iter()
        .find_map(|suffix| name.strip_suffix(suffix.as_str()))
        .filter(|stem| !stem.is_empty())
        .unwrap_or(name);

    stem.to_lowercase()
}

/// Allocates a key for `text` under `namespace`, registering it.
///
/// Collisions get the first free `.1`, `.2`, ... suffix.
pub fn synthesize(namespace: &str, text: &str, registry: &mut KeyRegistry) -> String {
    let candidate = format!("{}.{}.{}", GENERATED_PREFIX, namespace, slugify(text));

    let mut key = candidate.clone();
    let mut suffix = 0usize;
    while registry.contains(&key) {
        suffix += 1;
        key = format!("{}.{}", candidate, suffix);
    }

    registry.insert(key.clone());
    key
}

/// Chooses keys for literal texts: pre-registered mappings first, then synthesis.
#[derive(Debug)]
pub struct KeyAllocator<'a> {
    registry: KeyRegistry,
    known_keys: &'a HashMap<String, String>,
    role_suffixes: &'a [String],
}

impl<'a> KeyAllocator<'a> {
    pub fn new(
        registry: KeyRegistry,
        known_keys: &'a HashMap<String, String>,
        role_suffixes: &'a [String],
    ) -> Self {
        Self {
            registry,
            known_keys,
            role_suffixes,
        }
    }

    pub fn allocate(&mut self, enclosing_type: Option<&str>, text: &str) -> String {
        self.allocate_with_slug(enclosing_type, text, text)
    }

    /// Like [`allocate`](Self::allocate), but the slug comes from `slug_source`.
    ///
    /// Used for message patterns, whose `{0}` placeholders should not leak into keys.
    pub fn allocate_with_slug(
        &mut self,
        enclosing_type: Option<&str>,
        text: &str,
        slug_source: &str,
    ) -> String {
        if let Some(key) = self.known_keys.get(text) {
            self.registry.insert(key.clone());
            return key.clone();
        }
        let namespace = namespace_for(enclosing_type, self.role_suffixes);
        synthesize(&namespace, slug_source, &mut self.registry)
    }

    pub fn registry(&self) -> &KeyRegistry {
        &self.registry
    }
}
