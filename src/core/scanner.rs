//! Literal scanner.
//!
//! Finds string literals passed as the first argument of widget constructors
//! (`new Label("...")`) and text setters (`x.setText("...")`), filtered down
//! to text that plausibly needs translation.

use std::{collections::HashSet, ops::Range, sync::LazyLock};

use regex::Regex;

use super::lexer::{Token, TokenKind};
use crate::utils::contains_alphabetic;

/// Widget types whose first constructor argument is display text.
pub const TEXT_CONSTRUCTORS: &[&str] = &[
    "Label",
    "Button",
    "Tab",
    "Menu",
    "MenuItem",
    "CheckBox",
    "ToggleButton",
    "RadioButton",
    "TitledPane",
    "Tooltip",
    "Text",
    "CheckMenuItem",
    "RadioMenuItem",
];

/// Setters whose first argument is display text.
pub const TEXT_SETTERS: &[&str] = &[
    "setText",
    "setTitle",
    "setPromptText",
    "setHeaderText",
    "setContentText",
];

/// Theme identifiers and font families that must stay untranslated.
pub const NON_TRANSLATABLE_TEXTS: &[&str] = &[
    "Modena",
    "Caspian",
    "Arial",
    "Helvetica",
    "Verdana",
    "Tahoma",
    "Consolas",
    "Monospaced",
    "Monospace",
    "SansSerif",
    "Serif",
    "System",
    "Segoe UI",
    "Courier New",
    "Times New Roman",
];

const SENTINEL_PREFIXES: &[&str] = &["<", "%", "{", "$", "#", "@", "-fx"];

static PATH_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(/|://|^www\.|\.(png|jpe?g|gif|svg|bmp|ico|css|fxml|xml|json|properties|txt|csv|html?|java|class|jar|wav|mp3|mp4|pdb|cif|obj|stl|dat)$)",
    )
    .unwrap()
});

const METACHARACTERS: &[char] = &['\\', '[', ']', '^', '|'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Constructor,
    Setter,
}

/// The set of call shapes known to carry user-visible text.
#[derive(Debug, Clone)]
pub struct CallShapes {
    constructors: HashSet<String>,
    setters: HashSet<String>,
}

impl Default for CallShapes {
    fn default() -> Self {
        Self {
            constructors: TEXT_CONSTRUCTORS.iter().map(|s| s.to_string()).collect(),
            setters: TEXT_SETTERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CallShapes {
    pub fn with_extra(constructors: &[String], setters: &[String]) -> Self {
        let mut shapes = Self::default();
        shapes.constructors.extend(constructors.iter().cloned());
        shapes.setters.extend(setters.iter().cloned());
        shapes
    }
}

/// Why a literal was not considered translatable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooShort,
    Acronym,
    Sentinel,
    PathLike,
    Metacharacter,
    Denylisted,
    NoLetters,
}

#[derive(Debug, Clone, Default)]
pub struct TextFilter {
    ignore_texts: HashSet<String>,
}

impl TextFilter {
    pub fn new(ignore_texts: &[String]) -> Self {
        Self {
            ignore_texts: ignore_texts.iter().cloned().collect(),
        }
    }

    /// First exclusion rule the text trips, in evaluation order.
    pub fn reject_reason(&self, text: &str) -> Option<RejectReason> {
        let len = text.chars().count();
        if len < 2 {
            return Some(RejectReason::TooShort);
        }
        if len < 5 && !text.chars().any(char::is_lowercase) {
            return Some(RejectReason::Acronym);
        }
        if SENTINEL_PREFIXES.iter().any(|p| text.starts_with(p)) {
            return Some(RejectReason::Sentinel);
        }
        if PATH_MARKER_REGEX.is_match(text) {
            return Some(RejectReason::PathLike);
        }
        if text.contains(METACHARACTERS) {
            return Some(RejectReason::Metacharacter);
        }
        if NON_TRANSLATABLE_TEXTS.contains(&text) || self.ignore_texts.contains(text) {
            return Some(RejectReason::Denylisted);
        }
        if !contains_alphabetic(text) {
            return Some(RejectReason::NoLetters);
        }
        None
    }

    pub fn accepts(&self, text: &str) -> bool {
        self.reject_reason(text).is_none()
    }
}

/// A string literal at a known text-carrying call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSite {
    pub file_path: String,
    /// Call shape that matched, e.g. `new Label` or `.setText`.
    pub shape: String,
    /// Literal contents without the quotes, exactly as written.
    pub text: String,
    /// Byte range of the literal token, quotes included.
    pub span: Range<usize>,
    /// Index of the literal in the token stream it was scanned from.
    pub token_index: usize,
    /// Innermost named type declaration around the site.
    pub enclosing_type: Option<String>,
}

pub fn scan_literals(
    file_path: &str,
    source: &str,
    tokens: &[Token],
    shapes: &CallShapes,
    filter: &TextFilter,
) -> Vec<LiteralSite> {
    let mut sites = Vec::new();
    let mut types = TypeTracker::default();

    for (idx, token) in tokens.iter().enumerate() {
        types.observe(source, tokens, idx);

        if token.kind != TokenKind::Str {
            continue;
        }
        let Some(shape) = match_call_shape(source, tokens, idx, shapes) else {
            continue;
        };
        let Some(text) = token.str_contents(source) else {
            continue;
        };
        if !filter.accepts(text) {
            continue;
        }
        sites.push(LiteralSite {
            file_path: file_path.to_string(),
            shape,
            text: text.to_string(),
            span: token.span.clone(),
            token_index: idx,
            enclosing_type: types.current(),
        });
    }

    sites
}

/// Matches `<callee>(` immediately before the literal at `idx`.
fn match_call_shape(
    source: &str,
    tokens: &[Token],
    idx: usize,
    shapes: &CallShapes,
) -> Option<String> {
    if idx < 2 || !tokens[idx - 1].is_punct('(') {
        return None;
    }
    let mut callee = idx - 2;

    // `new Foo<>(` / `new Foo<Bar>(`
    if tokens[callee].is_punct('>') {
        callee = skip_type_arguments(tokens, callee)?;
    }
    let name_token = &tokens[callee];
    if !name_token.is_ident() {
        return None;
    }
    let name = name_token.text(source);

    if callee >= 1 && tokens[callee - 1].is_punct('.') && shapes.setters.contains(name) {
        return Some(format!(".{}", name));
    }

    if shapes.constructors.contains(name) {
        let mut start = callee;
        while start >= 2 && tokens[start - 1].is_punct('.') && tokens[start - 2].is_ident() {
            start -= 2;
        }
        if start >= 1 && tokens[start - 1].is_keyword(source, "new") {
            return Some(format!("new {}", name));
        }
    }

    None
}

/// Walks back from a closing `>` to the identifier before the matching `<`.
fn skip_type_arguments(tokens: &[Token], close: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = close;
    loop {
        if tokens[i].is_punct('>') {
            depth += 1;
        } else if tokens[i].is_punct('<') {
            depth -= 1;
            if depth == 0 {
                return i.checked_sub(1);
            }
        }
        i = i.checked_sub(1)?;
    }
}

/// Follows `class`/`interface`/`enum`/`record` declarations through braces.
#[derive(Debug, Default)]
struct TypeTracker {
    pending: Option<String>,
    scopes: Vec<Option<String>>,
}

impl TypeTracker {
    fn observe(&mut self, source: &str, tokens: &[Token], idx: usize) {
        let token = &tokens[idx];
        match token.kind {
            TokenKind::Punct('{') => self.scopes.push(self.pending.take()),
            TokenKind::Punct('}') => {
                self.scopes.pop();
            }
            TokenKind::Ident => {
                let word = token.text(source);
                let declares = matches!(word, "class" | "interface" | "enum" | "record");
                let is_member_access = idx >= 1 && tokens[idx - 1].is_punct('.');
                if declares
                    && !is_member_access
                    && let Some(name) = tokens.get(idx + 1).filter(|t| t.is_ident())
                {
                    self.pending = Some(name.text(source).to_string());
                }
            }
            _ => {}
        }
    }

    fn current(&self) -> Option<String> {
        self.scopes.iter().rev().find_map(|s| s.clone())
    }
}
