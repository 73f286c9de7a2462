//! Source rewriter.
//!
//! Turns each [`LiteralSite`] into a lookup through the runtime catalog:
//!
//! ```text
//! new Label("Ready")              -> new Label(I18n.getInstance().get("generated.x.ready", "Ready"))
//! new Label("Count: " + n)        -> new Label(MessageFormat.format(I18n...get("...", "Count: {0}"), n))
//! new Label("Pos: " + x + ", " + y) -> ...get("...", "Pos: {0}, {1}"), x, y)
//! ```
//!
//! Concatenations outside these shapes are left alone. Edits are recorded as
//! byte ranges and applied back to front, so identical text elsewhere in the
//! file is never touched.

use std::ops::Range;

use super::{
    keys::KeyAllocator,
    lexer::{Token, TokenKind, matching_close},
    scanner::LiteralSite,
};

pub const DEFAULT_LOOKUP_EXPRESSION: &str = "I18n.getInstance().get";
pub const DEFAULT_FORMAT_EXPRESSION: &str = "java.text.MessageFormat.format";

/// Middle literals accepted in `"a" + x + "<sep>" + y` templates.
pub const DEFAULT_TEMPLATE_SEPARATORS: &[&str] =
    &[", ", " / ", " x ", " of ", " - ", " to ", " : "];

#[derive(Debug, Clone)]
pub struct RewriteOptions {
    pub lookup_expression: String,
    pub format_expression: String,
    pub template_separators: Vec<String>,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        Self {
            lookup_expression: DEFAULT_LOOKUP_EXPRESSION.to_string(),
            format_expression: DEFAULT_FORMAT_EXPRESSION.to_string(),
            template_separators: DEFAULT_TEMPLATE_SEPARATORS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// How a literal site participates in its surrounding expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteTemplate {
    /// The literal stands alone.
    Simple,
    /// `"text" + operand`; token ranges of the operands.
    OnePlaceholder { operand: Range<usize> },
    /// `"a" + op1 + "sep" + op2`.
    TwoPlaceholders {
        first: Range<usize>,
        separator: usize,
        second: Range<usize>,
    },
    /// A concatenation this tool will not parameterize.
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub span: Range<usize>,
    pub replacement: String,
}

/// A key created during a run together with its default text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MintedKey {
    pub key: String,
    pub text: String,
    pub file_path: String,
}

#[derive(Debug, Clone, Default)]
pub struct RewritePlan {
    pub edits: Vec<TextEdit>,
    pub minted: Vec<MintedKey>,
    pub simple: usize,
    pub templated: usize,
    pub unsupported: Vec<LiteralSite>,
}

impl RewritePlan {
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }
}

pub fn classify(source: &str, tokens: &[Token], literal: usize) -> SiteTemplate {
    if !tokens.get(literal + 1).is_some_and(|t| t.is_punct('+')) {
        return SiteTemplate::Simple;
    }
    let Some(first_end) = operand_end(source, tokens, literal + 2) else {
        return SiteTemplate::Unsupported;
    };
    let first = literal + 2..first_end + 1;

    match tokens.get(first_end + 1) {
        Some(t) if is_argument_end(t) => SiteTemplate::OnePlaceholder { operand: first },
        Some(t) if t.is_punct('+') => {
            let separator = first_end + 2;
            let is_literal = tokens.get(separator).is_some_and(|t| t.kind == TokenKind::Str);
            let then_plus = tokens.get(separator + 1).is_some_and(|t| t.is_punct('+'));
            if !is_literal || !then_plus {
                return SiteTemplate::Unsupported;
            }
            let Some(second_end) = operand_end(source, tokens, separator + 2) else {
                return SiteTemplate::Unsupported;
            };
            if tokens.get(second_end + 1).is_some_and(is_argument_end) {
                SiteTemplate::TwoPlaceholders {
                    first,
                    separator,
                    second: separator + 2..second_end + 1,
                }
            } else {
                SiteTemplate::Unsupported
            }
        }
        _ => SiteTemplate::Unsupported,
    }
}

fn is_argument_end(token: &Token) -> bool {
    token.is_punct(')') || token.is_punct(',')
}

/// Index of the last token of the operand starting at `start`.
///
/// An operand is a primary (identifier, number, char, `(...)`) followed by
/// any number of `.name`, `(...)` and `[...]` suffixes.
fn operand_end(source: &str, tokens: &[Token], start: usize) -> Option<usize> {
    let first = tokens.get(start)?;
    let mut end = match first.kind {
        TokenKind::Ident if !first.is_keyword(source, "new") => start,
        TokenKind::Number | TokenKind::Char => start,
        TokenKind::Punct('(') => matching_close(tokens, start)?,
        _ => return None,
    };

    loop {
        match tokens.get(end + 1) {
            Some(t) if t.is_punct('(') || t.is_punct('[') => {
                end = matching_close(tokens, end + 1)?;
            }
            Some(t) if t.is_punct('.') => {
                if !tokens.get(end + 2).is_some_and(Token::is_ident) {
                    return None;
                }
                end += 2;
            }
            _ => return Some(end),
        }
    }
}

/// Doubles single quotes, which `MessageFormat` treats as quoting.
fn escape_pattern(text: &str) -> String {
    text.replace('\'', "''")
}

fn has_braces(text: &str) -> bool {
    text.contains(['{', '}'])
}

/// Plans the edits for one file. `sites` must be sorted by offset.
pub fn plan_rewrites(
    source: &str,
    tokens: &[Token],
    sites: &[LiteralSite],
    allocator: &mut KeyAllocator<'_>,
    options: &RewriteOptions,
) -> RewritePlan {
    let mut plan = RewritePlan::default();
    let mut covered_until = 0;

    for site in sites {
        if site.span.start < covered_until {
            continue;
        }
        let enclosing = site.enclosing_type.as_deref();
        let lookup = &options.lookup_expression;

        let edit = match classify(source, tokens, site.token_index) {
            SiteTemplate::Simple => {
                let key = allocator.allocate(enclosing, &site.text);
                plan.simple += 1;
                plan.minted.push(minted(&key, &site.text, site));
                TextEdit {
                    span: site.span.clone(),
                    replacement: format!("{}(\"{}\", \"{}\")", lookup, key, site.text),
                }
            }
            SiteTemplate::OnePlaceholder { operand } if !has_braces(&site.text) => {
                let pattern = format!("{}{{0}}", escape_pattern(&site.text));
                let key = allocator.allocate_with_slug(enclosing, &pattern, &site.text);
                plan.templated += 1;
                plan.minted.push(minted(&key, &pattern, site));
                TextEdit {
                    span: site.span.start..tokens[operand.end - 1].span.end,
                    replacement: format!(
                        "{}({}(\"{}\", \"{}\"), {})",
                        options.format_expression,
                        lookup,
                        key,
                        pattern,
                        token_text(source, tokens, &operand)
                    ),
                }
            }
            SiteTemplate::TwoPlaceholders {
                first,
                separator,
                second,
            } => {
                let sep = tokens[separator].str_contents(source).unwrap_or_default();
                let known = options.template_separators.iter().any(|s| s == sep);
                if !known || has_braces(&site.text) {
                    plan.unsupported.push(site.clone());
                    continue;
                }
                let pattern = format!(
                    "{}{{0}}{}{{1}}",
                    escape_pattern(&site.text),
                    escape_pattern(sep)
                );
                let slug_source = format!("{} {}", site.text, sep);
                let key = allocator.allocate_with_slug(enclosing, &pattern, &slug_source);
                plan.templated += 1;
                plan.minted.push(minted(&key, &pattern, site));
                TextEdit {
                    span: site.span.start..tokens[second.end - 1].span.end,
                    replacement: format!(
                        "{}({}(\"{}\", \"{}\"), {}, {})",
                        options.format_expression,
                        lookup,
                        key,
                        pattern,
                        token_text(source, tokens, &first),
                        token_text(source, tokens, &second)
                    ),
                }
            }
            SiteTemplate::OnePlaceholder { .. } | SiteTemplate::Unsupported => {
                plan.unsupported.push(site.clone());
                continue;
            }
        };

        covered_until = edit.span.end;
        plan.edits.push(edit);
    }

    plan
}

fn minted(key: &str, text: &str, site: &LiteralSite) -> MintedKey {
    MintedKey {
        key: key.to_string(),
        text: text.to_string(),
        file_path: site.file_path.clone(),
    }
}

fn token_text<'a>(source: &'a str, tokens: &[Token], range: &Range<usize>) -> &'a str {
    &source[tokens[range.start].span.start..tokens[range.end - 1].span.end]
}

/// Applies non-overlapping edits, last offset first.
pub fn apply_edits(source: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<&TextEdit> = edits.iter().collect();
    ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    let mut output = source.to_string();
    let mut limit = usize::MAX;
    for edit in ordered {
        if edit.span.end > limit {
            continue;
        }
        output.replace_range(edit.span.clone(), &edit.replacement);
        limit = edit.span.start;
    }
    output
}
