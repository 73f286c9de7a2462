//! Minimal tokenizer for Java sources.
//!
//! Only what the pipeline needs to locate call sites precisely: identifiers,
//! literals, numbers and single-character punctuation, each with its exact
//! byte span. Comments and whitespace are dropped. Lexing never fails; an
//! unterminated literal becomes an [`TokenKind::Unterminated`] token.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    /// `"..."` string literal, quotes included in the span.
    Str,
    /// `"""..."""` text block.
    TextBlock,
    /// `'x'` char literal.
    Char,
    Number,
    Punct(char),
    /// A string or char literal cut short by a newline or end of input.
    Unterminated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.clone()]
    }

    /// Raw text between the quotes of a string literal, escapes untouched.
    pub fn str_contents<'a>(&self, source: &'a str) -> Option<&'a str> {
        match self.kind {
            TokenKind::Str => {
                let text = self.text(source);
                Some(&text[1..text.len() - 1])
            }
            _ => None,
        }
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn is_ident(&self) -> bool {
        self.kind == TokenKind::Ident
    }

    pub fn is_keyword(&self, source: &str, word: &str) -> bool {
        self.is_ident() && self.text(source) == word
    }
}

pub fn tokenize(source: &str) -> Vec<Token> {
    let bytes = source.as_bytes();
    let len = bytes.len();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < len {
        let b = bytes[i];
        let start = i;
        let kind = match b {
            _ if b.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i + 2);
                continue;
            }
            b'"' if bytes[i..].starts_with(b"\"\"\"") => {
                i = scan_text_block(bytes, i + 3);
                TokenKind::TextBlock
            }
            b'"' | b'\'' => {
                let (end, terminated) = scan_quoted(bytes, i + 1, b);
                i = end;
                match (terminated, b) {
                    (false, _) => TokenKind::Unterminated,
                    (true, b'"') => TokenKind::Str,
                    (true, _) => TokenKind::Char,
                }
            }
            _ if is_ident_start(b) => {
                while i < len && is_ident_part(bytes[i]) {
                    i += 1;
                }
                TokenKind::Ident
            }
            _ if b.is_ascii_digit() => {
                while i < len && (bytes[i].is_ascii_alphanumeric() || matches!(bytes[i], b'.' | b'_'))
                {
                    i += 1;
                }
                TokenKind::Number
            }
            _ => {
                i += 1;
                TokenKind::Punct(b as char)
            }
        };
        tokens.push(Token {
            kind,
            span: start..i,
        });
    }

    tokens
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$' || b >= 0x80
}

fn is_ident_part(b: u8) -> bool {
    is_ident_start(b) || b.is_ascii_digit()
}

fn skip_line(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |pos| from + pos)
}

fn skip_block_comment(bytes: &[u8], from: usize) -> usize {
    bytes[from.min(bytes.len())..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |pos| from + pos + 2)
}

/// Returns the end offset (exclusive) and whether the closing quote was found.
fn scan_quoted(bytes: &[u8], from: usize, quote: u8) -> (usize, bool) {
    let mut j = from;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'\n' => return (j, false),
            b if b == quote => return (j + 1, true),
            _ => j += 1,
        }
    }
    (bytes.len(), false)
}

fn scan_text_block(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j < bytes.len() {
        if bytes[j] == b'\\' {
            j += 2;
        } else if bytes[j..].starts_with(b"\"\"\"") {
            return j + 3;
        } else {
            j += 1;
        }
    }
    bytes.len()
}

/// Index of the token closing the group opened at `open`, if balanced.
pub fn matching_close(tokens: &[Token], open: usize) -> Option<usize> {
    let (open_c, close_c) = match tokens.get(open)?.kind {
        TokenKind::Punct('(') => ('(', ')'),
        TokenKind::Punct('[') => ('[', ']'),
        TokenKind::Punct('{') => ('{', '}'),
        _ => return None,
    };
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate().skip(open) {
        if token.is_punct(open_c) {
            depth += 1;
        } else if token.is_punct(close_c) {
            depth -= 1;
            if depth == 0 {
                return Some(idx);
            }
        }
    }
    None
}
