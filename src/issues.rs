//! Issue types reported by locsync commands.
//!
//! Each issue carries everything the reporter needs to print it: location,
//! message, severity and rule.

use enum_dispatch::enum_dispatch;

// ============================================================
// Locations
// ============================================================

/// Position in a Java source file.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

/// Source position plus the line it points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceContext {
    pub location: SourceLocation,
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

/// An entry line in a locale catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogContext {
    pub file_path: String,
    /// 1-based line of the entry.
    pub line: usize,
    pub key: String,
    pub value: String,
}

impl CatalogContext {
    pub fn new(
        file_path: impl Into<String>,
        line: usize,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            key: key.into(),
            value: value.into(),
        }
    }
}

// ============================================================
// Severity and Rule
// ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    HardcodedText,
    UnsupportedTemplate,
    UnusedKey,
    MissingKey,
    UnreadableFile,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::HardcodedText => write!(f, "hardcoded"),
            Rule::UnsupportedTemplate => write!(f, "unsupported-template"),
            Rule::UnusedKey => write!(f, "unused-key"),
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::UnreadableFile => write!(f, "unreadable-file"),
        }
    }
}

// ============================================================
// Issue Types
// ============================================================

/// UI text passed as a literal where a catalog lookup belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardcodedTextIssue {
    pub context: SourceContext,
    pub text: String,
}

/// Concatenated text the rewriter cannot turn into a message pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedTemplateIssue {
    pub context: SourceContext,
    pub text: String,
}

/// Catalog key no lookup call references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnusedKeyIssue {
    pub context: CatalogContext,
    pub locale: String,
}

/// Key defined in some locales of a module but not in others.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    /// Where the key is defined; the primary locale when it has it.
    pub context: CatalogContext,
    pub missing_locales: Vec<String>,
}

/// Source file that could not be read and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreadableFileIssue {
    pub file_path: String,
    pub error: String,
}

// ============================================================
// Issue Enum
// ============================================================

#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    HardcodedText(HardcodedTextIssue),
    UnsupportedTemplate(UnsupportedTemplateIssue),
    UnusedKey(UnusedKeyIssue),
    MissingKey(MissingKeyIssue),
    UnreadableFile(UnreadableFileIssue),
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

pub enum ReportLocation<'a> {
    /// Has a source line for context display.
    Source(&'a SourceContext),
    Catalog(&'a CatalogContext),
    /// File-level only.
    File { path: &'a str },
}

impl ReportLocation<'_> {
    pub fn file_path(&self) -> &str {
        match self {
            ReportLocation::Source(ctx) => ctx.file_path(),
            ReportLocation::Catalog(ctx) => &ctx.file_path,
            ReportLocation::File { path } => path,
        }
    }

    /// 1-based line; 0 for file-level locations.
    pub fn line(&self) -> usize {
        match self {
            ReportLocation::Source(ctx) => ctx.line(),
            ReportLocation::Catalog(ctx) => ctx.line,
            ReportLocation::File { .. } => 0,
        }
    }

    /// 1-based column; 0 for file-level locations.
    pub fn col(&self) -> usize {
        match self {
            ReportLocation::Source(ctx) => ctx.col(),
            ReportLocation::Catalog(_) => 1,
            ReportLocation::File { .. } => 0,
        }
    }

    pub fn source_line(&self) -> Option<&str> {
        match self {
            ReportLocation::Source(ctx) => Some(&ctx.source_line),
            _ => None,
        }
    }
}

#[enum_dispatch]
pub trait Report {
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message (text, key, error).
    fn message(&self) -> String;

    fn severity(&self) -> Severity;

    fn rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<&str> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

impl Report for HardcodedTextIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn rule(&self) -> Rule {
        Rule::HardcodedText
    }

    fn hint(&self) -> Option<&str> {
        Some("run `locsync extract --apply` to move it into the catalog")
    }
}

impl Report for UnsupportedTemplateIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Source(&self.context)
    }

    fn message(&self) -> String {
        self.text.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::UnsupportedTemplate
    }

    fn details(&self) -> Option<String> {
        Some("concatenation does not match a supported message pattern".to_string())
    }
}

impl Report for UnusedKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::UnusedKey
    }

    fn details(&self) -> Option<String> {
        Some(format!("(\"{}\") in {}", self.context.value, self.locale))
    }
}

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Catalog(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn rule(&self) -> Rule {
        Rule::MissingKey
    }

    fn details(&self) -> Option<String> {
        Some(format!("missing in: {}", self.missing_locales.join(", ")))
    }

    fn hint(&self) -> Option<&str> {
        Some("run `locsync sync --apply` to back-fill the missing locales")
    }
}

impl Report for UnreadableFileIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn rule(&self) -> Rule {
        Rule::UnreadableFile
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.location(), other.location());
        a.file_path()
            .cmp(b.file_path())
            .then_with(|| a.line().cmp(&b.line()))
            .then_with(|| a.col().cmp(&b.col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::issues::*;

    fn hardcoded(path: &str, line: usize, col: usize, text: &str) -> Issue {
        let ctx = SourceContext::new(SourceLocation::new(path, line, col), "new Button(\"x\");");
        Issue::HardcodedText(HardcodedTextIssue {
            context: ctx,
            text: text.to_string(),
        })
    }

    #[test]
    fn test_hardcoded_issue() {
        let issue = hardcoded("src/MatrixViewer.java", 10, 5, "Start");
        assert_eq!(issue.severity(), Severity::Error);
        assert_eq!(issue.rule(), Rule::HardcodedText);
        assert_eq!(issue.message(), "Start");
        assert_eq!(issue.location().line(), 10);
        assert!(issue.hint().is_some());
    }

    #[test]
    fn test_missing_key_details() {
        let issue = Issue::MissingKey(MissingKeyIssue {
            context: CatalogContext::new("i18n/messages_en.properties", 3, "status.error", "Error"),
            missing_locales: vec!["fr".to_string(), "de".to_string()],
        });
        assert_eq!(issue.severity(), Severity::Warning);
        assert_eq!(issue.details().as_deref(), Some("missing in: fr, de"));
        assert_eq!(issue.location().col(), 1);
    }

    #[test]
    fn test_unreadable_file_has_no_line() {
        let issue = Issue::UnreadableFile(UnreadableFileIssue {
            file_path: "src/Broken.java".to_string(),
            error: "stream did not contain valid UTF-8".to_string(),
        });
        let location = issue.location();
        assert_eq!(location.file_path(), "src/Broken.java");
        assert_eq!(location.line(), 0);
        assert!(location.source_line().is_none());
    }

    #[test]
    fn test_issue_ordering() {
        let mut issues = vec![
            hardcoded("src/b.java", 1, 1, "B"),
            hardcoded("src/a.java", 9, 1, "A9"),
            hardcoded("src/a.java", 2, 7, "A2b"),
            hardcoded("src/a.java", 2, 3, "A2a"),
        ];
        issues.sort();
        let messages: Vec<String> = issues.iter().map(|i| i.message()).collect();
        assert_eq!(messages, vec!["A2a", "A2b", "A9", "B"]);
    }

    #[test]
    fn test_rule_display() {
        assert_eq!(Rule::HardcodedText.to_string(), "hardcoded");
        assert_eq!(Rule::UnsupportedTemplate.to_string(), "unsupported-template");
        assert_eq!(Rule::UnusedKey.to_string(), "unused-key");
        assert_eq!(Rule::MissingKey.to_string(), "missing-key");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
