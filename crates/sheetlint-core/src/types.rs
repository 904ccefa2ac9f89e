//! Core types for lint findings and results.

use miette::{Diagnostic, NamedSource, SourceSpan};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::context::offset_for;
use crate::syntax::Position;

const HIGHLIGHT: &str = "\x1b[1;33m";
const RESET: &str = "\x1b[0m";

/// A lint finding produced by a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Name of the rule that produced this finding (e.g., "zero-unit").
    pub rule: String,
    /// Line number (1-indexed); absent for file-scoped findings.
    pub line: Option<usize>,
    /// Column number (1-indexed).
    pub column: Option<usize>,
    /// Human-readable message. Code fragments are wrapped in backticks.
    pub message: String,
    /// The same message decorated for terminal display.
    pub color_message: String,
    /// Trimmed text of the offending source line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
}

impl Finding {
    /// Creates a finding tied to a source position.
    #[must_use]
    pub fn at(rule: impl Into<String>, position: Position, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            rule: rule.into(),
            line: Some(position.line),
            column: Some(position.column),
            color_message: decorate(&message),
            message,
            excerpt: None,
        }
    }

    /// Creates a finding about the whole file.
    #[must_use]
    pub fn file_scoped(rule: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            rule: rule.into(),
            line: None,
            column: None,
            color_message: decorate(&message),
            message,
            excerpt: None,
        }
    }

    /// Attaches the offending source line.
    #[must_use]
    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Returns true if the finding is not tied to a line.
    #[must_use]
    pub fn is_file_scoped(&self) -> bool {
        self.line.is_none()
    }

    /// Formats the finding for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = match (self.line, self.column) {
            (Some(line), Some(column)) => format!("{} at {line}:{column}\n", self.rule),
            (Some(line), None) => format!("{} at line {line}\n", self.rule),
            _ => format!("{} (file)\n", self.rule),
        };
        let _ = writeln!(output, "  {}", self.color_message);
        if let Some(excerpt) = &self.excerpt {
            let _ = writeln!(output, "  | {excerpt}");
        }
        output
    }

    /// Converts the finding into a miette diagnostic against its source.
    #[must_use]
    pub fn to_diagnostic(&self, name: &str, source: &str) -> FindingDiagnostic {
        let offset = self
            .line
            .map_or(0, |line| offset_for(source, line, self.column.unwrap_or(1)));
        let length = self.line.map_or(0, |_| {
            source[offset..]
                .find(|c: char| c == ';' || c == '\n' || c == '}')
                .unwrap_or(source.len() - offset)
        });
        FindingDiagnostic {
            message: format!("[{}] {}", self.rule, self.message),
            source_code: NamedSource::new(name, source.to_string()),
            span: SourceSpan::from((offset, length)),
            label_message: self.rule.clone(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => write!(f, "{line}:{column}: ")?,
            (Some(line), None) => write!(f, "{line}: ")?,
            _ => {}
        }
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// Wraps backticked fragments in ANSI highlighting.
fn decorate(message: &str) -> String {
    let mut output = String::with_capacity(message.len() + 16);
    for (index, part) in message.split('`').enumerate() {
        if index % 2 == 1 {
            output.push_str(HIGHLIGHT);
            output.push_str(part);
            output.push_str(RESET);
        } else {
            output.push_str(part);
        }
    }
    output
}

/// Renders a finding with a labelled source span.
#[derive(Debug, thiserror::Error, Diagnostic)]
#[error("{message}")]
pub struct FindingDiagnostic {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("{label_message}")]
    span: SourceSpan,
    label_message: String,
}

/// A problem with a rule itself, reported apart from lint findings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalWarning {
    /// Rule the warning concerns.
    pub rule: String,
    /// What went wrong.
    pub message: String,
}

impl EvalWarning {
    /// Creates a new warning.
    #[must_use]
    pub fn new(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for EvalWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.rule, self.message)
    }
}

/// Outcome of evaluating one stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Findings in rule registration order, then line order.
    pub findings: Vec<Finding>,
    /// Soft warnings about rules that faulted or directives naming unknown rules.
    pub warnings: Vec<EvalWarning>,
    /// Whether the error budget ran out during this evaluation.
    pub budget_exhausted: bool,
}

/// Findings for one file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileReport {
    /// File path relative to the analyzed root.
    pub path: PathBuf,
    /// Findings in output order.
    pub findings: Vec<Finding>,
    /// Soft warnings raised while checking the file.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<EvalWarning>,
    /// Source text, kept for diagnostic rendering.
    #[serde(skip)]
    pub source: String,
}

/// Result of running lint analysis.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct LintResult {
    /// Per-file reports, ordered by path.
    pub files: Vec<FileReport>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if any file has findings.
    #[must_use]
    pub fn has_findings(&self) -> bool {
        self.files.iter().any(|file| !file.findings.is_empty())
    }

    /// Total number of findings across files.
    #[must_use]
    pub fn finding_count(&self) -> usize {
        self.files.iter().map(|file| file.findings.len()).sum()
    }

    /// Total number of soft warnings across files.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.files.iter().map(|file| file.warnings.len()).sum()
    }

    /// Iterates over `(path, finding)` pairs.
    pub fn findings(&self) -> impl Iterator<Item = (&std::path::Path, &Finding)> {
        self.files.iter().flat_map(|file| {
            file.findings
                .iter()
                .map(move |finding| (file.path.as_path(), finding))
        })
    }

    /// Adds reports from another result.
    pub fn extend(&mut self, other: Self) {
        self.files.extend(other.files);
        self.files_checked += other.files_checked;
    }
}
