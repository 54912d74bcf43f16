//! Value-level validation of a token document.
//!
//! Every issue is collected; nothing here aborts. Malformed values are
//! errors, deprecated shapes and unclassifiable tokens are warnings.

use std::fmt;

use serde_json::Value;

use tokc_core::path::is_name_char;
use tokc_core::{TokenType, TokenValue};

use crate::document::TokenDocument;

/// Severity level for validation issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single problem found at a token or group path.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub severity: Severity,
    /// Token or group path; empty for the document root.
    pub path: String,
    pub message: String,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}: {}", self.severity, self.message)
        } else {
            write!(f, "{}: {}: {}", self.severity, self.path, self.message)
        }
    }
}

/// Outcome of validating one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Malformed values, unknown types and invalid keys.
    pub errors: Vec<Issue>,
    /// Deprecated shapes, untyped tokens and ignored keys.
    pub warnings: Vec<Issue>,
    /// Number of tokens examined.
    pub tokens: usize,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All issues, errors first.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.errors.iter().chain(self.warnings.iter())
    }

    fn push(&mut self, severity: Severity, path: &str, message: impl Into<String>) {
        let issue = Issue {
            severity,
            path: path.to_string(),
            message: message.into(),
        };
        match severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }
}

/// Validate every group and token of `doc`.
pub fn validate_document(doc: &TokenDocument) -> ValidationReport {
    let mut report = ValidationReport::default();

    doc.for_each_group(|group| {
        if let Some(ty) = &group.token_type {
            if ty.parse::<TokenType>().is_err() {
                report.push(Severity::Error, &group.path, format!("unknown group $type '{ty}'"));
            }
        }
        for (key, _) in &group.children {
            check_key(&mut report, &group.path, key);
        }
        if group.children.is_empty() && !group.path.is_empty() {
            report.push(Severity::Warning, &group.path, "group contains no tokens");
        }
    });

    doc.for_each_token(|token, effective_type| {
        report.tokens += 1;
        for stray in &token.stray_keys {
            report.push(
                Severity::Warning,
                &token.path,
                format!("key '{stray}' beside $value is ignored"),
            );
        }
        match TokenValue::parse_declared(effective_type, &token.raw) {
            Ok(parsed) => {
                for note in parsed.notes {
                    report.push(Severity::Warning, &token.path, note);
                }
            }
            Err(e) if e.is_untyped() => {
                report.push(Severity::Warning, &token.path, "untyped token; value is passed through verbatim");
            }
            Err(e) => report.push(Severity::Error, &token.path, e.to_string()),
        }
    });

    report
}

/// Validate a bare tree. A tree that fails the schema-aware parse yields a
/// report holding that failure as its only error.
pub fn validate_tree(tree: &Value) -> ValidationReport {
    match TokenDocument::from_json(tree) {
        Ok(doc) => validate_document(&doc),
        Err(e) => {
            let mut report = ValidationReport::default();
            report.push(Severity::Error, "", e.to_string());
            report
        }
    }
}

/// Keys become path segments and CSS variable name parts, so they are
/// limited to letters, digits, `-` and `_`.
fn check_key(report: &mut ValidationReport, parent: &str, key: &str) {
    let path = tokc_core::path::join(parent, key);
    if key.is_empty() {
        report.push(Severity::Error, parent, "empty key");
    } else if key.contains('.') {
        report.push(Severity::Error, &path, "key contains '.', which breaks path references");
    } else if key.contains('{') || key.contains('}') {
        report.push(Severity::Error, &path, "key contains braces, which break reference syntax");
    } else if let Some(c) = key.chars().find(|c| !is_name_char(*c)) {
        report.push(
            Severity::Error,
            &path,
            format!("key contains {c:?}; use ASCII letters, digits, '-' or '_'"),
        );
    }
}
