//! Compose run report with per-source statistics.

use std::path::PathBuf;

use tokc_load::{Issue, LoadedSource};

use crate::references::ReferenceIssue;

/// What happened to one source during a run.
#[derive(Debug, Clone)]
pub struct SourceSummary {
    pub path: PathBuf,
    /// Layer name: `core`, `semantic`, or the overlay's path.
    pub layer: String,
    /// Tokens in this source alone.
    pub tokens: usize,
    /// Set when schema validation was skipped.
    pub fallback_reason: Option<String>,
    /// Validation issues, errors first. Empty when validation was skipped.
    pub issues: Vec<Issue>,
}

impl SourceSummary {
    pub(crate) fn from_loaded(layer: &str, source: &LoadedSource) -> Self {
        let (fallback_reason, issues) = match &source.outcome {
            Ok(validated) => (None, validated.report.issues().cloned().collect()),
            Err(fallback) => (Some(fallback.reason.clone()), Vec::new()),
        };
        Self {
            path: source.path.clone(),
            layer: layer.to_string(),
            tokens: source.token_count(),
            fallback_reason,
            issues,
        }
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == tokc_load::Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues.len() - self.error_count()
    }
}

/// Summary of a compose run.
#[derive(Debug, Clone, Default)]
pub struct ComposeReport {
    /// One entry per merged source, in merge order.
    pub sources: Vec<SourceSummary>,
    /// Optional sources that were absent or unreadable.
    pub skipped: Vec<PathBuf>,
    /// Tokens in the composed tree.
    pub token_count: usize,
    /// Dangling references and alias cycles in the composed tree.
    pub references: Vec<ReferenceIssue>,
    pub duration_ms: u64,
}

impl ComposeReport {
    /// True when every source passed schema-aware parsing.
    pub fn fully_validated(&self) -> bool {
        self.unvalidated_count() == 0
    }

    /// Sources that fell back to the bare JSON tree.
    pub fn unvalidated_count(&self) -> usize {
        self.sources
            .iter()
            .filter(|s| s.fallback_reason.is_some())
            .count()
    }

    /// Whether strict mode would reject this run.
    pub fn has_blocking_issues(&self) -> bool {
        self.error_count() > 0 || !self.fully_validated() || !self.references.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.sources.iter().map(SourceSummary::error_count).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.sources.iter().map(SourceSummary::warning_count).sum()
    }
}
