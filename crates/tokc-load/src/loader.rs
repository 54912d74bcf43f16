//! Reading token sources from disk.

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde_json::Value;

use crate::document::TokenDocument;
use crate::error::{LoadError, Result};
use crate::validate::{validate_document, ValidationReport};

/// File suffix for token sources.
pub const SOURCE_SUFFIX: &str = ".tokens.json";

/// A source that passed the schema-aware parse.
#[derive(Debug, Clone)]
pub struct ValidatedSource {
    /// The typed view of the tree.
    pub document: TokenDocument,
    /// Value-level issues found in `document`.
    pub report: ValidationReport,
}

/// A source that only passed the bare JSON parse. Its tree stays on
/// [`LoadedSource::tree`].
#[derive(Debug, Clone)]
pub struct FallbackSource {
    /// Why schema-aware parsing was abandoned.
    pub reason: String,
}

/// A loaded token source.
#[derive(Debug, Clone)]
pub struct LoadedSource {
    /// Where the source was read from, or the name given to [`parse_source`].
    pub path: PathBuf,
    /// The raw tree. Always present, whichever way parsing went.
    pub tree: Value,
    /// `Ok` when fully validated, `Err` when only bare-parsed.
    pub outcome: std::result::Result<ValidatedSource, FallbackSource>,
}

impl LoadedSource {
    pub fn is_validated(&self) -> bool {
        self.outcome.is_ok()
    }

    /// The validation report, if validation ran.
    pub fn report(&self) -> Option<&ValidationReport> {
        self.outcome.as_ref().ok().map(|v| &v.report)
    }

    pub fn token_count(&self) -> usize {
        match &self.outcome {
            Ok(v) => v.report.tokens,
            Err(_) => tokc_core::tree::count_tokens(&self.tree),
        }
    }
}

/// Load and validate a token source file.
pub fn load_source(path: &Path) -> Result<LoadedSource> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(&content, path)
}

/// Parse source text; `path` is used for diagnostics only.
pub fn parse_source(content: &str, path: &Path) -> Result<LoadedSource> {
    // Stage 1: bare JSON
    let tree: Value = serde_json::from_str(content).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    // Stage 2: schema-aware parse, falling back to the bare tree
    let outcome = match TokenDocument::from_json(&tree) {
        Ok(document) => {
            let report = validate_document(&document);
            debug!(
                "{}: {} tokens, {} errors, {} warnings",
                path.display(),
                report.tokens,
                report.errors.len(),
                report.warnings.len()
            );
            Ok(ValidatedSource { document, report })
        }
        Err(e) => {
            warn!(
                "{}: validation skipped ({e}); using unvalidated JSON",
                path.display()
            );
            Err(FallbackSource {
                reason: e.to_string(),
            })
        }
    };

    Ok(LoadedSource {
        path: path.to_path_buf(),
        tree,
        outcome,
    })
}

/// Fail with every missing path if any required source is absent.
pub fn check_required(paths: &[PathBuf]) -> Result<()> {
    let missing: Vec<PathBuf> = paths.iter().filter(|p| !p.is_file()).cloned().collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LoadError::MissingSources { paths: missing })
    }
}

/// Find component-local sources in `<tokens_dir>/components/`, sorted by name.
pub fn discover_overlays(tokens_dir: &Path) -> Result<Vec<PathBuf>> {
    let components_dir = tokens_dir.join("components");
    if !components_dir.is_dir() {
        return Ok(Vec::new());
    }

    let io_err = |source| LoadError::Io {
        path: components_dir.clone(),
        source,
    };
    let mut overlays = Vec::new();
    for entry in std::fs::read_dir(&components_dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        let is_source = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(SOURCE_SUFFIX));
        if path.is_file() && is_source {
            overlays.push(path);
        }
    }
    overlays.sort();
    Ok(overlays)
}
