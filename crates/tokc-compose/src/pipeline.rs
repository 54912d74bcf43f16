//! Compose pipeline orchestrator.

use std::path::PathBuf;
use std::time::Instant;

use log::{info, warn};

use tokc_core::Namespace;
use tokc_load::{check_required, load_source, LoadError, LoadedSource};

use crate::compose::{compose, ComposedTree, Layer};
use crate::error::ComposeError;
use crate::namespace::NamespaceRules;
use crate::references::check_references;
use crate::report::{ComposeReport, SourceSummary};

/// An optional source merged after the required layers.
#[derive(Debug, Clone)]
pub struct Overlay {
    /// Source file; absent files are skipped.
    pub path: PathBuf,
    /// Namespace the file's content is merged under.
    pub namespace: Namespace,
}

/// The files that make up one run.
#[derive(Debug, Clone)]
pub struct SourceSet {
    /// Required primitive layer, merged under `core`.
    pub core: PathBuf,
    /// Required semantic layer, merged under `semantic`.
    pub semantic: PathBuf,
    /// Optional layers, merged after the required ones in this order.
    pub overlays: Vec<Overlay>,
}

/// Configuration for the compose pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Files to load.
    pub sources: SourceSet,
    /// Classification table for the default prefixer.
    pub rules: NamespaceRules,
    /// Treat validation errors, unvalidated sources and reference problems as
    /// fatal.
    pub strict: bool,
}

/// Output of a successful compose run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// The namespaced, merged tree.
    pub tree: ComposedTree,
    /// Per-source issues, skipped overlays and reference problems.
    pub report: ComposeReport,
}

/// Run the compose pipeline:
/// required-source check -> load + validate -> namespace + merge -> reference check -> report.
pub fn compose_sources(config: &PipelineConfig) -> Result<PipelineOutput, ComposeError> {
    let start = Instant::now();
    let sources = &config.sources;

    // Stage 1: required sources must all exist
    check_required(&[sources.core.clone(), sources.semantic.clone()])?;

    // Stage 2: load and validate
    let mut report = ComposeReport::default();
    let mut layers = Vec::new();

    for (ns, path) in [(Namespace::Core, &sources.core), (Namespace::Semantic, &sources.semantic)] {
        let loaded = load_source(path)?;
        layers.push(record(&mut report, ns.as_str(), ns, loaded));
    }

    for overlay in &sources.overlays {
        match load_source(&overlay.path) {
            Ok(loaded) => {
                let name = overlay.path.display().to_string();
                layers.push(record(&mut report, &name, overlay.namespace, loaded));
            }
            Err(LoadError::NotFound { path }) => {
                info!("optional source {} not present; skipped", path.display());
                report.skipped.push(path);
            }
            Err(e) => {
                warn!("optional source skipped: {e}");
                report.skipped.push(overlay.path.clone());
            }
        }
    }

    // Stage 3: namespace references and merge
    let prefixer = |path: &str| config.rules.prefix(path);
    let tree = compose(layers, &prefixer);
    report.token_count = tree.token_count();

    // Stage 4: reference integrity
    report.references = check_references(&tree);
    for issue in &report.references {
        warn!("{issue}");
    }

    if config.strict && report.has_blocking_issues() {
        return Err(ComposeError::StrictViolation {
            errors: report.error_count(),
            unvalidated: report.unvalidated_count(),
            references: report.references.len(),
        });
    }

    report.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "composed {} tokens from {} sources in {} ms",
        report.token_count,
        report.sources.len(),
        report.duration_ms
    );

    Ok(PipelineOutput { tree, report })
}

/// Log a loaded source's issues, add its summary, and turn it into a layer.
fn record(report: &mut ComposeReport, name: &str, ns: Namespace, loaded: LoadedSource) -> Layer {
    let summary = SourceSummary::from_loaded(name, &loaded);
    for issue in &summary.issues {
        warn!("{}: {issue}", loaded.path.display());
    }
    report.sources.push(summary);
    Layer::namespaced(name, ns, loaded.tree)
}
