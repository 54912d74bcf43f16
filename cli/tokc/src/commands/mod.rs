//! CLI command implementations.

pub mod build;
pub mod check;
pub mod clean;
pub mod init;
pub mod paths;

use std::path::Path;

use anyhow::Result;

use tokc_compose::{compose_sources, ComposeError, PipelineConfig, PipelineOutput};
use tokc_load::LoadError;

use crate::config::TokcConfig;

/// Load, validate and compose the project's sources.
///
/// Missing required sources are listed on stderr, one per line, before the
/// error is returned.
pub(crate) fn compose_project(
    project_dir: &Path,
    config: &TokcConfig,
    tokens_dir: Option<&Path>,
    strict: bool,
) -> Result<PipelineOutput> {
    let tokens_dir = config.tokens_dir(project_dir, tokens_dir);
    let pipeline = PipelineConfig {
        sources: config.source_set(&tokens_dir)?,
        rules: config.namespace_rules()?,
        strict,
    };

    match compose_sources(&pipeline) {
        Ok(output) => Ok(output),
        Err(ComposeError::Load(LoadError::MissingSources { paths })) => {
            for path in &paths {
                eprintln!("missing: {}", path.display());
            }
            anyhow::bail!(
                "{} required token source(s) not found in {}",
                paths.len(),
                tokens_dir.display()
            )
        }
        Err(e) => Err(e.into()),
    }
}
