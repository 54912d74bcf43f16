//! `tokc build`: compose sources and write the artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;

use tokc_compose::ComposeReport;
use tokc_emit::{collect_token_paths, emit_css, emit_typescript, Fingerprint};

use crate::commands::compose_project;
use crate::config::{OutputPaths, TokcConfig};

/// Command-line overrides for a build.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct BuildArgs {
    /// Fail on validation errors and unresolved references
    #[arg(long)]
    pub strict: bool,
    /// Tokens directory (default: from tokc.toml, else tokens/)
    #[arg(long)]
    pub tokens_dir: Option<PathBuf>,
    /// Output directory (default: from tokc.toml, else build/)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

/// Run the build pipeline and return the written artifact paths.
pub fn run(project_dir: &Path, config: &TokcConfig, args: &BuildArgs) -> Result<OutputPaths> {
    let strict = args.strict || config.build.strict;
    let output = compose_project(project_dir, config, args.tokens_dir.as_deref(), strict)?;
    let out = config.output_paths(project_dir, args.out_dir.as_deref());

    let tree = output.tree.as_value();
    let fingerprint = Fingerprint::of_tree(tree)?;
    let css = emit_css(tree, &config.css_options())?;
    let types = emit_typescript(&collect_token_paths(tree), &config.typescript_options())?;
    let mut composed = output
        .tree
        .to_pretty_json()
        .context("serializing composed tree")?;
    composed.push('\n');

    fs::create_dir_all(&out.dir).with_context(|| format!("creating {}", out.dir.display()))?;
    write(&out.composed, &composed)?;
    write(&out.css, &fingerprint.stamp(&css))?;
    write(&out.types, &fingerprint.stamp(&types))?;
    info!("fingerprint {fingerprint}");

    print_summary(&output.report);
    for path in [&out.composed, &out.css, &out.types] {
        println!("  wrote {}", path.display());
    }
    Ok(out)
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}

pub(crate) fn print_summary(report: &ComposeReport) {
    println!(
        "Composed {} tokens from {} sources ({} errors, {} warnings, {} reference issues)",
        report.token_count,
        report.sources.len(),
        report.error_count(),
        report.warning_count(),
        report.references.len()
    );
    if !report.fully_validated() {
        println!("  note: some sources were merged without schema validation");
    }
}
