//! `tokc check`: validate and compose without writing artifacts.

use std::path::Path;

use anyhow::{bail, Result};

use tokc_compose::ComposeReport;
use tokc_emit::{check_var_names, collect_token_paths};

use crate::commands::build::print_summary;
use crate::commands::compose_project;
use crate::config::TokcConfig;

/// Report every issue; fail on any error, unvalidated source, reference
/// problem, or variable-name clash.
pub fn run(project_dir: &Path, config: &TokcConfig, tokens_dir: Option<&Path>) -> Result<ComposeReport> {
    // Strict mode would stop at the first failing stage; check reports everything.
    let output = compose_project(project_dir, config, tokens_dir, false)?;
    let report = output.report;
    let names = check_var_names(
        &collect_token_paths(output.tree.as_value()),
        &config.css.prefix,
    );

    print_summary(&report);
    for source in &report.sources {
        let status = match &source.fallback_reason {
            Some(reason) => format!("unvalidated ({reason})"),
            None => "ok".to_string(),
        };
        println!("  {} [{}]: {} tokens, {status}", source.path.display(), source.layer, source.tokens);
        for issue in &source.issues {
            println!("    {issue}");
        }
    }
    for path in &report.skipped {
        println!("  skipped {}", path.display());
    }
    for issue in &report.references {
        println!("  {issue}");
    }
    if let Err(e) = &names {
        println!("  {e}");
    }

    if report.has_blocking_issues() {
        bail!(
            "check failed: {} errors, {} unvalidated sources, {} reference issues",
            report.error_count(),
            report.unvalidated_count(),
            report.references.len()
        );
    }
    names?;
    println!("All token sources are valid.");
    Ok(report)
}
