//! `tokc paths`: print the closed set of token paths.

use std::path::Path;

use anyhow::Result;

use tokc_core::path::css_var_name;
use tokc_emit::collect_token_paths;

use crate::commands::compose_project;
use crate::config::TokcConfig;

pub fn run(project_dir: &Path, config: &TokcConfig, tokens_dir: Option<&Path>, vars: bool) -> Result<Vec<String>> {
    let output = compose_project(project_dir, config, tokens_dir, false)?;
    let paths = collect_token_paths(output.tree.as_value());
    for path in &paths {
        if vars {
            println!("{path}\t{}", css_var_name(path, &config.css.prefix));
        } else {
            println!("{path}");
        }
    }
    Ok(paths)
}
