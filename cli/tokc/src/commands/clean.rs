//! `tokc clean`: remove generated artifacts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::TokcConfig;

/// Remove the output directory.
pub fn run(project_dir: &Path, config: &TokcConfig) -> Result<()> {
    let out_dir = config.output_paths(project_dir, None).dir;
    if out_dir.exists() {
        fs::remove_dir_all(&out_dir).with_context(|| format!("removing {}", out_dir.display()))?;
        println!("Removed {}", out_dir.display());
    } else {
        println!("Already clean: {} does not exist", out_dir.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_removes_out_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("build");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("tokens.css"), b":root {}").unwrap();

        run(dir.path(), &TokcConfig::default()).unwrap();
        assert!(!out.exists());
    }

    #[test]
    fn clean_handles_already_clean() {
        let dir = tempfile::tempdir().unwrap();
        run(dir.path(), &TokcConfig::default()).unwrap();
    }

    #[test]
    fn clean_honors_configured_dir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("dist");
        fs::create_dir(&out).unwrap();
        let config = TokcConfig::parse("[output]\ndir = \"dist\"\n").unwrap();

        run(dir.path(), &config).unwrap();
        assert!(!out.exists());
    }
}
