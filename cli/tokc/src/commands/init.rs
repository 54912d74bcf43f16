//! `tokc init`: project scaffolding.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::{TokcConfig, CONFIG_FILE};

const CORE_TEMPLATE: &str = r#"{
  "color": {
    "$type": "color",
    "blue": {
      "500": { "$value": { "colorSpace": "srgb", "components": [0.2, 0.4, 1] } }
    },
    "neutral": {
      "0": { "$value": { "colorSpace": "srgb", "components": [1, 1, 1] } },
      "900": { "$value": { "colorSpace": "srgb", "components": [0.07, 0.07, 0.09] } }
    }
  },
  "spacing": {
    "$type": "dimension",
    "2": { "$value": { "value": 8, "unit": "px" } },
    "4": { "$value": { "value": 16, "unit": "px" } }
  },
  "motion": {
    "duration": {
      "$type": "duration",
      "fast": { "$value": { "value": 150, "unit": "ms" } }
    }
  }
}
"#;

const SEMANTIC_TEMPLATE: &str = r#"{
  "color": {
    "$type": "color",
    "background": { "default": { "$value": "{color.neutral.0}" } },
    "text": { "default": { "$value": "{color.neutral.900}" } },
    "interactive": { "primary": { "$value": "{color.blue.500}" } }
  },
  "spacing": {
    "$type": "dimension",
    "padding": { "md": { "$value": "{spacing.4}" } },
    "gap": { "sm": { "$value": "{spacing.2}" } }
  }
}
"#;

/// Scaffold a project in `project_dir`, creating it if needed.
pub fn run(project_dir: &Path) -> Result<()> {
    create_project(project_dir)?;

    println!("Initialized tokc project in {}", project_dir.display());
    println!("  {CONFIG_FILE}");
    println!("  tokens/core.tokens.json");
    println!("  tokens/semantic.tokens.json");
    println!("  tokens/components/");
    Ok(())
}

pub(crate) fn create_project(project_dir: &Path) -> Result<()> {
    let config_path = project_dir.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists", config_path.display());
    }

    let config = TokcConfig::default();
    let tokens_dir = project_dir.join(&config.sources.dir);
    fs::create_dir_all(tokens_dir.join("components"))
        .with_context(|| format!("creating {}", tokens_dir.display()))?;

    fs::write(&config_path, TokcConfig::template())
        .with_context(|| format!("writing {}", config_path.display()))?;
    write_new(&tokens_dir.join(&config.sources.core), CORE_TEMPLATE)?;
    write_new(&tokens_dir.join(&config.sources.semantic), SEMANTIC_TEMPLATE)?;

    let gitignore = project_dir.join(".gitignore");
    if !gitignore.exists() {
        fs::write(&gitignore, format!("{}/\n", config.output.dir.display()))
            .context("writing .gitignore")?;
    }
    Ok(())
}

/// Write `content` unless the file already exists.
fn write_new(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        return Ok(());
    }
    fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
