//! `tokc.toml` project configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use tokc_compose::{NamespaceRule, NamespaceRules, Overlay, SourceSet};
use tokc_core::Namespace;
use tokc_emit::{CssOptions, TypeScriptOptions};
use tokc_load::discover_overlays;

pub const CONFIG_FILE: &str = "tokc.toml";

/// The top-level configuration structure. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TokcConfig {
    pub sources: SourcesConfig,
    pub output: OutputConfig,
    pub css: CssConfig,
    pub build: BuildConfig,
    pub namespace: NamespaceConfig,
}

/// Where the token sources live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SourcesConfig {
    /// Tokens directory, relative to the project directory.
    pub dir: PathBuf,
    pub core: PathBuf,
    pub semantic: PathBuf,
    /// Extra optional sources, relative to `dir`.
    pub overlays: Vec<OverlaySpec>,
    /// Also merge `<dir>/components/*.tokens.json`.
    pub discover_components: bool,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("tokens"),
            core: PathBuf::from("core.tokens.json"),
            semantic: PathBuf::from("semantic.tokens.json"),
            overlays: Vec::new(),
            discover_components: true,
        }
    }
}

/// An overlay entry: a bare path (merged under `semantic`) or a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OverlaySpec {
    Path(PathBuf),
    Detailed {
        path: PathBuf,
        #[serde(default = "default_overlay_namespace")]
        namespace: Namespace,
    },
}

fn default_overlay_namespace() -> Namespace {
    Namespace::Semantic
}

impl OverlaySpec {
    fn to_overlay(&self, tokens_dir: &Path) -> Overlay {
        match self {
            OverlaySpec::Path(path) => Overlay {
                path: tokens_dir.join(path),
                namespace: Namespace::Semantic,
            },
            OverlaySpec::Detailed { path, namespace } => Overlay {
                path: tokens_dir.join(path),
                namespace: *namespace,
            },
        }
    }
}

/// Artifact locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    pub composed: PathBuf,
    pub css: PathBuf,
    pub types: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("build"),
            composed: PathBuf::from("tokens.json"),
            css: PathBuf::from("tokens.css"),
            types: PathBuf::from("tokens.ts"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CssConfig {
    pub selector: String,
    pub prefix: String,
}

impl Default for CssConfig {
    fn default() -> Self {
        let options = CssOptions::default();
        Self {
            selector: options.selector,
            prefix: options.prefix,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Fail on validation errors and reference problems.
    pub strict: bool,
}

/// Extra classification rules, evaluated before the built-in table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    pub rule: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    pub pattern: String,
    pub namespace: Namespace,
}

/// Resolved artifact paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub dir: PathBuf,
    pub composed: PathBuf,
    pub css: PathBuf,
    pub types: PathBuf,
}

impl TokcConfig {
    /// Search upward from `start_dir` for a `tokc.toml` file, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let config = Self::parse(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((config, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    pub fn parse(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    /// The tokens directory, honoring a command-line override.
    pub fn tokens_dir(&self, project_dir: &Path, override_dir: Option<&Path>) -> PathBuf {
        project_dir.join(override_dir.unwrap_or(self.sources.dir.as_path()))
    }

    /// Required sources plus configured and discovered overlays, in merge order.
    pub fn source_set(&self, tokens_dir: &Path) -> Result<SourceSet> {
        let mut overlays: Vec<Overlay> = self
            .sources
            .overlays
            .iter()
            .map(|spec| spec.to_overlay(tokens_dir))
            .collect();
        if self.sources.discover_components {
            for path in discover_overlays(tokens_dir)? {
                if !overlays.iter().any(|o| o.path == path) {
                    overlays.push(Overlay {
                        path,
                        namespace: Namespace::Semantic,
                    });
                }
            }
        }
        Ok(SourceSet {
            core: tokens_dir.join(&self.sources.core),
            semantic: tokens_dir.join(&self.sources.semantic),
            overlays,
        })
    }

    /// Configured rules ahead of the built-in table.
    pub fn namespace_rules(&self) -> Result<NamespaceRules> {
        let extra = self
            .namespace
            .rule
            .iter()
            .map(|r| NamespaceRule::new(&r.pattern, r.namespace))
            .collect::<Result<Vec<_>, _>>()
            .context("invalid [[namespace.rule]] entry")?;
        Ok(NamespaceRules::with_rules(extra))
    }

    pub fn output_paths(&self, project_dir: &Path, override_dir: Option<&Path>) -> OutputPaths {
        let dir = project_dir.join(override_dir.unwrap_or(self.output.dir.as_path()));
        OutputPaths {
            composed: dir.join(&self.output.composed),
            css: dir.join(&self.output.css),
            types: dir.join(&self.output.types),
            dir,
        }
    }

    pub fn css_options(&self) -> CssOptions {
        CssOptions {
            selector: self.css.selector.clone(),
            prefix: self.css.prefix.clone(),
        }
    }

    pub fn typescript_options(&self) -> TypeScriptOptions {
        TypeScriptOptions {
            prefix: self.css.prefix.clone(),
        }
    }

    /// Generate the default template for `tokc init`.
    pub fn template() -> String {
        r#"[sources]
dir = "tokens"
core = "core.tokens.json"
semantic = "semantic.tokens.json"
discover-components = true

[output]
dir = "build"

[css]
selector = ":root"
prefix = ""

[build]
strict = false
"#
        .to_string()
    }
}
