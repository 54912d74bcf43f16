//! Reference namespacing.
//!
//! Source authors write short aliases such as `{color.foreground.primary}`.
//! The namespacer rewrites each one to a fully qualified path
//! (`{semantic.color.foreground.primary}`) by classifying it against an
//! ordered rule table. The first matching rule wins; unmatched paths are
//! `core`. Already-qualified paths are left alone, so namespacing is
//! idempotent.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use tokc_core::tree::{DESCRIPTION_KEY, SCHEMA_KEY};
use tokc_core::{Namespace, Reference};

use crate::error::ComposeError;

/// The default classification table, in priority order.
///
/// Rules 4 and 5 overlap: `motion.duration.*` matches both, and is core
/// only because rule 4 comes first.
pub const DEFAULT_RULES: [(&str, Namespace); 6] = [
    (
        r"^color\.(foreground|background|border|status|surface|text|icon|overlay|focus|accent|interactive)(\.|$)",
        Namespace::Semantic,
    ),
    (
        r"^typography\.(semanticFamily|body|heading|display|label|caption|code)(\.|$)",
        Namespace::Semantic,
    ),
    (r"^spacing\.(padding|gap|inset|stack|section)(\.|$)", Namespace::Semantic),
    (r"^motion\.(duration|easing)(\.|$)", Namespace::Core),
    (r"^motion\.", Namespace::Semantic),
    (r"^(components|interaction|control|link|elevation|focus)\.", Namespace::Semantic),
];

/// One `(pattern, namespace)` entry of the classification table.
#[derive(Debug, Clone)]
pub struct NamespaceRule {
    pattern: Regex,
    namespace: Namespace,
}

impl NamespaceRule {
    pub fn new(pattern: &str, namespace: Namespace) -> Result<Self, ComposeError> {
        let pattern = Regex::new(pattern).map_err(|source| ComposeError::InvalidRule {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern, namespace })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    pub fn matches(&self, path: &str) -> bool {
        self.pattern.is_match(path)
    }
}

/// An ordered, first-match-wins classification table.
#[derive(Debug, Clone)]
pub struct NamespaceRules {
    rules: Vec<NamespaceRule>,
}

fn default_table() -> &'static [NamespaceRule] {
    static TABLE: OnceLock<Vec<NamespaceRule>> = OnceLock::new();
    TABLE.get_or_init(|| {
        DEFAULT_RULES
            .iter()
            .map(|(pattern, ns)| NamespaceRule::new(pattern, *ns).expect("default rule compiles"))
            .collect()
    })
}

impl NamespaceRules {
    pub fn default_rules() -> Self {
        Self {
            rules: default_table().to_vec(),
        }
    }

    /// `extra` rules take priority over the defaults.
    pub fn with_rules(extra: Vec<NamespaceRule>) -> Self {
        let mut rules = extra;
        rules.extend(default_table().iter().cloned());
        Self { rules }
    }

    pub fn rules(&self) -> &[NamespaceRule] {
        &self.rules
    }

    /// Classify an unqualified path.
    pub fn classify(&self, path: &str) -> Namespace {
        self.rules
            .iter()
            .find(|r| r.matches(path))
            .map(NamespaceRule::namespace)
            .unwrap_or(Namespace::Core)
    }

    /// The default prefixer: qualify `path` unless it already is.
    pub fn prefix(&self, path: &str) -> String {
        if Namespace::of_path(path).is_some() {
            return path.to_string();
        }
        self.classify(path).qualify(path)
    }
}

impl Default for NamespaceRules {
    fn default() -> Self {
        Self::default_rules()
    }
}

/// Rewrite every reference in `tree` with `prefixer`.
///
/// Shape, key order and array order are preserved. Prose and schema URLs
/// (`$description`, `$schema`) are never rewritten.
pub fn namespace_references<F>(tree: &Value, prefixer: &F) -> Value
where
    F: Fn(&str) -> String,
{
    match tree {
        Value::String(s) => match Reference::parse(s) {
            Some(reference) => Value::String(reference.map_path(prefixer).to_string()),
            None => tree.clone(),
        },
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|item| namespace_references(item, prefixer))
                .collect(),
        ),
        Value::Object(obj) => {
            let mut out = Map::with_capacity(obj.len());
            for (key, child) in obj {
                let rewritten = if key == DESCRIPTION_KEY || key == SCHEMA_KEY {
                    child.clone()
                } else {
                    namespace_references(child, prefixer)
                };
                out.insert(key.clone(), rewritten);
            }
            Value::Object(out)
        }
        _ => tree.clone(),
    }
}
