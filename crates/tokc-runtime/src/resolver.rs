//! Merging token sources into a resolved custom-property table.

use std::collections::BTreeMap;

use serde_json::Value;

use tokc_core::path::{css_var_name, is_custom_property_name, is_safe_css_value};
use tokc_emit::flatten;

/// Custom property name (or token path) to CSS value.
pub type TokenTable = BTreeMap<String, String>;

/// Resolves per-render token tables from injected defaults and fallbacks.
///
/// Keys may be written as custom property names (`--button-bg`) or as token
/// paths (`button.bg`); paths are converted with the resolver's prefix. A key
/// whose name is not `--` plus letters, digits, `-` and `_` is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenResolver {
    defaults: TokenTable,
    fallbacks: TokenTable,
    prefix: String,
}

impl TokenResolver {
    pub fn new(defaults: TokenTable, fallbacks: TokenTable) -> Self {
        Self {
            defaults,
            fallbacks,
            prefix: String::new(),
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Merge `defaults < document < inline`, then fill absent keys from the
    /// fallback table.
    ///
    /// `document` is a token tree such as a component-local override layer; a
    /// non-object document contributes nothing. Unsafe values (empty, or
    /// containing `;`, braces or line breaks) are treated as absent.
    pub fn resolve(&self, document: Option<&Value>, inline: Option<&TokenTable>) -> ResolvedTokens {
        let mut table = TokenTable::new();
        self.layer(&mut table, &self.defaults);

        if let Some(doc) = document {
            for decl in flatten(doc, &self.prefix).declarations {
                if is_custom_property_name(&decl.name) && is_safe_css_value(&decl.value) {
                    table.insert(decl.name, decl.value);
                }
            }
        }

        if let Some(inline) = inline {
            self.layer(&mut table, inline);
        }

        for (key, value) in &self.fallbacks {
            let Some(name) = self.normalize(key) else {
                continue;
            };
            if is_safe_css_value(value) && !table.contains_key(&name) {
                table.insert(name, value.trim().to_string());
            }
        }
        ResolvedTokens(table)
    }

    fn layer(&self, table: &mut TokenTable, source: &TokenTable) {
        for (key, value) in source {
            if !is_safe_css_value(value) {
                continue;
            }
            if let Some(name) = self.normalize(key) {
                table.insert(name, value.trim().to_string());
            }
        }
    }

    /// The custom property name for `key`, or `None` if it would not be a
    /// plain identifier.
    fn normalize(&self, key: &str) -> Option<String> {
        let name = if key.starts_with("--") {
            key.to_string()
        } else {
            css_var_name(key, &self.prefix)
        };
        is_custom_property_name(&name).then_some(name)
    }
}

/// One-shot resolution without keeping a resolver around.
pub fn resolve_tokens(
    defaults: &TokenTable,
    fallbacks: &TokenTable,
    document: Option<&Value>,
    inline: Option<&TokenTable>,
) -> ResolvedTokens {
    TokenResolver::new(defaults.clone(), fallbacks.clone()).resolve(document, inline)
}

/// The resolved custom-property table, keyed by `--name`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedTokens(TokenTable);

impl ResolvedTokens {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Inline `style` attribute text: `--a: 1px; --b: red`.
    pub fn to_style(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{k}: {v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn into_inner(self) -> TokenTable {
        self.0
    }
}
