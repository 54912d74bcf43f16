//! Alias syntax: a string of the form `{path.to.token}`.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

/// A reference to another token by its dot-separated path.
///
/// References are never inlined by the compiler; consumers resolve them lazily.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    path: String,
}

fn reference_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\{[^}]+\}$").expect("reference pattern is valid"))
}

/// Whether `s` is entirely a reference string.
pub fn is_reference(s: &str) -> bool {
    reference_pattern().is_match(s)
}

impl Reference {
    /// Build a reference pointing at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Parse `{a.b.c}` into a reference to `a.b.c`.
    pub fn parse(s: &str) -> Option<Self> {
        if !is_reference(s) {
            return None;
        }
        Some(Self::new(&s[1..s.len() - 1]))
    }

    /// Parse a JSON value, which must be a reference string.
    pub fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(Self::parse)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('.')
    }

    /// Return a reference with the path rewritten by `f`.
    pub fn map_path(&self, f: impl FnOnce(&str) -> String) -> Self {
        Self::new(f(&self.path))
    }
}

/// Every reference string anywhere inside `value`, in document order.
pub fn collect_references(value: &Value) -> Vec<Reference> {
    fn walk(value: &Value, out: &mut Vec<Reference>) {
        match value {
            Value::String(s) => out.extend(Reference::parse(s)),
            Value::Array(items) => items.iter().for_each(|v| walk(v, out)),
            Value::Object(obj) => obj.values().for_each(|v| walk(v, out)),
            _ => {}
        }
    }
    let mut out = Vec::new();
    walk(value, &mut out);
    out
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_reference_strings() {
        let r = Reference::parse("{color.foreground.primary}").unwrap();
        assert_eq!(r.path(), "color.foreground.primary");
        assert_eq!(r.segments().count(), 3);
        assert_eq!(r.to_string(), "{color.foreground.primary}");
    }

    #[test]
    fn rejects_partial_and_empty_braces() {
        assert!(Reference::parse("{}").is_none());
        assert!(Reference::parse("prefix {a.b}").is_none());
        assert!(Reference::parse("{a.b} suffix").is_none());
        assert!(Reference::parse("{a}{b}").is_none());
        assert!(Reference::parse("#ff0000").is_none());
    }

    #[test]
    fn from_value_requires_string() {
        assert!(Reference::from_value(&json!("{a.b}")).is_some());
        assert!(Reference::from_value(&json!(12)).is_none());
        assert!(Reference::from_value(&json!({"path": "a"})).is_none());
    }

    #[test]
    fn collects_nested_references() {
        let refs = collect_references(&json!({
            "color": "{color.border}",
            "width": {"value": 1, "unit": "px"},
            "layers": ["{a.b}", "plain", {"x": "{c.d}"}]
        }));
        let paths: Vec<_> = refs.iter().map(Reference::path).collect();
        assert_eq!(paths, vec!["color.border", "a.b", "c.d"]);
    }

    #[test]
    fn map_path_rewrites_only_payload() {
        let r = Reference::new("spacing.sm").map_path(|p| format!("core.{p}"));
        assert_eq!(r.to_string(), "{core.spacing.sm}");
    }
}
