//! Schema-aware view of a token source.
//!
//! A [`TokenDocument`] is the strict structural reading of a JSON tree: every
//! non-metadata child is an object, and every `$type` is a string. It does not
//! judge values; that is the validator's job.

use serde_json::{Map, Value};
use thiserror::Error;

use tokc_core::path::join;
use tokc_core::tree::{is_metadata_key, DESCRIPTION_KEY, EXTENSIONS_KEY, TYPE_KEY, VALUE_KEY};

/// Structural failures that make the schema-aware parse impossible.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("document root must be an object")]
    RootNotObject,

    #[error("node '{path}' must be an object, found {found}")]
    NodeNotObject {
        path: String,
        /// JSON kind of the offending node.
        found: &'static str,
    },

    #[error("'{path}' has a non-string $type")]
    TypeNotString { path: String },
}

/// A token leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Dot-separated path from the document root.
    pub path: String,
    /// The `$value` as written.
    pub raw: Value,
    /// Own `$type` if present.
    pub token_type: Option<String>,
    /// `$description`, when it is a string.
    pub description: Option<String>,
    /// `$extensions`, untouched.
    pub extensions: Option<Value>,
    /// Non-metadata keys found beside `$value`; they are never traversed.
    pub stray_keys: Vec<String>,
}

/// A group of tokens and nested groups.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TokenGroup {
    /// Dot-separated path; empty for the document root.
    pub path: String,
    /// `$type` inherited by every token below that declares none.
    pub token_type: Option<String>,
    /// `$description`, when it is a string.
    pub description: Option<String>,
    /// Non-metadata children in document order, keyed by their own name.
    pub children: Vec<(String, TokenNode)>,
}

/// A child of a group: a token if it has `$value`, otherwise a group.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenNode {
    Group(TokenGroup),
    Token(Token),
}

/// The schema-checked form of a token source.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenDocument {
    /// The root group, with an empty path.
    pub root: TokenGroup,
}

impl TokenDocument {
    /// Build the typed view, failing on the first structural violation.
    pub fn from_json(tree: &Value) -> Result<Self, SchemaError> {
        let obj = tree.as_object().ok_or(SchemaError::RootNotObject)?;
        Ok(Self {
            root: parse_group(obj, "")?,
        })
    }

    /// Visit every token with its effective (own or inherited) type.
    pub fn for_each_token<F>(&self, mut visit: F)
    where
        F: FnMut(&Token, Option<&str>),
    {
        fn walk<'a, F>(group: &'a TokenGroup, inherited: Option<&'a str>, visit: &mut F)
        where
            F: FnMut(&Token, Option<&str>),
        {
            let effective = group.token_type.as_deref().or(inherited);
            for (_, child) in &group.children {
                match child {
                    TokenNode::Token(t) => visit(t, t.token_type.as_deref().or(effective)),
                    TokenNode::Group(g) => walk(g, effective, visit),
                }
            }
        }
        walk(&self.root, None, &mut visit);
    }

    /// Visit every group, root included.
    pub fn for_each_group<F>(&self, mut visit: F)
    where
        F: FnMut(&TokenGroup),
    {
        fn walk<F: FnMut(&TokenGroup)>(group: &TokenGroup, visit: &mut F) {
            visit(group);
            for (_, child) in &group.children {
                if let TokenNode::Group(g) = child {
                    walk(g, visit);
                }
            }
        }
        walk(&self.root, &mut visit);
    }

    pub fn token_count(&self) -> usize {
        let mut count = 0;
        self.for_each_token(|_, _| count += 1);
        count
    }
}

fn string_type(obj: &Map<String, Value>, path: &str) -> Result<Option<String>, SchemaError> {
    match obj.get(TYPE_KEY) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(SchemaError::TypeNotString {
            path: path.to_string(),
        }),
    }
}

fn description(obj: &Map<String, Value>) -> Option<String> {
    obj.get(DESCRIPTION_KEY)
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn parse_group(obj: &Map<String, Value>, path: &str) -> Result<TokenGroup, SchemaError> {
    let mut children = Vec::new();
    for (key, child) in obj {
        if is_metadata_key(key) {
            continue;
        }
        let child_path = join(path, key);
        let child_obj = child.as_object().ok_or_else(|| SchemaError::NodeNotObject {
            path: child_path.clone(),
            found: tokc_core::error::describe_json(child),
        })?;
        let node = match child_obj.get(VALUE_KEY) {
            Some(raw) => TokenNode::Token(Token {
                token_type: string_type(child_obj, &child_path)?,
                description: description(child_obj),
                extensions: child_obj.get(EXTENSIONS_KEY).cloned(),
                stray_keys: child_obj
                    .keys()
                    .filter(|k| !is_metadata_key(k))
                    .cloned()
                    .collect(),
                raw: raw.clone(),
                path: child_path,
            }),
            None => TokenNode::Group(parse_group(child_obj, &child_path)?),
        };
        children.push((key.clone(), node));
    }
    Ok(TokenGroup {
        path: path.to_string(),
        token_type: string_type(obj, path)?,
        description: description(obj),
        children,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_nested_groups_and_tokens() {
        let doc = TokenDocument::from_json(&json!({
            "$description": "Core palette",
            "color": {
                "$type": "color",
                "red": { "$value": "#f00", "$extensions": { "vendor": 1 } }
            }
        }))
        .unwrap();
        assert_eq!(doc.root.description.as_deref(), Some("Core palette"));
        assert_eq!(doc.token_count(), 1);

        let mut seen = Vec::new();
        doc.for_each_token(|t, ty| seen.push((t.path.clone(), ty.map(str::to_string))));
        assert_eq!(seen, vec![("color.red".to_string(), Some("color".to_string()))]);
    }

    #[test]
    fn rejects_non_object_root_and_nodes() {
        assert_eq!(TokenDocument::from_json(&json!([])), Err(SchemaError::RootNotObject));
        assert_eq!(
            TokenDocument::from_json(&json!({"color": {"red": "#f00"}})),
            Err(SchemaError::NodeNotObject {
                path: "color.red".into(),
                found: "string"
            })
        );
    }

    #[test]
    fn rejects_non_string_type() {
        let err = TokenDocument::from_json(&json!({"a": {"$type": 3, "$value": 1}})).unwrap_err();
        assert_eq!(err, SchemaError::TypeNotString { path: "a".into() });
    }

    #[test]
    fn records_stray_keys_on_tokens() {
        let doc = TokenDocument::from_json(&json!({"a": {"$value": 1, "oops": {}}})).unwrap();
        let TokenNode::Token(t) = &doc.root.children[0].1 else {
            panic!("expected token");
        };
        assert_eq!(t.stray_keys, vec!["oops".to_string()]);
    }

    #[test]
    fn visits_all_groups() {
        let doc = TokenDocument::from_json(&json!({"a": {"b": {"c": {"$value": 1}}}})).unwrap();
        let mut paths = Vec::new();
        doc.for_each_group(|g| paths.push(g.path.clone()));
        assert_eq!(paths, vec!["", "a", "a.b"]);
    }
}
