//! Traversal over raw token trees.
//!
//! Trees are kept as `serde_json::Value` so every stage preserves the exact
//! shape authors wrote, including metadata the typed model does not cover.

use serde_json::{Map, Value};

use crate::path::join;

pub const VALUE_KEY: &str = "$value";
pub const TYPE_KEY: &str = "$type";
pub const DESCRIPTION_KEY: &str = "$description";
pub const SCHEMA_KEY: &str = "$schema";
pub const EXTENSIONS_KEY: &str = "$extensions";

/// Keys beginning with `$` carry metadata and are never child nodes.
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with('$')
}

/// A node is a token iff it is an object with a `$value` key.
pub fn is_token(node: &Value) -> bool {
    node.as_object()
        .is_some_and(|obj| obj.contains_key(VALUE_KEY))
}

/// A token found during traversal.
#[derive(Debug, Clone, Copy)]
pub struct TokenLeaf<'a> {
    /// Dot-separated path from the traversal root.
    pub path: &'a str,
    /// The token object itself.
    pub node: &'a Map<String, Value>,
    /// The `$value` payload.
    pub value: &'a Value,
    /// The token's own `$type`, or the nearest ancestor group's.
    pub declared_type: Option<&'a str>,
}

impl<'a> TokenLeaf<'a> {
    pub fn description(&self) -> Option<&'a str> {
        self.node.get(DESCRIPTION_KEY).and_then(Value::as_str)
    }
}

/// Visit every token under `root` in document order.
///
/// Group-level `$type` is inherited by descendants that declare none.
/// Non-object children are ignored.
pub fn walk_tokens<'a, F>(root: &'a Value, visit: &mut F)
where
    F: FnMut(TokenLeaf<'_>),
{
    if let Some(obj) = root.as_object() {
        let inherited = obj.get(TYPE_KEY).and_then(Value::as_str);
        walk_group(obj, "", inherited, visit);
    }
}

fn walk_group<'a, F>(
    group: &'a Map<String, Value>,
    prefix: &str,
    inherited: Option<&'a str>,
    visit: &mut F,
) where
    F: FnMut(TokenLeaf<'_>),
{
    for (key, child) in group {
        if is_metadata_key(key) {
            continue;
        }
        let Some(obj) = child.as_object() else {
            continue;
        };
        let path = join(prefix, key);
        let own_type = obj.get(TYPE_KEY).and_then(Value::as_str);
        match obj.get(VALUE_KEY) {
            Some(value) => visit(TokenLeaf {
                path: &path,
                node: obj,
                value,
                declared_type: own_type.or(inherited),
            }),
            None => walk_group(obj, &path, own_type.or(inherited), visit),
        }
    }
}

/// Follow a dot-separated path from `root`.
pub fn get_path<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(root, |node, segment| node.as_object()?.get(segment))
}

/// Count the tokens under `root`.
pub fn count_tokens(root: &Value) -> usize {
    let mut count = 0;
    walk_tokens(root, &mut |_| count += 1);
    count
}
