//! Building the composed tree from namespaced layers.

use log::{debug, warn};
use serde_json::{Map, Value};

use tokc_core::tree::{count_tokens, get_path, walk_tokens};
use tokc_core::{is_token, Namespace};

use crate::merge::merge_into;
use crate::namespace::namespace_references;

/// Where a layer's content is rooted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRoot {
    /// Content belongs under one namespace and is wrapped as `{ns: content}`.
    Namespace(Namespace),
    /// Content is already rooted at `core` / `semantic`.
    Composed,
}

/// One source tree to be merged.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Used in log messages.
    pub name: String,
    pub root: LayerRoot,
    /// Content with references still un-namespaced.
    pub tree: Value,
}

impl Layer {
    pub fn namespaced(name: impl Into<String>, namespace: Namespace, tree: Value) -> Self {
        Self {
            name: name.into(),
            root: LayerRoot::Namespace(namespace),
            tree,
        }
    }

    /// A layer that is itself composed output.
    pub fn composed(name: impl Into<String>, tree: Value) -> Self {
        Self {
            name: name.into(),
            root: LayerRoot::Composed,
            tree,
        }
    }
}

/// The merged tree with exactly two top-level namespaces.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedTree {
    root: Value,
}

impl ComposedTree {
    /// A tree with empty `core` and `semantic` groups.
    pub fn empty() -> Self {
        let mut root = Map::new();
        for ns in Namespace::ALL {
            root.insert(ns.as_str().to_string(), Value::Object(Map::new()));
        }
        Self {
            root: Value::Object(root),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    pub fn namespace(&self, ns: Namespace) -> Option<&Value> {
        self.root.get(ns.as_str())
    }

    pub fn get(&self, path: &str) -> Option<&Value> {
        get_path(&self.root, path)
    }

    /// Whether `path` leads to a token (not a group).
    pub fn is_token_path(&self, path: &str) -> bool {
        self.get(path).is_some_and(is_token)
    }

    pub fn token_count(&self) -> usize {
        count_tokens(&self.root)
    }

    /// Every token path, in document order.
    pub fn token_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        walk_tokens(&self.root, &mut |leaf| paths.push(leaf.path.to_string()));
        paths
    }

    pub fn to_pretty_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.root)
    }

    /// Merge `content` under `ns`. A namespace only ever holds a group, so
    /// non-object content is refused and the namespace left untouched.
    fn merge_under(&mut self, ns: Namespace, content: Value) -> bool {
        if !content.is_object() {
            return false;
        }
        let mut wrapped = Map::new();
        wrapped.insert(ns.as_str().to_string(), content);
        merge_into(&mut self.root, Value::Object(wrapped));
        true
    }
}

/// Namespace and merge `layers` in order; later layers win.
pub fn compose<F>(layers: Vec<Layer>, prefixer: &F) -> ComposedTree
where
    F: Fn(&str) -> String,
{
    let mut tree = ComposedTree::empty();
    for layer in layers {
        let content = namespace_references(&layer.tree, prefixer);
        match layer.root {
            LayerRoot::Namespace(ns) => {
                debug!("merging layer '{}' under {ns}", layer.name);
                if !tree.merge_under(ns, content) {
                    warn!("layer '{}' is not an object; skipped", layer.name);
                }
            }
            LayerRoot::Composed => {
                debug!("merging composed layer '{}'", layer.name);
                let Value::Object(obj) = content else {
                    warn!("layer '{}' is not an object; skipped", layer.name);
                    continue;
                };
                for (key, value) in obj {
                    match key.parse::<Namespace>() {
                        Ok(ns) => {
                            if !tree.merge_under(ns, value) {
                                warn!(
                                    "layer '{}': '{key}' is not an object; dropped",
                                    layer.name
                                );
                            }
                        }
                        Err(_) if key.starts_with('$') => {}
                        Err(_) => warn!(
                            "layer '{}': top-level key '{key}' is not a namespace; dropped",
                            layer.name
                        ),
                    }
                }
            }
        }
    }
    tree
}
