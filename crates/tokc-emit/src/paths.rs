//! The closed set of token paths and its TypeScript rendering.

use std::collections::HashMap;

use serde_json::Value;

use tokc_core::path::{css_var_name, is_custom_property_name};
use tokc_core::walk_tokens;

use crate::error::{check_prefix, EmitError, Result};

/// Every path to a `$value` node under `tree`, sorted and deduplicated.
pub fn collect_token_paths(tree: &Value) -> Vec<String> {
    let mut paths = Vec::new();
    walk_tokens(tree, &mut |leaf| paths.push(leaf.path.to_string()));
    paths.sort();
    paths.dedup();
    paths
}

/// Check that every path flattens to a valid custom property name and that no
/// two paths share one.
pub fn check_var_names(paths: &[String], prefix: &str) -> Result<()> {
    let mut seen: HashMap<String, &str> = HashMap::new();
    for path in paths {
        let name = css_var_name(path, prefix);
        if !is_custom_property_name(&name) {
            return Err(EmitError::InvalidName {
                path: path.clone(),
                name,
            });
        }
        if let Some(first) = seen.get(&name) {
            return Err(EmitError::NameCollision {
                first: first.to_string(),
                second: path.clone(),
                name,
            });
        }
        seen.insert(name, path);
    }
    Ok(())
}

/// Options for the TypeScript artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeScriptOptions {
    /// Variable-name prefix, matching the CSS artifact's.
    pub prefix: String,
}

/// Render a module exporting the `TokenPath` union, the `tokenPaths` list,
/// and `tokenVar`.
///
/// Variable names are computed here with [`css_var_name`] and emitted as a
/// lookup table, so the CSS and TypeScript artifacts cannot disagree.
pub fn emit_typescript(paths: &[String], options: &TypeScriptOptions) -> Result<String> {
    check_prefix(&options.prefix)?;
    check_var_names(paths, &options.prefix)?;
    let mut ts = String::new();

    if paths.is_empty() {
        ts.push_str("export type TokenPath = never;\n\n");
    } else {
        ts.push_str("export type TokenPath =\n");
        for (i, path) in paths.iter().enumerate() {
            let end = if i + 1 == paths.len() { ";" } else { "" };
            ts.push_str(&format!("  | {}{end}\n", quote(path)));
        }
        ts.push('\n');
    }

    ts.push_str("export const tokenPaths: readonly TokenPath[] = [\n");
    for path in paths {
        ts.push_str(&format!("  {},\n", quote(path)));
    }
    ts.push_str("];\n\n");

    ts.push_str("const tokenVars: Record<TokenPath, string> = {\n");
    for path in paths {
        ts.push_str(&format!(
            "  {}: {},\n",
            quote(path),
            quote(&css_var_name(path, &options.prefix))
        ));
    }
    ts.push_str("};\n\n");

    ts.push_str("export function tokenVar(path: TokenPath): string {\n");
    ts.push_str("  return tokenVars[path];\n");
    ts.push_str("}\n");
    Ok(ts)
}

/// Single-quoted TypeScript string literal.
fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokc_core::{get_path, is_token};

    fn composed() -> Value {
        json!({
            "core": {
                "$description": "primitives",
                "color": { "$type": "color", "red": { "$value": "#f00" }, "blue": { "$value": "#00f" } },
                "space": { "2": { "$value": "8px", "$extensions": { "x": { "$value": 1 } } } }
            },
            "semantic": {
                "danger": { "$value": "{core.color.red}" },
                "empty": {}
            }
        })
    }

    #[test]
    fn paths_are_sorted_leaves_only() {
        assert_eq!(
            collect_token_paths(&composed()),
            vec![
                "core.color.blue",
                "core.color.red",
                "core.space.2",
                "semantic.danger"
            ]
        );
    }

    #[test]
    fn path_set_is_closed() {
        let tree = composed();
        let paths = collect_token_paths(&tree);
        // Every emitted path is a token...
        for path in &paths {
            assert!(get_path(&tree, path).is_some_and(is_token), "{path}");
        }
        // ...and every token is emitted.
        let mut leaves = 0;
        walk_tokens(&tree, &mut |leaf| {
            leaves += 1;
            assert!(paths.iter().any(|p| p == leaf.path));
        });
        assert_eq!(leaves, paths.len());
    }

    #[test]
    fn typescript_module_shape() {
        let paths = vec!["core.color.red".to_string(), "semantic.danger".to_string()];
        let ts = emit_typescript(&paths, &TypeScriptOptions { prefix: "ds".into() }).unwrap();
        assert!(ts.contains("export type TokenPath =\n  | 'core.color.red'\n  | 'semantic.danger';\n"));
        assert!(ts.contains("export const tokenPaths: readonly TokenPath[] = [\n  'core.color.red',\n"));
        assert!(ts.contains("  'semantic.danger': '--ds-semantic-danger',\n"));
        assert!(ts.contains("export function tokenVar(path: TokenPath): string {"));
    }

    #[test]
    fn empty_path_set_is_never() {
        let ts = emit_typescript(&[], &TypeScriptOptions::default()).unwrap();
        assert!(ts.starts_with("export type TokenPath = never;"));
    }

    #[test]
    fn colliding_paths_are_rejected() {
        let paths = vec!["core.a-b.c".to_string(), "core.a.b-c".to_string()];
        let err = emit_typescript(&paths, &TypeScriptOptions::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "tokens 'core.a-b.c' and 'core.a.b-c' both flatten to '--core-a-b-c'"
        );
    }

    #[test]
    fn non_identifier_paths_are_rejected() {
        let paths = vec!["core.a b".to_string()];
        assert!(matches!(
            check_var_names(&paths, ""),
            Err(EmitError::InvalidName { .. })
        ));
        assert!(check_var_names(&collect_token_paths(&composed()), "ds").is_ok());
    }

    #[test]
    fn quotes_are_escaped() {
        assert_eq!(quote("it's"), "'it\\'s'");
    }
}
