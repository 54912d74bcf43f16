//! Reference integrity checks over a composed tree.

use std::collections::HashSet;
use std::fmt;

use tokc_core::tree::{walk_tokens, VALUE_KEY};
use tokc_core::{collect_references, Reference};

use crate::compose::ComposedTree;

/// A reference problem found after merging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceIssue {
    /// `from` refers to a path that is not a token in the composed tree.
    Dangling { from: String, target: String },
    /// A chain of alias tokens that loops back on itself.
    Cycle { chain: Vec<String> },
}

impl fmt::Display for ReferenceIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceIssue::Dangling { from, target } => {
                write!(f, "{from}: reference {{{target}}} does not resolve to a token")
            }
            ReferenceIssue::Cycle { chain } => {
                write!(f, "reference cycle: {}", chain.join(" -> "))
            }
        }
    }
}

/// Find dangling references and alias cycles.
pub fn check_references(tree: &ComposedTree) -> Vec<ReferenceIssue> {
    let mut issues = Vec::new();
    let mut aliases = Vec::new();

    walk_tokens(tree.as_value(), &mut |leaf| {
        for reference in collect_references(leaf.value) {
            if !tree.is_token_path(reference.path()) {
                issues.push(ReferenceIssue::Dangling {
                    from: leaf.path.to_string(),
                    target: reference.path().to_string(),
                });
            }
        }
        if Reference::from_value(leaf.value).is_some() {
            aliases.push(leaf.path.to_string());
        }
    });

    let mut reported: HashSet<String> = HashSet::new();
    for start in aliases {
        if reported.contains(&start) {
            continue;
        }
        if let Some(chain) = find_cycle(tree, &start) {
            reported.extend(chain.iter().cloned());
            issues.push(ReferenceIssue::Cycle { chain });
        }
    }
    issues
}

/// Follow bare-alias tokens from `start`; return the loop if one is reached.
fn find_cycle(tree: &ComposedTree, start: &str) -> Option<Vec<String>> {
    let mut chain = vec![start.to_string()];
    let mut current = start.to_string();
    loop {
        let value = tree.get(&current)?.get(VALUE_KEY)?;
        let next = Reference::from_value(value)?.path().to_string();
        if let Some(pos) = chain.iter().position(|p| *p == next) {
            let mut cycle = chain.split_off(pos);
            cycle.push(next);
            return Some(cycle);
        }
        chain.push(next.clone());
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{compose, Layer};
    use serde_json::json;

    fn composed(tree: serde_json::Value) -> ComposedTree {
        compose(vec![Layer::composed("test", tree)], &|p: &str| p.to_string())
    }

    #[test]
    fn resolved_references_are_clean() {
        let tree = composed(json!({
            "core": { "color": { "red": { "$value": "#f00" } } },
            "semantic": { "danger": { "$value": "{core.color.red}" } }
        }));
        assert!(check_references(&tree).is_empty());
    }

    #[test]
    fn reports_dangling_and_group_targets() {
        let tree = composed(json!({
            "core": { "color": { "red": { "$value": "#f00" } } },
            "semantic": {
                "missing": { "$value": "{core.color.green}" },
                "group": { "$value": "{core.color}" },
                "border": { "$value": { "color": "{semantic.nope}", "width": "1px", "style": "solid" } }
            }
        }));
        let issues = check_references(&tree);
        assert_eq!(issues.len(), 3);
        assert_eq!(
            issues[0],
            ReferenceIssue::Dangling {
                from: "semantic.missing".into(),
                target: "core.color.green".into()
            }
        );
        assert!(issues[2].to_string().contains("semantic.nope"));
    }

    #[test]
    fn detects_cycles_once() {
        let tree = composed(json!({
            "core": {
                "a": { "$value": "{core.b}" },
                "b": { "$value": "{core.c}" },
                "c": { "$value": "{core.a}" }
            }
        }));
        let issues = check_references(&tree);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0],
            ReferenceIssue::Cycle {
                chain: vec!["core.a".into(), "core.b".into(), "core.c".into(), "core.a".into()]
            }
        );
    }
}
