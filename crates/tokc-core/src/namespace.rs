//! The two top-level layers of a composed token tree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A top-level layer of the composed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Primitive, context-free values.
    Core,
    /// Purpose-bound values that typically reference core values.
    Semantic,
}

impl Namespace {
    /// All namespaces in merge order.
    pub const ALL: [Namespace; 2] = [Namespace::Core, Namespace::Semantic];

    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Core => "core",
            Namespace::Semantic => "semantic",
        }
    }

    /// The namespace a fully qualified path already belongs to, if any.
    pub fn of_path(path: &str) -> Option<Namespace> {
        Self::ALL.into_iter().find(|ns| {
            path.strip_prefix(ns.as_str())
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// Prefix `path` with this namespace.
    pub fn qualify(&self, path: &str) -> String {
        format!("{}.{}", self.as_str(), path)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "core" => Ok(Namespace::Core),
            "semantic" => Ok(Namespace::Semantic),
            other => Err(format!(
                "unknown namespace '{other}' (expected 'core' or 'semantic')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_path_requires_dot_boundary() {
        assert_eq!(Namespace::of_path("core.color.red"), Some(Namespace::Core));
        assert_eq!(
            Namespace::of_path("semantic.color.foreground"),
            Some(Namespace::Semantic)
        );
        assert_eq!(Namespace::of_path("corepalette.red"), None);
        assert_eq!(Namespace::of_path("core"), None);
        assert_eq!(Namespace::of_path("color.core.red"), None);
    }

    #[test]
    fn parse_and_display_agree() {
        for ns in Namespace::ALL {
            assert_eq!(ns.to_string().parse::<Namespace>().unwrap(), ns);
        }
        assert!("brand".parse::<Namespace>().is_err());
    }
}
