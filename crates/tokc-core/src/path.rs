//! Token paths and their flattened CSS variable names.

/// Join a parent path and a child key with a `.`.
pub fn join(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

/// Convert a token path to a CSS custom property name.
///
/// `core.color.red.500` with prefix `ds` becomes `--ds-core-color-red-500`;
/// an empty prefix yields `--core-color-red-500`.
pub fn css_var_name(path: &str, prefix: &str) -> String {
    let flat = path.replace('.', "-");
    if prefix.is_empty() {
        format!("--{flat}")
    } else {
        format!("--{prefix}-{flat}")
    }
}

/// `var(...)` expression referring to the variable for `path`.
pub fn css_var_ref(path: &str, prefix: &str) -> String {
    format!("var({})", css_var_name(path, prefix))
}

/// Characters allowed in a path segment so that its variable name is a
/// plain CSS identifier.
pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

/// Whether `name` is `--` followed by one or more name characters.
pub fn is_custom_property_name(name: &str) -> bool {
    name.strip_prefix("--")
        .is_some_and(|rest| !rest.is_empty() && rest.chars().all(is_name_char))
}

/// Whether `value` can sit in a declaration without ending it or opening a
/// block: non-empty, with no `;`, braces or line breaks.
pub fn is_safe_css_value(value: &str) -> bool {
    !value.trim().is_empty() && !value.contains([';', '{', '}', '\n', '\r'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_handles_root() {
        assert_eq!(join("", "core"), "core");
        assert_eq!(join("core", "color"), "core.color");
    }

    #[test]
    fn var_names_flatten_dots() {
        assert_eq!(
            css_var_name("semantic.color.foreground.primary", ""),
            "--semantic-color-foreground-primary"
        );
        assert_eq!(css_var_name("core.space.2", "ds"), "--ds-core-space-2");
        assert_eq!(css_var_ref("core.space.2", ""), "var(--core-space-2)");
    }

    #[test]
    fn custom_property_names_are_plain_identifiers() {
        assert!(is_custom_property_name("--core-space_2"));
        assert!(!is_custom_property_name("--"));
        assert!(!is_custom_property_name("core-space"));
        assert!(!is_custom_property_name("--a b"));
        assert!(!is_custom_property_name("--x: red; background: url(evil); --y"));
        assert!(!is_custom_property_name("--btn}body{color"));
    }

    #[test]
    fn unsafe_values_are_detected() {
        assert!(is_safe_css_value("var(--a, 4px)"));
        assert!(!is_safe_css_value("  "));
        assert!(!is_safe_css_value("x; } body { display: none"));
        assert!(!is_safe_css_value("a\nb"));
    }
}
