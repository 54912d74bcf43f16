//! Guards for untrusted values flowing into class or variable names.

use serde_json::Value;

/// `value` if it is present and satisfies `predicate`, otherwise `fallback`.
pub fn safe_token_value<T, P>(value: Option<T>, fallback: T, predicate: P) -> T
where
    P: FnOnce(&T) -> bool,
{
    match value {
        Some(v) if predicate(&v) => v,
        _ => fallback,
    }
}

/// The entry of `allowed` equal to `value`, or `fallback`.
///
/// The returned string always comes from `allowed` or `fallback`, never from
/// the input. Null, non-string and empty values yield the fallback.
pub fn safe_enum_value<'a>(value: &Value, allowed: &[&'a str], fallback: &'a str) -> &'a str {
    let candidate = value.as_str().filter(|s| !s.is_empty());
    safe_token_value(
        candidate.and_then(|s| allowed.iter().copied().find(|a| *a == s)),
        fallback,
        |_| true,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const VARIANTS: [&str; 3] = ["primary", "secondary", "ghost"];

    fn is_variant(v: &&str) -> bool {
        VARIANTS.contains(v)
    }

    #[test]
    fn passes_values_that_satisfy_the_predicate() {
        assert_eq!(safe_token_value(Some("ghost"), "primary", is_variant), "ghost");
    }

    #[test]
    fn absent_empty_and_unknown_yield_fallback() {
        assert_eq!(safe_token_value(None, "primary", is_variant), "primary");
        assert_eq!(safe_token_value(Some(""), "primary", is_variant), "primary");
        assert_eq!(safe_token_value(Some("danger"), "primary", is_variant), "primary");
    }

    #[test]
    fn works_for_non_string_values() {
        let positive = |n: &i64| *n > 0;
        assert_eq!(safe_token_value(Some(4), 1, positive), 4);
        assert_eq!(safe_token_value(Some(-2), 1, positive), 1);
        assert_eq!(safe_token_value(None, 1, positive), 1);
    }

    #[test]
    fn enum_guard_handles_untrusted_json() {
        assert_eq!(safe_enum_value(&json!("secondary"), &VARIANTS, "primary"), "secondary");
        for bad in [json!(null), json!(""), json!(3), json!(true), json!(["ghost"]), json!("Ghost")] {
            assert_eq!(safe_enum_value(&bad, &VARIANTS, "primary"), "primary", "{bad}");
        }
    }
}
