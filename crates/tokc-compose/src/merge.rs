//! Deep merging of token trees.
//!
//! Groups merge key by key. Tokens, arrays and scalars are atomic: a later
//! source replaces them wholesale, so two tokens are never blended field by
//! field.

use serde_json::{Map, Value};

use tokc_core::is_token;

/// Whether `value` merges recursively (a group) rather than being replaced.
fn is_mergeable_group(value: &Value) -> bool {
    value.is_object() && !is_token(value)
}

/// Merge `source` into `target`; `source` wins every collision.
pub fn merge_into(target: &mut Value, source: Value) {
    if !(is_mergeable_group(target) && is_mergeable_group(&source)) {
        *target = source;
        return;
    }
    let (Value::Object(target_obj), Value::Object(source_obj)) = (target, source) else {
        return;
    };
    for (key, incoming) in source_obj {
        match target_obj.get_mut(&key) {
            Some(existing) => merge_into(existing, incoming),
            None => {
                target_obj.insert(key, incoming);
            }
        }
    }
}

/// Merge trees in append order; later trees win.
pub fn deep_merge<I>(sources: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    let mut merged = Value::Object(Map::new());
    for source in sources {
        merge_into(&mut merged, source);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn later_source_wins_on_leaf_collision() {
        let merged = deep_merge([
            json!({"color": {"red": {"$value": "#f00", "$description": "old"}}}),
            json!({"color": {"red": {"$value": "#e00"}}}),
        ]);
        // Replaced wholesale: the old description does not survive.
        assert_eq!(merged, json!({"color": {"red": {"$value": "#e00"}}}));
    }

    #[test]
    fn groups_merge_recursively() {
        let merged = deep_merge([
            json!({"color": {"$type": "color", "red": {"$value": "#f00"}}}),
            json!({"color": {"blue": {"$value": "#00f"}}, "space": {"sm": {"$value": 4}}}),
        ]);
        assert_eq!(
            merged,
            json!({
                "color": {"$type": "color", "red": {"$value": "#f00"}, "blue": {"$value": "#00f"}},
                "space": {"sm": {"$value": 4}}
            })
        );
    }

    #[test]
    fn arrays_are_atomic() {
        let merged = deep_merge([
            json!({"font": {"$value": ["Inter", "Arial", "sans-serif"]}}),
            json!({"font": {"$value": ["Roboto"]}}),
        ]);
        assert_eq!(merged["font"]["$value"], json!(["Roboto"]));

        let mut target = json!({"list": [1, 2, 3]});
        merge_into(&mut target, json!({"list": [9]}));
        assert_eq!(target, json!({"list": [9]}));
    }

    #[test]
    fn token_and_group_replace_each_other() {
        let merged = deep_merge([
            json!({"a": {"b": {"$value": 1}}}),
            json!({"a": {"$value": 2}}),
        ]);
        assert_eq!(merged, json!({"a": {"$value": 2}}));

        let merged = deep_merge([
            json!({"a": {"$value": 2}}),
            json!({"a": {"b": {"$value": 1}}}),
        ]);
        assert_eq!(merged, json!({"a": {"b": {"$value": 1}}}));
    }

    #[test]
    fn composite_token_values_are_not_blended() {
        let merged = deep_merge([
            json!({"border": {"$value": {"color": "{a}", "width": "{b}", "style": "solid"}}}),
            json!({"border": {"$value": {"color": "{c}"}}}),
        ]);
        assert_eq!(merged["border"]["$value"], json!({"color": "{c}"}));
    }

    #[test]
    fn empty_input_is_empty_object() {
        assert_eq!(deep_merge(Vec::<Value>::new()), json!({}));
    }

    #[test]
    fn key_order_follows_first_appearance() {
        let merged = deep_merge([json!({"b": {}, "a": {}}), json!({"c": {}, "a": {"x": {"$value": 1}}})]);
        let keys: Vec<_> = merged.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
