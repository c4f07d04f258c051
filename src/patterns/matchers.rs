//! Structural predicates behind the built-in pattern registry.
//!
//! Every predicate is total over [`Value`]: `null` elements, primitives and
//! wrong field types simply fail to match. Untyped fields only need to be
//! present (a `null` value counts as present); typed fields must carry the
//! listed type.

use crate::value::{Object, Value};

/// `name` and `avatar`, both string-ish.
pub fn is_user_card(value: &Value) -> bool {
    object_matches(value, |object| {
        field_is(object, "name", Value::is_string_like)
            && field_is(object, "avatar", Value::is_string_like)
    })
}

/// Non-empty array of `{label, value}` elements.
pub fn is_stats_list(value: &Value) -> bool {
    every_element(value, |item| has_all(item, &["label", "value"]))
}

/// `type` plus an array-valued `data`.
pub fn is_chart(value: &Value) -> bool {
    object_matches(value, |object| {
        object.contains_key("type") && field_is(object, "data", |v| matches!(v, Value::Array(_)))
    })
}

/// Non-empty array of `{id, name}` elements.
pub fn is_item_table(value: &Value) -> bool {
    every_element(value, |item| has_all(item, &["id", "name"]))
}

/// Non-empty array of `{text, type | variant}` elements.
pub fn is_action_buttons(value: &Value) -> bool {
    every_element(value, |item| {
        item.has_key("text") && (item.has_key("type") || item.has_key("variant"))
    })
}

/// Numeric `current` and `total`.
pub fn is_progress_bar(value: &Value) -> bool {
    object_matches(value, |object| {
        field_is(object, "current", Value::is_number) && field_is(object, "total", Value::is_number)
    })
}

/// Numeric `lat` and `lng`.
pub fn is_location_map(value: &Value) -> bool {
    object_matches(value, |object| {
        field_is(object, "lat", Value::is_number) && field_is(object, "lng", Value::is_number)
    })
}

/// Any array; the fallback for arrays no specific pattern claims.
pub fn is_any_array(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

fn object_matches(value: &Value, predicate: impl FnOnce(&Object) -> bool) -> bool {
    value.as_object().is_some_and(predicate)
}

fn field_is(object: &Object, key: &str, predicate: impl FnOnce(&Value) -> bool) -> bool {
    object.get(key).is_some_and(|field| predicate(&field))
}

fn has_all(item: &Value, keys: &[&str]) -> bool {
    item.as_object()
        .is_some_and(|object| keys.iter().all(|key| object.contains_key(key)))
}

fn every_element(value: &Value, predicate: impl Fn(&Value) -> bool) -> bool {
    value
        .as_array()
        .is_some_and(|array| array.with_items(|items| !items.is_empty() && items.iter().all(&predicate)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(json: &str) -> Value {
        Value::from_json_str(json).unwrap()
    }

    #[test]
    fn test_user_card_requires_string_like_fields() {
        assert!(is_user_card(&value(r#"{"name": "Jane", "avatar": "url"}"#)));
        assert!(is_user_card(&value(r#"{"name": 7, "avatar": "url"}"#)));
        assert!(!is_user_card(&value(r#"{"name": "Jane"}"#)));
        assert!(!is_user_card(&value(r#"{"name": "Jane", "avatar": null}"#)));
        assert!(!is_user_card(&value(r#"{"name": {"first": "J"}, "avatar": "url"}"#)));
    }

    #[test]
    fn test_stats_list_needs_every_element() {
        assert!(is_stats_list(&value(r#"[{"label": "Projects", "value": 15}]"#)));
        assert!(!is_stats_list(&value(r#"[{"label": "a", "value": 1}, {"label": "b"}]"#)));
        assert!(!is_stats_list(&value("[]")));
    }

    #[test]
    fn test_null_elements_never_panic() {
        let v = value(r#"[null, {"label": "a", "value": 1}]"#);
        assert!(!is_stats_list(&v));
        assert!(!is_item_table(&v));
        assert!(!is_action_buttons(&v));
        assert!(is_any_array(&v));
    }

    #[test]
    fn test_chart_requires_array_data() {
        assert!(is_chart(&value(r#"{"type": "bar", "data": [1, 2]}"#)));
        assert!(!is_chart(&value(r#"{"type": "bar", "data": {"x": 1}}"#)));
        assert!(!is_chart(&value(r#"{"data": [1]}"#)));
    }

    #[test]
    fn test_action_buttons_accept_type_or_variant() {
        assert!(is_action_buttons(&value(r#"[{"text": "Go", "type": "primary"}]"#)));
        assert!(is_action_buttons(&value(r#"[{"text": "Go", "variant": "secondary"}]"#)));
        assert!(!is_action_buttons(&value(r#"[{"text": "Go"}]"#)));
    }

    #[test]
    fn test_numeric_patterns_reject_strings() {
        assert!(is_progress_bar(&value(r#"{"current": 3, "total": 10}"#)));
        assert!(!is_progress_bar(&value(r#"{"current": "3", "total": 10}"#)));
        assert!(is_location_map(&value(r#"{"lat": 1.0, "lng": 2.0}"#)));
        assert!(!is_location_map(&value(r#"{"lat": 1.0}"#)));
    }

    #[test]
    fn test_matchers_do_not_mutate_input() {
        let v = value(r#"[{"id": 1, "name": "a"}, {"id": 2, "name": "b"}]"#);
        let before = v.to_string();
        let _ = is_item_table(&v);
        let _ = is_stats_list(&v);
        assert_eq!(v.to_string(), before);
    }
}
