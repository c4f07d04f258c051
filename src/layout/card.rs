use crate::content_types::{has_actions, is_stat_content};
use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Presentation variant of a smart card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardVariant {
    Basic,
    Media,
    Info,
    Stat,
    Action,
}

impl CardVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardVariant::Basic => "basic",
            CardVariant::Media => "media",
            CardVariant::Info => "info",
            CardVariant::Stat => "stat",
            CardVariant::Action => "action",
        }
    }

    pub fn parse(name: &str) -> Option<CardVariant> {
        match name {
            "basic" => Some(CardVariant::Basic),
            "media" => Some(CardVariant::Media),
            "info" => Some(CardVariant::Info),
            "stat" => Some(CardVariant::Stat),
            "action" => Some(CardVariant::Action),
            _ => None,
        }
    }
}

impl fmt::Display for CardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Variant for a card's data. A recognized `variant` field wins over
/// detection.
pub fn detect_card_variant(card: &Value) -> CardVariant {
    if let Some(variant) = card
        .get("variant")
        .and_then(|v| v.as_str().and_then(CardVariant::parse))
    {
        return variant;
    }

    let truthy = |key: &str| card.get(key).is_some_and(|v| v.is_truthy());
    let content = card.get("content");

    if truthy("image") {
        CardVariant::Media
    } else if truthy("icon") && content.as_ref().is_some_and(Value::is_string) {
        CardVariant::Info
    } else if content.as_ref().map_or(is_stat_content(card), is_stat_content) {
        CardVariant::Stat
    } else if has_actions(card) {
        CardVariant::Action
    } else {
        CardVariant::Basic
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(json: &str) -> CardVariant {
        detect_card_variant(&Value::from_json_str(json).unwrap())
    }

    #[test]
    fn test_detection_order() {
        assert_eq!(variant(r#"{"image": "a.png", "value": 1}"#), CardVariant::Media);
        assert_eq!(variant(r#"{"icon": "i", "content": "hello"}"#), CardVariant::Info);
        assert_eq!(variant(r#"{"icon": "i", "content": {"value": 2}}"#), CardVariant::Stat);
        assert_eq!(variant(r#"{"value": 42, "label": "Users"}"#), CardVariant::Stat);
        assert_eq!(variant(r#"{"actions": [{"text": "Go"}]}"#), CardVariant::Action);
        assert_eq!(variant(r#"{"items": [1, 2]}"#), CardVariant::Basic);
    }

    #[test]
    fn test_explicit_variant_wins() {
        assert_eq!(variant(r#"{"variant": "info", "image": "a.png"}"#), CardVariant::Info);
        assert_eq!(variant(r#"{"variant": "fancy", "image": "a.png"}"#), CardVariant::Media);
    }

    #[test]
    fn test_empty_image_is_not_media() {
        assert_eq!(variant(r#"{"image": "", "actions": [{"text": "Go"}]}"#), CardVariant::Action);
    }
}
