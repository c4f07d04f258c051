//! Canonical content shapes.
//!
//! Each predicate tests one shape and is independent of the others. Callers
//! that need a single answer use [`detect_content_type`], which applies the
//! predicates in a fixed precedence order. An object matching several shapes
//! is classified by that order, not by which shape is "more specific":
//!
//! `custom` > `media` > `stat` > `list` > `text` > `action` > `generic`

use crate::value::{Value, TYPE_KEY};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Carries an explicit `_type` discriminator
    Custom,
    /// Has an `image` field
    Media,
    /// Has a `value` field
    Stat,
    /// Has an `items` array
    List,
    /// Bare string
    Text,
    /// Has a non-empty `actions` array
    Action,
    Generic,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Custom => "custom",
            ContentType::Media => "media",
            ContentType::Stat => "stat",
            ContentType::List => "list",
            ContentType::Text => "text",
            ContentType::Action => "action",
            ContentType::Generic => "generic",
        }
    }

    /// Parses an explicit `contentType` hint. Unknown names yield `None`.
    pub fn parse(name: &str) -> Option<ContentType> {
        match name {
            "custom" => Some(ContentType::Custom),
            "media" => Some(ContentType::Media),
            "stat" => Some(ContentType::Stat),
            "list" => Some(ContentType::List),
            "text" => Some(ContentType::Text),
            "action" => Some(ContentType::Action),
            "generic" => Some(ContentType::Generic),
            _ => None,
        }
    }

    /// Content that a card renders as a single unit.
    pub fn is_card_content(&self) -> bool {
        matches!(
            self,
            ContentType::Media | ContentType::Stat | ContentType::List | ContentType::Action
        )
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn is_custom_content(content: &Value) -> bool {
    content.has_key(TYPE_KEY)
}

pub fn is_media_content(content: &Value) -> bool {
    content.has_key("image")
}

pub fn is_stat_content(content: &Value) -> bool {
    content.has_key("value")
}

pub fn is_list_content(content: &Value) -> bool {
    matches!(content.get("items"), Some(Value::Array(_)))
}

pub fn is_text_content(content: &Value) -> bool {
    content.is_string()
}

pub fn has_actions(content: &Value) -> bool {
    matches!(content.get("actions"), Some(Value::Array(actions)) if !actions.is_empty())
}

/// Classifies `content` by the first matching predicate in precedence order.
pub fn detect_content_type(content: &Value) -> ContentType {
    if is_custom_content(content) {
        ContentType::Custom
    } else if is_media_content(content) {
        ContentType::Media
    } else if is_stat_content(content) {
        ContentType::Stat
    } else if is_list_content(content) {
        ContentType::List
    } else if is_text_content(content) {
        ContentType::Text
    } else if has_actions(content) {
        ContentType::Action
    } else {
        ContentType::Generic
    }
}
