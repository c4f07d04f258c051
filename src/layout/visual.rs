//! Visual weight hints for arranged children.
//!
//! The presentation layer uses these to tune a container's styling. Every
//! hint has a heuristic default that an explicit [`VisualOverrides`] value
//! replaces.

use super::{content_view_kind, item_content, LONG_TEXT_CHARS};
use crate::content_types::{is_media_content, is_stat_content};
use crate::core::ViewKind;
use crate::patterns::PatternRegistry;
use crate::value::Value;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shadow {
    None,
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Animation {
    None,
    Subtle,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Padding {
    Normal,
    Large,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentAlign {
    Start,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverEffect {
    Subtle,
    Lift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualHints {
    pub shadow: Shadow,
    pub animation: Animation,
    pub padding: Padding,
    pub glass: bool,
    pub content_align: ContentAlign,
    pub text_align: TextAlign,
    pub hover: HoverEffect,
}

/// Explicit visual settings, as found in the `[layout.visual]` table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct VisualOverrides {
    pub shadow: Option<Shadow>,
    pub animation: Option<Animation>,
    pub padding: Option<Padding>,
    pub glass: Option<bool>,
    pub content_align: Option<ContentAlign>,
    pub text_align: Option<TextAlign>,
    pub hover: Option<HoverEffect>,
}

impl VisualOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Hints for a container holding `items`.
pub fn detect_visual_hints(
    items: &[Value],
    overrides: &VisualOverrides,
    patterns: &PatternRegistry,
) -> VisualHints {
    let contents: Vec<Value> = items.iter().map(item_content).collect();
    let glass = overrides.glass.unwrap_or_else(|| wants_glass(items, &contents));

    VisualHints {
        shadow: overrides
            .shadow
            .unwrap_or_else(|| shadow_level(items, glass)),
        animation: overrides
            .animation
            .unwrap_or_else(|| animation_level(&contents, patterns)),
        padding: overrides
            .padding
            .unwrap_or_else(|| padding_level(&contents, patterns)),
        glass,
        content_align: overrides.content_align.unwrap_or_else(|| {
            if contents.iter().any(is_stat_content) {
                ContentAlign::Center
            } else {
                ContentAlign::Start
            }
        }),
        text_align: overrides.text_align.unwrap_or_else(|| {
            let short_text = |content: &Value| {
                content
                    .as_str()
                    .is_some_and(|text| text.chars().count() < LONG_TEXT_CHARS)
            };
            if contents.iter().all(short_text) {
                TextAlign::Center
            } else {
                TextAlign::Left
            }
        }),
        hover: overrides.hover.unwrap_or_else(|| {
            let interactive = items.iter().any(|item| {
                ["actions", "link", "onClick"]
                    .iter()
                    .any(|key| item.get(key).is_some_and(|v| v.is_truthy()))
            });
            if interactive {
                HoverEffect::Lift
            } else {
                HoverEffect::Subtle
            }
        }),
    }
}

fn has_gradient(items: &[Value]) -> bool {
    items
        .iter()
        .any(|item| item.get("gradient").is_some_and(|v| v.is_truthy()))
}

fn wants_glass(items: &[Value], contents: &[Value]) -> bool {
    has_gradient(items) || contents.iter().any(is_media_content)
}

fn shadow_level(items: &[Value], glass: bool) -> Shadow {
    if items.len() > 10 {
        Shadow::Small
    } else if has_gradient(items) || glass {
        Shadow::Medium
    } else if items.len() <= 4 {
        Shadow::Large
    } else {
        Shadow::Medium
    }
}

fn animation_level(contents: &[Value], patterns: &PatternRegistry) -> Animation {
    if contents.len() > 12 {
        return Animation::None;
    }
    let dynamic = contents.iter().any(|content| {
        matches!(
            content_view_kind(content, patterns),
            ViewKind::Chart | ViewKind::ProgressBar
        )
    });
    if dynamic {
        Animation::Subtle
    } else {
        Animation::Moderate
    }
}

fn padding_level(contents: &[Value], patterns: &PatternRegistry) -> Padding {
    let heavy = contents.iter().any(|content| {
        matches!(
            content_view_kind(content, patterns),
            ViewKind::Chart | ViewKind::ItemTable
        )
    });
    if heavy {
        Padding::Large
    } else {
        Padding::Normal
    }
}
