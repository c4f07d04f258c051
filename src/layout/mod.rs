//! Spatial arrangement of a composite node's children.
//!
//! [`choose_arrangement`] picks a kind, a column count and a gap for a list of
//! items. Explicit settings win in this order: the value itself (`_layout`,
//! `_columns`, or the `config` object of a layout kind), then the
//! configuration's [`LayoutHints`], then the heuristics below.
//!
//! Kind detection, first rule that applies:
//!
//! | rule                                              | kind        |
//! |---------------------------------------------------|-------------|
//! | any item has `area`                               | `areas`     |
//! | any item has `size`                               | `dashboard` |
//! | at most two items                                 | `list`      |
//! | media + stat content ≥ 40% of items               | `grid`      |
//! | complex content or text longer than 100 chars     | `list`      |
//! | more than four items                              | `grid`      |
//! | otherwise                                         | `list`      |

pub mod card;
pub mod visual;

pub use card::{detect_card_variant, CardVariant};
pub use visual::{detect_visual_hints, VisualHints, VisualOverrides};

use crate::config::LayoutHints;
use crate::content_types::{detect_content_type, ContentType};
use crate::core::ViewKind;
use crate::patterns::PatternRegistry;
use crate::value::{Object, Value, COLUMNS_KEY, LAYOUT_KEY, TYPE_KEY};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Share of items that must be media or stat content for a grid, in tenths.
const CARD_CONTENT_TENTHS: usize = 4;
/// Share of an item's keys that must appear in the first item for a table, in tenths.
const TABLE_OVERLAP_TENTHS: usize = 7;
/// Strings longer than this push the arrangement to a list.
pub const LONG_TEXT_CHARS: usize = 100;
/// Tables with more distinct keys than this are not offered.
pub const MAX_TABLE_FIELDS: usize = 10;
pub const DEFAULT_WIDTH: u32 = 1200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrangementKind {
    List,
    Grid,
    Table,
    Areas,
    Dashboard,
}

impl ArrangementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrangementKind::List => "list",
            ArrangementKind::Grid => "grid",
            ArrangementKind::Table => "table",
            ArrangementKind::Areas => "areas",
            ArrangementKind::Dashboard => "dashboard",
        }
    }

    /// Parses a layout name. `auto` and unknown names yield `None`, leaving
    /// the choice to the heuristics.
    pub fn parse(name: &str) -> Option<ArrangementKind> {
        match name.trim().to_ascii_lowercase().as_str() {
            "list" | "flex" => Some(ArrangementKind::List),
            "grid" => Some(ArrangementKind::Grid),
            "table" => Some(ArrangementKind::Table),
            "areas" => Some(ArrangementKind::Areas),
            "dashboard" => Some(ArrangementKind::Dashboard),
            _ => None,
        }
    }
}

impl FromStr for ArrangementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ArrangementKind::parse(s).ok_or_else(|| format!("unknown layout kind: {}", s))
    }
}

impl fmt::Display for ArrangementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spacing between arranged children.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GapToken {
    Small,
    Medium,
    Large,
    /// Any other CSS length, passed through.
    Custom(String),
}

impl GapToken {
    pub fn as_css(&self) -> &str {
        match self {
            GapToken::Small => "0.5rem",
            GapToken::Medium => "1rem",
            GapToken::Large => "1.5rem",
            GapToken::Custom(css) => css,
        }
    }

    /// Accepts token names and their CSS lengths. Anything else non-empty is
    /// kept as a custom length.
    pub fn parse(token: &str) -> Option<GapToken> {
        match token.trim() {
            "" | "auto" => None,
            "small" | "0.5rem" => Some(GapToken::Small),
            "medium" | "1rem" => Some(GapToken::Medium),
            "large" | "1.5rem" => Some(GapToken::Large),
            other => Some(GapToken::Custom(other.to_string())),
        }
    }
}

impl fmt::Display for GapToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

impl Serialize for GapToken {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_css())
    }
}

impl<'de> Deserialize<'de> for GapToken {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        GapToken::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid gap: {:?}", raw)))
    }
}

/// Arrangement chosen for a composite node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Arrangement {
    pub kind: ArrangementKind,
    pub columns: usize,
    pub gap: GapToken,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Table columns, in first-seen key order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

/// Explicit arrangement settings from one source. Unset fields defer to the
/// next source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArrangementOverrides {
    pub kind: Option<ArrangementKind>,
    pub columns: Option<usize>,
    pub gap: Option<GapToken>,
    pub theme: Option<String>,
}

impl ArrangementOverrides {
    /// `_layout` and `_columns` on a composite object.
    pub fn from_object(object: &Object) -> Self {
        Self {
            kind: object
                .get_str(LAYOUT_KEY)
                .and_then(|name| ArrangementKind::parse(&name)),
            columns: positive(object.get_usize(COLUMNS_KEY)),
            ..Self::default()
        }
    }

    /// The `config` object of an explicit layout kind.
    pub fn from_layout_config(config: &Value) -> Self {
        let Some(object) = config.as_object() else {
            return Self::default();
        };
        let kind = object
            .get_str("layoutType")
            .or_else(|| object.get_str("type"))
            .and_then(|name| ArrangementKind::parse(&name));

        Self {
            kind,
            columns: positive(object.get_usize("columns")),
            gap: object.get_str("gap").and_then(|gap| GapToken::parse(&gap)),
            theme: object.get_str("theme"),
        }
    }

    pub fn from_hints(hints: &LayoutHints) -> Self {
        Self {
            kind: hints.layout,
            columns: hints.columns,
            gap: hints.gap.clone(),
            theme: hints.theme.clone(),
        }
    }

    /// Builder method to fill a missing kind with a default
    pub fn with_default_kind(mut self, kind: ArrangementKind) -> Self {
        self.kind.get_or_insert(kind);
        self
    }

    /// Keeps every field already set; fills the rest from `fallback`.
    pub fn merge(self, fallback: ArrangementOverrides) -> Self {
        Self {
            kind: self.kind.or(fallback.kind),
            columns: self.columns.or(fallback.columns),
            gap: self.gap.or(fallback.gap),
            theme: self.theme.or(fallback.theme),
        }
    }
}

fn positive(columns: Option<usize>) -> Option<usize> {
    columns.filter(|&c| c > 0)
}

/// Arrangement from the configuration hints and the heuristics alone.
pub fn choose_arrangement(
    items: &[Value],
    hints: &LayoutHints,
    patterns: &PatternRegistry,
) -> Arrangement {
    choose_arrangement_with(items, hints, ArrangementOverrides::default(), patterns)
}

/// Arrangement with value-level `overrides` taking precedence over `hints`.
pub fn choose_arrangement_with(
    items: &[Value],
    hints: &LayoutHints,
    overrides: ArrangementOverrides,
    patterns: &PatternRegistry,
) -> Arrangement {
    let explicit = overrides.merge(ArrangementOverrides::from_hints(hints));
    let count = items.len();

    let kind = explicit
        .kind
        .unwrap_or_else(|| detect_arrangement_kind(items, patterns));
    let fields = match kind {
        ArrangementKind::Table => table_fields(items),
        _ => None,
    };
    let columns = explicit
        .columns
        .unwrap_or_else(|| default_columns(kind, hints.width, count, fields.as_deref()));

    Arrangement {
        kind,
        columns: columns.max(1),
        gap: explicit.gap.unwrap_or_else(|| optimal_gap(count)),
        theme: explicit.theme,
        fields,
    }
}

/// Heuristic kind for `items`, ignoring every explicit setting. Content
/// without `_type` is classified through `patterns`.
pub fn detect_arrangement_kind(items: &[Value], patterns: &PatternRegistry) -> ArrangementKind {
    let count = items.len();

    if items.iter().any(|item| item.has_key("area")) {
        return ArrangementKind::Areas;
    }
    if items.iter().any(|item| item.has_key("size")) {
        return ArrangementKind::Dashboard;
    }
    if count <= 2 {
        return ArrangementKind::List;
    }

    let card_content = items
        .iter()
        .filter(|item| {
            matches!(
                item_content_type(item),
                ContentType::Media | ContentType::Stat
            )
        })
        .count();
    if card_content * 10 >= count * CARD_CONTENT_TENTHS {
        return ArrangementKind::Grid;
    }

    let heavy = items.iter().any(|item| {
        let content = item_content(item);
        content_view_kind(&content, patterns).is_complex_container() || is_long_text(&content)
    });
    if heavy {
        return ArrangementKind::List;
    }

    if count > 4 {
        ArrangementKind::Grid
    } else {
        ArrangementKind::List
    }
}

fn default_columns(
    kind: ArrangementKind,
    width: u32,
    count: usize,
    fields: Option<&[String]>,
) -> usize {
    match kind {
        ArrangementKind::Grid => optimal_columns(width, count),
        ArrangementKind::List => 1,
        ArrangementKind::Areas | ArrangementKind::Dashboard if count == 0 => 3,
        ArrangementKind::Areas | ArrangementKind::Dashboard => count.min(4),
        ArrangementKind::Table => fields.map_or(1, <[String]>::len),
    }
}

/// Grid columns for a viewport `width`, never more than the item count and
/// never fewer than one.
pub fn optimal_columns(width: u32, count: usize) -> usize {
    let columns = match width {
        w if w < 600 => 1,
        w if w < 900 => count.min(2),
        w if w < 1200 => count.min(3),
        _ => count.min(4),
    };
    columns.max(1)
}

pub fn optimal_gap(count: usize) -> GapToken {
    if count > 12 {
        GapToken::Small
    } else if count > 6 {
        GapToken::Medium
    } else {
        GapToken::Large
    }
}

/// What the heuristics inspect for an item: its `content` when it is a
/// layout item carrying one, otherwise the item itself.
pub fn item_content(item: &Value) -> Value {
    item.get("content").unwrap_or_else(|| item.clone())
}

/// An item's declared `contentType`, or the detected type of its content.
pub fn item_content_type(item: &Value) -> ContentType {
    item.get("contentType")
        .and_then(|hint| hint.as_str().and_then(ContentType::parse))
        .unwrap_or_else(|| detect_content_type(&item_content(item)))
}

/// Built-in kind a piece of content would render as: its explicit `_type`
/// when that is a built-in, otherwise the first match in `patterns`.
pub fn content_view_kind(content: &Value, patterns: &PatternRegistry) -> ViewKind {
    match content.get(TYPE_KEY) {
        Some(discriminator) => discriminator
            .as_str()
            .and_then(ViewKind::from_discriminator)
            .unwrap_or(ViewKind::Generic),
        None => patterns.resolve(content),
    }
}

fn is_long_text(content: &Value) -> bool {
    content
        .as_str()
        .is_some_and(|text| text.chars().count() > LONG_TEXT_CHARS)
}

/// At least two objects whose keys mostly match the first object's keys.
pub fn is_table_eligible(items: &[Value]) -> bool {
    if items.len() < 2 {
        return false;
    }
    let Some(first) = items[0].as_object() else {
        return false;
    };
    let first_keys = first.keys();
    if first_keys.is_empty() {
        return false;
    }

    items.iter().all(|item| {
        item.as_object().is_some_and(|object| {
            let keys = object.keys();
            let shared = keys.iter().filter(|key| first_keys.contains(key)).count();
            !keys.is_empty() && shared * 10 >= keys.len() * TABLE_OVERLAP_TENTHS
        })
    })
}

/// Union of the items' keys in first-seen order. `None` once the union
/// grows past [`MAX_TABLE_FIELDS`].
pub fn table_fields(items: &[Value]) -> Option<Vec<String>> {
    let mut fields: Vec<String> = Vec::new();
    for object in items.iter().filter_map(Value::as_object) {
        for key in object.keys() {
            if !fields.contains(&key) {
                fields.push(key);
            }
        }
        if fields.len() > MAX_TABLE_FIELDS {
            return None;
        }
    }
    Some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn value(json: &str) -> Value {
        Value::from_json_str(json).unwrap()
    }

    fn items(json: &str) -> Vec<Value> {
        value(json).as_array().unwrap().to_vec()
    }

    fn builtin() -> &'static PatternRegistry {
        PatternRegistry::shared()
    }

    fn hints(width: u32) -> LayoutHints {
        LayoutHints {
            width,
            ..LayoutHints::default()
        }
    }

    #[test]
    fn test_size_items_make_a_dashboard() {
        let widgets = items(r#"[{"size": "small"}, {"size": "large"}, {"size": "medium"}]"#);
        let arrangement = choose_arrangement(&widgets, &LayoutHints::default(), builtin());
        assert_eq!(arrangement.kind, ArrangementKind::Dashboard);
        assert_eq!(arrangement.columns, 3);
    }

    #[test]
    fn test_eight_short_texts_make_a_three_column_grid_at_1000() {
        let texts: Vec<Value> = (0..8).map(|i| Value::from(format!("item {i}"))).collect();
        let arrangement = choose_arrangement(&texts, &hints(1000), builtin());
        assert_eq!(arrangement.kind, ArrangementKind::Grid);
        assert_eq!(arrangement.columns, 3);
        assert_eq!(arrangement.gap, GapToken::Medium);
    }

    #[test]
    fn test_area_beats_size() {
        let mixed = items(r#"[{"size": "small"}, {"area": "main"}]"#);
        assert_eq!(detect_arrangement_kind(&mixed, builtin()), ArrangementKind::Areas);
    }

    #[test]
    fn test_two_items_are_a_list() {
        let two = items(r#"[{"image": "a"}, {"image": "b"}]"#);
        assert_eq!(detect_arrangement_kind(&two, builtin()), ArrangementKind::List);
    }

    #[test]
    fn test_forty_percent_card_content_is_a_grid() {
        let five = items(
            r#"[{"content": {"value": 1}}, {"content": {"image": "x"}},
                {"content": "a"}, {"content": "b"}, {"content": "c"}]"#,
        );
        assert_eq!(detect_arrangement_kind(&five, builtin()), ArrangementKind::Grid);

        let below = items(
            r#"[{"content": {"value": 1}}, "a", "b", "c"]"#,
        );
        assert_eq!(detect_arrangement_kind(&below, builtin()), ArrangementKind::List);
    }

    #[test]
    fn test_content_type_hint_is_honored() {
        let hinted = items(
            r#"[{"contentType": "media", "content": "a"},
                {"contentType": "media", "content": "b"}, "c"]"#,
        );
        assert_eq!(detect_arrangement_kind(&hinted, builtin()), ArrangementKind::Grid);
    }

    #[test]
    fn test_complex_content_forces_a_list() {
        let charts = items(
            r#"[{"content": {"_type": "chart"}}, "a", "b", "c", "d", "e"]"#,
        );
        assert_eq!(detect_arrangement_kind(&charts, builtin()), ArrangementKind::List);

        let structural = items(r#"[{"lat": 1, "lng": 2}, "a", "b", "c", "d"]"#);
        assert_eq!(detect_arrangement_kind(&structural, builtin()), ArrangementKind::List);

        let long = "x".repeat(LONG_TEXT_CHARS + 1);
        let texts = vec![Value::from(long), "a".into(), "b".into(), "c".into(), "d".into()];
        assert_eq!(detect_arrangement_kind(&texts, builtin()), ArrangementKind::List);
    }

    fn has_series(value: &Value) -> bool {
        value.has_key("series")
    }

    #[test]
    fn test_custom_patterns_feed_the_heuristics() {
        use crate::patterns::{PatternEntry, Shape};

        let widgets = items(
            r#"[{"series": [1]}, {"series": [2]}, {"series": [3]}, {"series": [4]}, {"series": [5]}]"#,
        );
        assert_eq!(detect_arrangement_kind(&widgets, builtin()), ArrangementKind::Grid);

        let custom = PatternRegistry::builtin().with_priority_entry(PatternEntry::new(
            ViewKind::Chart,
            Shape::Object,
            has_series,
        ));
        assert_eq!(content_view_kind(&widgets[0], &custom), ViewKind::Chart);
        assert_eq!(detect_arrangement_kind(&widgets, &custom), ArrangementKind::List);
        assert_eq!(
            choose_arrangement(&widgets, &LayoutHints::default(), &custom).kind,
            ArrangementKind::List
        );
    }

    #[test]
    fn test_item_count_decides_the_rest() {
        let four: Vec<Value> = ["a", "b", "c", "d"].into_iter().map(Value::from).collect();
        assert_eq!(detect_arrangement_kind(&four, builtin()), ArrangementKind::List);
        let five: Vec<Value> = ["a", "b", "c", "d", "e"].into_iter().map(Value::from).collect();
        assert_eq!(detect_arrangement_kind(&five, builtin()), ArrangementKind::Grid);
    }

    #[test]
    fn test_column_tiers() {
        assert_eq!(optimal_columns(599, 8), 1);
        assert_eq!(optimal_columns(600, 8), 2);
        assert_eq!(optimal_columns(899, 1), 1);
        assert_eq!(optimal_columns(900, 8), 3);
        assert_eq!(optimal_columns(1199, 2), 2);
        assert_eq!(optimal_columns(1200, 8), 4);
        assert_eq!(optimal_columns(1920, 0), 1);
    }

    #[test]
    fn test_gap_thresholds() {
        assert_eq!(optimal_gap(13), GapToken::Small);
        assert_eq!(optimal_gap(12), GapToken::Medium);
        assert_eq!(optimal_gap(7), GapToken::Medium);
        assert_eq!(optimal_gap(6), GapToken::Large);
        assert_eq!(optimal_gap(0), GapToken::Large);
    }

    #[test]
    fn test_value_overrides_beat_hints() {
        let object = Object::from_entries([
            ("_layout", Value::from("table")),
            ("_columns", Value::from(2)),
        ]);
        let configured = LayoutHints {
            layout: Some(ArrangementKind::Grid),
            columns: Some(5),
            gap: Some(GapToken::Small),
            ..LayoutHints::default()
        };
        let texts: Vec<Value> = ["a", "b", "c"].into_iter().map(Value::from).collect();
        let arrangement = choose_arrangement_with(
            &texts,
            &configured,
            ArrangementOverrides::from_object(&object),
            builtin(),
        );

        assert_eq!(arrangement.kind, ArrangementKind::Table);
        assert_eq!(arrangement.columns, 2);
        assert_eq!(arrangement.gap, GapToken::Small);
    }

    #[test]
    fn test_layout_config_overrides() {
        let config = value(r#"{"type": "grid", "columns": 3, "gap": "2rem", "theme": "dark"}"#);
        let overrides = ArrangementOverrides::from_layout_config(&config);
        assert_eq!(overrides.kind, Some(ArrangementKind::Grid));
        assert_eq!(overrides.columns, Some(3));
        assert_eq!(overrides.gap, Some(GapToken::Custom("2rem".into())));
        assert_eq!(overrides.theme.as_deref(), Some("dark"));

        let auto = ArrangementOverrides::from_layout_config(&value(r#"{"layoutType": "auto"}"#));
        assert_eq!(auto.kind, None);
        let zero = ArrangementOverrides::from_layout_config(&value(r#"{"columns": 0}"#));
        assert_eq!(zero.columns, None);
    }

    #[test]
    fn test_table_eligibility_threshold() {
        let homogeneous = items(r#"[{"a": 1, "b": 2}, {"a": 3, "b": 4}]"#);
        assert!(is_table_eligible(&homogeneous));

        // 7 of 10 keys shared passes, 6 of 10 does not
        let first = r#"{"k0":0,"k1":0,"k2":0,"k3":0,"k4":0,"k5":0,"k6":0,"k7":0,"k8":0,"k9":0}"#;
        let seventy = format!(
            r#"[{first}, {{"k0":0,"k1":0,"k2":0,"k3":0,"k4":0,"k5":0,"k6":0,"x7":0,"x8":0,"x9":0}}]"#
        );
        assert!(is_table_eligible(&items(&seventy)));
        let sixty = format!(
            r#"[{first}, {{"k0":0,"k1":0,"k2":0,"k3":0,"k4":0,"k5":0,"x6":0,"x7":0,"x8":0,"x9":0}}]"#
        );
        assert!(!is_table_eligible(&items(&sixty)));

        assert!(!is_table_eligible(&items(r#"[{"a": 1}]"#)));
        assert!(!is_table_eligible(&items(r#"[{"a": 1}, null]"#)));
        assert!(!is_table_eligible(&items(r#"[1, 2]"#)));
    }

    #[test]
    fn test_table_fields_union_in_first_seen_order() {
        let rows = items(r#"[{"id": 1, "name": "a"}, {"name": "b", "email": "e"}]"#);
        assert_eq!(
            table_fields(&rows),
            Some(vec!["id".to_string(), "name".to_string(), "email".to_string()])
        );

        let wide: Vec<Value> = (0..11)
            .map(|i| Value::from(Object::from_entries([(format!("k{i}"), Value::from(i))])))
            .collect();
        assert_eq!(table_fields(&wide), None);
    }

    #[test]
    fn test_gap_token_parsing() {
        assert_eq!(GapToken::parse("small"), Some(GapToken::Small));
        assert_eq!(GapToken::parse("1rem"), Some(GapToken::Medium));
        assert_eq!(GapToken::parse("auto"), None);
        assert_eq!(GapToken::Large.to_string(), "1.5rem");
    }

    proptest! {
        #[test]
        fn prop_columns_within_bounds(width in 0u32..4000, count in 0usize..64) {
            let columns = optimal_columns(width, count);
            prop_assert!(columns >= 1);
            prop_assert!(columns <= count.max(1));
            prop_assert!(columns <= 4);
        }

        #[test]
        fn prop_arrangement_columns_never_zero(count in 0usize..20, width in 0u32..2000) {
            let texts: Vec<Value> = (0..count).map(|i| Value::from(i as i64)).collect();
            let arrangement = choose_arrangement(&texts, &hints(width), builtin());
            prop_assert!(arrangement.columns >= 1);
        }
    }
}
