//! Structural view detection for values without an explicit discriminator.
//!
//! A [`PatternRegistry`] is an ordered list of `(ViewKind, predicate)`
//! entries. The first matching entry wins, so the order is the tie-break
//! between shapes a value satisfies at the same time. The built-in order is:
//!
//! 1. `userCard`
//! 2. `statsList`
//! 3. `chart`
//! 4. `itemTable`
//! 5. `actionButtons`
//! 6. `progressBar`
//! 7. `locationMap`
//! 8. `array` (any other array)
//!
//! and anything left over resolves to `generic`.

pub mod matchers;

use crate::core::ViewKind;
use crate::value::Value;
use once_cell::sync::Lazy;
use std::fmt;

/// Which values a pattern can apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
}

impl Shape {
    pub fn of(value: &Value) -> Option<Shape> {
        match value {
            Value::Object(_) => Some(Shape::Object),
            Value::Array(_) => Some(Shape::Array),
            _ => None,
        }
    }
}

/// Predicate signature shared by all pattern entries.
pub type Matcher = fn(&Value) -> bool;

#[derive(Clone)]
pub struct PatternEntry {
    pub view: ViewKind,
    pub shape: Shape,
    pub matcher: Matcher,
}

impl PatternEntry {
    pub fn new(view: ViewKind, shape: Shape, matcher: Matcher) -> Self {
        Self {
            view,
            shape,
            matcher,
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        Shape::of(value) == Some(self.shape) && (self.matcher)(value)
    }
}

impl fmt::Debug for PatternEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternEntry")
            .field("view", &self.view)
            .field("shape", &self.shape)
            .finish()
    }
}

/// Ordered pattern list. Constructed once and passed by reference.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    entries: Vec<PatternEntry>,
}

static BUILTIN: Lazy<PatternRegistry> = Lazy::new(PatternRegistry::builtin);

impl PatternRegistry {
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Canonical built-in entries in precedence order.
    pub fn builtin() -> Self {
        use matchers::*;

        Self {
            entries: vec![
                PatternEntry::new(ViewKind::UserCard, Shape::Object, is_user_card),
                PatternEntry::new(ViewKind::StatsList, Shape::Array, is_stats_list),
                PatternEntry::new(ViewKind::Chart, Shape::Object, is_chart),
                PatternEntry::new(ViewKind::ItemTable, Shape::Array, is_item_table),
                PatternEntry::new(ViewKind::ActionButtons, Shape::Array, is_action_buttons),
                PatternEntry::new(ViewKind::ProgressBar, Shape::Object, is_progress_bar),
                PatternEntry::new(ViewKind::LocationMap, Shape::Object, is_location_map),
                PatternEntry::new(ViewKind::Array, Shape::Array, is_any_array),
            ],
        }
    }

    /// Shared instance of [`PatternRegistry::builtin`].
    pub fn shared() -> &'static PatternRegistry {
        &BUILTIN
    }

    /// Builder method to append an entry after the existing ones
    pub fn with_entry(mut self, entry: PatternEntry) -> Self {
        self.entries.push(entry);
        self
    }

    /// Builder method to insert an entry ahead of every existing one
    pub fn with_priority_entry(mut self, entry: PatternEntry) -> Self {
        self.entries.insert(0, entry);
        self
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First matching entry's kind, or `generic`.
    pub fn resolve(&self, value: &Value) -> ViewKind {
        self.first_match(value, None)
            .unwrap_or(ViewKind::Generic)
    }

    /// Array-shaped kinds only. Every array resolves to something, falling
    /// back to `array`.
    pub fn resolve_array(&self, value: &Value) -> ViewKind {
        self.first_match(value, Some(Shape::Array))
            .unwrap_or(ViewKind::Array)
    }

    /// Object-shaped kinds only. `None` when no object pattern applies.
    pub fn resolve_object(&self, value: &Value) -> Option<ViewKind> {
        self.first_match(value, Some(Shape::Object))
    }

    fn first_match(&self, value: &Value, shape: Option<Shape>) -> Option<ViewKind> {
        self.entries
            .iter()
            .filter(|entry| shape.is_none_or(|s| entry.shape == s))
            .find(|entry| entry.matches(value))
            .map(|entry| entry.view.clone())
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolves `value` against the built-in registry.
pub fn resolve_by_pattern(value: &Value) -> ViewKind {
    PatternRegistry::shared().resolve(value)
}

pub fn resolve_array_pattern(value: &Value) -> ViewKind {
    PatternRegistry::shared().resolve_array(value)
}

pub fn resolve_object_pattern(value: &Value) -> Option<ViewKind> {
    PatternRegistry::shared().resolve_object(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value(json: &str) -> Value {
        Value::from_json_str(json).unwrap()
    }

    #[test]
    fn test_concrete_scenarios() {
        assert_eq!(
            resolve_by_pattern(&value(r#"{"name": "Jane", "avatar": "url"}"#)),
            ViewKind::UserCard
        );
        assert_eq!(
            resolve_by_pattern(&value(r#"[{"label": "Projects", "value": 15}]"#)),
            ViewKind::StatsList
        );
        assert_eq!(
            resolve_by_pattern(&value(r#"{"lat": 1.0, "lng": 2.0}"#)),
            ViewKind::LocationMap
        );
        assert_eq!(
            resolve_by_pattern(&value(r#"{"current": 3, "total": 10}"#)),
            ViewKind::ProgressBar
        );
    }

    #[test]
    fn test_order_breaks_ties() {
        let both = value(r#"{"name": "Jane", "avatar": "u", "current": 1, "total": 2}"#);
        assert_eq!(resolve_by_pattern(&both), ViewKind::UserCard);

        let stats_and_table = value(r#"[{"id": 1, "name": "a", "label": "l", "value": 2}]"#);
        assert_eq!(resolve_by_pattern(&stats_and_table), ViewKind::StatsList);

        let chart_and_map = value(r#"{"type": "line", "data": [], "lat": 1, "lng": 2}"#);
        assert_eq!(resolve_by_pattern(&chart_and_map), ViewKind::Chart);
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(resolve_by_pattern(&value("[1, 2, 3]")), ViewKind::Array);
        assert_eq!(resolve_by_pattern(&value("[]")), ViewKind::Array);
        assert_eq!(resolve_by_pattern(&value(r#"{"x": 1}"#)), ViewKind::Generic);
        assert_eq!(resolve_by_pattern(&value("\"text\"")), ViewKind::Generic);
        assert_eq!(resolve_by_pattern(&Value::Null), ViewKind::Generic);
    }

    #[test]
    fn test_shape_restricted_lookups() {
        let stats = value(r#"[{"label": "a", "value": 1}]"#);
        assert_eq!(resolve_array_pattern(&stats), ViewKind::StatsList);
        assert_eq!(resolve_object_pattern(&stats), None);

        let card = value(r#"{"name": "Jane", "avatar": "u"}"#);
        assert_eq!(resolve_object_pattern(&card), Some(ViewKind::UserCard));
        assert_eq!(resolve_object_pattern(&value(r#"{"x": 1}"#)), None);
    }

    #[test]
    fn test_priority_entry_overrides_builtin_order() {
        fn has_weather(value: &Value) -> bool {
            value.has_key("temperature")
        }
        let registry = PatternRegistry::builtin().with_priority_entry(PatternEntry::new(
            ViewKind::Custom("weather".into()),
            Shape::Object,
            has_weather,
        ));
        let v = value(r#"{"temperature": 20, "lat": 1, "lng": 2}"#);
        assert_eq!(registry.resolve(&v), ViewKind::Custom("weather".into()));
        assert_eq!(resolve_by_pattern(&v), ViewKind::LocationMap);
    }

    #[test]
    fn test_empty_registry_resolves_generic() {
        let registry = PatternRegistry::empty();
        assert!(registry.is_empty());
        assert_eq!(registry.resolve(&value("[1]")), ViewKind::Generic);
        assert_eq!(registry.resolve_array(&value("[1]")), ViewKind::Array);
    }
}
