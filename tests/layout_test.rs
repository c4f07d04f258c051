mod common;

use common::json;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use viewmap::layout::optimal_columns;
use viewmap::layout::visual::TextAlign;
use viewmap::{
    path, resolve, ArrangementKind, GapToken, LayoutHints, ResolvedNode, ResolverConfig, ViewKind,
};

fn resolve_with(input: &str, layout: LayoutHints) -> ResolvedNode {
    resolve(&json(input), &ResolverConfig::default().with_layout(layout))
}

#[test]
fn sized_items_form_a_dashboard() {
    let node = resolve_with(
        r#"{"a": {"size": "large", "title": "A"}, "b": {"size": "small", "title": "B"}, "c": {"size": "small", "title": "C"}}"#,
        LayoutHints::default(),
    );
    let arrangement = node.arrangement.expect("composite arrangement");
    assert_eq!(node.view, ViewKind::UnifiedLayout);
    assert_eq!(arrangement.kind, ArrangementKind::Dashboard);
    assert_eq!(arrangement.columns, 3);
}

#[test]
fn short_texts_at_medium_width_form_a_grid() {
    let node = resolve_with(
        r#"["one", "two", "three", "four", "five", "six", "seven", "eight"]"#,
        LayoutHints::default().with_width(1000),
    );
    let arrangement = node.arrangement.expect("array arrangement");
    assert_eq!(node.view, ViewKind::Array);
    assert_eq!(arrangement.kind, ArrangementKind::Grid);
    assert_eq!(arrangement.columns, 3);
    assert_eq!(arrangement.gap, GapToken::Medium);
    assert_eq!(node.visual.map(|v| v.text_align), Some(TextAlign::Center));
}

#[test]
fn narrow_viewport_collapses_grid_to_one_column() {
    let node = resolve_with(
        r#"["one", "two", "three", "four", "five"]"#,
        LayoutHints::default().with_width(480),
    );
    let arrangement = node.arrangement.unwrap();
    assert_eq!(arrangement.kind, ArrangementKind::Grid);
    assert_eq!(arrangement.columns, 1);
}

#[test]
fn value_settings_beat_configuration_hints() {
    let hints = LayoutHints {
        layout: Some(ArrangementKind::List),
        columns: Some(1),
        ..LayoutHints::default()
    };
    let node = resolve_with(
        r#"{"_layout": "grid", "_columns": 2, "left": "a", "right": "b"}"#,
        hints.clone(),
    );
    let arrangement = node.arrangement.unwrap();
    assert_eq!(arrangement.kind, ArrangementKind::Grid);
    assert_eq!(arrangement.columns, 2);
    assert_eq!(node.children.len(), 2);

    let node = resolve_with(r#"{"left": "a", "middle": "b", "right": "c"}"#, hints);
    assert_eq!(node.arrangement.unwrap().kind, ArrangementKind::List);
}

#[test]
fn grid_layout_reads_its_config_object() {
    let node = resolve_with(
        r#"{
            "_type": "gridLayout",
            "config": {"columns": 5, "gap": "large", "theme": "dark"},
            "items": [{"value": 1}, {"value": 2}]
        }"#,
        LayoutHints::default(),
    );
    let arrangement = node.arrangement.unwrap();
    assert_eq!(node.view, ViewKind::GridLayout);
    assert_eq!(arrangement.kind, ArrangementKind::Grid);
    assert_eq!(arrangement.columns, 5);
    assert_eq!(arrangement.gap, GapToken::Large);
    assert_eq!(arrangement.theme.as_deref(), Some("dark"));
    assert_eq!(node.children[1].path, path!["items", 1]);
}

#[test]
fn dashboard_layout_recurses_into_widgets() {
    let node = resolve_with(
        r#"{
            "_type": "dashboardLayout",
            "widgets": [
                {"current": 3, "total": 10},
                {"lat": 1.5, "lng": 2.5},
                [{"label": "a", "value": 1}]
            ]
        }"#,
        LayoutHints::default(),
    );
    let views: Vec<ViewKind> = node.children.iter().map(|c| c.view.clone()).collect();
    assert_eq!(
        views,
        vec![ViewKind::ProgressBar, ViewKind::LocationMap, ViewKind::StatsList]
    );
    assert_eq!(node.arrangement.unwrap().kind, ArrangementKind::Dashboard);
    assert_eq!(node.children[2].children[0].path, path!["widgets", 2, 0]);
}

#[test]
fn homogeneous_records_default_to_a_table() {
    let node = resolve_with(
        r#"[{"sku": "a-1", "price": 3}, {"sku": "b-2", "price": 5}, {"sku": "c-3", "price": 8}]"#,
        LayoutHints::default(),
    );
    let arrangement = node.arrangement.unwrap();
    assert_eq!(node.view, ViewKind::Array);
    assert_eq!(arrangement.kind, ArrangementKind::Table);
    assert_eq!(
        arrangement.fields,
        Some(vec!["sku".to_string(), "price".to_string()])
    );
    assert_eq!(arrangement.columns, 2);
}

#[test]
fn layout_hint_suppresses_the_table_default() {
    let hints = LayoutHints {
        layout: Some(ArrangementKind::Grid),
        ..LayoutHints::default()
    };
    let node = resolve_with(r#"[{"sku": "a", "price": 3}, {"sku": "b", "price": 5}]"#, hints);
    let arrangement = node.arrangement.unwrap();
    assert_eq!(arrangement.kind, ArrangementKind::Grid);
    assert_eq!(arrangement.fields, None);
}

#[test]
fn leaves_carry_no_arrangement() {
    let node = resolve_with(r#"{"name": "Jane", "avatar": "u"}"#, LayoutHints::default());
    assert_eq!(node.view, ViewKind::UserCard);
    assert!(node.arrangement.is_none());
    assert!(node.visual.is_none());
}

proptest! {
    #[test]
    fn columns_stay_within_tier_bounds(width in 0u32..4000, count in 0usize..50) {
        let columns = optimal_columns(width, count);
        prop_assert!(columns >= 1);
        prop_assert!(columns <= 4);
        prop_assert!(columns <= count.max(1));
        if width < 600 {
            prop_assert_eq!(columns, 1);
        }
    }
}
