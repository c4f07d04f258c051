//! The resolution engine.
//!
//! For each value, in order:
//!
//! 1. renderer plugins, first `Some` wins outright
//! 2. `null` becomes an `empty` marker
//! 3. a container already on the ancestor chain becomes a
//!    `circular-reference` marker
//! 4. a node deeper than `max_depth` becomes a `depth-exceeded` marker
//! 5. strings, numbers and booleans become `primitive` markers holding text
//! 6. objects with `_type` resolve to that kind; unknown discriminators
//!    resolve to `generic` and are never pattern matched
//! 7. arrays resolve through the array patterns and recurse into elements
//! 8. other objects resolve through the object patterns, then by content
//!    type: card content becomes a `smartCard`, anything else with entries
//!    becomes a `unifiedLayout` composite over its entries
//!
//! Resolution never fails. Every child gets its own context, so a container
//! only counts as visited inside its own subtree.

pub mod unwrap;

pub use unwrap::{data_shape, unwrap_data, unwrapped_array, DataShape};

use crate::config::ResolverConfig;
use crate::content_types::{detect_content_type, ContentType};
use crate::context::{DeriveOptions, TraversalContext};
use crate::core::{Marker, PathSegment, ResolvedNode, ViewKind};
use crate::layout::{
    choose_arrangement, choose_arrangement_with, detect_card_variant, detect_visual_hints,
    is_table_eligible, ArrangementKind, ArrangementOverrides,
};
use crate::value::{Array, Object, Value, SPAN_KEY, TYPE_KEY};
use rayon::prelude::*;
use tracing::{debug, debug_span, trace};

/// Resolves values against one borrowed configuration.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    config: &'a ResolverConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &'a ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a ResolverConfig {
        self.config
    }

    /// Resolves a root value with a fresh context.
    pub fn resolve(&self, value: &Value) -> ResolvedNode {
        let _span = debug_span!(
            "resolve",
            kind = value.type_name(),
            max_depth = self.config.max_depth
        )
        .entered();

        let node = self.resolve_in(value, &TraversalContext::root(self.config));
        debug!(nodes = node.count(), view = %node.view, "Resolved value");
        node
    }

    /// Resolves `value` at the position described by `context`.
    pub fn resolve_in(&self, value: &Value, context: &TraversalContext<'_>) -> ResolvedNode {
        if let Some(node) = self.apply_plugins(value, context) {
            return node;
        }

        if value.is_null() {
            return ResolvedNode::marker(Marker::Empty, Value::Null, context);
        }

        if let Some(id) = value.container_id() {
            if context.is_ancestor(id) {
                trace!(path = %context.path_string(), "Circular reference");
                return ResolvedNode::marker(Marker::CircularReference, Value::Null, context);
            }
        }

        if context.is_too_deep() {
            trace!(
                path = %context.path_string(),
                depth = context.depth(),
                "Depth limit exceeded"
            );
            return ResolvedNode::marker(Marker::DepthExceeded, Value::Null, context);
        }

        match value {
            Value::Array(array) => self.resolve_array(array, value, context),
            Value::Object(object) if object.contains_key(TYPE_KEY) => {
                self.resolve_explicit(object, value, context)
                    .with_span(span_of(object))
            }
            Value::Object(object) => self
                .resolve_object(object, value, context)
                .with_span(span_of(object)),
            _ => {
                let text = value.to_text().unwrap_or_default();
                ResolvedNode::marker(Marker::Primitive, Value::String(text), context)
            }
        }
    }

    fn apply_plugins(
        &self,
        value: &Value,
        context: &TraversalContext<'_>,
    ) -> Option<ResolvedNode> {
        self.config.plugins().iter().find_map(|plugin| {
            let node = plugin.resolve(value, context)?;
            debug!(
                plugin = plugin.name(),
                path = %context.path_string(),
                "Plugin resolved value"
            );
            Some(node)
        })
    }

    fn resolve_array(
        &self,
        array: &Array,
        value: &Value,
        context: &TraversalContext<'_>,
    ) -> ResolvedNode {
        let view = self.config.patterns().resolve_array(value);
        let items = array.to_vec();
        let children = self.resolve_items(&items, context, |index| {
            DeriveOptions::new()
                .with_path([index])
                .with_visited(array.id())
        });

        let node = ResolvedNode::new(view.clone(), value.clone(), context).with_children(children);
        if view == ViewKind::Array {
            self.arrange_array(node, &items)
        } else {
            node
        }
    }

    /// Generic arrays of homogeneous objects default to a table.
    fn arrange_array(&self, node: ResolvedNode, items: &[Value]) -> ResolvedNode {
        let hints = &self.config.layout;
        let patterns = self.config.patterns();
        let arrangement = if hints.layout.is_none() && is_table_eligible(items) {
            let table = ArrangementOverrides::default().with_default_kind(ArrangementKind::Table);
            choose_arrangement_with(items, hints, table, patterns)
        } else {
            choose_arrangement(items, hints, patterns)
        };

        node.with_arrangement(arrangement)
            .with_visual(detect_visual_hints(items, &hints.visual, patterns))
    }

    fn resolve_object(
        &self,
        object: &Object,
        value: &Value,
        context: &TraversalContext<'_>,
    ) -> ResolvedNode {
        if let Some(view) = self.config.patterns().resolve_object(value) {
            return ResolvedNode::new(view, value.clone(), context);
        }

        match detect_content_type(value) {
            ContentType::Media | ContentType::Stat | ContentType::List | ContentType::Action => {
                ResolvedNode::new(ViewKind::SmartCard, value.clone(), context)
                    .with_card(detect_card_variant(value))
            }
            _ => self.resolve_composite(object, value, context),
        }
    }

    /// Plain object with descriptive entries: one child per entry, in key
    /// order, with reserved keys stripped.
    fn resolve_composite(
        &self,
        object: &Object,
        value: &Value,
        context: &TraversalContext<'_>,
    ) -> ResolvedNode {
        let entries = object.without_reserved();
        if entries.is_empty() {
            return ResolvedNode::new(ViewKind::Generic, value.clone(), context);
        }

        let children = entries
            .iter()
            .map(|(key, entry)| self.resolve_in(entry, &context.child(key.as_str(), object.id())))
            .collect();
        let items: Vec<Value> = entries.into_iter().map(|(_, entry)| entry).collect();
        let hints = &self.config.layout;
        let patterns = self.config.patterns();

        ResolvedNode::new(ViewKind::UnifiedLayout, value.clone(), context)
            .with_children(children)
            .with_arrangement(choose_arrangement_with(
                &items,
                hints,
                ArrangementOverrides::from_object(object),
                patterns,
            ))
            .with_visual(detect_visual_hints(&items, &hints.visual, patterns))
    }

    fn resolve_explicit(
        &self,
        object: &Object,
        value: &Value,
        context: &TraversalContext<'_>,
    ) -> ResolvedNode {
        let discriminator = object.get_str(TYPE_KEY);
        let Some(view) = discriminator
            .as_deref()
            .and_then(|name| self.config.view_for_discriminator(name))
        else {
            debug!(
                discriminator = ?discriminator,
                path = %context.path_string(),
                "Unrecognized discriminator, using generic view"
            );
            return ResolvedNode::new(ViewKind::Generic, value.clone(), context);
        };

        match view {
            ViewKind::Custom(_) => {
                let renderer = self.config.renderer_for(&view).cloned();
                ResolvedNode::new(view, value.clone(), context).with_renderer(renderer)
            }
            ViewKind::GridLayout | ViewKind::UnifiedLayout | ViewKind::DashboardLayout => {
                self.resolve_layout(view, object, value, context)
            }
            ViewKind::SmartCard => ResolvedNode::new(view, value.clone(), context)
                .with_card(detect_card_variant(value)),
            _ => match unwrapped_array(&view, value) {
                Some(Value::Array(inner)) => self.resolve_wrapped(view, object, &inner, context),
                _ => ResolvedNode::new(view.clone(), unwrap_data(&view, value), context),
            },
        }
    }

    /// `{_type: <array kind>, data: [...]}`: the node carries the inner array
    /// and its elements become children under `data`.
    fn resolve_wrapped(
        &self,
        view: ViewKind,
        object: &Object,
        inner: &Array,
        context: &TraversalContext<'_>,
    ) -> ResolvedNode {
        let items = inner.to_vec();
        let children = self.resolve_items(&items, context, |index| {
            DeriveOptions::new()
                .with_path([PathSegment::from("data"), PathSegment::from(index)])
                .with_visited(object.id())
                .with_visited(inner.id())
        });

        let node = ResolvedNode::new(view.clone(), Value::Array(inner.clone()), context)
            .with_children(children);
        if view == ViewKind::Array {
            self.arrange_array(node, &items)
        } else {
            node
        }
    }

    /// Explicit layout kinds recurse into their item collection: `widgets`
    /// for dashboards, `items` otherwise.
    fn resolve_layout(
        &self,
        view: ViewKind,
        object: &Object,
        value: &Value,
        context: &TraversalContext<'_>,
    ) -> ResolvedNode {
        let key = match view {
            ViewKind::DashboardLayout => "widgets",
            _ => "items",
        };
        let collection = object.get(key);
        let collection = collection.as_ref().and_then(Value::as_array);
        let items = collection.map(Array::to_vec).unwrap_or_default();

        let children = self.resolve_items(&items, context, |index| {
            let options = DeriveOptions::new()
                .with_path([PathSegment::from(key), PathSegment::from(index)])
                .with_visited(object.id());
            match collection {
                Some(array) => options.with_visited(array.id()),
                None => options,
            }
        });

        let layout_config = object.get("config").unwrap_or_default();
        let mut overrides = ArrangementOverrides::from_layout_config(&layout_config)
            .merge(ArrangementOverrides::from_object(object));
        overrides = match view {
            ViewKind::DashboardLayout => overrides.with_default_kind(ArrangementKind::Dashboard),
            ViewKind::GridLayout => overrides.with_default_kind(ArrangementKind::Grid),
            _ => overrides,
        };
        let hints = &self.config.layout;
        let patterns = self.config.patterns();

        ResolvedNode::new(view, value.clone(), context)
            .with_children(children)
            .with_arrangement(choose_arrangement_with(&items, hints, overrides, patterns))
            .with_visual(detect_visual_hints(&items, &hints.visual, patterns))
    }

    fn resolve_items(
        &self,
        items: &[Value],
        context: &TraversalContext<'_>,
        derive: impl Fn(usize) -> DeriveOptions,
    ) -> Vec<ResolvedNode> {
        items
            .iter()
            .enumerate()
            .map(|(index, item)| self.resolve_in(item, &context.derive(derive(index))))
            .collect()
    }
}

/// Positive integer `_span` of an object.
fn span_of(object: &Object) -> Option<usize> {
    object.get_usize(SPAN_KEY).filter(|&span| span >= 1)
}

/// Resolves one root value with a fresh context.
pub fn resolve(value: &Value, config: &ResolverConfig) -> ResolvedNode {
    Resolver::new(config).resolve(value)
}

/// Resolves independent roots in parallel. Each root gets its own context;
/// output order follows input order.
pub fn resolve_batch(values: &[Value], config: &ResolverConfig) -> Vec<ResolvedNode> {
    let resolver = Resolver::new(config);
    values.par_iter().map(|value| resolver.resolve(value)).collect()
}
