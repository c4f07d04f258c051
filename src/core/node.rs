//! Output tree of a resolution.

use super::{format_path, Marker, PathSegment, ViewKind};
use crate::config::RendererRef;
use crate::context::TraversalContext;
use crate::layout::{Arrangement, CardVariant, VisualHints};
use crate::value::Value;
use serde::Serialize;

/// One resolved value: which template renders it, with what data, and the
/// resolved children in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedNode {
    pub view: ViewKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    pub data: Value,
    pub path: Vec<PathSegment>,
    pub depth: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ResolvedNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<Arrangement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visual: Option<VisualHints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<CardVariant>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renderer: Option<RendererRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<usize>,
}

impl ResolvedNode {
    /// Node at the position described by `context`.
    pub fn new(view: ViewKind, data: Value, context: &TraversalContext<'_>) -> Self {
        Self::at(view, data, context.path_vec(), context.depth())
    }

    /// Node at an explicit position, for callers without a context.
    pub fn at(view: ViewKind, data: Value, path: Vec<PathSegment>, depth: usize) -> Self {
        Self {
            view,
            marker: None,
            data,
            path,
            depth,
            children: Vec::new(),
            arrangement: None,
            visual: None,
            card: None,
            renderer: None,
            span: None,
        }
    }

    /// Terminal marker node. Markers always render through the generic template.
    pub fn marker(marker: Marker, data: Value, context: &TraversalContext<'_>) -> Self {
        Self {
            marker: Some(marker),
            ..Self::new(ViewKind::Generic, data, context)
        }
    }

    pub fn with_children(mut self, children: Vec<ResolvedNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_arrangement(mut self, arrangement: Arrangement) -> Self {
        self.arrangement = Some(arrangement);
        self
    }

    pub fn with_visual(mut self, visual: VisualHints) -> Self {
        self.visual = Some(visual);
        self
    }

    pub fn with_card(mut self, card: CardVariant) -> Self {
        self.card = Some(card);
        self
    }

    pub fn with_renderer(mut self, renderer: Option<RendererRef>) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn with_span(mut self, span: Option<usize>) -> Self {
        self.span = span;
        self
    }

    pub fn is_marker(&self, marker: Marker) -> bool {
        self.marker == Some(marker)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn path_string(&self) -> String {
        format_path(&self.path)
    }

    /// Pre-order traversal of this node and all descendants.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Node whose path equals `path`, if any.
    pub fn find(&self, path: &[PathSegment]) -> Option<&ResolvedNode> {
        let mut current = self;
        if !path.starts_with(&current.path) {
            return None;
        }
        while current.path.as_slice() != path {
            current = current
                .children
                .iter()
                .find(|child| path.starts_with(&child.path))?;
        }
        Some(current)
    }

    /// Total number of nodes in the tree.
    pub fn count(&self) -> usize {
        self.walk().count()
    }

    pub fn max_depth(&self) -> usize {
        self.walk().map(|node| node.depth).max().unwrap_or(self.depth)
    }
}

/// Pre-order iterator over a resolved tree.
pub struct Walk<'a> {
    stack: Vec<&'a ResolvedNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a ResolvedNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path;

    fn tree() -> ResolvedNode {
        let leaf = |p: Vec<PathSegment>| {
            let depth = p.len();
            ResolvedNode::at(ViewKind::Generic, Value::Null, p, depth)
        };
        ResolvedNode::at(ViewKind::UnifiedLayout, Value::Null, vec![], 0).with_children(vec![
            leaf(path!["a"]).with_children(vec![leaf(path!["a", 0]), leaf(path!["a", 1])]),
            leaf(path!["b"]),
        ])
    }

    #[test]
    fn test_walk_is_pre_order() {
        let paths: Vec<String> = tree().walk().map(|n| n.path_string()).collect();
        assert_eq!(paths, vec!["$", "$.a", "$.a[0]", "$.a[1]", "$.b"]);
    }

    #[test]
    fn test_find_descends_by_prefix() {
        let root = tree();
        assert_eq!(root.find(&path!["a", 1]).map(|n| n.depth), Some(2));
        assert!(root.find(&path!["c"]).is_none());
        assert_eq!(root.find(&[]).map(|n| n.depth), Some(0));
    }

    #[test]
    fn test_count_and_depth() {
        let root = tree();
        assert_eq!(root.count(), 5);
        assert_eq!(root.max_depth(), 2);
    }
}
