//! Per-step traversal state threaded through every recursive resolution call.
//!
//! A context is never mutated. Each recursive step derives a new one with the
//! depth bumped, the path extended and the parent container added to the
//! ancestor set. Path and ancestors are persistent (`im`) structures, so a
//! derivation shares everything with its parent and costs O(log n).
//!
//! Because each child owns its own ancestor set, sibling subtrees never see
//! each other's entries: the same object reached through two siblings is
//! resolved twice, and only a container nested inside itself is reported as
//! circular.

use crate::config::ResolverConfig;
use crate::core::{format_path, PathSegment};
use crate::value::NodeId;
use im::{HashSet, Vector};

/// Traversal state for one resolution step.
#[derive(Debug, Clone)]
pub struct TraversalContext<'a> {
    depth: usize,
    path: Vector<PathSegment>,
    ancestors: HashSet<NodeId>,
    config: &'a ResolverConfig,
}

/// What a derived context changes relative to its parent.
///
/// Unset fields keep the parent's value, except `depth`, which defaults to
/// the parent depth plus one.
#[derive(Debug, Clone, Default)]
pub struct DeriveOptions {
    pub depth: Option<usize>,
    pub extend_path: Vec<PathSegment>,
    pub extend_visited: Vec<NodeId>,
}

impl DeriveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to pin the depth instead of incrementing it
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Builder method to append segments to the path
    pub fn with_path<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PathSegment>,
    {
        self.extend_path.extend(segments.into_iter().map(Into::into));
        self
    }

    /// Builder method to mark a container as an ancestor
    pub fn with_visited(mut self, id: NodeId) -> Self {
        self.extend_visited.push(id);
        self
    }
}

impl<'a> TraversalContext<'a> {
    /// Fresh context for a top-level resolution call.
    pub fn root(config: &'a ResolverConfig) -> Self {
        Self {
            depth: 0,
            path: Vector::new(),
            ancestors: HashSet::new(),
            config,
        }
    }

    pub fn derive(&self, options: DeriveOptions) -> Self {
        let mut path = self.path.clone();
        path.extend(options.extend_path);
        let mut ancestors = self.ancestors.clone();
        ancestors.extend(options.extend_visited);

        Self {
            depth: options.depth.unwrap_or(self.depth + 1),
            path,
            ancestors,
            config: self.config,
        }
    }

    /// Context for a direct child of `container`, reached through `segment`.
    pub fn child(&self, segment: impl Into<PathSegment>, container: NodeId) -> Self {
        self.derive(DeriveOptions::new().with_path([segment]).with_visited(container))
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn config(&self) -> &'a ResolverConfig {
        self.config
    }

    pub fn path(&self) -> &Vector<PathSegment> {
        &self.path
    }

    pub fn path_vec(&self) -> Vec<PathSegment> {
        self.path.iter().cloned().collect()
    }

    pub fn path_string(&self) -> String {
        format_path(self.path.iter())
    }

    /// True when `id` is a container on the chain from the root to here.
    pub fn is_ancestor(&self, id: NodeId) -> bool {
        self.ancestors.contains(&id)
    }

    pub fn ancestor_count(&self) -> usize {
        self.ancestors.len()
    }

    /// True once the configured depth ceiling has been passed.
    pub fn is_too_deep(&self) -> bool {
        self.depth > self.config.max_depth
    }
}
