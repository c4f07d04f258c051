//! Renderer plugins, consulted before any built-in resolution step.

use crate::context::TraversalContext;
use crate::core::ResolvedNode;
use crate::value::Value;

/// A hook that may take over resolution of a value.
///
/// Returning `Some` replaces the whole built-in pipeline for that value; the
/// node is used as is, children included. Returning `None` passes the value
/// on to the next plugin and finally to the built-in steps.
pub trait RendererPlugin: Send + Sync {
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn resolve(&self, value: &Value, context: &TraversalContext<'_>) -> Option<ResolvedNode>;
}

impl<F> RendererPlugin for F
where
    F: Fn(&Value, &TraversalContext<'_>) -> Option<ResolvedNode> + Send + Sync,
{
    fn resolve(&self, value: &Value, context: &TraversalContext<'_>) -> Option<ResolvedNode> {
        self(value, context)
    }
}

/// Named closure plugin.
pub struct FnPlugin<F> {
    name: String,
    resolve: F,
}

/// Wraps `resolve` as a plugin called `name`.
pub fn plugin_fn<F>(name: impl Into<String>, resolve: F) -> FnPlugin<F>
where
    F: Fn(&Value, &TraversalContext<'_>) -> Option<ResolvedNode> + Send + Sync,
{
    FnPlugin {
        name: name.into(),
        resolve,
    }
}

impl<F> RendererPlugin for FnPlugin<F>
where
    F: Fn(&Value, &TraversalContext<'_>) -> Option<ResolvedNode> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn resolve(&self, value: &Value, context: &TraversalContext<'_>) -> Option<ResolvedNode> {
        (self.resolve)(value, context)
    }
}
