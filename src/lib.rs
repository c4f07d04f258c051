//! Automatic view selection for JSON-like values.
//!
//! [`resolve`] walks a [`Value`] and decides, for every node, which
//! presentation template renders it: through an explicit `_type`
//! discriminator, structural pattern matching, or content heuristics. Cycles
//! and excessive nesting end in marker nodes instead of errors.
//!
//! ```
//! use viewmap::{resolve, ResolverConfig, Value, ViewKind};
//!
//! let value = Value::from_json_str(r#"{"name": "Jane", "avatar": "jane.png"}"#).unwrap();
//! let node = resolve(&value, &ResolverConfig::default());
//! assert_eq!(node.view, ViewKind::UserCard);
//! ```

// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod content_types;
pub mod context;
pub mod core;
pub mod errors;
pub mod io;
pub mod layout;
pub mod patterns;
pub mod resolver;
pub mod value;

// Re-export commonly used types
pub use crate::config::{
    load_config, parse_config, plugin_fn, CustomViewRegistry, LayoutHints, RendererPlugin,
    RendererRef, ResolverConfig,
};
pub use crate::content_types::{detect_content_type, ContentType};
pub use crate::context::{DeriveOptions, TraversalContext};
pub use crate::core::{format_path, Marker, PathSegment, ResolvedNode, ViewKind};
pub use crate::errors::{Error, Result};
pub use crate::layout::{
    choose_arrangement, Arrangement, ArrangementKind, CardVariant, GapToken, VisualHints,
};
pub use crate::patterns::{resolve_by_pattern, PatternRegistry};
pub use crate::resolver::{resolve, resolve_batch, Resolver};
pub use crate::value::{Array, NodeId, Object, Value};
