//! Resolver configuration: depth ceiling, custom views, layout hints and
//! renderer plugins, plus discovery and validation of `.viewmap.toml`.

mod core;
mod loader;
pub mod plugins;
pub mod validation;

pub use self::core::{
    default_max_depth, default_width, CustomViewRegistry, LayoutHints, RendererRef,
    ResolverConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_from, load_config_from_path, parse_config,
    CONFIG_FILE_NAME, MAX_TRAVERSAL_DEPTH,
};
pub use plugins::{plugin_fn, FnPlugin, RendererPlugin};
pub use validation::{validate_config, validate_config_result, ConfigIssue, MAX_DEPTH_LIMIT};
