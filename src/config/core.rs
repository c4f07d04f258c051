use super::plugins::RendererPlugin;
use crate::core::ViewKind;
use crate::layout::{ArrangementKind, GapToken, VisualOverrides, DEFAULT_WIDTH};
use crate::patterns::PatternRegistry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub fn default_max_depth() -> usize {
    10
}

pub fn default_width() -> u32 {
    DEFAULT_WIDTH
}

/// Opaque reference to an externally provided renderer. Never interpreted,
/// only carried to the resolved node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RendererRef(String);

impl RendererRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RendererRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RendererRef {
    fn from(reference: &str) -> Self {
        Self::new(reference)
    }
}

/// Discriminators registered on top of the built-in view kinds.
///
/// ```toml
/// [custom_views]
/// weather = "WeatherWidget"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomViewRegistry {
    views: BTreeMap<String, RendererRef>,
}

impl CustomViewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name`, replacing any earlier renderer for it.
    pub fn register(&mut self, name: impl Into<String>, renderer: impl Into<RendererRef>) {
        self.views.insert(name.into(), renderer.into());
    }

    pub fn get(&self, name: &str) -> Option<&RendererRef> {
        self.views.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.views.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.views.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RendererRef)> {
        self.views.iter().map(|(name, renderer)| (name.as_str(), renderer))
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}

/// Arrangement defaults applied where a value does not say otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutHints {
    /// Forced arrangement kind
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout: Option<ArrangementKind>,

    /// Forced column count
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<usize>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<GapToken>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// Viewport width in layout units, used by the column tiers
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(skip_serializing_if = "VisualOverrides::is_empty")]
    pub visual: VisualOverrides,
}

impl Default for LayoutHints {
    fn default() -> Self {
        Self {
            layout: None,
            columns: None,
            gap: None,
            theme: None,
            width: default_width(),
            visual: VisualOverrides::default(),
        }
    }
}

impl LayoutHints {
    /// Builder method to set the viewport width
    pub fn with_width(mut self, width: u32) -> Self {
        self.width = width;
        self
    }
}

/// Everything a resolution needs besides the value itself.
///
/// Plugins and the pattern registry are attached programmatically; the rest
/// loads from `.viewmap.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Deepest level that still resolves normally
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    #[serde(default)]
    pub custom_views: CustomViewRegistry,

    #[serde(default)]
    pub layout: LayoutHints,

    #[serde(skip)]
    plugins: Vec<Arc<dyn RendererPlugin>>,

    #[serde(skip)]
    patterns: PatternRegistry,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            custom_views: CustomViewRegistry::default(),
            layout: LayoutHints::default(),
            plugins: Vec::new(),
            patterns: PatternRegistry::default(),
        }
    }
}

impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plugins: Vec<&str> = self.plugins.iter().map(|p| p.name()).collect();
        f.debug_struct("ResolverConfig")
            .field("max_depth", &self.max_depth)
            .field("custom_views", &self.custom_views)
            .field("layout", &self.layout)
            .field("plugins", &plugins)
            .field("patterns", &self.patterns.len())
            .finish()
    }
}

impl ResolverConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the depth ceiling
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder method to append a plugin; plugins run in insertion order
    pub fn with_plugin(mut self, plugin: impl RendererPlugin + 'static) -> Self {
        self.plugins.push(Arc::new(plugin));
        self
    }

    /// Builder method to register a custom discriminator
    pub fn with_custom_view(
        mut self,
        name: impl Into<String>,
        renderer: impl Into<RendererRef>,
    ) -> Self {
        self.custom_views.register(name, renderer);
        self
    }

    /// Builder method to replace the layout hints
    pub fn with_layout(mut self, layout: LayoutHints) -> Self {
        self.layout = layout;
        self
    }

    /// Builder method to replace the structural pattern registry
    pub fn with_patterns(mut self, patterns: PatternRegistry) -> Self {
        self.patterns = patterns;
        self
    }

    pub fn plugins(&self) -> &[Arc<dyn RendererPlugin>] {
        &self.plugins
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }

    /// View kind selected by an explicit discriminator: a built-in name, or a
    /// registered custom view.
    pub fn view_for_discriminator(&self, discriminator: &str) -> Option<ViewKind> {
        ViewKind::from_discriminator(discriminator).or_else(|| {
            self.custom_views
                .contains(discriminator)
                .then(|| ViewKind::Custom(discriminator.to_string()))
        })
    }

    pub fn renderer_for(&self, view: &ViewKind) -> Option<&RendererRef> {
        match view {
            ViewKind::Custom(name) => self.custom_views.get(name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ResolverConfig::default();
        assert_eq!(config.max_depth, 10);
        assert_eq!(config.layout.width, 1200);
        assert!(config.plugins().is_empty());
        assert_eq!(config.patterns().len(), PatternRegistry::builtin().len());
    }

    #[test]
    fn test_discriminator_lookup() {
        let config = ResolverConfig::default().with_custom_view("weather", "WeatherWidget");
        assert_eq!(
            config.view_for_discriminator("chart"),
            Some(ViewKind::Chart)
        );
        assert_eq!(
            config.view_for_discriminator("weather"),
            Some(ViewKind::Custom("weather".into()))
        );
        assert_eq!(config.view_for_discriminator("unknownKind"), None);
        assert_eq!(
            config
                .renderer_for(&ViewKind::Custom("weather".into()))
                .map(RendererRef::as_str),
            Some("WeatherWidget")
        );
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: ResolverConfig = toml::from_str(
            r#"
            max_depth = 4

            [layout]
            columns = 2
            gap = "small"
            "#,
        )
        .unwrap();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.layout.columns, Some(2));
        assert_eq!(config.layout.gap, Some(GapToken::Small));
        assert_eq!(config.layout.width, 1200);
        assert!(config.custom_views.is_empty());
    }
}
