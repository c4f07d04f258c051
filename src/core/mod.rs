//! Core vocabulary shared by the classifier, the heuristics and the resolver.

pub mod node;

pub use node::{ResolvedNode, Walk};

use serde::{Serialize, Serializer};
use std::fmt;

/// Tag selecting the presentation template for a resolved node.
///
/// The built-in set is fixed; [`ViewKind::Custom`] carries discriminators
/// registered through the configuration's custom view registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKind {
    UserCard,
    StatsList,
    Chart,
    ItemTable,
    ActionButtons,
    ProgressBar,
    LocationMap,
    Array,
    GridLayout,
    DashboardLayout,
    UnifiedLayout,
    SmartCard,
    Generic,
    Custom(String),
}

impl ViewKind {
    /// Every built-in kind, in declaration order.
    pub fn built_in() -> [ViewKind; 13] {
        [
            ViewKind::UserCard,
            ViewKind::StatsList,
            ViewKind::Chart,
            ViewKind::ItemTable,
            ViewKind::ActionButtons,
            ViewKind::ProgressBar,
            ViewKind::LocationMap,
            ViewKind::Array,
            ViewKind::GridLayout,
            ViewKind::DashboardLayout,
            ViewKind::UnifiedLayout,
            ViewKind::SmartCard,
            ViewKind::Generic,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            ViewKind::UserCard => "userCard",
            ViewKind::StatsList => "statsList",
            ViewKind::Chart => "chart",
            ViewKind::ItemTable => "itemTable",
            ViewKind::ActionButtons => "actionButtons",
            ViewKind::ProgressBar => "progressBar",
            ViewKind::LocationMap => "locationMap",
            ViewKind::Array => "array",
            ViewKind::GridLayout => "gridLayout",
            ViewKind::DashboardLayout => "dashboardLayout",
            ViewKind::UnifiedLayout => "unifiedLayout",
            ViewKind::SmartCard => "smartCard",
            ViewKind::Generic => "generic",
            ViewKind::Custom(name) => name,
        }
    }

    /// Recognizes built-in discriminators only; custom kinds need the registry.
    pub fn from_discriminator(discriminator: &str) -> Option<ViewKind> {
        ViewKind::built_in()
            .into_iter()
            .find(|kind| kind.as_str() == discriminator)
    }

    pub fn is_built_in_name(name: &str) -> bool {
        Self::from_discriminator(name).is_some()
    }

    /// Kinds whose template expects a bare array.
    pub fn is_array_shaped(&self) -> bool {
        matches!(
            self,
            ViewKind::StatsList | ViewKind::ItemTable | ViewKind::ActionButtons | ViewKind::Array
        )
    }

    pub fn is_layout(&self) -> bool {
        matches!(
            self,
            ViewKind::GridLayout | ViewKind::DashboardLayout | ViewKind::UnifiedLayout
        )
    }

    /// Heavy templates that push arrangements toward a single column.
    pub fn is_complex_container(&self) -> bool {
        matches!(
            self,
            ViewKind::Chart | ViewKind::ItemTable | ViewKind::LocationMap
        )
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, ViewKind::Custom(_))
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ViewKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Terminal marker attached to nodes that stop the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Marker {
    /// `null` input.
    Empty,
    /// String, number or boolean wrapped as text.
    Primitive,
    /// Container already on the current ancestor chain.
    CircularReference,
    /// Node deeper than the configured ceiling.
    DepthExceeded,
}

impl Marker {
    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Empty => "empty",
            Marker::Primitive => "primitive",
            Marker::CircularReference => "circular-reference",
            Marker::DepthExceeded => "depth-exceeded",
        }
    }

    /// Placeholder text for presentation layers that render markers verbatim.
    pub fn placeholder(&self) -> &'static str {
        match self {
            Marker::Empty => "No content",
            Marker::Primitive => "",
            Marker::CircularReference => "Circular reference",
            Marker::DepthExceeded => "Max depth exceeded",
        }
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step from a parent value to a child: an object key or an array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{}", key),
            PathSegment::Index(index) => write!(f, "[{}]", index),
        }
    }
}

/// Renders a path as `$.users[0].name`.
pub fn format_path<'a>(segments: impl IntoIterator<Item = &'a PathSegment>) -> String {
    segments
        .into_iter()
        .fold(String::from("$"), |mut acc, segment| {
            acc.push_str(&segment.to_string());
            acc
        })
}

/// Builds a path from mixed keys and indices: `path!["users", 0, "name"]`.
#[macro_export]
macro_rules! path {
    ($($segment:expr),* $(,)?) => {
        vec![$($crate::core::PathSegment::from($segment)),*]
    };
}
