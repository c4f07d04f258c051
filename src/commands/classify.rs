use super::resolve::effective_config;
use crate::config::ResolverConfig;
use crate::content_types::{detect_content_type, ContentType};
use crate::core::ViewKind;
use crate::io;
use crate::layout::Arrangement;
use crate::resolver::resolve;
use crate::value::Value;
use anyhow::{Context, Result};
use colored::*;
use std::fmt;
use std::path::PathBuf;

/// How the root of a document is seen by each stage.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Kind the resolver picks
    pub view: ViewKind,
    pub content_type: ContentType,
    /// Kind the structural patterns alone would pick
    pub pattern: ViewKind,
    /// Arrangement the resolver gave the root's children, if it has any
    pub arrangement: Option<Arrangement>,
}

pub fn classify_value(value: &Value, config: &ResolverConfig) -> Classification {
    let node = resolve(value, config);

    Classification {
        view: node.view,
        content_type: detect_content_type(value),
        pattern: config.patterns().resolve(value),
        arrangement: node.arrangement,
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<14}{}", "view:", self.view.as_str().cyan().bold())?;
        writeln!(f, "{:<14}{}", "content type:", self.content_type)?;
        writeln!(f, "{:<14}{}", "pattern:", self.pattern)?;
        match &self.arrangement {
            Some(arrangement) => writeln!(
                f,
                "{:<14}{} (columns {}, gap {})",
                "arrangement:", arrangement.kind, arrangement.columns, arrangement.gap
            ),
            None => writeln!(f, "{:<14}-", "arrangement:"),
        }
    }
}

pub fn classify_document(input: &str, config: Option<PathBuf>) -> Result<()> {
    let config = effective_config(config.as_deref(), None, None)?;
    let value =
        io::read_value(input).with_context(|| format!("Failed to read input {}", input))?;
    print!("{}", classify_value(&value, &config));
    Ok(())
}
