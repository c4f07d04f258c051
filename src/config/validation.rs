//! Configuration validation with error accumulation.
//!
//! Every check runs and every failure is reported, so one run of
//! `viewmap resolve --config ...` shows all the problems in a file.

use std::fmt;

use stillwater::{NonEmptyVec, Validation};

use super::ResolverConfig;
use crate::core::ViewKind;
use crate::errors::{Error, Result};

/// Largest accepted `max_depth`. Resolution recurses once per level, so this
/// keeps the deepest walk well inside a 2 MiB rayon worker stack.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// One rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl ConfigIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub type ConfigValidation<T> = Validation<T, NonEmptyVec<ConfigIssue>>;

/// Checks every field and accumulates all issues.
pub fn validate_config(config: &ResolverConfig) -> ConfigValidation<()> {
    let mut issues = Vec::new();

    if config.max_depth > MAX_DEPTH_LIMIT {
        issues.push(ConfigIssue::new(
            "max_depth",
            format!(
                "must be at most {} (got {})",
                MAX_DEPTH_LIMIT, config.max_depth
            ),
        ));
    }

    if config.layout.columns == Some(0) {
        issues.push(ConfigIssue::new("layout.columns", "must be at least 1"));
    }

    if config.layout.width == 0 {
        issues.push(ConfigIssue::new("layout.width", "must be greater than 0"));
    }

    for name in config.custom_views.names() {
        if name.trim().is_empty() {
            issues.push(ConfigIssue::new("custom_views", "view names must not be empty"));
        } else if ViewKind::is_built_in_name(name) {
            issues.push(ConfigIssue::new(
                format!("custom_views.{}", name),
                "collides with a built-in view kind",
            ));
        }
    }

    let mut issues = issues.into_iter();
    match issues.next() {
        Some(first) => Validation::Failure(NonEmptyVec::new(first, issues.collect())),
        None => Validation::Success(()),
    }
}

/// [`validate_config`] collapsed into a single error listing every issue.
pub fn validate_config_result(config: &ResolverConfig) -> Result<()> {
    match validate_config(config) {
        Validation::Success(()) => Ok(()),
        Validation::Failure(issues) => {
            let messages: Vec<String> = issues.into_iter().map(|i| i.to_string()).collect();
            Err(Error::validation(messages.join("; ")))
        }
    }
}
