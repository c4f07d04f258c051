use crate::config::{load_config, load_config_from_path, validate_config_result, ResolverConfig};
use crate::io::{self, create_writer, OutputFormat};
use crate::resolver::resolve;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ResolveConfig {
    pub input: String,
    pub config: Option<PathBuf>,
    pub max_depth: Option<usize>,
    pub width: Option<u32>,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

/// Explicit config file, or the nearest `.viewmap.toml`, or the defaults.
pub fn load_resolver_config(path: Option<&Path>) -> Result<ResolverConfig> {
    match path {
        Some(path) => Ok(load_config_from_path(path)?),
        None => Ok(load_config()),
    }
}

/// Configuration with command-line overrides applied and re-validated.
pub fn effective_config(
    path: Option<&Path>,
    max_depth: Option<usize>,
    width: Option<u32>,
) -> Result<ResolverConfig> {
    let mut config = load_resolver_config(path)?;
    if let Some(max_depth) = max_depth {
        config.max_depth = max_depth;
    }
    if let Some(width) = width {
        config.layout.width = width;
    }
    validate_config_result(&config)?;
    Ok(config)
}

pub fn resolve_document(options: ResolveConfig) -> Result<()> {
    let config = effective_config(options.config.as_deref(), options.max_depth, options.width)?;
    let value = io::read_value(&options.input)
        .with_context(|| format!("Failed to read input {}", options.input))?;

    let root = resolve(&value, &config);
    log::info!(
        "Resolved {} into {} nodes (root view {})",
        options.input,
        root.count(),
        root.view
    );

    let destination: Box<dyn Write> = match &options.output {
        Some(path) => {
            colored::control::set_override(false);
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(std::io::stdout()),
    };

    create_writer(options.format, destination).write_tree(&root)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_overrides_apply() {
        let config = effective_config(None, Some(3), Some(700)).unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.layout.width, 700);
    }

    #[test]
    fn test_overrides_are_validated() {
        assert!(effective_config(None, Some(4096), None).is_err());
        assert!(effective_config(None, None, Some(0)).is_err());
    }

    #[test]
    fn test_resolve_document_writes_json_file() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.json");
        let output = temp.path().join("out.json");
        std::fs::write(&input, r#"{"current": 2, "total": 5}"#).unwrap();

        resolve_document(ResolveConfig {
            input: input.display().to_string(),
            config: None,
            max_depth: None,
            width: None,
            format: OutputFormat::Json,
            output: Some(output.clone()),
        })
        .unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(written["view"], "progressBar");
    }
}
