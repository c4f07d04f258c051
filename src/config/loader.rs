use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::ResolverConfig;
use super::validation::validate_config_result;
use crate::errors::{Error, Result, ResultExt};

pub const CONFIG_FILE_NAME: &str = ".viewmap.toml";

/// Directories searched above the starting directory, inclusive.
pub const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parses and validates configuration from a TOML string.
pub fn parse_config(contents: &str) -> Result<ResolverConfig> {
    let config = toml::from_str::<ResolverConfig>(contents)
        .map_err(|e| Error::configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e)))?;
    validate_config_result(&config)?;
    Ok(config)
}

/// Loads a configuration file the user named explicitly. Every failure,
/// including a missing file, is an error.
pub fn load_config_from_path(path: &Path) -> Result<ResolverConfig> {
    let contents =
        read_config_file(path).map_err(|e| Error::file_system(path, e))?;
    parse_config(&contents).context(format!("Loading {}", path.display()))
}

/// Discovery variant of [`load_config_from_path`]: problems are logged and
/// yield `None` so the search can continue.
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ResolverConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{} in {}. Using defaults.", e, config_path.display());
            None
        }
    }
}

pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its ancestors, nearest first, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Nearest `.viewmap.toml` at or above `start`, or the defaults.
pub fn load_config_from(start: PathBuf) -> ResolverConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            ResolverConfig::default()
        })
}

/// [`load_config_from`] starting at the current directory.
pub fn load_config() -> ResolverConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            ResolverConfig::default()
        }
    }
}
