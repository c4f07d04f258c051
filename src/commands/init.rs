use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# Viewmap Configuration

# Deepest nesting level resolved before a depth-exceeded marker (max 256)
max_depth = 10

# Extra discriminators accepted in `_type`, mapped to renderer references
[custom_views]
# weather = "WeatherWidget"

[layout]
# Viewport width in layout units; picks the grid column tier
width = 1200
# Force an arrangement: list, grid, table, areas or dashboard
# layout = "grid"
# columns = 3
# gap = "1rem"
# theme = "system"

[layout.visual]
# shadow = "medium"
# animation = "subtle"
# glass = false
"#;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", config_path.display());
    Ok(())
}

/// Writes the default configuration into `dir` and returns its path.
pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    Ok(config_path)
}
