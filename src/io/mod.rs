pub mod output;

pub use output::{create_writer, JsonWriter, OutputFormat, OutputWriter, TreeWriter};

use crate::errors::{Error, Result};
use crate::value::Value;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Marker for reading from standard input instead of a file.
pub const STDIN_MARKER: &str = "-";

/// Reads a document from `source`, a path or `-` for stdin.
pub fn read_input(source: &str) -> Result<String> {
    if source == STDIN_MARKER {
        let mut contents = String::new();
        std::io::stdin().read_to_string(&mut contents)?;
        Ok(contents)
    } else {
        read_file(Path::new(source))
    }
}

/// Reads and parses a JSON document, keeping object key order.
pub fn read_value(source: &str) -> Result<Value> {
    let contents = read_input(source)?;
    Value::from_json_str(&contents)
}

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::file_system(path, e))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| Error::file_system(path, e))
}

pub fn file_exists(path: &Path) -> bool {
    path.exists() && path.is_file()
}
