use crate::core::ResolvedNode;
use crate::errors::Result;
use crate::value::Value;
use colored::*;
use std::io::Write;

/// Longest string preview before truncation, in characters.
const PREVIEW_CHARS: usize = 100;
/// Keys listed in an object preview before eliding the rest.
const PREVIEW_KEYS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Indented tree, one node per line
    Tree,
    /// Pretty-printed JSON
    Json,
}

pub trait OutputWriter {
    fn write_tree(&mut self, root: &ResolvedNode) -> Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_tree(&mut self, root: &ResolvedNode) -> Result<()> {
        let json = serde_json::to_string_pretty(root)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }
}

/// Human-readable tree.
///
/// ```text
/// $ unifiedLayout (list, 1 col, gap 1.5rem)
///   .name primitive: "Jane"
///   .stats statsList: Array(2)
/// ```
pub struct TreeWriter<W: Write> {
    writer: W,
    color: bool,
}

impl<W: Write> TreeWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            color: true,
        }
    }

    /// Writer that never emits ANSI escapes.
    pub fn plain(writer: W) -> Self {
        Self {
            writer,
            color: false,
        }
    }

    fn write_node(&mut self, node: &ResolvedNode, indent: usize) -> Result<()> {
        let line = self.format_line(node);
        writeln!(self.writer, "{}{}", "  ".repeat(indent), line)?;
        for child in &node.children {
            self.write_node(child, indent + 1)?;
        }
        Ok(())
    }

    fn format_line(&self, node: &ResolvedNode) -> String {
        let label = node
            .path
            .last()
            .map_or_else(|| "$".to_string(), |segment| segment.to_string());

        let mut line = format!("{} ", label);
        match node.marker {
            Some(marker) => line.push_str(&self.paint(marker.as_str(), |s| s.yellow())),
            None => line.push_str(&self.paint(node.view.as_str(), |s| s.cyan().bold())),
        }

        if let Some(arrangement) = &node.arrangement {
            let plural = if arrangement.columns == 1 { "" } else { "s" };
            let detail = format!(
                " ({}, {} col{}, gap {})",
                arrangement.kind, arrangement.columns, plural, arrangement.gap
            );
            line.push_str(&self.paint(&detail, |s| s.dimmed()));
        }
        if let Some(card) = node.card {
            line.push_str(&format!(" [{}]", card));
        }
        if let Some(renderer) = &node.renderer {
            line.push_str(&self.paint(&format!(" -> {}", renderer), |s| s.green()));
        }
        if let Some(span) = node.span {
            line.push_str(&format!(" span={}", span));
        }
        if node.is_leaf() && !node.data.is_null() {
            line.push_str(": ");
            line.push_str(&preview(&node.data));
        }
        line
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> ColoredString) -> String {
        if self.color {
            style(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl<W: Write> OutputWriter for TreeWriter<W> {
    fn write_tree(&mut self, root: &ResolvedNode) -> Result<()> {
        self.write_node(root, 0)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// One-line summary of a value.
pub fn preview(value: &Value) -> String {
    match value {
        Value::String(text) => {
            let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
            if truncated.len() < text.len() {
                format!("{:?}...", truncated)
            } else {
                format!("{:?}", text)
            }
        }
        Value::Array(array) => format!("Array({})", array.len()),
        Value::Object(object) => {
            let keys = object.keys();
            let mut shown: Vec<&str> = keys.iter().take(PREVIEW_KEYS).map(String::as_str).collect();
            if keys.len() > PREVIEW_KEYS {
                shown.push("...");
            }
            format!("Object {{{}}}", shown.join(", "))
        }
        other => other.to_text().unwrap_or_default(),
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Tree => Box::new(TreeWriter::new(writer)),
    }
}
