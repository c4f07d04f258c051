use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "viewmap")]
#[command(about = "Resolve JSON documents into presentation view trees", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug, -vvv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a JSON document and print the view tree
    Resolve {
        /// JSON file to resolve, or `-` for stdin
        input: String,

        /// Configuration file (defaults to the nearest .viewmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured depth ceiling
        #[arg(long)]
        max_depth: Option<usize>,

        /// Viewport width used for grid columns
        #[arg(long, env = "VIEWMAP_WIDTH")]
        width: Option<u32>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "tree")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show how the root of a document would be classified
    Classify {
        /// JSON file to classify, or `-` for stdin
        input: String,

        /// Configuration file (defaults to the nearest .viewmap.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Initialize configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}
