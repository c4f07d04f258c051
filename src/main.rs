use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use viewmap::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbosity);

    match cli.command {
        Commands::Resolve {
            input,
            config,
            max_depth,
            width,
            format,
            output,
        } => viewmap::commands::resolve_document(viewmap::commands::ResolveConfig {
            input,
            config,
            max_depth,
            width,
            format,
            output,
        }),
        Commands::Classify { input, config } => {
            viewmap::commands::classify_document(&input, config)
        }
        Commands::Init { force } => viewmap::commands::init_config(force),
    }
}

/// `RUST_LOG` wins; otherwise each `-v` raises the level from `warn`.
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
