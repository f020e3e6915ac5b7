//! Masterclass CLI - example extraction and documentation site generator.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod config;

use commands::build::BuildOptions;

#[derive(Parser)]
#[command(name = "masterclass")]
#[command(about = "Extract TypeScript testing examples and build their documentation site")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to masterclass.toml config file
    #[arg(short, long, default_value = "masterclass.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract examples and write the JSON documents (default)
    Extract,

    /// Extract examples and build the static site
    Build {
        /// Output directory (defaults to config or "apps/docs/out")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// URL prefix for all links
        #[arg(long, env = "MASTERCLASS_BASE_URL")]
        base_url: Option<String>,

        /// Skip minification
        #[arg(long)]
        no_minify: bool,
    },

    /// Preview the built site
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// Directory to serve (defaults to the configured output)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },

    /// Build, serve and rebuild on example changes
    Dev {
        /// Port to listen on
        #[arg(short, long, default_value = "7777")]
        port: u16,

        /// Do not open browser
        #[arg(long)]
        no_open: bool,

        /// URL prefix for all links
        #[arg(long, env = "MASTERCLASS_BASE_URL")]
        base_url: Option<String>,
    },

    /// Write a default masterclass.toml
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command.unwrap_or(Commands::Extract) {
        Commands::Extract => {
            let config = config::load_config(&cli.config)?;
            commands::extract::run(&config).await?;
        }
        Commands::Build {
            output,
            base_url,
            no_minify,
        } => {
            let config = config::load_config(&cli.config)?;
            let options = BuildOptions {
                output,
                base_url,
                minify: if no_minify { Some(false) } else { None },
                live_reload: None,
            };
            commands::build::run(&config, &options).await?;
        }
        Commands::Serve { port, dir } => {
            let config = config::load_config(&cli.config)?;
            commands::serve::run(&config, port, dir).await?;
        }
        Commands::Dev {
            port,
            no_open,
            base_url,
        } => {
            let config = config::load_config(&cli.config)?;
            commands::dev::run(config, port, !no_open, base_url).await?;
        }
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
    }

    Ok(())
}
