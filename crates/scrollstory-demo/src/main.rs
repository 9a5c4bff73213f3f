use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;
mod scenario;

use scenario::DemoConfig;

#[derive(Parser)]
#[command(name = "scrollstory-demo")]
#[command(author, version, about = "Scroll through a simulated story and print scene events")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Scenario file (defaults to ~/.config/scrollstory/demo.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Standalone tracker settings, overriding the scenario's [tracker] table
    #[arg(long = "tracker-config", global = true)]
    tracker_config: Option<PathBuf>,

    /// Print events as JSON lines
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Tick the tracker once per scroll step
    Step,
    /// Run the tracker on its frame loop while scrolling on a timer
    Run {
        /// Force a refresh after this scroll step
        #[arg(long)]
        refresh_at: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load scenario
    let mut config = DemoConfig::load(cli.config.as_deref())?;
    if let Some(path) = cli.tracker_config.as_deref() {
        config = config.with_tracker_file(path)?;
    }

    // Initialize logging
    let default_level = if config.tracker.debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Some(Commands::Step) | None => commands::step::run(&config, cli.json),
        Some(Commands::Run { refresh_at }) => {
            commands::run::run(&config, cli.json, refresh_at).await
        }
    }
}
