use anyhow::{Context, Result};
use clap::Parser;
use echo_insight::config::{AppConfig, FlowVariant};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Echo Insight conversational assistant demo
#[derive(Parser, Debug)]
#[command(name = "echo-insight", version, about)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Response simulation to run
    #[arg(short, long, value_enum)]
    flow: Option<FlowVariant>,

    /// Open with the debug panel visible
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "echo_insight=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config =
        AppConfig::discover(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(flow) = args.flow {
        config = config.with_flow(flow);
    }
    if args.debug {
        config.ui.show_debug_panel = true;
    }

    info!("Starting Echo Insight ({} flow)", config.flow);

    echo_insight::ui::run(config).map_err(|e| anyhow::anyhow!("UI error: {}", e))?;

    Ok(())
}
