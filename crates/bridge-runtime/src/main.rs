//! # SNS Bridge
//!
//! Entry point. Loads configuration, installs logging, serves the webhook.
//!
//! ## Configuration
//!
//! Defaults, then `--config <file.toml>`, then flags / `SNS_BRIDGE_*`
//! variables. `RUST_LOG` controls log verbosity (default `info`).

use anyhow::{Context, Result};
use bridge_runtime::{serve, Args, BridgePipeline};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let installed = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_json)?;

    let config = args.load_config().context("loading configuration")?;
    info!(
        listen = %config.http.listen,
        command_pipe = %config.nagios.command_pipe.display(),
        heartbeat_dir = %config.heartbeat.directory.display(),
        verify_certificate = config.verification.verify_certificate,
        restrict_by_topic = config.topic.restrict_by_topic,
        "configuration loaded"
    );

    let pipeline = BridgePipeline::from_config(&config)?;
    serve(Arc::new(pipeline), &config).await?;

    info!("SNS bridge stopped");
    Ok(())
}
