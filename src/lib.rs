pub mod bootstrap;
pub mod cli;
pub mod commands;

use anyhow::Context;
use lb_core::config::AppConfig;
use serde_json::Value;
use tracing::{info, info_span, Instrument};

use bootstrap::{wire_dependencies, AppServices};
use cli::Cli;

/// Wire the client, run one command and return its JSON output.
///
/// The periodic connectivity probe (skipped with `--no-probe`) and the
/// offline replay observer run alongside the command and stop when it
/// returns.
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<Value> {
    let wired = wire_dependencies(&config)?;

    let monitor = if cli.no_probe {
        None
    } else {
        let online = wired.network.probe(&wired.client).await;
        info!(online, "startup connectivity probe");
        Some(
            wired
                .network
                .spawn_probe(wired.client.clone(), config.probe_interval()),
        )
    };

    let services = AppServices::new(wired.deps);
    let observer = services.sync.spawn_connectivity_observer();

    let result = commands::execute(cli.command, &services)
        .instrument(info_span!("localbiz.command"))
        .await;

    if let Some(monitor) = monitor {
        monitor.abort();
    }
    observer.abort();
    result
}

/// Load config, start tracing and run the command on a
/// current-thread runtime.
pub fn main_entry(cli: Cli) -> anyhow::Result<Value> {
    let config = bootstrap::load_app_config(cli.config.clone())?;
    bootstrap::init_tracing_subscriber(config.file_logging)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    runtime.block_on(run(cli, config))
}
