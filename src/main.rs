use anyhow::{Error, Result};
use event_relay::{
    api::run_api_server, clients::webhook::WebhookClient, config::Config,
    worker::run_delivery_worker,
};
use tokio::sync::{mpsc, watch};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    let (queue_tx, queue_rx) = mpsc::channel(config.queue_capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let webhook = WebhookClient::new(&config)?;
    let worker = tokio::spawn(run_delivery_worker(queue_rx, webhook, shutdown_rx));
    let server = tokio::spawn(async move { run_api_server(&config, queue_tx).await });

    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    let _ = shutdown_tx.send(true);
    let _ = worker.await;
    server.abort();

    Ok(())
}
