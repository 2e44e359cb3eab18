use anyhow::{Error, Result};
use serde_json::Value;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::{
    clients::webhook::WebhookClient,
    models::{decode::decode_event, event::OutboundEvent},
};

/// Drains the dispatch queue for the lifetime of the process, delivering
/// events in enqueue order. A failed item is dropped with a log line and the
/// worker moves on. The shutdown signal is observed between items; queued
/// items still pending at shutdown are abandoned.
pub async fn run_delivery_worker(
    mut queue: mpsc::Receiver<Value>,
    webhook: WebhookClient,
    mut shutdown: watch::Receiver<bool>,
) {
    info!("Delivery worker started");

    loop {
        let payload = tokio::select! {
            _ = shutdown.changed() => {
                info!(abandoned = queue.len(), "Shutdown signal received, stopping delivery worker");
                break;
            }
            received = queue.recv() => match received {
                Some(payload) => payload,
                None => {
                    info!("Dispatch queue closed, stopping delivery worker");
                    break;
                }
            },
        };

        if let Err(error) = process_payload(&payload, &webhook).await {
            warn!(%error, "Dropping event");
        }
    }
}

/// Decode, transform, send. Any failure is terminal for this item only.
pub async fn process_payload(payload: &Value, webhook: &WebhookClient) -> Result<(), Error> {
    let decoded = decode_event(payload)?;

    debug!(
        message_id = %decoded.message_id,
        event = %decoded.event_name,
        "Event decoded"
    );

    let outbound = OutboundEvent::from(decoded);

    webhook.deliver(&outbound).await
}
