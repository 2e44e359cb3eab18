use std::time::Duration;

use anyhow::{Error, Result, anyhow};
use reqwest::Client;
use tracing::{debug, info};

use crate::{config::Config, models::event::OutboundEvent};

pub struct WebhookClient {
    http_client: Client,
    webhook_url: String,
}

impl WebhookClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.delivery_timeout_seconds))
            .build()?;

        info!(url = %config.webhook_url, "Webhook client initialized");

        Ok(Self {
            http_client,
            webhook_url: config.webhook_url.clone(),
        })
    }

    /// One POST per event, no retry. Non-2xx responses are reported as
    /// errors carrying the status and response body.
    pub async fn deliver(&self, event: &OutboundEvent) -> Result<(), Error> {
        debug!(
            message_id = %event.message_id,
            event = %event.event,
            "Posting event to webhook"
        );

        let response = self
            .http_client
            .post(&self.webhook_url)
            .json(event)
            .send()
            .await?;

        if response.status().is_success() {
            info!(message_id = %event.message_id, "Event delivered");
            Ok(())
        } else {
            let status = response.status();
            let error_text = response.text().await?;
            Err(anyhow!("Webhook returned {}: {}", status, error_text))
        }
    }
}
