use anyhow::{Error, Result, anyhow};
use dotenvy::dotenv;
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct Config {
    pub server_port: u16,

    pub webhook_url: String,

    #[serde(default = "default_delivery_timeout_seconds")]
    pub delivery_timeout_seconds: u64,

    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_delivery_timeout_seconds() -> u64 {
    10
}

fn default_queue_capacity() -> usize {
    256
}

impl Config {
    pub fn load() -> Result<Self, Error> {
        dotenv().ok();

        let config = envy::from_env::<Self>()
            .map_err(|_| anyhow!("Invalid or missing environmental variable"))?;
        Ok(config)
    }
}
