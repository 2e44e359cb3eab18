use std::time::Duration;

use event_relay::config::Config;
use serde_json::{Value, json};
use tokio::time::sleep;
use wiremock::{MockServer, Request};

pub fn test_config(webhook_url: &str) -> Config {
    Config {
        server_port: 0,
        webhook_url: webhook_url.to_string(),
        delivery_timeout_seconds: 5,
        queue_capacity: 16,
    }
}

pub fn valid_payload(message_id: &str) -> Value {
    json!({
        "ev": "click",
        "et": "ui",
        "id": "a1",
        "uid": "u1",
        "mid": message_id,
        "t": "Home",
        "p": "http://x",
        "l": "en",
        "sc": "1920x1080",
        "atrk0": "color",
        "atrv0": "red",
        "atrt0": "string"
    })
}

pub async fn wait_for_requests(server: &MockServer, expected: usize) -> Vec<Request> {
    for _ in 0..50 {
        let requests = server.received_requests().await.unwrap_or_default();
        if requests.len() >= expected {
            return requests;
        }
        sleep(Duration::from_millis(100)).await;
    }
    panic!("Timed out waiting for {} webhook request(s)", expected);
}
