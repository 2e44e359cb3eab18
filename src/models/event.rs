use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A typed value attached to an event or a user. Serialized as
/// `{"value": ..., "type": ...}` on the outbound wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trait {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Internal representation of one inbound event after attribute extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedEvent {
    pub event_name: String,
    pub event_type: String,
    pub app_id: String,
    pub user_id: String,
    pub message_id: String,
    pub page_title: String,
    pub page_url: String,
    pub browser_language: String,
    pub screen_size: String,
    pub attributes: HashMap<String, Trait>,
    pub user_traits: HashMap<String, Trait>,
}

/// The same event under the downstream receiver's field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEvent {
    pub event: String,
    pub event_type: String,
    pub app_id: String,
    pub user_id: String,
    pub message_id: String,
    pub page_title: String,
    pub page_url: String,
    pub browser_language: String,
    pub screen_size: String,
    pub attributes: HashMap<String, Trait>,
    pub traits: HashMap<String, Trait>,
}

impl From<DecodedEvent> for OutboundEvent {
    fn from(event: DecodedEvent) -> Self {
        Self {
            event: event.event_name,
            event_type: event.event_type,
            app_id: event.app_id,
            user_id: event.user_id,
            message_id: event.message_id,
            page_title: event.page_title,
            page_url: event.page_url,
            browser_language: event.browser_language,
            screen_size: event.screen_size,
            attributes: event.attributes,
            traits: event.user_traits,
        }
    }
}
