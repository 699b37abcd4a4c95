use super::{BookEvent, PublishError, Result};

/// Encodes an event to its JSON wire payload.
pub fn encode_event(event: &BookEvent) -> Result<String> {
    serde_json::to_string(event).map_err(|e| PublishError::Encoding(e.to_string()))
}

/// Decodes a JSON wire payload into an event.
pub fn decode_event(payload: &str) -> Result<BookEvent> {
    serde_json::from_str(payload).map_err(|e| PublishError::Encoding(e.to_string()))
}
