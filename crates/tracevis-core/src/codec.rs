//! JSON encoding of event traces.
//!
//! A trace is a JSON array of internally tagged events:
//!
//! ```json
//! [{ "type": "Compare", "i": 0, "j": 1 }, { "type": "Swap", "i": 0, "j": 1 }]
//! ```
//!
//! Tags are checked against [`Event::TAGS`] before payloads are decoded, so a
//! trace written by a newer adapter fails with [`Error::UnknownEvent`] instead
//! of a generic parse error.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::events::Event;

/// Serialize a trace to a JSON array.
pub fn encode_trace(events: &[Event]) -> Result<String> {
    Ok(serde_json::to_string(events)?)
}

/// Parse a JSON array of events.
pub fn decode_trace(json: &str) -> Result<Vec<Event>> {
    let raw: Vec<Value> = serde_json::from_str(json)?;
    raw.into_iter()
        .enumerate()
        .map(|(position, value)| decode_event(position, value))
        .collect()
}

fn decode_event(position: usize, value: Value) -> Result<Event> {
    let tag = match value.get("type") {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => {
            return Err(Error::MalformedEvent {
                position,
                reason: format!("event type must be a string, got {other}"),
            })
        }
        None => {
            return Err(Error::MalformedEvent {
                position,
                reason: "missing event type".into(),
            })
        }
    };

    if !Event::is_known_tag(&tag) {
        return Err(Error::UnknownEvent { position, tag });
    }

    serde_json::from_value(value).map_err(|e| Error::MalformedEvent {
        position,
        reason: e.to_string(),
    })
}
