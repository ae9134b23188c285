//! Wire encoding for outbound events.

use crate::error::EventError;
use crate::event::Event;

/// Encodes an event into a bus payload.
pub trait EventCodec: Send + Sync {
    fn encode(&self, event: &Event) -> Result<Vec<u8>, EventError>;
}

/// JSON wire format consumed by the rest of the workflow.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl EventCodec for JsonCodec {
    fn encode(&self, event: &Event) -> Result<Vec<u8>, EventError> {
        Ok(serde_json::to_vec(event)?)
    }
}
