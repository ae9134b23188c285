//! Terminal outcomes of a deletion request.
//!
//! Both operations consume the event. Once an outcome has been reported
//! there is nothing left to publish from.

use std::fmt::Display;

use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::codec::{EventCodec, JsonCodec};
use crate::error::EventError;
use crate::event::Event;
use crate::publisher::Publisher;
use crate::topics;

impl Event {
    /// Report success on `network.delete.aws.done`.
    ///
    /// If the event cannot be encoded the failure is reported on the error
    /// topic instead, with the encoding error as the message.
    pub async fn complete(self, publisher: &dyn Publisher) -> Result<(), EventError> {
        self.complete_with(publisher, &JsonCodec).await
    }

    /// Report failure on `network.delete.aws.error`.
    ///
    /// Returns `EventError::Unpublishable` when the failure notification
    /// cannot be encoded. That error must be escalated, not ignored.
    pub async fn error(
        self,
        publisher: &dyn Publisher,
        err: &(dyn Display + Sync),
    ) -> Result<(), EventError> {
        self.error_with(publisher, &JsonCodec, err).await
    }

    /// [`Event::complete`] with an explicit codec.
    pub async fn complete_with(
        self,
        publisher: &dyn Publisher,
        codec: &dyn EventCodec,
    ) -> Result<(), EventError> {
        let payload = match codec.encode(&self) {
            Ok(payload) => payload,
            Err(err) => return self.error_with(publisher, codec, &err).await,
        };

        publish(publisher, topics::NETWORK_DELETE_DONE, payload, &self.id).await;
        Ok(())
    }

    /// [`Event::error`] with an explicit codec.
    pub async fn error_with(
        mut self,
        publisher: &dyn Publisher,
        codec: &dyn EventCodec,
        err: &(dyn Display + Sync),
    ) -> Result<(), EventError> {
        let message = err.to_string();
        error!(event_id = %self.id, error = %message, "network deletion failed");
        self.error_message = message;

        let payload = codec.encode(&self).map_err(|e| {
            error!(event_id = %self.id, error = %e, "failure notification could not be encoded");
            EventError::Unpublishable {
                event_id: self.id.clone(),
                reason: e.to_string(),
            }
        })?;

        publish(publisher, topics::NETWORK_DELETE_ERROR, payload, &self.id).await;
        Ok(())
    }
}

async fn publish(publisher: &dyn Publisher, topic: &str, payload: Vec<u8>, event_id: &str) {
    match publisher.publish(topic, Bytes::from(payload)).await {
        Ok(()) => debug!(topic, event_id, "published outcome"),
        Err(e) => warn!(topic, event_id, error = %e, "failed to publish outcome"),
    }
}
