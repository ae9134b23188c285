//! Per-request processing.

use std::sync::Arc;

use netdel_events::{Event, EventError, Publisher};
use tracing::{error, info};

use crate::deleter::NetworkDeleter;

/// Drives one request from inbound payload to terminal outcome.
pub struct RequestHandler {
    publisher: Arc<dyn Publisher>,
    deleter: Arc<dyn NetworkDeleter>,
}

impl RequestHandler {
    pub fn new(publisher: Arc<dyn Publisher>, deleter: Arc<dyn NetworkDeleter>) -> Self {
        Self { publisher, deleter }
    }

    /// Handle one inbound payload.
    ///
    /// Validation and deletion failures are reported on the error topic and
    /// return `Ok`. An error return means an outcome could not be reported
    /// at all and the caller must escalate.
    pub async fn handle(&self, payload: &[u8]) -> Result<(), EventError> {
        let event = match Event::from_request(payload) {
            Ok(event) => event,
            Err(e) => {
                // Without an event there is nothing to report an outcome on.
                error!(error = %e, "dropping undecodable deletion request");
                return Ok(());
            }
        };

        info!(
            event_id = %event.id,
            vpc_id = %event.datacenter_vpc_id,
            subnet = %event.network_subnet,
            "received network deletion request"
        );

        let publisher = self.publisher.as_ref();

        if let Err(e) = event.validate() {
            return event.error(publisher, &e).await;
        }

        let deleted = self.deleter.delete(&event).await;
        match deleted {
            Ok(()) => {
                info!(event_id = %event.id, "network deleted");
                event.complete(publisher).await
            }
            Err(e) => event.error(publisher, &e).await,
        }
    }
}
