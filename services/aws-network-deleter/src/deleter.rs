//! Provider seam for subnet removal.

use anyhow::Result;
use async_trait::async_trait;
use netdel_events::Event;
use tracing::info;

/// Removes the network described by a validated event.
#[async_trait]
pub trait NetworkDeleter: Send + Sync {
    async fn delete(&self, event: &Event) -> Result<()>;
}

/// Deleter that makes no provider calls and always succeeds.
#[derive(Debug, Default)]
pub struct NoopDeleter;

#[async_trait]
impl NetworkDeleter for NoopDeleter {
    async fn delete(&self, event: &Event) -> Result<()> {
        info!(
            event_id = %event.id,
            vpc_id = %event.datacenter_vpc_id,
            region = %event.datacenter_region,
            subnet = %event.network_subnet,
            "[NOOP] Deleting network"
        );
        Ok(())
    }
}
