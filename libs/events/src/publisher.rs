//! Outbound bus capability.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

/// Delivers a payload to a named topic.
///
/// Implementations are shared by every in-flight event and must tolerate
/// concurrent callers. Delivery failures, timeouts and retries are the
/// implementation's concern; the outcome protocol only logs the result.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<()>;
}
