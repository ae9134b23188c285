//! NATS-backed publisher.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use netdel_events::Publisher;

/// Publishes outcomes over a shared NATS connection.
///
/// `async_nats::Client` is cheap to clone and safe to use from many tasks.
#[derive(Clone)]
pub struct NatsPublisher {
    client: async_nats::Client,
}

impl NatsPublisher {
    pub fn new(client: async_nats::Client) -> Self {
        Self { client }
    }

    /// Wait until everything published so far has reached the server.
    pub async fn flush(&self) -> Result<()> {
        self.client.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl Publisher for NatsPublisher {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<()> {
        self.client.publish(topic.to_string(), payload).await?;
        Ok(())
    }
}
