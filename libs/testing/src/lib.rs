//! Test doubles and fixtures for the network deletion services.
//!
//! - [`RecordingPublisher`] captures every publication for inspection
//! - [`FailingCodec`] fails a fixed number of encodes before delegating to JSON
//! - [`LogCapture`] collects JSON log lines emitted while it is installed
//! - [`fixtures`] builds well-formed and broken requests

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use netdel_events::{Event, EventCodec, EventError, JsonCodec, Publisher};
use tracing_subscriber::fmt::MakeWriter;

/// A captured publication.
#[derive(Debug, Clone)]
pub struct PublishedMessage {
    pub topic: String,
    pub payload: Bytes,
}

impl PublishedMessage {
    /// Decode the payload back into an event.
    pub fn event(&self) -> Event {
        Event::from_json(&self.payload).expect("published payload is not an event")
    }

    /// Decode the payload as loose JSON, for key-presence checks.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.payload).expect("published payload is not JSON")
    }
}

/// Publisher that records messages instead of sending them.
#[derive(Default)]
pub struct RecordingPublisher {
    published: RwLock<Vec<PublishedMessage>>,
    fail_publishes: bool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose deliveries all fail. Messages are still recorded.
    pub fn failing() -> Self {
        Self {
            published: RwLock::default(),
            fail_publishes: true,
        }
    }

    /// All published messages, in order.
    pub fn published_messages(&self) -> Vec<PublishedMessage> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Published messages for a specific topic.
    pub fn messages_for_topic(&self, topic: &str) -> Vec<PublishedMessage> {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|m| m.topic == topic)
            .cloned()
            .collect()
    }

    pub fn publish_count(&self) -> usize {
        self.published
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, topic: &str, payload: Bytes) -> Result<()> {
        self.published
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(PublishedMessage {
                topic: topic.to_string(),
                payload,
            });

        if self.fail_publishes {
            anyhow::bail!("recording publisher configured to fail");
        }
        Ok(())
    }
}

/// Codec that fails its first `failures` encodes, then encodes as JSON.
pub struct FailingCodec {
    remaining: AtomicUsize,
}

impl FailingCodec {
    pub fn new(failures: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(failures),
        }
    }

    /// Fails every encode.
    pub fn always() -> Self {
        Self::new(usize::MAX)
    }
}

impl EventCodec for FailingCodec {
    fn encode(&self, event: &Event) -> Result<Vec<u8>, EventError> {
        let failed = self
            .remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(EventError::Serialization(
                "unsupported value in event".to_string(),
            ));
        }
        JsonCodec.encode(event)
    }
}

/// In-memory log sink.
///
/// Install with [`LogCapture::install`]; the returned guard keeps the
/// capturing subscriber as the thread default until dropped. Single-threaded
/// tokio tests (the `#[tokio::test]` default) see every line.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route this thread's logs into the capture.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(self.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Captured lines, one JSON object each.
    pub fn lines(&self) -> Vec<serde_json::Value> {
        let buffer = self.buffer.lock().unwrap_or_else(|e| e.into_inner());
        String::from_utf8_lossy(&buffer)
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Captured lines whose message equals `message`.
    pub fn lines_with_message(&self, message: &str) -> Vec<serde_json::Value> {
        self.lines()
            .into_iter()
            .filter(|line| line["fields"]["message"] == message)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

pub mod fixtures {
    use netdel_events::Event;

    /// A request that passes validation.
    pub fn valid_event() -> Event {
        Event {
            id: "req-1".to_string(),
            datacenter_vpc_id: "vpc-1".to_string(),
            datacenter_region: "us-east-1".to_string(),
            datacenter_access_key: "k".to_string(),
            datacenter_access_token: "t".to_string(),
            network_aws_id: "subnet-0a1b2c".to_string(),
            network_subnet: "sub-1".to_string(),
            error_message: String::new(),
        }
    }

    /// A valid request with the given id.
    pub fn valid_event_with_id(id: &str) -> Event {
        Event {
            id: id.to_string(),
            ..valid_event()
        }
    }

    /// Encode an event as an inbound payload.
    pub fn payload(event: &Event) -> bytes::Bytes {
        bytes::Bytes::from(serde_json::to_vec(event).expect("event encodes"))
    }
}
