//! Configuration for the network deleter.

use std::time::Duration;

use anyhow::{Context, Result};
use netdel_events::topics;

/// Network deleter configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// NATS server URL.
    pub nats_url: String,

    /// Subject carrying deletion requests.
    pub subject: String,

    /// Queue group, so several deleters can share the request stream.
    pub queue_group: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// How long in-flight requests may run after shutdown is requested.
    pub drain_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let nats_url =
            lookup("NETDEL_NATS_URL").unwrap_or_else(|| "nats://127.0.0.1:4222".to_string());

        let subject =
            lookup("NETDEL_SUBJECT").unwrap_or_else(|| topics::NETWORK_DELETE_REQUEST.to_string());

        let queue_group = lookup("NETDEL_QUEUE_GROUP").filter(|g| !g.is_empty());

        let log_level = lookup("NETDEL_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        let drain_timeout_secs = lookup("NETDEL_DRAIN_TIMEOUT_SECS")
            .map(|s| s.parse::<u64>())
            .transpose()
            .context("NETDEL_DRAIN_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(5);

        Ok(Self {
            nats_url,
            subject,
            queue_group,
            log_level,
            drain_timeout: Duration::from_secs(drain_timeout_secs),
        })
    }
}
