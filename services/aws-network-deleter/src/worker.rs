//! Request worker loop.
//!
//! Each inbound message is handled on its own task. Shutdown stops intake
//! and gives in-flight requests a bounded window to finish.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use netdel_events::EventError;
use thiserror::Error;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info};

use crate::handler::RequestHandler;

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Grace period for in-flight requests after intake stops.
    pub drain_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            drain_timeout: Duration::from_secs(5),
        }
    }
}

/// Failures that stop the worker.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// An outcome could not be reported.
    #[error(transparent)]
    Outcome(#[from] EventError),

    /// A request task panicked.
    #[error("request task panicked: {0}")]
    TaskPanicked(String),
}

/// Run the worker until the message stream ends or shutdown is signalled.
///
/// Returns the first fatal error from any request; remaining tasks are
/// aborted when that happens.
pub async fn run_worker<S>(
    mut messages: S,
    handler: Arc<RequestHandler>,
    config: WorkerConfig,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), WorkerError>
where
    S: Stream<Item = Bytes> + Unpin,
{
    let mut tasks = JoinSet::new();

    loop {
        tokio::select! {
            _ = shutdown.changed() => {
                info!("Worker shutting down");
                break;
            }
            Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                check_task(result)?;
            }
            message = messages.next() => {
                let Some(payload) = message else {
                    info!("Request subscription closed");
                    break;
                };
                debug!(bytes = payload.len(), "received request");
                let handler = Arc::clone(&handler);
                tasks.spawn(async move { handler.handle(&payload).await });
            }
        }
    }

    if tasks.is_empty() {
        return Ok(());
    }

    info!(in_flight = tasks.len(), "Draining in-flight requests");
    let drain = async {
        while let Some(result) = tasks.join_next().await {
            check_task(result)?;
        }
        Ok::<(), WorkerError>(())
    };

    let drained = tokio::time::timeout(config.drain_timeout, drain).await;
    match drained {
        Ok(result) => result,
        Err(_) => {
            // These requests end without any outcome on the bus.
            error!(
                aborted = tasks.len(),
                timeout_secs = config.drain_timeout.as_secs(),
                "Drain timed out, aborting remaining requests"
            );
            tasks.abort_all();
            Ok(())
        }
    }
}

fn check_task(result: Result<Result<(), EventError>, JoinError>) -> Result<(), WorkerError> {
    match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => {
            error!(error = %e, "Outcome could not be reported");
            Err(e.into())
        }
        Err(e) => {
            error!(error = %e, "Request task panicked");
            Err(WorkerError::TaskPanicked(e.to_string()))
        }
    }
}
