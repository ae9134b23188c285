//! AWS network deleter
//!
//! Subscribes to network deletion requests and reports each outcome on the
//! bus. See the library crate for the processing pipeline.

use std::sync::Arc;

use anyhow::Result;
use futures_util::StreamExt;
use netdel_aws_deleter::{
    run_worker, Config, NatsPublisher, NoopDeleter, RequestHandler, WorkerConfig,
};
use tokio::sync::watch;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!(
        nats_url = %config.nats_url,
        subject = %config.subject,
        queue_group = ?config.queue_group,
        "Starting network deleter"
    );

    let client = async_nats::connect(config.nats_url.as_str()).await?;
    let subscriber = match &config.queue_group {
        Some(group) => {
            client
                .queue_subscribe(config.subject.clone(), group.clone())
                .await?
        }
        None => client.subscribe(config.subject.clone()).await?,
    };
    let messages = subscriber.map(|message| message.payload);

    let publisher = Arc::new(NatsPublisher::new(client));
    let handler = Arc::new(RequestHandler::new(
        publisher.clone(),
        Arc::new(NoopDeleter),
    ));

    // Create shutdown channel
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal"),
            Err(e) => error!(error = %e, "Failed to listen for shutdown signal"),
        }
        let _ = shutdown_tx.send(true);
    });

    let worker_config = WorkerConfig {
        drain_timeout: config.drain_timeout,
    };
    let result = run_worker(messages, handler, worker_config, shutdown_rx).await;

    // Outcomes already handed to the client still need to reach the server.
    if let Err(e) = publisher.flush().await {
        warn!(error = %e, "Failed to flush pending publications");
    }

    match result {
        Ok(()) => {
            info!("Network deleter shutdown complete");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Network deleter stopped on fatal error");
            Err(e.into())
        }
    }
}
