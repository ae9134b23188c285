//! AWS network deleter
//!
//! Consumes `network.delete.aws` requests, removes the subnet and reports
//! the outcome on `network.delete.aws.done` or `network.delete.aws.error`.
//!
//! ## Architecture
//!
//! - **Worker**: pulls requests off the subscription, one task per request
//! - **Handler**: decode, validate, delete, then report the outcome
//! - **Deleter**: provider seam for the actual subnet removal
//! - **NATS publisher**: delivers outcomes to the bus

pub mod config;
pub mod deleter;
pub mod handler;
pub mod nats;
pub mod worker;

pub use config::Config;
pub use deleter::{NetworkDeleter, NoopDeleter};
pub use handler::RequestHandler;
pub use nats::NatsPublisher;
pub use worker::{run_worker, WorkerConfig, WorkerError};
