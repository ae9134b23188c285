//! # netdel-events
//!
//! Event model and completion protocol for the AWS network deletion step.
//!
//! ## Design Principles
//!
//! - An event is one deletion request/response cycle, correlated by `id`
//! - Validation reports only the first violated rule, in a fixed order
//! - Outcomes are bus publications, never return values
//! - Reporting an outcome consumes the event, so nothing is published twice
//!
//! ## Topics
//!
//! - `network.delete.aws` - inbound deletion requests
//! - `network.delete.aws.done` - the network was removed
//! - `network.delete.aws.error` - the request failed, `error` is populated

mod codec;
mod error;
mod event;
mod outcome;
mod publisher;

pub mod topics;

pub use codec::{EventCodec, JsonCodec};
pub use error::{EventError, ValidationError};
pub use event::Event;
pub use publisher::Publisher;
