//! Bus subjects used by the network deletion protocol.
//!
//! Downstream consumers subscribe to these by exact name.

/// Inbound deletion requests.
pub const NETWORK_DELETE_REQUEST: &str = "network.delete.aws";

/// Published when the network was deleted.
pub const NETWORK_DELETE_DONE: &str = "network.delete.aws.done";

/// Published when the request could not be fulfilled.
pub const NETWORK_DELETE_ERROR: &str = "network.delete.aws.error";
