//! Error types for event handling.

use thiserror::Error;

/// A required request field is missing.
///
/// The display strings are what downstream consumers see in the `error`
/// field of the failure notification.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Datacenter VPC ID invalid")]
    DatacenterIdInvalid,

    #[error("Datacenter Region invalid")]
    DatacenterRegionInvalid,

    /// Access key or token (or both) missing.
    #[error("Datacenter credentials invalid")]
    DatacenterCredentialsInvalid,

    #[error("Network subnet invalid")]
    NetworkSubnetInvalid,
}

/// Errors that can occur when moving events on and off the wire.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventError {
    /// The event could not be encoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An inbound payload is not a deletion request.
    #[error("invalid event payload: {0}")]
    Decode(String),

    /// The failure notification itself could not be encoded.
    ///
    /// No fallback exists past this point; the caller must escalate.
    #[error("failure notification for event {event_id} could not be encoded: {reason}")]
    Unpublishable { event_id: String, reason: String },
}

impl From<serde_json::Error> for EventError {
    fn from(err: serde_json::Error) -> Self {
        EventError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            ValidationError::DatacenterIdInvalid.to_string(),
            "Datacenter VPC ID invalid"
        );
        assert_eq!(
            ValidationError::DatacenterRegionInvalid.to_string(),
            "Datacenter Region invalid"
        );
        assert_eq!(
            ValidationError::DatacenterCredentialsInvalid.to_string(),
            "Datacenter credentials invalid"
        );
        assert_eq!(
            ValidationError::NetworkSubnetInvalid.to_string(),
            "Network subnet invalid"
        );
    }

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(EventError::from(err), EventError::Serialization(_)));
    }
}
