//! The network deletion event.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EventError, ValidationError};

/// One network deletion request/response cycle.
///
/// Missing or `null` inbound fields decode as empty strings so that an
/// incomplete request surfaces as a validation failure rather than a decode
/// failure.
///
/// Field order here is the wire order.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// Correlates the request with its outcome.
    #[serde(deserialize_with = "null_as_empty")]
    pub id: String,

    /// Target VPC.
    #[serde(deserialize_with = "null_as_empty")]
    pub datacenter_vpc_id: String,

    /// Target region.
    #[serde(deserialize_with = "null_as_empty")]
    pub datacenter_region: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub datacenter_access_key: String,

    #[serde(deserialize_with = "null_as_empty")]
    pub datacenter_access_token: String,

    /// Provider-assigned subnet ID, present only when known.
    #[serde(
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub network_aws_id: String,

    /// Subnet to remove.
    #[serde(deserialize_with = "null_as_empty")]
    pub network_subnet: String,

    /// Set only on the error path.
    #[serde(
        rename = "error",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub error_message: String,
}

impl Event {
    /// Decode a wire payload, keeping any `error` it carries.
    pub fn from_json(payload: &[u8]) -> Result<Self, EventError> {
        serde_json::from_slice(payload).map_err(|e| EventError::Decode(e.to_string()))
    }

    /// Decode an inbound deletion request.
    ///
    /// A request carries no outcome yet, so any `error` it arrives with is
    /// discarded.
    pub fn from_request(payload: &[u8]) -> Result<Self, EventError> {
        let mut event = Self::from_json(payload)?;
        event.error_message.clear();
        Ok(event)
    }

    /// Check that every required field is present.
    ///
    /// Rules are checked in a fixed order and the first violation wins.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.datacenter_vpc_id.is_empty() {
            return Err(ValidationError::DatacenterIdInvalid);
        }

        if self.datacenter_region.is_empty() {
            return Err(ValidationError::DatacenterRegionInvalid);
        }

        if self.datacenter_access_key.is_empty() || self.datacenter_access_token.is_empty() {
            return Err(ValidationError::DatacenterCredentialsInvalid);
        }

        if self.network_subnet.is_empty() {
            return Err(ValidationError::NetworkSubnetInvalid);
        }

        Ok(())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

// Credentials never reach the logs.
impl std::fmt::Debug for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Event")
            .field("id", &self.id)
            .field("datacenter_vpc_id", &self.datacenter_vpc_id)
            .field("datacenter_region", &self.datacenter_region)
            .field("datacenter_access_key", &"<redacted>")
            .field("datacenter_access_token", &"<redacted>")
            .field("network_aws_id", &self.network_aws_id)
            .field("network_subnet", &self.network_subnet)
            .field("error_message", &self.error_message)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn valid_event() -> Event {
        Event {
            id: "req-1".to_string(),
            datacenter_vpc_id: "vpc-1".to_string(),
            datacenter_region: "us-east-1".to_string(),
            datacenter_access_key: "k".to_string(),
            datacenter_access_token: "t".to_string(),
            network_aws_id: String::new(),
            network_subnet: "sub-1".to_string(),
            error_message: String::new(),
        }
    }

    #[test]
    fn test_valid_event_passes() {
        assert_eq!(valid_event().validate(), Ok(()));
    }

    #[test]
    fn test_empty_vpc_id_with_region() {
        let event = Event {
            datacenter_vpc_id: String::new(),
            ..valid_event()
        };
        assert_eq!(
            event.validate(),
            Err(ValidationError::DatacenterIdInvalid)
        );
    }

    #[rstest]
    #[case("", "t")]
    #[case("k", "")]
    #[case("", "")]
    fn test_credentials_checked_as_a_unit(#[case] key: &str, #[case] token: &str) {
        let event = Event {
            datacenter_access_key: key.to_string(),
            datacenter_access_token: token.to_string(),
            ..valid_event()
        };
        assert_eq!(
            event.validate(),
            Err(ValidationError::DatacenterCredentialsInvalid)
        );
    }

    #[rstest]
    #[case::everything_missing(Event::default(), ValidationError::DatacenterIdInvalid)]
    #[case::region_before_credentials(
        Event {
            datacenter_region: String::new(),
            datacenter_access_key: String::new(),
            network_subnet: String::new(),
            ..valid_event()
        },
        ValidationError::DatacenterRegionInvalid
    )]
    #[case::credentials_before_subnet(
        Event {
            datacenter_access_token: String::new(),
            network_subnet: String::new(),
            ..valid_event()
        },
        ValidationError::DatacenterCredentialsInvalid
    )]
    #[case::subnet_last(
        Event {
            network_subnet: String::new(),
            ..valid_event()
        },
        ValidationError::NetworkSubnetInvalid
    )]
    fn test_first_violation_wins(#[case] event: Event, #[case] expected: ValidationError) {
        assert_eq!(event.validate(), Err(expected));
    }

    #[test]
    fn test_optional_fields_do_not_affect_validation() {
        let event = Event {
            id: String::new(),
            network_aws_id: String::new(),
            error_message: "earlier failure".to_string(),
            ..valid_event()
        };
        assert_eq!(event.validate(), Ok(()));
    }

    #[test]
    fn test_wire_field_order_and_omission() {
        let json = serde_json::to_string(&valid_event()).unwrap();
        assert_eq!(
            json,
            r#"{"id":"req-1","datacenter_vpc_id":"vpc-1","datacenter_region":"us-east-1","datacenter_access_key":"k","datacenter_access_token":"t","network_subnet":"sub-1"}"#
        );
    }

    #[test]
    fn test_optional_fields_serialized_when_set() {
        let event = Event {
            network_aws_id: "subnet-0abc".to_string(),
            error_message: "boom".to_string(),
            ..valid_event()
        };
        let value: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["network_aws_id"], "subnet-0abc");
        assert_eq!(value["error"], "boom");
    }

    #[test]
    fn test_required_fields_always_present() {
        let value = serde_json::to_value(Event::default()).unwrap();
        let object = value.as_object().unwrap();
        for key in [
            "id",
            "datacenter_vpc_id",
            "datacenter_region",
            "datacenter_access_key",
            "datacenter_access_token",
            "network_subnet",
        ] {
            assert_eq!(object[key], "", "{key} should be present");
        }
        assert!(!object.contains_key("network_aws_id"));
        assert!(!object.contains_key("error"));
    }

    #[test]
    fn test_missing_fields_decode_as_empty() {
        let event = Event::from_json(br#"{"id":"req-9","datacenter_vpc_id":"vpc-9"}"#).unwrap();
        assert_eq!(event.id, "req-9");
        assert_eq!(event.datacenter_region, "");
        assert_eq!(
            event.validate(),
            Err(ValidationError::DatacenterRegionInvalid)
        );
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let event = Event::from_json(
            br#"{"id":"req-n","datacenter_vpc_id":null,"datacenter_region":"us-east-1","network_aws_id":null,"error":null}"#,
        )
        .unwrap();
        assert_eq!(event.id, "req-n");
        assert_eq!(event.datacenter_vpc_id, "");
        assert_eq!(event.network_aws_id, "");
        assert_eq!(event.error_message, "");
        assert_eq!(
            event.validate(),
            Err(ValidationError::DatacenterIdInvalid)
        );
    }

    #[test]
    fn test_request_drops_inbound_error() {
        let payload = serde_json::to_vec(&Event {
            error_message: "stale".to_string(),
            ..valid_event()
        })
        .unwrap();

        let request = Event::from_request(&payload).unwrap();
        assert_eq!(request, valid_event());

        // Outcome payloads keep their error when read back.
        let outcome = Event::from_json(&payload).unwrap();
        assert_eq!(outcome.error_message, "stale");
    }

    #[test]
    fn test_malformed_payload_is_decode_error() {
        let err = Event::from_json(b"not json").unwrap_err();
        assert!(matches!(err, EventError::Decode(_)));

        let err = Event::from_json(br#"{"id": 42}"#).unwrap_err();
        assert!(matches!(err, EventError::Decode(_)));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let event = Event {
            datacenter_access_key: "AKIASECRET".to_string(),
            datacenter_access_token: "tokensecret".to_string(),
            ..valid_event()
        };
        let debug = format!("{:?}", event);
        assert!(!debug.contains("AKIASECRET"));
        assert!(!debug.contains("tokensecret"));
        assert!(debug.contains("vpc-1"));
    }

    fn field() -> impl Strategy<Value = String> {
        prop_oneof![Just(String::new()), "[a-zA-Z0-9-]{1,16}"]
    }

    fn present() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9-]{1,16}"
    }

    prop_compose! {
        fn any_event()(
            id in field(),
            vpc in field(),
            region in field(),
            key in field(),
            token in field(),
            aws_id in field(),
            subnet in field(),
            error in field(),
        ) -> Event {
            Event {
                id,
                datacenter_vpc_id: vpc,
                datacenter_region: region,
                datacenter_access_key: key,
                datacenter_access_token: token,
                network_aws_id: aws_id,
                network_subnet: subnet,
                error_message: error,
            }
        }
    }

    proptest! {
        #[test]
        fn prop_empty_vpc_always_fails_first(mut event in any_event()) {
            event.datacenter_vpc_id.clear();
            prop_assert_eq!(event.validate(), Err(ValidationError::DatacenterIdInvalid));
        }

        #[test]
        fn prop_empty_region_after_vpc(mut event in any_event(), vpc in present()) {
            event.datacenter_vpc_id = vpc;
            event.datacenter_region.clear();
            prop_assert_eq!(event.validate(), Err(ValidationError::DatacenterRegionInvalid));
        }

        #[test]
        fn prop_subnet_checked_last(
            mut event in any_event(),
            vpc in present(),
            region in present(),
            key in present(),
            token in present(),
        ) {
            event.datacenter_vpc_id = vpc;
            event.datacenter_region = region;
            event.datacenter_access_key = key;
            event.datacenter_access_token = token;
            let expected = if event.network_subnet.is_empty() {
                Err(ValidationError::NetworkSubnetInvalid)
            } else {
                Ok(())
            };
            prop_assert_eq!(event.validate(), expected);
        }

        #[test]
        fn prop_wire_round_trip(event in any_event()) {
            let payload = serde_json::to_vec(&event).unwrap();
            let decoded = Event::from_json(&payload).unwrap();
            prop_assert_eq!(&decoded, &event);
            prop_assert_eq!(serde_json::to_vec(&decoded).unwrap(), payload);
        }
    }
}
