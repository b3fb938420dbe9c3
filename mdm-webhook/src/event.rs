//! MicroMDM webhook event types.
//!
//! MicroMDM posts one JSON envelope per event. Only the fields the receiver
//! reads are modelled; anything else in the body is ignored.

use base64::{
    alphabet,
    engine::{GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use serde::Deserialize;

use crate::error::WebhookError;

/// Standard alphabet with canonical padding; non-zero trailing bits are tolerated.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Topic MicroMDM uses for command acknowledgements.
pub const ACKNOWLEDGE_TOPIC: &str = "mdm.Connect";

/// Webhook envelope posted by the MDM server.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WebhookEvent {
    /// Event topic, e.g. `mdm.Connect` or `mdm.Authenticate`
    pub topic: Option<String>,
    /// Unique event identifier assigned by the MDM server
    pub event_id: Option<String>,
    /// RFC 3339 creation time
    pub created_at: Option<String>,
    /// Present when a device responds to a command
    pub acknowledge_event: Option<AcknowledgeEvent>,
    /// Present for check-in messages (authenticate, token update, checkout)
    pub checkin_event: Option<CheckinEvent>,
}

/// A device's response to an MDM command.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AcknowledgeEvent {
    pub udid: Option<String>,
    pub status: Option<String>,
    pub command_uuid: Option<String>,
    /// Base64-encoded plist sent by the device
    pub raw_payload: Option<String>,
}

/// A device check-in message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckinEvent {
    pub udid: Option<String>,
    pub raw_payload: Option<String>,
}

impl WebhookEvent {
    /// Parse a webhook body.
    pub fn from_slice(body: &[u8]) -> Result<Self, WebhookError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Device UDID from whichever inner event is present.
    pub fn udid(&self) -> Option<&str> {
        self.acknowledge_event
            .as_ref()
            .and_then(|ack| ack.udid.as_deref())
            .or_else(|| {
                self.checkin_event
                    .as_ref()
                    .and_then(|checkin| checkin.udid.as_deref())
            })
    }

    /// Decode `acknowledge_event.raw_payload` into raw bytes.
    pub fn decode_acknowledge_payload(&self) -> Result<Vec<u8>, WebhookError> {
        let raw_payload = self
            .acknowledge_event
            .as_ref()
            .ok_or(WebhookError::MissingAcknowledgeEvent)?
            .raw_payload
            .as_deref()
            .ok_or(WebhookError::MissingRawPayload)?;

        decode_raw_payload(raw_payload)
    }
}

/// Decode a standard-alphabet, padded base64 string.
///
/// Bytes outside the alphabet (line breaks, spaces) are skipped before
/// decoding, so wrapped payloads are accepted.
pub fn decode_raw_payload(raw_payload: &str) -> Result<Vec<u8>, WebhookError> {
    let encoded: Vec<u8> = raw_payload
        .bytes()
        .filter(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        .collect();

    Ok(PAYLOAD_ENGINE.decode(encoded)?)
}
