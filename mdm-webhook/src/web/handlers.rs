//! Webhook endpoint handler.
//!
//! The handler only:
//! 1. Parses the JSON envelope
//! 2. Decodes `acknowledge_event.raw_payload`
//! 3. Hands the bytes to the configured sink
//! 4. Returns an empty 200

use std::sync::Arc;

use axum::{body::Bytes, extract::State, http::StatusCode};
use tracing::info;

use crate::error::WebhookError;
use crate::event::WebhookEvent;
use crate::sink::PayloadSink;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub sink: Arc<dyn PayloadSink>,
}

impl AppState {
    pub fn new(sink: impl PayloadSink + 'static) -> Self {
        Self {
            sink: Arc::new(sink),
        }
    }
}

/// MicroMDM webhook endpoint.
///
/// The body is read as raw bytes so callers that omit `Content-Type`
/// are still accepted.
pub async fn webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, WebhookError> {
    let event = WebhookEvent::from_slice(&body)?;

    info!(
        topic = event.topic.as_deref().unwrap_or_default(),
        event_id = event.event_id.as_deref().unwrap_or_default(),
        udid = event.udid().unwrap_or_default(),
        body_length = body.len(),
        "webhook_received"
    );

    let payload = event.decode_acknowledge_payload()?;

    state.sink.emit(&payload).map_err(WebhookError::Sink)?;

    info!(payload_length = payload.len(), "raw_payload_emitted");

    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[tokio::test]
    async fn test_webhook_emits_decoded_payload() {
        let sink = MemorySink::new();
        let state = AppState::new(sink.clone());

        let status = webhook(
            State(state),
            Bytes::from_static(br#"{"acknowledge_event":{"raw_payload":"aGVsbG8="}}"#),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(sink.payloads(), vec![b"hello".to_vec()]);
    }

    #[tokio::test]
    async fn test_webhook_does_not_emit_on_error() {
        let sink = MemorySink::new();
        let state = AppState::new(sink.clone());

        let result = webhook(
            State(state),
            Bytes::from_static(br#"{"acknowledge_event":{"raw_payload":"aGVsbG8"}}"#),
        )
        .await;

        assert!(matches!(result, Err(WebhookError::InvalidBase64(_))));
        assert!(sink.payloads().is_empty());
    }

    struct BrokenSink;

    impl PayloadSink for BrokenSink {
        fn emit(&self, _payload: &[u8]) -> std::io::Result<()> {
            Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "closed",
            ))
        }
    }

    #[tokio::test]
    async fn test_webhook_sink_failure() {
        let result = webhook(
            State(AppState::new(BrokenSink)),
            Bytes::from_static(br#"{"acknowledge_event":{"raw_payload":""}}"#),
        )
        .await;

        let err = result.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
