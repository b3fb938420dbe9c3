//! Errors raised while decoding and acknowledging a webhook.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Reasons a webhook request is not acknowledged.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("decode JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("the event has no acknowledge_event")]
    MissingAcknowledgeEvent,

    #[error("the acknowledge_event has no raw_payload")]
    MissingRawPayload,

    #[error("decode raw_payload: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("write payload: {0}")]
    Sink(#[source] std::io::Error),
}

impl WebhookError {
    /// HTTP status reported to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebhookError::Sink(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for WebhookError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "webhook_failed");
        } else {
            warn!(error = %self, status = status.as_u16(), "webhook_rejected");
        }

        (status, self.to_string()).into_response()
    }
}
