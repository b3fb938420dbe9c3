//! MDM Webhook - receiver for MicroMDM webhook callbacks.
//!
//! MicroMDM posts a JSON event for each device response. This crate pulls
//! `acknowledge_event.raw_payload` out of the body, base64-decodes it and
//! writes the bytes to a [`PayloadSink`] (stdout by default).
//!
//! ## Flow
//!
//! ```text
//! MicroMDM → POST /webhook → WebhookEvent → decoded bytes → PayloadSink
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod sink;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::WebhookError;
pub use event::{AcknowledgeEvent, CheckinEvent, WebhookEvent};
pub use sink::{MemorySink, PayloadSink, StdoutSink};
pub use web::{router, serve, AppState};
