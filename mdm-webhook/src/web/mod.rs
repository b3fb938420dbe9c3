//! Web server module for the MicroMDM webhook.
//!
//! A single `POST /webhook` route that decodes the acknowledge payload,
//! writes it to the sink and answers with an empty 200.

pub mod handlers;
pub mod server;

pub use handlers::{webhook, AppState};
pub use server::{router, serve, serve_listener, WEBHOOK_PATH};
