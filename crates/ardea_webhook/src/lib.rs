//! Inbound webhook listener for the Assets server.
//!
//! The server signs every payload with `HMAC-SHA256(secret, raw_body)` and
//! sends the hex digest in the `x-hook-signature` header. The listener
//! replies 200 immediately, then validates the signature in constant time and
//! hands the parsed payload to a [`WebhookHandler`]; anything that fails
//! validation or parsing goes to the handler's error path instead.
//!
//! ```no_run
//! use ardea_core::prelude::*;
//! use ardea_webhook::{WebhookHandler, WebhookServer};
//!
//! struct Printer;
//!
//! impl WebhookHandler for Printer {
//!     fn on_event(&self, payload: WebhookPayload) {
//!         println!("{} on {}", payload.event_type, payload.asset_id);
//!     }
//!     fn on_error(&self, message: String) {
//!         eprintln!("{message}");
//!     }
//! }
//!
//! # async fn example() -> Result<(), ardea_webhook::WebhookError> {
//! let server = WebhookServer::new(WebhookConfig::new("0.0.0.0", 3000, "secret"));
//! let listener = server.serve(Printer).await?;
//! // ... later
//! listener.stop().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod server;
pub mod signature;

pub use error::WebhookError;
pub use server::{WebhookListener, WebhookServer, SIGNATURE_HEADER};

use ardea_core::webhook::WebhookPayload;

/// Receives validated webhook events and validation/processing failures.
///
/// Callbacks run on a spawned task after the HTTP response has already been
/// sent; keep them quick or hand off to a channel.
pub trait WebhookHandler: Send + Sync + 'static {
    fn on_event(&self, payload: WebhookPayload);

    fn on_error(&self, message: String);
}
