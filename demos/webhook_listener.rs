//! # Webhook Listener Example
//!
//! Receives signed events from the Assets server and prints them.
//!
//! ## Usage
//!
//! ```sh
//! ASSETS_WEBHOOK_SECRET=... cargo run --example webhook_listener --features "webhook"
//! ```

use ardea::prelude::*;
use ardea::webhook::WebhookServer;
use std::env;

struct Printer;

impl WebhookHandler for Printer {
    fn on_event(&self, payload: WebhookPayload) {
        println!(
            "{} on asset {} ({} changed fields)",
            payload.event_type,
            payload.asset_id,
            payload.changed_metadata.len()
        );
    }

    fn on_error(&self, message: String) {
        eprintln!("webhook error: {message}");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let secret = env::var("ASSETS_WEBHOOK_SECRET")?;
    let server = WebhookServer::new(WebhookConfig::new("0.0.0.0", 3000, secret));

    let listener = server.serve(Printer).await?;
    println!("Listening on {} (ctrl-c to stop)", listener.local_addr());

    tokio::signal::ctrl_c().await?;
    listener.stop().await?;
    Ok(())
}
