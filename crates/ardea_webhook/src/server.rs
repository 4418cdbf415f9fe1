use ardea_core::config::WebhookConfig;
use ardea_core::webhook::WebhookPayload;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use bytes::Bytes;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::error::WebhookError;
use crate::signature;
use crate::WebhookHandler;

/// Header carrying the HMAC-SHA256 hex digest of the raw body.
pub const SIGNATURE_HEADER: &str = "x-hook-signature";

struct WebhookState<H> {
    handler: H,
    secret: String,
}

/// The builder for the webhook listener.
#[derive(Clone, Debug)]
pub struct WebhookServer {
    config: WebhookConfig,
}

impl WebhookServer {
    pub fn new(config: WebhookConfig) -> Self {
        Self { config }
    }

    /// Build the router without binding, for embedding or tests.
    pub fn build<H: WebhookHandler>(&self, handler: H) -> Router {
        if self.config.secret_token.is_empty() {
            warn!("Empty webhook secret token. Every signature will be rejected!")
        }
        let state = Arc::new(WebhookState {
            handler,
            secret: self.config.secret_token.clone(),
        });

        Router::new()
            .route("/", post(ingest::<H>))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    /// Bind `bind_to:port` and serve until [`WebhookListener::stop`].
    pub async fn serve<H: WebhookHandler>(self, handler: H) -> Result<WebhookListener, WebhookError> {
        let addr = format!("{}:{}", self.config.bind_to, self.config.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let local_addr = listener.local_addr()?;
        let app = self.build(handler);

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
        });

        info!("Webhook listener started on {local_addr}");
        Ok(WebhookListener {
            local_addr,
            shutdown: Some(shutdown_tx),
            task,
        })
    }
}

/// Handle to a running listener.
pub struct WebhookListener {
    local_addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
    task: JoinHandle<std::io::Result<()>>,
}

impl WebhookListener {
    /// The address actually bound (useful with port 0).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests to finish.
    pub async fn stop(mut self) -> Result<(), WebhookError> {
        if let Some(shutdown) = self.shutdown.take() {
            shutdown.send(()).ok();
        }
        self.task
            .await
            .map_err(|e| WebhookError::Shutdown(e.to_string()))??;
        info!("Webhook listener stopped.");
        Ok(())
    }
}

/// POST `/`
///
/// Replies 200 immediately and validates/dispatches in a spawned task, so the
/// sender's delivery timeout is decoupled from local processing time.
async fn ingest<H: WebhookHandler>(
    State(state): State<Arc<WebhookState<H>>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    tokio::spawn(async move {
        process(&state, &signature, &body);
    });

    StatusCode::OK
}

fn process<H: WebhookHandler>(state: &WebhookState<H>, signature: &str, body: &[u8]) {
    if !signature::validate(signature, body, &state.secret) {
        warn!("Discarding webhook payload with invalid signature");
        state
            .handler
            .on_error("Invalid webhook signature. Webhook discarded.".to_string());
        return;
    }

    match serde_json::from_slice::<WebhookPayload>(body) {
        Ok(payload) => state.handler.on_event(payload),
        Err(e) => state
            .handler
            .on_error(format!("Webhook processing error: {e}")),
    }
}
