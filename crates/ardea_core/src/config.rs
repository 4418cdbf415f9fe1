use std::time::Duration;

/// Token validity the server applies when nothing is configured.
pub const DEFAULT_TOKEN_VALIDITY_MINUTES: u64 = 30;

/// Connection settings for an Assets server.
#[derive(Clone, Debug)]
pub struct AssetsConfig {
    /// Full base URL of the Assets server, e.g. `https://assets.example.com`.
    pub server_url: String,
    /// API username.
    pub username: String,
    /// API password.
    pub password: String,
    /// Whether to reject self-signed TLS certificates.
    ///
    /// Defaults to `true`. Only disable this against test servers.
    pub reject_unauthorized: bool,
    /// How long an auth token stays usable, in minutes.
    ///
    /// Defaults to [`DEFAULT_TOKEN_VALIDITY_MINUTES`]. Must match (or stay
    /// below) the validity configured on the server side.
    pub token_validity_minutes: Option<u64>,
}

impl AssetsConfig {
    pub fn new(
        server_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            username: username.into(),
            password: password.into(),
            reject_unauthorized: true,
            token_validity_minutes: None,
        }
    }

    /// The configured validity window as a [`Duration`].
    pub fn token_validity(&self) -> Duration {
        Duration::from_secs(
            self.token_validity_minutes
                .unwrap_or(DEFAULT_TOKEN_VALIDITY_MINUTES)
                * 60,
        )
    }
}

/// Settings for the inbound webhook listener.
#[derive(Clone, Debug)]
pub struct WebhookConfig {
    /// Host/IP to bind to, e.g. `0.0.0.0` or `localhost`.
    pub bind_to: String,
    /// Port to listen on.
    pub port: u16,
    /// Shared secret used to validate webhook signatures.
    ///
    /// This is the `secretToken` returned when the webhook was registered on
    /// the server.
    pub secret_token: String,
}

impl WebhookConfig {
    pub fn new(bind_to: impl Into<String>, port: u16, secret_token: impl Into<String>) -> Self {
        Self {
            bind_to: bind_to.into(),
            port,
            secret_token: secret_token.into(),
        }
    }
}
