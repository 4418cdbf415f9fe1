use ardea_core::config::AssetsConfig;
use ardea_core::types::LoginResponse;
use bytes::Bytes;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex as SyncMutex};
use std::time::Instant;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{AssetsClientError, Result};

#[derive(Default)]
struct TokenState {
    auth_token: Option<String>,
    acquired_at: Option<Instant>,
}

impl TokenState {
    fn is_valid(&self, validity: std::time::Duration) -> bool {
        match (&self.auth_token, self.acquired_at) {
            (Some(_), Some(acquired_at)) => acquired_at.elapsed() < validity,
            _ => false,
        }
    }

    fn clear(&mut self) {
        self.auth_token = None;
        self.acquired_at = None;
    }
}

/// A local file to send as a multipart part.
pub(crate) struct FilePart {
    pub field: String,
    pub file_name: String,
    pub data: Bytes,
}

/// How a request body/parameters get encoded on the wire.
pub(crate) enum Payload {
    /// Query-string parameters (GET/DELETE).
    Query(Vec<(String, String)>),
    /// Multipart form fields, optionally with an attached file (POST/PUT).
    Multipart {
        fields: Vec<(String, String)>,
        file: Option<FilePart>,
    },
    /// JSON body (folder API, auth keys, webhook admin).
    Json(Value),
}

/// Client for the Assets server REST API.
///
/// Owns a cached bearer token: each call checks freshness, authenticates when
/// the token is absent or expired, and on a 401 re-authenticates exactly once
/// and retries the call exactly once. Cloning is cheap and clones share the
/// token cache.
#[derive(Clone)]
pub struct AssetsClient {
    config: Arc<AssetsConfig>,
    http: Client,
    token: Arc<Mutex<TokenState>>,
    scratch_dir: Arc<SyncMutex<Option<tempfile::TempDir>>>,
    scratch_seq: Arc<AtomicU64>,
}

impl AssetsClient {
    pub fn new(config: AssetsConfig) -> Result<Self> {
        let http = Client::builder()
            .danger_accept_invalid_certs(!config.reject_unauthorized)
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            http,
            token: Arc::new(Mutex::new(TokenState::default())),
            scratch_dir: Arc::new(SyncMutex::new(None)),
            scratch_seq: Arc::new(AtomicU64::new(0)),
        })
    }

    pub fn config(&self) -> &AssetsConfig {
        &self.config
    }

    fn url(&self, service: &str) -> String {
        format!(
            "{}/{}",
            self.config.server_url.trim_end_matches('/'),
            service.trim_start_matches('/')
        )
    }

    /// The cached auth token, if any. Does not check freshness.
    pub async fn token(&self) -> Option<String> {
        self.token.lock().await.auth_token.clone()
    }

    /// Inject a token obtained elsewhere; it counts as freshly acquired.
    pub async fn set_token(&self, token: impl Into<String>) {
        let mut state = self.token.lock().await;
        state.auth_token = Some(token.into());
        state.acquired_at = Some(Instant::now());
    }

    /// Whether a token is present and inside the configured validity window.
    pub async fn is_token_valid(&self) -> bool {
        self.token
            .lock()
            .await
            .is_valid(self.config.token_validity())
    }

    /// POST `/services/apilogin` and cache the returned token.
    ///
    /// Normally called implicitly by the request wrapper; public so callers
    /// can fail fast on bad credentials.
    pub async fn authenticate(&self) -> Result<()> {
        let form = Form::new()
            .text("username", self.config.username.clone())
            .text("password", self.config.password.clone());

        let response = self
            .http
            .post(self.url("/services/apilogin"))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(http_error(status, message));
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AssetsClientError::Decode(format!("Failed to parse login response: {e}")))?;

        if !login.login_success {
            return Err(AssetsClientError::Login(
                login
                    .login_fault_message
                    .unwrap_or_else(|| "Login failed".to_string()),
            ));
        }

        let token = login.auth_token.ok_or_else(|| {
            AssetsClientError::Decode("Login succeeded but no auth token returned".to_string())
        })?;

        debug!(
            server_version = login.server_version.as_deref().unwrap_or("unknown"),
            "authenticated against assets server"
        );

        let mut state = self.token.lock().await;
        state.auth_token = Some(token);
        state.acquired_at = Some(Instant::now());
        Ok(())
    }

    /// Drop an expired token, then authenticate if none is cached.
    async fn ensure_token(&self) -> Result<()> {
        let missing = {
            let mut state = self.token.lock().await;
            if !state.is_valid(self.config.token_validity()) {
                state.clear();
            }
            state.auth_token.is_none()
        };

        if missing {
            self.authenticate().await?;
        }
        Ok(())
    }

    /// The authenticate-then-retry cycle every endpoint wrapper goes through.
    pub(crate) async fn call<T: DeserializeOwned>(
        &self,
        method: Method,
        service: &str,
        payload: Payload,
    ) -> Result<T> {
        self.ensure_token().await?;

        match self.call_with_auth(method.clone(), service, &payload).await {
            Err(err) if err.is_unauthorized() => {
                debug!(service, "request returned 401, re-authenticating once");
                self.authenticate().await?;
                self.call_with_auth(method, service, &payload).await
            }
            result => result,
        }
    }

    async fn call_with_auth<T: DeserializeOwned>(
        &self,
        method: Method,
        service: &str,
        payload: &Payload,
    ) -> Result<T> {
        let token = self.token().await.unwrap_or_default();
        let mut request = self
            .http
            .request(method, self.url(service))
            .bearer_auth(token);

        request = match payload {
            Payload::Query(params) => request.query(params),
            Payload::Multipart { fields, file } => request.multipart(build_form(fields, file)),
            Payload::Json(body) => request.json(body),
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(http_error(status, message));
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| AssetsClientError::Decode(format!("Failed to parse response: {e}")))?;

        if let Some(err) = soft_error(&value) {
            return Err(err);
        }

        serde_json::from_value(value)
            .map_err(|e| AssetsClientError::Decode(format!("Unexpected response shape: {e}")))
    }

    // Generic verbs, mirroring what the raw API accepts per method.

    pub async fn get<T: DeserializeOwned>(
        &self,
        service: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        self.call(Method::GET, service, Payload::Query(params)).await
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        service: &str,
        fields: Vec<(String, String)>,
    ) -> Result<T> {
        self.call(Method::POST, service, Payload::Multipart { fields, file: None })
            .await
    }

    pub async fn post_json<T: DeserializeOwned>(&self, service: &str, body: Value) -> Result<T> {
        self.call(Method::POST, service, Payload::Json(body)).await
    }

    pub async fn put_json<T: DeserializeOwned>(&self, service: &str, body: Value) -> Result<T> {
        self.call(Method::PUT, service, Payload::Json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        service: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        self.call(Method::DELETE, service, Payload::Query(params))
            .await
    }

    /// Stream a download into `target`, with the same auth/retry cycle as
    /// regular calls. Returns the path written.
    pub async fn download_to_path(&self, service: &str, target: &Path) -> Result<PathBuf> {
        self.download(service, &[], target).await
    }

    pub(crate) async fn download(
        &self,
        service: &str,
        query: &[(String, String)],
        target: &Path,
    ) -> Result<PathBuf> {
        self.ensure_token().await?;

        match self.download_with_auth(service, query, target).await {
            Err(err) if err.is_unauthorized() => {
                debug!(service, "download returned 401, re-authenticating once");
                self.authenticate().await?;
                self.download_with_auth(service, query, target).await
            }
            result => result,
        }
    }

    async fn download_with_auth(
        &self,
        service: &str,
        query: &[(String, String)],
        target: &Path,
    ) -> Result<PathBuf> {
        let token = self.token().await.unwrap_or_default();
        let response = self
            .http
            .get(self.url(service))
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_error(status, "Download failed".to_string()));
        }

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::File::create(target).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            file.write_all(&chunk?).await?;
        }
        file.flush().await?;

        Ok(target.to_path_buf())
    }

    /// A unique path inside the client's lazily created scratch directory.
    /// The directory and its contents are removed when the last clone drops.
    pub(crate) fn scratch_path(&self, name: &str) -> Result<PathBuf> {
        let mut guard = self
            .scratch_dir
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if guard.is_none() {
            *guard = Some(tempfile::tempdir()?);
        }
        let seq = self.scratch_seq.fetch_add(1, Ordering::Relaxed);
        let dir = guard.as_ref().expect("scratch dir just created");
        Ok(dir.path().join(format!("{seq}-{name}")))
    }
}

fn build_form(fields: &[(String, String)], file: &Option<FilePart>) -> Form {
    let mut form = Form::new();
    for (key, value) in fields {
        form = form.text(key.clone(), value.clone());
    }
    if let Some(part) = file {
        form = form.part(
            part.field.clone(),
            Part::bytes(part.data.to_vec()).file_name(part.file_name.clone()),
        );
    }
    form
}

fn http_error(status: StatusCode, message: String) -> AssetsClientError {
    let message = if message.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("HTTP request failed")
            .to_string()
    } else {
        message
    };
    AssetsClientError::Server {
        code: status.as_u16(),
        message,
    }
}

/// The server reports many failures as a 200 response whose body carries
/// `errorcode`/`message`. Codes outside the HTTP range normalize to 500.
fn soft_error(value: &Value) -> Option<AssetsClientError> {
    let object = value.as_object()?;
    let raw = object.get("errorcode")?;
    let code = raw
        .as_i64()
        .or_else(|| raw.as_str().and_then(|s| s.parse().ok()))?;
    let code = if (100..=599).contains(&code) {
        code as u16
    } else {
        500
    };
    let message = object
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown error from Assets Server")
        .to_string();
    Some(AssetsClientError::Server { code, message })
}
