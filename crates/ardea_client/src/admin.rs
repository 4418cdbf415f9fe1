//! Admin-only endpoints: server state, active users, webhook registration.

use ardea_core::webhook::{WebhookCreateRequest, WebhookCreateResponse};
use serde_json::Value;

use crate::client::AssetsClient;
use crate::error::Result;

/// Accessor for endpoints that require an admin account.
pub struct AdminApi<'a> {
    client: &'a AssetsClient,
}

impl AssetsClient {
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi { client: self }
    }
}

impl AdminApi<'_> {
    /// POST `/controller/admin/activation/currentState`
    pub async fn current_state(&self) -> Result<Value> {
        self.client
            .post_form("/controller/admin/activation/currentState", Vec::new())
            .await
    }

    /// GET `/private-api/system/active-users`
    pub async fn active_users(&self) -> Result<Value> {
        self.client
            .get("/private-api/system/active-users", Vec::new())
            .await
    }

    /// POST `/services/admin/webhook`
    ///
    /// The response carries the `secret_token` needed to validate inbound
    /// payloads; the server never returns it again.
    pub async fn create_webhook(&self, req: &WebhookCreateRequest) -> Result<WebhookCreateResponse> {
        self.client
            .post_json("/services/admin/webhook", serde_json::to_value(req)?)
            .await
    }
}
