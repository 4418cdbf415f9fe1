use serde::{Deserialize, Serialize};

use crate::types::Metadata;

/// Event types the server can push to a webhook.
pub mod event_types {
    pub const ASSET_CHECKIN: &str = "asset_checkin";
    pub const ASSET_CHECKOUT: &str = "asset_checkout";
    pub const ASSET_CREATE: &str = "asset_create";
    pub const ASSET_CREATE_BY_COPY: &str = "asset_create_by_copy";
    pub const ASSET_CREATE_FROM_FILESTORE_RESCUE: &str = "asset_create_from_filestore_rescue";
    pub const ASSET_MOVE: &str = "asset_move";
    pub const ASSET_PROMOTE: &str = "asset_promote";
    pub const ASSET_REMOVE: &str = "asset_remove";
    pub const ASSET_RENAME: &str = "asset_rename";
    pub const ASSET_UNDO_CHECKOUT: &str = "asset_undo_checkout";
    pub const ASSET_UPDATE_METADATA: &str = "asset_update_metadata";
    pub const AUTHKEY_CREATE: &str = "authkey_create";
    pub const AUTHKEY_REMOVE: &str = "authkey_remove";
    pub const FOLDER_CREATE: &str = "folder_create";
    pub const FOLDER_REMOVE: &str = "folder_remove";
}

/// A signed event pushed by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookPayload {
    /// Event time, epoch milliseconds.
    pub timestamp: i64,
    /// One of [`event_types`].
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub asset_id: String,
    /// Metadata fields the webhook was configured to include.
    #[serde(default)]
    pub metadata: Metadata,
    /// Old/new values for fields changed by the triggering action.
    #[serde(default)]
    pub changed_metadata: Metadata,
}

/// Folder/query scope of a webhook registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoldersAndQuery {
    pub folders: Vec<String>,
    #[serde(default)]
    pub query: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_wildcard_selection: Option<bool>,
}

/// Parameters for registering a webhook on the server.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreateRequest {
    pub enabled: bool,
    pub name: String,
    /// Public URL the server will POST events to.
    pub url: String,
    pub event_types: Vec<String>,
    pub metadata_to_return: Vec<String>,
    pub changed_metadata_to_return: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_metadata_fields: Option<Vec<String>>,
    pub folders_and_query: FoldersAndQuery,
}

/// A webhook registration as the server reports it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookCreateResponse {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub event_types: Vec<String>,
    #[serde(default)]
    pub metadata_to_return: Vec<String>,
    #[serde(default)]
    pub changed_metadata_to_return: Vec<String>,
    #[serde(default)]
    pub trigger_metadata_fields: Vec<String>,
    pub folders_and_query: FoldersAndQuery,
    pub enabled: bool,
    /// Shared secret for validating payload signatures; only returned on
    /// creation, the server will not hand it out again.
    pub secret_token: String,
}
