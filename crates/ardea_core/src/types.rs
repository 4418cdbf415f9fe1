use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Arbitrary metadata as the server returns it: field name to JSON value.
pub type Metadata = Map<String, Value>;

/// Response of `POST /services/apilogin`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub login_success: bool,
    #[serde(default)]
    pub login_fault_message: Option<String>,
    #[serde(default)]
    pub server_version: Option<String>,
    /// Auth token for subsequent API requests (absent if login failed).
    #[serde(default)]
    pub auth_token: Option<String>,
}

/// What to do when a moved/copied folder already exists at the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolderReplacePolicy {
    #[default]
    AutoRename,
    Merge,
    ThrowException,
}

impl FolderReplacePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoRename => "AUTO_RENAME",
            Self::Merge => "MERGE",
            Self::ThrowException => "THROW_EXCEPTION",
        }
    }
}

/// What to do when a moved/copied file already exists at the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileReplacePolicy {
    #[default]
    AutoRename,
    Overwrite,
    OverwriteIfNewer,
    RemoveSource,
    ThrowException,
    DoNothing,
}

impl FileReplacePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AutoRename => "AUTO_RENAME",
            Self::Overwrite => "OVERWRITE",
            Self::OverwriteIfNewer => "OVERWRITE_IF_NEWER",
            Self::RemoveSource => "REMOVE_SOURCE",
            Self::ThrowException => "THROW_EXCEPTION",
            Self::DoNothing => "DO_NOTHING",
        }
    }
}

/// Parameters for `GET /services/search`.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Query in the server's search grammar, e.g. `gingerbread` or
    /// `assetType:image`.
    pub q: String,
    /// First hit to return (zero-based).
    pub start: u32,
    /// Number of hits to return.
    pub num: u32,
    /// Sort order, e.g. `assetCreated-desc`.
    pub sort: String,
    /// Comma-separated metadata fields to return, or `all`.
    pub metadata_to_return: String,
    /// Comma-separated facet fields.
    pub facets: Option<String>,
    pub append_request_secret: bool,
    pub return_highlighted_text: bool,
}

impl SearchRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            start: 0,
            num: 50,
            sort: "assetCreated-desc".to_string(),
            metadata_to_return: "all".to_string(),
            facets: None,
            append_request_secret: false,
            return_highlighted_text: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetEntry {
    pub value: String,
    pub hit_count: u64,
    #[serde(default)]
    pub selected: bool,
}

/// A single search hit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hit {
    pub id: String,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub relation: Option<Value>,
    #[serde(default)]
    pub highlighted_text: Option<String>,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub permissions: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

/// Response of `GET /services/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    #[serde(default)]
    pub facets: Map<String, Value>,
    pub first_result: u64,
    #[serde(default)]
    pub hits: Vec<Hit>,
    pub max_result_hits: u64,
    pub total_hits: u64,
}

/// Parameters for `GET /services/browse`.
#[derive(Debug, Clone)]
pub struct BrowseRequest {
    /// Folder path to browse, e.g. `/Demo Zone`.
    pub path: String,
    pub from_root: Option<String>,
    pub include_folders: bool,
    pub include_assets: bool,
    /// Comma-separated extensions filter, e.g. `.jpg,.png`.
    pub include_extensions: Option<String>,
}

impl BrowseRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            from_root: None,
            include_folders: true,
            include_assets: true,
            include_extensions: None,
        }
    }
}

/// One entry of a browse listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseEntry {
    pub asset_path: String,
    pub name: String,
    #[serde(default)]
    pub browsable: bool,
    #[serde(default)]
    pub collection: bool,
    #[serde(default)]
    pub container_id: Option<String>,
    #[serde(default)]
    pub directory: bool,
    #[serde(default)]
    pub permission_mask: Option<String>,
    #[serde(default)]
    pub removing: bool,
}

/// Parameters for `POST /services/move`.
#[derive(Debug, Clone)]
pub struct MoveRequest {
    pub source: String,
    pub target: String,
    pub folder_replace_policy: FolderReplacePolicy,
    pub file_replace_policy: FileReplacePolicy,
    pub filter_query: String,
    pub flatten_folders: bool,
    /// Run the operation asynchronously on the server.
    pub run_async: bool,
}

impl MoveRequest {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            folder_replace_policy: FolderReplacePolicy::default(),
            file_replace_policy: FileReplacePolicy::default(),
            filter_query: String::new(),
            flatten_folders: false,
            run_async: false,
        }
    }
}

/// Parameters for `POST /services/copy`. Same shape as a move.
pub type CopyRequest = MoveRequest;

/// Parameters for `POST /services/update`.
///
/// At least one of `file` / `metadata` should be set; the server rejects an
/// update that changes nothing.
#[derive(Debug, Clone)]
pub struct UpdateRequest {
    pub id: String,
    /// Path of a local file to upload as the new original.
    pub file: Option<std::path::PathBuf>,
    /// Metadata changes to apply.
    pub metadata: Option<Value>,
    pub metadata_to_return: String,
    pub clear_checkout_state: bool,
    pub parse_metadata_modifications: bool,
}

impl UpdateRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            file: None,
            metadata: None,
            metadata_to_return: "all".to_string(),
            clear_checkout_state: true,
            parse_metadata_modifications: true,
        }
    }
}

/// Parameters for `POST /services/create`.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    /// Path of a local file to upload.
    pub file: Option<std::path::PathBuf>,
    /// Initial metadata; `assetPath` determines where the asset lands.
    pub metadata: Option<Value>,
    pub metadata_to_return: Option<String>,
}

/// Response of `POST /services/create`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssetResponse {
    pub id: String,
    #[serde(default)]
    pub highlighted_text: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
    #[serde(default)]
    pub original_url: Option<String>,
    #[serde(default)]
    pub permissions: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub upload_url: Option<String>,
}

/// Parameters for `POST /services/remove`.
///
/// Exactly one of `q` / `ids` / `folder_path` selects what gets removed.
#[derive(Debug, Clone, Default)]
pub struct RemoveRequest {
    pub q: Option<String>,
    pub ids: Vec<String>,
    pub folder_path: Option<String>,
    pub run_async: bool,
}

impl RemoveRequest {
    pub fn by_query(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }

    pub fn by_ids(ids: Vec<String>) -> Self {
        Self {
            ids,
            ..Default::default()
        }
    }

    pub fn by_folder(path: impl Into<String>) -> Self {
        Self {
            folder_path: Some(path.into()),
            ..Default::default()
        }
    }
}

/// Parameters for `POST /services/asset/history`.
#[derive(Debug, Clone)]
pub struct HistoryRequest {
    pub id: String,
    pub start: Option<u32>,
    pub num: Option<u32>,
    /// 0..=5, higher levels include more per-action detail.
    pub detail_level: Option<u8>,
    /// Action name filters, e.g. `metadata_update`.
    pub actions: Vec<String>,
}

impl HistoryRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            start: None,
            num: None,
            detail_level: None,
            actions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageStatsRecord {
    #[serde(default)]
    pub id: Option<String>,
    pub log_date: i64,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub user_groups: Vec<String>,
    #[serde(default)]
    pub client_type: String,
    #[serde(default)]
    pub remote_addr: String,
    #[serde(default)]
    pub remote_host: String,
    pub action: String,
    #[serde(default)]
    pub asset_id: String,
    #[serde(default)]
    pub asset_path: String,
    #[serde(default)]
    pub asset_type: String,
    #[serde(default)]
    pub asset_domain: String,
    #[serde(default)]
    pub source_asset_path: Option<String>,
    #[serde(default)]
    pub source_asset_id: Option<String>,
    #[serde(default)]
    pub changed_metadata: Map<String, Value>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageHit {
    pub usage_stats_record: UsageStatsRecord,
    #[serde(default)]
    pub hit: Option<Value>,
    #[serde(default)]
    pub version_creating_action: bool,
}

/// Response of `POST /services/asset/history`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub total_hits: u64,
    #[serde(default)]
    pub hits: Vec<UsageHit>,
}

/// Response of `GET /services/profile`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub username: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub authorities: Vec<String>,
    #[serde(default)]
    pub user_zone: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
}

/// Parameters for `POST /services/createAuthKey`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAuthKeyRequest {
    pub subject: String,
    /// Expiry date, `yyyy-MM-dd`.
    pub valid_until: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_original: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_approval: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_upload: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub import_folder_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_preset_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watermarked: Option<bool>,
}

impl CreateAuthKeyRequest {
    pub fn new(subject: impl Into<String>, valid_until: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            valid_until: valid_until.into(),
            asset_ids: None,
            description: None,
            download_original: None,
            download_preview: None,
            request_approval: None,
            request_upload: None,
            container_id: None,
            container_ids: None,
            import_folder_path: None,
            notify_email: None,
            sort: None,
            download_preset_ids: None,
            watermarked: None,
        }
    }
}

/// Parameters for `POST /services/updateAuthKey`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAuthKeyRequest {
    /// The auth key being updated.
    pub key: String,
    #[serde(flatten)]
    pub fields: CreateAuthKeyRequest,
}

/// Parameters for `POST /api/folder`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderRequest {
    /// Full path of the folder to create, e.g. `/Demo Zone/Imports`.
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// Selector for `folders().get`: a folder id or a full path.
#[derive(Debug, Clone)]
pub enum GetFolderRequest {
    Id(String),
    Path(String),
}

/// Parameters for `GET /api/folder/list`.
#[derive(Debug, Clone, Default)]
pub struct ListFoldersRequest {
    /// Parent path to list from; server root when unset.
    pub path: Option<String>,
}

/// Parameters for `GET /api/folder/search`.
#[derive(Debug, Clone)]
pub struct SearchFolderRequest {
    pub q: String,
    pub start: Option<u32>,
    pub num: Option<u32>,
}

impl SearchFolderRequest {
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            start: None,
            num: None,
        }
    }
}

/// Parameters for `PUT /api/folder/{id}`.
#[derive(Debug, Clone)]
pub struct UpdateFolderRequest {
    pub id: String,
    pub metadata: Metadata,
}

/// A folder as returned by the `/api/folder` endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderResponse {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub permissions: Option<String>,
    #[serde(default)]
    pub metadata: Metadata,
}

/// Response of the folder list/search endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFolderResponse {
    #[serde(default)]
    pub total_hits: u64,
    #[serde(default)]
    pub hits: Vec<FolderResponse>,
}

/// Output format of a metadata report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn search_response_tolerates_missing_optionals() {
        let body = json!({
            "firstResult": 0,
            "maxResultHits": 50,
            "totalHits": 1,
            "hits": [{ "id": "abc-123" }]
        });
        let parsed: SearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.total_hits, 1);
        assert_eq!(parsed.hits[0].id, "abc-123");
        assert!(parsed.hits[0].metadata.is_empty());
    }

    #[test]
    fn auth_key_request_skips_unset_fields() {
        let req = CreateAuthKeyRequest::new("review", "2026-12-31");
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["subject"], "review");
        assert_eq!(value["validUntil"], "2026-12-31");
        assert!(value.get("assetIds").is_none());
        assert!(value.get("notifyEmail").is_none());
    }

    #[test]
    fn replace_policies_use_wire_names() {
        assert_eq!(FolderReplacePolicy::AutoRename.as_str(), "AUTO_RENAME");
        assert_eq!(FileReplacePolicy::OverwriteIfNewer.as_str(), "OVERWRITE_IF_NEWER");
        let value = serde_json::to_value(FileReplacePolicy::DoNothing).unwrap();
        assert_eq!(value, "DO_NOTHING");
    }
}
