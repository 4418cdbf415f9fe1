//! Wrappers for the `/services` endpoints: search, browse, asset CRUD,
//! relations, auth keys, reports and downloads.
//!
//! These are one-to-one parameter marshalling into HTTP calls; anything the
//! server leaves loosely typed comes back as [`serde_json::Value`].

use ardea_core::types::*;
use bytes::Bytes;
use reqwest::Method;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::client::{AssetsClient, FilePart, Payload};
use crate::error::Result;

fn param(key: &str, value: impl ToString) -> (String, String) {
    (key.to_string(), value.to_string())
}

async fn file_part(path: &Path) -> Result<FilePart> {
    let data = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(FilePart {
        field: "Filedata".to_string(),
        file_name,
        data: Bytes::from(data),
    })
}

fn metadata_field(metadata: &Value) -> Result<(String, String)> {
    Ok(("metadata".to_string(), serde_json::to_string(metadata)?))
}

impl AssetsClient {
    /// GET `/services/search`
    pub async fn search(&self, req: &SearchRequest) -> Result<SearchResponse> {
        let mut params = vec![
            param("q", &req.q),
            param("start", req.start),
            param("num", req.num),
            param("sort", &req.sort),
            param("metadataToReturn", &req.metadata_to_return),
        ];
        if let Some(facets) = &req.facets {
            params.push(param("facets", facets));
        }
        params.push(param("appendRequestSecret", req.append_request_secret));
        params.push(param("returnHighlightedText", req.return_highlighted_text));

        self.get("/services/search", params).await
    }

    /// GET `/services/browse`
    pub async fn browse(&self, req: &BrowseRequest) -> Result<Vec<BrowseEntry>> {
        let mut params = vec![
            param("path", &req.path),
            param("includeFolders", req.include_folders),
            param("includeAssets", req.include_assets),
        ];
        if let Some(from_root) = &req.from_root {
            params.push(param("fromRoot", from_root));
        }
        if let Some(extensions) = &req.include_extensions {
            params.push(param("includeExtensions", extensions));
        }

        self.get("/services/browse", params).await
    }

    /// POST `/services/move`
    pub async fn move_assets(&self, req: &MoveRequest) -> Result<Value> {
        self.post_form("/services/move", move_fields(req)).await
    }

    /// POST `/services/copy`
    pub async fn copy_assets(&self, req: &CopyRequest) -> Result<Value> {
        self.post_form("/services/copy", move_fields(req)).await
    }

    /// POST `/services/update`
    pub async fn update(&self, req: &UpdateRequest) -> Result<Value> {
        let mut fields = vec![
            param("id", &req.id),
            param("metadataToReturn", &req.metadata_to_return),
            param("clearCheckoutState", req.clear_checkout_state),
            param("parseMetadataModifications", req.parse_metadata_modifications),
        ];
        if let Some(metadata) = &req.metadata {
            fields.push(metadata_field(metadata)?);
        }
        let file = match &req.file {
            Some(path) => Some(file_part(path).await?),
            None => None,
        };

        self.call(Method::POST, "/services/update", Payload::Multipart { fields, file })
            .await
    }

    /// POST `/services/updatebulk`
    pub async fn update_bulk(&self, q: &str, metadata: &Value) -> Result<Value> {
        let fields = vec![param("q", q), metadata_field(metadata)?];
        self.post_form("/services/updatebulk", fields).await
    }

    /// POST `/services/remove`
    pub async fn remove(&self, req: &RemoveRequest) -> Result<Value> {
        let mut fields = Vec::new();
        if let Some(q) = &req.q {
            fields.push(param("q", q));
        }
        if !req.ids.is_empty() {
            fields.push(param("ids", req.ids.join(",")));
        }
        if let Some(folder_path) = &req.folder_path {
            fields.push(param("folderPath", folder_path));
        }
        fields.push(param("async", req.run_async));

        self.post_form("/services/remove", fields).await
    }

    /// POST `/services/create`
    pub async fn create(&self, req: &CreateRequest) -> Result<CreateAssetResponse> {
        let mut fields = Vec::new();
        if let Some(metadata_to_return) = &req.metadata_to_return {
            fields.push(param("metadataToReturn", metadata_to_return));
        }
        if let Some(metadata) = &req.metadata {
            fields.push(metadata_field(metadata)?);
        }
        let file = match &req.file {
            Some(path) => Some(file_part(path).await?),
            None => None,
        };

        self.call(Method::POST, "/services/create", Payload::Multipart { fields, file })
            .await
    }

    /// POST `/services/createFolder`
    pub async fn create_folder(&self, path: &str) -> Result<Value> {
        self.post_form("/services/createFolder", vec![param("path", path)])
            .await
    }

    /// POST `/services/createRelation`
    pub async fn create_relation(
        &self,
        relation_type: &str,
        target1_id: &str,
        target2_id: &str,
    ) -> Result<Value> {
        let fields = vec![
            param("relationType", relation_type),
            param("target1Id", target1_id),
            param("target2Id", target2_id),
        ];
        self.post_form("/services/createRelation", fields).await
    }

    /// POST `/services/removeRelation`
    pub async fn remove_relation(&self, relation_ids: &[String]) -> Result<Value> {
        let fields = vec![param("relationIds", relation_ids.join(","))];
        self.post_form("/services/removeRelation", fields).await
    }

    /// POST `/services/collection/remove`
    pub async fn remove_from_collection(
        &self,
        child_ids: &[String],
        collection_id: &str,
    ) -> Result<Value> {
        let fields = vec![
            param("childIds", child_ids.join(",")),
            param("collectionId", collection_id),
        ];
        self.post_form("/services/collection/remove", fields).await
    }

    /// POST `/services/asset/history`
    pub async fn history(&self, req: &HistoryRequest) -> Result<HistoryResponse> {
        let mut fields = vec![param("id", &req.id)];
        if let Some(start) = req.start {
            fields.push(param("start", start));
        }
        if let Some(num) = req.num {
            fields.push(param("num", num));
        }
        if let Some(detail_level) = req.detail_level {
            fields.push(param("detailLevel", detail_level));
        }
        if !req.actions.is_empty() {
            fields.push(param("actions", req.actions.join(",")));
        }

        self.post_form("/services/asset/history", fields).await
    }

    /// GET `/services/profile`
    pub async fn profile(&self) -> Result<ProfileResponse> {
        self.get("/services/profile", Vec::new()).await
    }

    /// POST `/services/createAuthKey`
    pub async fn create_auth_key(&self, req: &CreateAuthKeyRequest) -> Result<Value> {
        self.post_json("/services/createAuthKey", serde_json::to_value(req)?)
            .await
    }

    /// POST `/services/updateAuthKey`
    pub async fn update_auth_key(&self, req: &UpdateAuthKeyRequest) -> Result<Value> {
        self.post_json("/services/updateAuthKey", serde_json::to_value(req)?)
            .await
    }

    /// POST `/services/revokeAuthKeys`
    pub async fn revoke_auth_keys(&self, keys: &[String]) -> Result<Value> {
        self.post_form("/services/revokeAuthKeys", vec![param("keys", keys.join(","))])
            .await
    }

    /// GET `/metadata/{report}.{format}` into the client's scratch directory.
    /// Returns the downloaded file's path.
    pub async fn metadata_report(
        &self,
        report_name: &str,
        q: &str,
        format: ReportFormat,
    ) -> Result<PathBuf> {
        let service = format!("/metadata/{report_name}.{}", format.extension());
        let target = self.scratch_path(&format!("{report_name}.{}", format.extension()))?;
        self.download(&service, &[param("q", q)], &target).await
    }

    /// GET `/file/{id}/*/{name}` into the client's scratch directory.
    pub async fn download_from_id(
        &self,
        asset_id: &str,
        asset_name: Option<&str>,
    ) -> Result<PathBuf> {
        let name = asset_name.unwrap_or(asset_id);
        let service = format!("/file/{asset_id}/*/{name}");
        let target = self.scratch_path(&sanitize(name))?;
        self.download(&service, &[param("forceDownload", true)], &target)
            .await
    }

    /// GET `/preview/{id}/*/{name}.jpg` into the client's scratch directory.
    pub async fn download_preview_from_id(
        &self,
        asset_id: &str,
        asset_name: Option<&str>,
    ) -> Result<PathBuf> {
        let name = asset_name.unwrap_or(asset_id);
        let service = format!("/preview/{asset_id}/*/{name}.jpg");
        let target = self.scratch_path(&format!("{}.jpg", sanitize(name)))?;
        self.download(&service, &[param("forceDownload", true)], &target)
            .await
    }
}

fn move_fields(req: &MoveRequest) -> Vec<(String, String)> {
    vec![
        param("source", &req.source),
        param("target", &req.target),
        param("folderReplacePolicy", req.folder_replace_policy.as_str()),
        param("fileReplacePolicy", req.file_replace_policy.as_str()),
        param("filterQuery", &req.filter_query),
        param("flattenFolders", req.flatten_folders),
        param("async", req.run_async),
    ]
}

/// Asset names may contain path separators; keep scratch files flat.
fn sanitize(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_fields_marshal_policies_and_flags() {
        let mut req = MoveRequest::new("/a", "/b");
        req.file_replace_policy = FileReplacePolicy::Overwrite;
        req.run_async = true;

        let fields = move_fields(&req);
        let get = |key: &str| {
            fields
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("folderReplacePolicy"), Some("AUTO_RENAME"));
        assert_eq!(get("fileReplacePolicy"), Some("OVERWRITE"));
        assert_eq!(get("async"), Some("true"));
    }

    #[test]
    fn sanitize_flattens_separators() {
        assert_eq!(sanitize("a/b\\c.png"), "a_b_c.png");
    }
}
