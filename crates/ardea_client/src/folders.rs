//! The folder REST API (`/api/folder`), which speaks JSON rather than the
//! form encoding of the `/services` endpoints.

use ardea_core::types::{
    CreateFolderRequest, FolderResponse, GetFolderRequest, ListFoldersRequest,
    SearchFolderRequest, SearchFolderResponse, UpdateFolderRequest,
};
use serde_json::json;

use crate::client::AssetsClient;
use crate::error::Result;

/// Accessor for the folder endpoints, borrowed from an [`AssetsClient`].
pub struct FoldersApi<'a> {
    client: &'a AssetsClient,
}

impl AssetsClient {
    pub fn folders(&self) -> FoldersApi<'_> {
        FoldersApi { client: self }
    }
}

impl FoldersApi<'_> {
    /// POST `/api/folder`
    pub async fn create(&self, req: &CreateFolderRequest) -> Result<FolderResponse> {
        self.client
            .post_json("/api/folder", serde_json::to_value(req)?)
            .await
    }

    /// GET `/api/folder/{id}` or `/api/folder/get?path=...`
    pub async fn get(&self, req: &GetFolderRequest) -> Result<FolderResponse> {
        match req {
            GetFolderRequest::Id(id) => {
                self.client
                    .get(&format!("/api/folder/{id}"), Vec::new())
                    .await
            }
            GetFolderRequest::Path(path) => {
                self.client
                    .get("/api/folder/get", vec![("path".to_string(), path.clone())])
                    .await
            }
        }
    }

    /// GET `/api/folder/list`
    pub async fn list(&self, req: &ListFoldersRequest) -> Result<SearchFolderResponse> {
        let mut params = Vec::new();
        if let Some(path) = &req.path {
            params.push(("path".to_string(), path.clone()));
        }
        self.client.get("/api/folder/list", params).await
    }

    /// GET `/api/folder/search`
    pub async fn search(&self, req: &SearchFolderRequest) -> Result<SearchFolderResponse> {
        let mut params = vec![("q".to_string(), req.q.clone())];
        if let Some(start) = req.start {
            params.push(("start".to_string(), start.to_string()));
        }
        if let Some(num) = req.num {
            params.push(("num".to_string(), num.to_string()));
        }
        self.client.get("/api/folder/search", params).await
    }

    /// PUT `/api/folder/{id}`
    pub async fn update(&self, req: &UpdateFolderRequest) -> Result<FolderResponse> {
        self.client
            .put_json(
                &format!("/api/folder/{}", req.id),
                json!({ "metadata": req.metadata }),
            )
            .await
    }

    /// DELETE `/api/folder/{id}`
    pub async fn delete(&self, id: &str) -> Result<FolderResponse> {
        self.client
            .delete(&format!("/api/folder/{id}"), Vec::new())
            .await
    }
}
