//! Request/response translation: query and multipart marshalling, soft
//! error mapping, JSON folder API, streaming downloads.

use ardea_client::{AssetsClient, AssetsClientError};
use ardea_core::config::AssetsConfig;
use ardea_core::types::*;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn authenticated_client(server: &MockServer) -> AssetsClient {
    Mock::given(method("POST"))
        .and(path("/services/apilogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "loginSuccess": true,
            "loginFaultMessage": "",
            "serverVersion": "6.98",
            "authToken": "test-token"
        })))
        .mount(server)
        .await;

    AssetsClient::new(AssetsConfig::new(server.uri(), "api", "secret")).unwrap()
}

#[tokio::test]
async fn search_marshals_query_parameters() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/services/search"))
        .and(query_param("q", "assetType:image"))
        .and(query_param("start", "10"))
        .and(query_param("num", "25"))
        .and(query_param("sort", "assetCreated-desc"))
        .and(query_param("metadataToReturn", "all"))
        .and(query_param("appendRequestSecret", "false"))
        .and(query_param("returnHighlightedText", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "firstResult": 10,
            "maxResultHits": 50,
            "totalHits": 214,
            "hits": [{
                "id": "8a7b",
                "metadata": { "assetPath": "/Demo Zone/img.jpg" },
                "thumbnailUrl": "https://assets.example.com/thumbnail/8a7b"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = SearchRequest::new("assetType:image");
    req.start = 10;
    req.num = 25;
    let results = client.search(&req).await.unwrap();

    assert_eq!(results.total_hits, 214);
    assert_eq!(results.hits[0].id, "8a7b");
    assert_eq!(
        results.hits[0].metadata.get("assetPath").and_then(|v| v.as_str()),
        Some("/Demo Zone/img.jpg")
    );
}

#[tokio::test]
async fn browse_parses_entries() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/services/browse"))
        .and(query_param("path", "/Demo Zone"))
        .and(query_param("includeFolders", "true"))
        .and(query_param("includeAssets", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "assetPath": "/Demo Zone/Images",
                "name": "Images",
                "browsable": true,
                "directory": true
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = BrowseRequest::new("/Demo Zone");
    req.include_assets = false;
    let entries = client.browse(&req).await.unwrap();

    assert_eq!(entries.len(), 1);
    assert!(entries[0].directory);
    assert_eq!(entries[0].name, "Images");
}

#[tokio::test]
async fn move_sends_policies_as_form_fields() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/move"))
        .and(body_string_contains("name=\"source\""))
        .and(body_string_contains("/Demo Zone/old"))
        .and(body_string_contains("name=\"fileReplacePolicy\""))
        .and(body_string_contains("OVERWRITE_IF_NEWER"))
        .and(body_string_contains("name=\"async\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "processedCount": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = MoveRequest::new("/Demo Zone/old", "/Demo Zone/new");
    req.file_replace_policy = FileReplacePolicy::OverwriteIfNewer;
    let result = client.move_assets(&req).await.unwrap();
    assert_eq!(result["processedCount"], 3);
}

#[tokio::test]
async fn create_uploads_file_and_metadata_as_multipart() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("gingerbread.jpg");
    tokio::fs::write(&file_path, b"jpegdata").await.unwrap();

    Mock::given(method("POST"))
        .and(path("/services/create"))
        .and(body_string_contains("name=\"Filedata\""))
        .and(body_string_contains("filename=\"gingerbread.jpg\""))
        .and(body_string_contains("jpegdata"))
        .and(body_string_contains("name=\"metadata\""))
        .and(body_string_contains("/Demo Zone/Imports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "new-1",
            "metadata": { "assetPath": "/Demo Zone/Imports/gingerbread.jpg" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let req = CreateRequest {
        file: Some(file_path),
        metadata: Some(json!({ "assetPath": "/Demo Zone/Imports/gingerbread.jpg" })),
        metadata_to_return: None,
    };
    let created = client.create(&req).await.unwrap();
    assert_eq!(created.id, "new-1");
}

#[tokio::test]
async fn remove_joins_ids_with_commas() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/remove"))
        .and(body_string_contains("name=\"ids\""))
        .and(body_string_contains("a-1,b-2,c-3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "processedCount": 3 })))
        .expect(1)
        .mount(&server)
        .await;

    let req = RemoveRequest::by_ids(vec!["a-1".into(), "b-2".into(), "c-3".into()]);
    client.remove(&req).await.unwrap();
}

#[tokio::test]
async fn soft_error_body_maps_to_server_error() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/updatebulk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "errorcode": 500,
            "message": "Query matched no assets"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client
        .update_bulk("status:missing", &json!({ "status": "Final" }))
        .await
        .unwrap_err();
    match err {
        AssetsClientError::Server { code, message } => {
            assert_eq!(code, 500);
            assert_eq!(message, "Query matched no assets");
        }
        other => panic!("expected server error, got: {other}"),
    }
}

#[tokio::test]
async fn folder_create_posts_json() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/folder"))
        .and(body_json(json!({ "path": "/Demo Zone/Reports" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "f-77",
            "name": "Reports",
            "path": "/Demo Zone/Reports",
            "metadata": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let folder = client
        .folders()
        .create(&CreateFolderRequest {
            path: "/Demo Zone/Reports".to_string(),
            metadata: None,
        })
        .await
        .unwrap();
    assert_eq!(folder.id, "f-77");
}

#[tokio::test]
async fn folder_get_by_path_uses_query_parameter() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/folder/get"))
        .and(query_param("path", "/Demo Zone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "f-1",
            "name": "Demo Zone",
            "path": "/Demo Zone"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let folder = client
        .folders()
        .get(&GetFolderRequest::Path("/Demo Zone".to_string()))
        .await
        .unwrap();
    assert_eq!(folder.name, "Demo Zone");
}

#[tokio::test]
async fn download_streams_to_target_path() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/file/asset-9"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"original bytes".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("nested/original.bin");
    let written = client.download_to_path("/file/asset-9", &target).await.unwrap();

    assert_eq!(written, target);
    let contents = tokio::fs::read(&target).await.unwrap();
    assert_eq!(contents, b"original bytes");
}

#[tokio::test]
async fn download_from_id_lands_in_scratch_dir() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("GET"))
        .and(path("/file/asset-9/*/poster.jpg"))
        .and(query_param("forceDownload", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let path = client
        .download_from_id("asset-9", Some("poster.jpg"))
        .await
        .unwrap();
    let contents = tokio::fs::read(&path).await.unwrap();
    assert_eq!(contents, b"jpeg");
}

#[tokio::test]
async fn create_webhook_returns_secret_token() {
    let server = MockServer::start().await;
    let client = authenticated_client(&server).await;

    Mock::given(method("POST"))
        .and(path("/services/admin/webhook"))
        .and(body_string_contains("\"eventTypes\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "wh-1",
            "name": "sync",
            "url": "https://hooks.example.com/assets",
            "eventTypes": ["asset_create"],
            "metadataToReturn": ["assetPath"],
            "changedMetadataToReturn": [],
            "triggerMetadataFields": [],
            "foldersAndQuery": { "folders": ["/Demo Zone"], "query": "" },
            "enabled": true,
            "secretToken": "shhh"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let req = ardea_core::webhook::WebhookCreateRequest {
        enabled: true,
        name: "sync".to_string(),
        url: "https://hooks.example.com/assets".to_string(),
        event_types: vec!["asset_create".to_string()],
        metadata_to_return: vec!["assetPath".to_string()],
        changed_metadata_to_return: vec![],
        trigger_metadata_fields: None,
        folders_and_query: ardea_core::webhook::FoldersAndQuery {
            folders: vec!["/Demo Zone".to_string()],
            query: String::new(),
            enable_wildcard_selection: None,
        },
    };
    let created = client.admin().create_webhook(&req).await.unwrap();
    assert_eq!(created.secret_token, "shhh");
}
