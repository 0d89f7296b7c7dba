//! Release asset downloads against a wiremock GitHub.

use serde_json::json;
use tentacle::{Asset, Client, Error, Id, Server, DOWNLOAD_CONTENT_TYPE};
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ASSET_PATH: &str = "/api/v3/repos/Carthage/Carthage/releases/assets/1258120";

fn server_for(mock_server: &MockServer) -> Server {
    Server::Enterprise(Url::parse(&mock_server.uri()).unwrap())
}

fn asset(mock_server: &MockServer) -> Asset {
    Asset {
        id: Id::new(1_258_120),
        name: "Carthage.pkg".to_string(),
        content_type: "application/octet-stream".to_string(),
        url: Url::parse("https://github.com/Carthage/Carthage/releases/download/0.15/Carthage.pkg")
            .unwrap(),
        api_url: Url::parse(&format!("{}{ASSET_PATH}", mock_server.uri())).unwrap(),
    }
}

#[tokio::test]
async fn test_download_writes_body_to_temp_file() {
    let mock_server = MockServer::start().await;
    let payload: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();

    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .and(header("Accept", DOWNLOAD_CONTENT_TYPE))
        .and(header("Authorization", "token 0123456789"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "application/octet-stream")
                .set_body_bytes(payload.clone()),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_token(server_for(&mock_server), "0123456789").unwrap();
    let downloaded = client
        .download(&asset(&mock_server))
        .await
        .expect("Failed to download asset");

    assert_eq!(
        downloaded.response().header("content-type"),
        Some("application/octet-stream")
    );
    assert!(downloaded
        .path()
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with("tentacle-")));
    assert_eq!(downloaded.read().await.expect("Failed to read file"), payload);

    let file = downloaded.path().to_path_buf();
    drop(downloaded);
    assert!(!file.exists());
}

#[tokio::test]
async fn test_download_follows_redirect() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/storage/carthage.pkg", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/storage/carthage.pkg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"pkg".to_vec()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(server_for(&mock_server)).unwrap();
    let downloaded = client
        .download(&asset(&mock_server))
        .await
        .expect("Failed to download asset");
    assert_eq!(downloaded.read().await.unwrap(), b"pkg");
}

#[tokio::test]
async fn test_download_missing_asset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&mock_server)
        .await;

    let client = Client::new(server_for(&mock_server)).unwrap();
    let err = client.download(&asset(&mock_server)).await.unwrap_err();
    assert!(matches!(err, Error::DoesNotExist));
}

#[tokio::test]
async fn test_download_forbidden() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"message": "Resource not accessible"})),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(server_for(&mock_server)).unwrap();
    match client.download(&asset(&mock_server)).await.unwrap_err() {
        Error::Api { status, error, .. } => {
            assert_eq!(status, 403);
            assert_eq!(error.message, "Resource not accessible");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_downloaded_asset_persist() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(ASSET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"installer".to_vec()))
        .mount(&mock_server)
        .await;

    let client = Client::new(server_for(&mock_server)).unwrap();
    let downloaded = client.download(&asset(&mock_server)).await.unwrap();

    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("Carthage.pkg");
    downloaded.persist(&target).expect("Failed to persist asset");

    assert_eq!(std::fs::read(&target).unwrap(), b"installer");
}
