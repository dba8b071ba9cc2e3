//! Unit tests for CLI commands.

use super::*;
use crate::ApiOperation;
use storelink_config::Settings;
use storelink_core::types::{Architecture, ArtifactKind};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Create a test command context whose client talks to the mock server
fn create_test_context(server: &MockServer, json: bool) -> CommandContext {
    let settings = Settings {
        endpoint: format!("{}/api/GetFiles", server.uri()),
        ..Settings::default()
    };

    CommandContext {
        cwd: Utf8PathBuf::from("."),
        output: crate::output::OutputHandler::new(),
        client: StoreClient::with_settings(settings).unwrap(),
        json,
    }
}

/// Mount a listing with two installers, one blockmap and a duplicate link
async fn mount_listing(server: &MockServer) {
    let base = server.uri();
    let listing = format!(
        r#"<table>
<tr><td><a href="{base}/files/x64">Contoso_x64_1.0.0.0.msix</a></td></tr>
<tr><td><a href="{base}/files/arm64">Contoso_arm64_1.0.0.0.msix</a></td></tr>
<tr><td><a href="{base}/files/map">Contoso_x64_1.0.0.0.blockmap</a></td></tr>
<tr><td><a href="{base}/files/x64">Contoso_duplicate.msix</a></td></tr>
</table>"#
    );

    Mock::given(method("POST"))
        .and(path("/api/GetFiles"))
        .respond_with(ResponseTemplate::new(200).set_body_string(listing))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/x64"))
        .respond_with(ResponseTemplate::new(206).insert_header("Content-Range", "bytes 0-0/1048576"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/files/arm64"))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_lookup_merges_primary_sizes() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    let ctx = create_test_context(&server, false);

    let catalog = fetch::lookup(&ctx.client, "https://apps.microsoft.com/detail/9nblggh4nns1")
        .await
        .unwrap();

    assert_eq!(catalog.total(), 3);
    let files = catalog.files();
    assert_eq!(files[0].architecture, Architecture::X64);
    assert_eq!(files[0].size, Some(Some(1_048_576)));
    assert_eq!(files[1].size, Some(None));
    // Blockmaps are not probed
    assert_eq!(files[2].kind, ArtifactKind::Blockmap);
    assert_eq!(files[2].size, None);

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/files/map"));
}

#[tokio::test]
async fn test_lookup_rejects_bad_input_before_network() {
    let server = MockServer::start().await;
    let ctx = create_test_context(&server, false);

    let result = fetch::lookup(&ctx.client, "https://example.com/nothing").await;
    assert!(matches!(result, Err(StoreError::InvalidInput { .. })));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_fetch_empty_catalog_succeeds() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;
    let ctx = create_test_context(&server, false);

    assert!(fetch::execute("9NBLGGH4NNS1", false, &ctx).await.is_ok());
}

#[tokio::test]
async fn test_catalog_command_validates_id() {
    let server = MockServer::start().await;
    let ctx = create_test_context(&server, true);

    let result = catalog::execute("not-an-id", false, &ctx).await;
    assert!(matches!(result, Err(StoreError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_dispatch_resolve() {
    let server = MockServer::start().await;
    let ctx = create_test_context(&server, true);

    let code = dispatch_command(
        Commands::Resolve {
            input: "9nblggh4nns1".to_string(),
        },
        &ctx,
    )
    .await
    .unwrap();
    assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::SUCCESS));
}

#[tokio::test]
async fn test_api_handle_operations() {
    let server = MockServer::start().await;
    mount_listing(&server).await;
    let ctx = create_test_context(&server, true);

    let response = api::handle(ApiOperation::Extract, r#"{"url": "9nblggh4nns1"}"#, &ctx).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["productId"], "9NBLGGH4NNS1");

    let response = api::handle(ApiOperation::Store, r#"{"productId": "9NBLGGH4NNS1"}"#, &ctx).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body["total"], 3);

    let request = format!(r#"{{"urls": ["{}/files/x64"]}}"#, server.uri());
    let response = api::handle(ApiOperation::Size, &request, &ctx).await;
    assert_eq!(response.status, 200);
    assert_eq!(response.body[format!("{}/files/x64", server.uri())], 1_048_576);
}

#[tokio::test]
async fn test_api_invalid_json_is_bad_request() {
    let server = MockServer::start().await;
    let ctx = create_test_context(&server, true);

    let response = api::handle(ApiOperation::Extract, "{not json", &ctx).await;
    assert_eq!(response.status, 400);
    assert!(response.body["error"].as_str().unwrap().starts_with("Request is not valid JSON"));

    let code = api::execute(ApiOperation::Size, r#"{"urls": "nope"}"#, &ctx).await.unwrap();
    assert_eq!(format!("{:?}", code), format!("{:?}", ExitCode::FAILURE));
}
