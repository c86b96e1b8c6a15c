use std::sync::Arc;

use shareflix_core::types::SortOrder;
use shareflix_webshare::api::WebshareApi;
use shareflix_webshare::client::WebshareClient;
use shareflix_webshare::session::SessionManager;
use shareflix_webshare::{Credentials, SearchOptions, WebshareError};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/xml; charset=UTF-8")
        .set_body_string(format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><response>{body}</response>"#
        ))
}

#[tokio::test]
async fn login_flow_posts_salt_then_digest() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .and(body_string_contains("username_or_email=alice"))
        .respond_with(xml("<status>OK</status><salt>abc123</salt>"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .and(body_string_contains(
            "password=9c63b4f71813ca1298c166647308812f21fa01a5",
        ))
        .and(body_string_contains("digest=715db1ec619615c836bf3bd89a8cc150"))
        .and(body_string_contains("keep_logged_in=1"))
        .respond_with(xml("<status>OK</status><token>wst-token</token>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(WebshareClient::with_base_url(server.uri()));
    let sessions = SessionManager::new(
        client,
        Credentials {
            username: "alice".into(),
            password: "secret".into(),
        },
    );

    let session = sessions.ensure_session().await.unwrap();
    assert_eq!(session.token, "wst-token");
    // Held token: no further network calls (enforced by `expect(1)`).
    sessions.ensure_session().await.unwrap();
}

#[tokio::test]
async fn login_without_token_leaves_session_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/salt/"))
        .respond_with(xml("<status>OK</status><salt>abc123</salt>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/login/"))
        .respond_with(xml(
            "<status>FATAL</status><code>LOGIN_FATAL_1</code><message>Bad credentials.</message>",
        ))
        .mount(&server)
        .await;

    let sessions = SessionManager::new(
        Arc::new(WebshareClient::with_base_url(server.uri())),
        Credentials {
            username: "alice".into(),
            password: "wrong".into(),
        },
    );
    assert!(sessions.ensure_session().await.is_none());
}

#[tokio::test]
async fn search_sends_trial_parameters_and_parses_files() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/"))
        .and(body_string_contains("what=TheShawshankRedemption"))
        .and(body_string_contains("category=video"))
        .and(body_string_contains("sort=largest"))
        .and(body_string_contains("limit=50"))
        .and(body_string_contains("maybe_removed=true"))
        .and(body_string_contains("wst=tok"))
        .respond_with(xml(
            "<status>OK</status><total>1</total>\
             <file><ident>abc</ident><name>Shawshank.mkv</name><size>1073741824</size></file>",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = WebshareClient::with_base_url(server.uri());
    let files = client
        .search(
            "tok",
            "TheShawshankRedemption",
            SortOrder::Largest,
            SearchOptions::default(),
        )
        .await
        .unwrap();

    assert_eq!(files.len(), 1);
    assert_eq!(files[0].ident, "abc");
    assert_eq!(files[0].size_bytes, 1_073_741_824);
}

#[tokio::test]
async fn http_unauthorized_is_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/search/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = WebshareClient::with_base_url(server.uri());
    let err = client
        .search("stale", "x", SortOrder::Rating, SearchOptions::default())
        .await
        .unwrap_err();
    assert!(err.is_auth_failure());
}

#[tokio::test]
async fn file_link_returns_url_or_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .and(body_string_contains("ident=good"))
        .and(body_string_contains("download_type=video_stream"))
        .and(body_string_contains("device_uuid=dev-1"))
        .and(body_string_contains("force_https=1"))
        .respond_with(xml(
            "<status>OK</status><link>https://free.example/dl/good/movie.mkv</link>",
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .and(body_string_contains("ident=empty"))
        .respond_with(xml("<status>OK</status><link></link>"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/file_link/"))
        .and(body_string_contains("ident=gone"))
        .respond_with(xml(
            "<status>FATAL</status><code>FILE_LINK_FATAL_1</code><message>File not found.</message>",
        ))
        .mount(&server)
        .await;

    let client = WebshareClient::with_base_url(server.uri());

    let link = client.file_link("tok", "good", "dev-1").await.unwrap();
    assert_eq!(link.as_deref(), Some("https://free.example/dl/good/movie.mkv"));

    assert_eq!(client.file_link("tok", "empty", "dev-1").await.unwrap(), None);

    let err = client.file_link("tok", "gone", "dev-1").await.unwrap_err();
    assert!(matches!(err, WebshareError::Api { .. }));
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let client = WebshareClient::with_base_url("http://127.0.0.1:1");
    let err = client.salt("alice").await.unwrap_err();
    assert!(matches!(err, WebshareError::Network(_)));
}
