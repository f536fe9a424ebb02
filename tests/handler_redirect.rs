mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::sync::Arc;

use common::InMemoryUrlRepository;

#[tokio::test]
async fn test_redirect_success() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    repo.insert("aB3dE5f", "https://www.example.com/some/path?q=1");

    let server = common::create_test_server(common::create_test_state(repo));

    let response = server.get("/api/shorturl/aB3dE5f").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location"),
        "https://www.example.com/some/path?q=1"
    );
}

#[tokio::test]
async fn test_redirect_not_found() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server.get("/api/shorturl/zzzzzzz").await;

    response.assert_status_not_found();
    response.assert_json(&json!({ "error": "Name not found" }));
}

#[tokio::test]
async fn test_redirect_malformed_code() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo));

    for path in ["/api/shorturl/bad-code", "/api/shorturl/ab%20cd"] {
        let response = server.get(path).await;

        response.assert_status_not_found();
        response.assert_json(&json!({ "error": "Name not found" }));
    }
}

#[tokio::test]
async fn test_redirect_is_case_sensitive() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    repo.insert("aB3dE5f", "https://www.example.com");

    let server = common::create_test_server(common::create_test_state(repo));

    server
        .get("/api/shorturl/AB3DE5F")
        .await
        .assert_status_not_found();
}

#[tokio::test]
async fn test_shorten_then_redirect() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://forum.freecodecamp.org/")])
        .await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let code = json["short_url"].as_str().unwrap().to_string();

    // Repeated lookups keep returning the same target.
    for _ in 0..2 {
        let redirect = server.get(&format!("/api/shorturl/{}", code)).await;

        redirect.assert_status(StatusCode::FOUND);
        assert_eq!(
            redirect.header("location"),
            "https://forum.freecodecamp.org/"
        );
    }
}
