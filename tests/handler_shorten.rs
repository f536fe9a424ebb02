mod common;

use axum::body::Bytes;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

use common::InMemoryUrlRepository;
use shorturl::utils::code_generator::{
    ALPHABET, CodeGenerator, MAX_CODE_LENGTH, MIN_CODE_LENGTH,
};

#[tokio::test]
async fn test_shorten_form_success() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://www.example.com")])
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["original_url"], "https://www.example.com");

    let code = json["short_url"].as_str().unwrap();
    assert_eq!(code.len(), 7);
    assert!(code.bytes().all(|b| ALPHABET.contains(&b)));

    let stored = repo.get(code).unwrap();
    assert_eq!(stored.original_url, "https://www.example.com");
}

#[tokio::test]
async fn test_shorten_json_success() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": "https://forum.freecodecamp.org/" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["original_url"], "https://forum.freecodecamp.org/");
    assert!(json["short_url"].is_string());
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_shorten_not_a_url() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "not a url")])
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "Invalid URL" }));
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_unresolvable_host() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "http://thisdomaindoesnotexist.invalidtld")])
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "Invalid URL" }));
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server.post("/api/shorturl").json(&json!({})).await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "Invalid URL" }));
}

#[tokio::test]
async fn test_shorten_malformed_json_body() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server
        .post("/api/shorturl")
        .bytes(Bytes::from_static(b"{\"url\": "))
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "Invalid URL" }));
}

#[tokio::test]
async fn test_shorten_oversized_url() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let long_url = format!("https://www.example.com/{}", "a".repeat(4096));
    let response = server
        .post("/api/shorturl")
        .json(&json!({ "url": long_url }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_shorten_keeps_url_verbatim() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let original = "HTTPS://WWW.Example.com:443/Some/Path/?b=2&a=1#top";
    let response = server
        .post("/api/shorturl")
        .form(&[("url", original)])
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["original_url"], original);

    let code = json["short_url"].as_str().unwrap();
    assert_eq!(repo.get(code).unwrap().original_url, original);
}

#[tokio::test]
async fn test_shorten_same_url_twice_gives_distinct_codes() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let mut codes = HashSet::new();
    for _ in 0..2 {
        let response = server
            .post("/api/shorturl")
            .form(&[("url", "https://example.com")])
            .await;
        response.assert_status_ok();

        let json = response.json::<serde_json::Value>();
        codes.insert(json["short_url"].as_str().unwrap().to_string());
    }

    assert_eq!(codes.len(), 2);
    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_shorten_colliding_code_does_not_overwrite() {
    let repo = Arc::new(InMemoryUrlRepository::new());

    // Occupy the first code the seeded generator will draw.
    let first_candidate = CodeGenerator::seeded(7, common::TEST_SEED).generate();
    repo.insert(&first_candidate, "https://example.com/existing");

    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://www.example.com/new")])
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let code = json["short_url"].as_str().unwrap();
    assert_ne!(code, first_candidate);

    assert_eq!(
        repo.get(&first_candidate).unwrap().original_url,
        "https://example.com/existing"
    );
    assert_eq!(
        repo.get(code).unwrap().original_url,
        "https://www.example.com/new"
    );
}

#[tokio::test]
async fn test_shorten_custom_code_length() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let state = common::create_test_state_with(repo, CodeGenerator::new(12));
    let server = common::create_test_server(state);

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://www.example.com")])
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["short_url"].as_str().unwrap().len(), 12);
}

#[tokio::test]
async fn test_concurrent_shortens_with_same_draws_get_distinct_codes() {
    let repo = Arc::new(InMemoryUrlRepository::new());

    // Both instances draw the same sequence, so their first candidates collide.
    let first = common::create_test_state(repo.clone());
    let second = common::create_test_state(repo.clone());

    let (a, b) = tokio::join!(
        first.shortening_service.shorten("https://www.example.com/a"),
        second.shortening_service.shorten("https://www.example.com/b"),
    );

    let a = a.unwrap();
    let b = b.unwrap();
    assert_ne!(a.code, b.code);
    assert_eq!(repo.len(), 2);
    assert_eq!(repo.get(&a.code).unwrap().original_url, "https://www.example.com/a");
    assert_eq!(repo.get(&b.code).unwrap().original_url, "https://www.example.com/b");
}

#[tokio::test]
async fn test_shorten_json_content_type_is_case_insensitive() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorturl")
        .bytes(Bytes::from_static(b"{\"url\": \"https://www.example.com\"}"))
        .content_type("Application/JSON; charset=UTF-8")
        .await;

    response.assert_status_ok();
    assert_eq!(repo.len(), 1);
}

#[tokio::test]
async fn test_shorten_rejects_nul_character() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo.clone()));

    let response = server
        .post("/api/shorturl")
        .form(&[("url", "https://www.example.com/a\0b")])
        .await;

    response.assert_status_bad_request();
    response.assert_json(&json!({ "error": "Invalid URL" }));
    assert_eq!(repo.len(), 0);
}

#[tokio::test]
async fn test_out_of_range_code_lengths_still_round_trip() {
    for requested in [0, 40] {
        let repo = Arc::new(InMemoryUrlRepository::new());
        let state = common::create_test_state_with(repo, CodeGenerator::new(requested));

        let record = state
            .shortening_service
            .shorten("https://www.example.com")
            .await
            .unwrap();

        assert!((MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&record.code.len()));

        let url = state.redirect_service.resolve(&record.code).await.unwrap();
        assert_eq!(url, "https://www.example.com");
    }
}
