mod common;

use axum::http::StatusCode;
use std::sync::Arc;

use common::InMemoryUrlRepository;

#[tokio::test]
async fn test_health_ok() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    let server = common::create_test_server(common::create_test_state(repo));

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["message"], "disabled");
}

#[tokio::test]
async fn test_health_degraded_when_database_down() {
    let repo = Arc::new(InMemoryUrlRepository::new());
    repo.set_healthy(false);

    let server = common::create_test_server(common::create_test_state(repo));

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
}
