//! Health endpoint integration tests
//!
//! Covers:
//! - GET /api/health — simple liveness check
//! - GET /api/system/health — datastore ping and completion counters
//! - GET /api/system/version — build info

use axum::http::StatusCode;

mod common;
use common::{body_string, build_app, build_app_state, create_test_db, get};

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = build_app(build_app_state(create_test_db().await));

    let response = get(&app, "/api/health").await;
    assert_eq!(
        response.status(),
        StatusCode::OK,
        "GET /api/health must return 200"
    );
    assert_eq!(body_string(response).await.trim(), "OK");
}

#[tokio::test]
async fn test_version_reports_crate_version() {
    let app = build_app(build_app_state(create_test_db().await));

    let response = get(&app, "/api/system/version").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(json["backend"], "rust");
}

#[tokio::test]
async fn test_system_health_starts_at_zero() {
    let app = build_app(build_app_state(create_test_db().await));

    let json: serde_json::Value =
        serde_json::from_str(&body_string(get(&app, "/api/system/health").await).await).unwrap();

    assert_eq!(json["completions"]["persisted"], 0);
    assert_eq!(json["completions"]["failed"], 0);
}

#[tokio::test]
async fn test_system_health_pings_database() {
    let app = build_app(build_app_state(create_test_db().await));

    let json: serde_json::Value =
        serde_json::from_str(&body_string(get(&app, "/api/system/health").await).await).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["database"], "ok");
}

#[tokio::test]
async fn test_system_health_reports_closed_database() {
    let db = create_test_db().await;
    let app = build_app(build_app_state(db.clone()));

    // Clones share the pool, so this closes it for the app as well
    db.close().await.unwrap();

    let response = get(&app, "/api/system/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["database"], "unavailable");
}
