//! Test helpers shared by the integration tests.
//!
//! In-memory SQLite stands in for Postgres. Helpers build the full router on
//! top of it and drive it one request at a time.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::util::ServiceExt;

use energi_onboarding::endpoints::create_router;
use energi_onboarding::migrations::Migrator;
use energi_onboarding::services::ViewRenderer;
use energi_onboarding::state::AppState;

/// Create an in-memory SQLite database for testing
pub async fn create_test_db() -> DatabaseConnection {
    // Use simple in-memory SQLite - each connection gets its own database
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");

    // Run migrations using the Migrator
    Migrator::up(&db, None)
        .await
        .expect("Failed to run test migrations");

    db
}

/// Install a trigger that aborts every status insert
pub async fn reject_status_inserts(db: &DatabaseConnection) {
    db.execute_unprepared(
        "CREATE TRIGGER reject_status_insert BEFORE INSERT ON customer_status
         BEGIN
             SELECT RAISE(ABORT, 'datastore unavailable');
         END;",
    )
    .await
    .expect("Failed to install insert trigger");
}

pub fn build_app_state(db: DatabaseConnection) -> AppState {
    let views = ViewRenderer::new().expect("Templates must register");
    AppState::new(db, Arc::new(views))
}

pub fn build_app(state: AppState) -> Router {
    create_router(state)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .method("GET")
        .body(Body::empty())
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_form(app: &Router, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

/// POST a raw body with an arbitrary (or no) content type
pub async fn post_raw(
    app: &Router,
    uri: &str,
    content_type: Option<&str>,
    body: impl Into<Body>,
) -> Response<Body> {
    let mut builder = Request::builder().uri(uri).method("POST");
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }

    app.clone()
        .oneshot(builder.body(body.into()).unwrap())
        .await
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8_lossy(&bytes).to_string()
}

/// Assert a redirect and return its target
pub fn redirect_location(response: &Response<Body>) -> String {
    assert_eq!(
        response.status(),
        StatusCode::SEE_OTHER,
        "expected a redirect, got {}",
        response.status()
    );

    response
        .headers()
        .get(header::LOCATION)
        .expect("redirect without Location header")
        .to_str()
        .unwrap()
        .to_string()
}
