//! Shared helpers for router tests

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, Response, StatusCode, header},
};
use serde_json::Value;
use tempfile::TempDir;
use tourgate_api::{ApiSettings, AppState, create_router};
use tourgate_auth::JwtManager;
use tourgate_db::{Database, UserStore};
use tower::ServiceExt;

pub const SECRET: &str = "test-secret";

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub jwt: Arc<JwtManager>,
    pub ui: TempDir,
}

/// Write a minimal UI tree with one marker per page
pub fn ui_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (file, marker) in [
        ("index.html", "index page"),
        ("login.html", "login page"),
        ("auth.html", "signup page"),
        ("population-turs.html", "tours page"),
    ] {
        std::fs::write(dir.path().join(file), format!("<html>{}</html>", marker)).unwrap();
    }
    std::fs::create_dir(dir.path().join("static")).unwrap();
    std::fs::write(dir.path().join("static/style.css"), "body { color: red; }").unwrap();
    dir
}

pub fn settings(ui: &TempDir) -> ApiSettings {
    ApiSettings {
        // Debug builds hash slowly; keep the deadline out of the way.
        hash_timeout: Duration::from_secs(60),
        ui_dir: ui.path().to_path_buf(),
        ..ApiSettings::default()
    }
}

pub async fn app() -> TestApp {
    let db = Database::in_memory().await.unwrap();
    let ui = ui_dir();
    let jwt = Arc::new(JwtManager::new(SECRET, 36));
    let state = AppState::new(Arc::new(db.clone()), jwt.clone(), settings(&ui));

    TestApp {
        router: create_router(state),
        db,
        jwt,
        ui,
    }
}

/// Router over an arbitrary store
pub fn app_with_store(store: Arc<dyn UserStore>, settings: ApiSettings) -> Router {
    let jwt = Arc::new(JwtManager::new(SECRET, 36));
    create_router(AppState::new(store, jwt, settings))
}

pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_with_cookie(uri: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

pub async fn register(router: &Router, username: &str, email: &str, password: &str) -> StatusCode {
    let response = send(
        router,
        post_json(
            "/api/register",
            serde_json::json!({
                "name": "A",
                "username": username,
                "password": password,
                "email": email,
            }),
        ),
    )
    .await;
    response.status()
}

pub async fn login(router: &Router, username: &str, password: &str) -> Response<Body> {
    send(
        router,
        post_json(
            "/api/login",
            serde_json::json!({ "username": username, "password": password }),
        ),
    )
    .await
}
