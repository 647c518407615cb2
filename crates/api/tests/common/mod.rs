#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use pis_api::config::{Environment, ServerConfig};
use pis_api::router::build_app_router;
use pis_api::state::AppState;
use pis_db::DbConfig;

/// Seeded category ids, in migration order.
pub const ELECTRONICS: i64 = 1;
pub const CLOTHING: i64 = 2;
pub const COMPUTERS: i64 = 3;
pub const MOBILE: i64 = 4;

/// Build a test `ServerConfig` with safe defaults.
///
/// Runs as a development deployment so error bodies carry the error chain.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        environment: Environment::Development,
        db: DbConfig::default(),
    }
}

/// Build the full application router around the given pool.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_app_with_config(pool, test_config())
}

pub fn build_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    build_app_router(AppState::new(pool, Arc::new(config)))
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// POST a product and return its id, asserting creation succeeded.
pub async fn create_product(pool: &PgPool, name: &str, quantity: i64, category_ids: &[i64]) -> i64 {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/products",
        serde_json::json!({
            "name": name,
            "quantity": quantity,
            "categoryIds": category_ids,
        }),
    )
    .await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// A lazy pool pointed at a local socket that accepts connections and never
/// answers. Every acquire hangs until `db.connect_timeout_secs` runs out.
///
/// `db` is updated to the listener's address so the caller can build the
/// server config from it.
pub async fn unresponsive_pool(db: &mut DbConfig) -> PgPool {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    db.url = None;
    db.host = addr.ip().to_string();
    db.port = addr.port();

    PgPoolOptions::new()
        .max_connections(db.max_connections)
        .acquire_timeout(Duration::from_secs(db.connect_timeout_secs))
        .connect_lazy_with(db.connect_options().unwrap())
}
