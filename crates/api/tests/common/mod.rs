//! Shared helpers for HTTP-level integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use pustaka_api::auth::jwt::JwtConfig;
use pustaka_api::auth::password::hash_password;
use pustaka_api::config::ServerConfig;
use pustaka_api::router::build_app_router;
use pustaka_api::state::AppState;
use pustaka_db::models::user::CreateUser;
use pustaka_db::repositories::UserRepo;

/// Shared API key expected by the credential-gated routes in tests.
pub const TEST_API_KEY: &str = "test-api-key";

/// Build a test `ServerConfig` with safe defaults and fixed secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        base_url: "http://localhost:8082".to_string(),
        assets_root: std::env::temp_dir().join("pustaka-api-tests"),
        api_key: TEST_API_KEY.to_string(),
        allow_negative_stock: false,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            access_secret: "test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret".to_string(),
            access_expiry_mins: 15,
            refresh_expiry_days: 7,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This goes through the same [`build_app_router`] the binary uses, so the
/// tests exercise the production middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with(pool, test_config())
}

/// Like [`build_test_app`] but with a caller-supplied config, for tests
/// that flip flags such as `allow_negative_stock`.
pub fn build_test_app_with(pool: PgPool, config: ServerConfig) -> Router {
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::get(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST with the test API key set, for the credential-gated routes.
pub async fn post_json_key(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("content-type", "application/json")
            .header("x-api-key", TEST_API_KEY)
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::post(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::put(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::put(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::delete(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::delete(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Deserialize a response body into JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart helpers
// ---------------------------------------------------------------------------

/// One part of a hand-rolled multipart body.
pub enum Part<'a> {
    Text { name: &'a str, value: &'a str },
    File {
        name: &'a str,
        filename: &'a str,
        bytes: &'a [u8],
    },
}

const BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Assemble a `multipart/form-data` body from the given parts.
pub fn multipart_body(parts: &[Part<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                filename,
                bytes,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; \
                         filename=\"{filename}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    (format!("multipart/form-data; boundary={BOUNDARY}"), body)
}

/// POST a multipart body with the test API key set.
pub async fn post_multipart_key(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    let (content_type, body) = multipart_body(parts);
    app.oneshot(
        Request::post(uri)
            .header("content-type", content_type)
            .header("x-api-key", TEST_API_KEY)
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// POST a multipart body with a bearer token.
pub async fn post_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    parts: &[Part<'_>],
) -> Response<Body> {
    let (content_type, body) = multipart_body(parts);
    app.oneshot(
        Request::post(uri)
            .header("content-type", content_type)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// PUT a multipart body with a bearer token.
pub async fn put_multipart_auth(
    app: Router,
    uri: &str,
    token: &str,
    parts: &[Part<'_>],
) -> Response<Body> {
    let (content_type, body) = multipart_body(parts);
    app.oneshot(
        Request::put(uri)
            .header("content-type", content_type)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .unwrap(),
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Database id of the seeded role with the given code.
pub async fn role_id_for_code(pool: &PgPool, code: i32) -> i64 {
    sqlx::query_scalar("SELECT id FROM roles WHERE code = $1")
        .bind(code)
        .fetch_one(pool)
        .await
        .expect("seeded role should exist")
}

/// Create a user directly in the database and return its row plus the
/// plaintext password.
pub async fn create_test_user(
    pool: &PgPool,
    email: &str,
    role_code: i32,
) -> (pustaka_db::models::user::User, String) {
    let password = "rahasia-sekali";
    let hashed = hash_password(password).expect("hashing should succeed");
    let role_id = role_id_for_code(pool, role_code).await;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: hashed,
            phone_number: "081234567890".to_string(),
            gender: "male".to_string(),
            img_url: None,
            verified: true,
            id_number: format!("nim-{email}"),
            role_id,
        },
    )
    .await
    .expect("user creation should succeed");
    (user, password.to_string())
}

/// Log a user in through the API and return the token pair JSON
/// (`{accessToken, refreshToken}`).
pub async fn login_user(app: Router, email: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json_key(app, "/users/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["result"].clone()
}

/// Create a book directly in the database and return its row.
pub async fn create_test_book(
    pool: &PgPool,
    title: &str,
    available: i32,
) -> pustaka_db::models::book::Book {
    pustaka_db::repositories::BookRepo::create(
        pool,
        &pustaka_db::models::book::CreateBook {
            title: title.to_string(),
            synopsis: None,
            author: "Penulis".to_string(),
            year: 2021,
            page_size: Some(200),
            publisher: "Penerbit".to_string(),
            img_url: None,
            pdf_url: None,
            available,
            category_ids: vec![],
        },
    )
    .await
    .expect("book creation should succeed")
}
