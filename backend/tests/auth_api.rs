use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use integraupt_server::application::ports::UserRepository;
use integraupt_server::domain::{Email, EncryptedPassword, NewUser};
use integraupt_server::infrastructure::driven::{AesGcmCipher, InMemoryUserRepository};
use integraupt_server::infrastructure::driving::router;
use integraupt_server::infrastructure::AppState;

const DEMO_KEY: &str = "QUVTRGVtb1NlY3JldEtleQ==";

fn app_with(repo: Arc<InMemoryUserRepository>) -> Router {
    let state = AppState {
        user_repo: repo,
        cipher: Arc::new(AesGcmCipher::from_base64_key(DEMO_KEY).unwrap()),
    };
    router(state, &["http://localhost:5173".to_string()])
}

fn app() -> Router {
    app_with(Arc::new(InMemoryUserRepository::new()))
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_register_then_login() {
    let app = app();

    let (status, body) = post_json(
        &app,
        "/api/auth/register",
        json!({ "email": "2023077282@upt.edu.pe", "password": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Usuario registrado correctamente");
    assert_eq!(body["userId"], 1);

    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "2023077282@UPT.edu.pe", "password": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Inicio de sesión exitoso");
    assert_eq!(body["userId"], 1);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let app = app();
    post_json(
        &app,
        "/api/auth/register",
        json!({ "email": "admin@upt.edu.pe", "password": "admin" }),
    )
    .await;

    let (status, body) = post_json(
        &app,
        "/api/auth/login",
        json!({ "email": "admin@upt.edu.pe", "password": "nimda" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Credenciales inválidas");
}

#[tokio::test]
async fn test_login_unknown_user_is_unauthorized() {
    let (status, body) = post_json(
        &app(),
        "/api/auth/login",
        json!({ "email": "nadie@upt.edu.pe", "password": "123456" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Credenciales inválidas");
}

#[tokio::test]
async fn test_register_duplicate_is_conflict() {
    let app = app();
    let payload = json!({ "email": "admin@upt.edu.pe", "password": "admin" });

    let (status, _) = post_json(&app, "/api/auth/register", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = post_json(&app, "/api/auth/register", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "El correo ya está registrado");
}

#[tokio::test]
async fn test_register_invalid_email_is_bad_request() {
    let (status, body) = post_json(
        &app(),
        "/api/auth/register",
        json!({ "email": "admin", "password": "admin" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_malformed_body_gets_json_error() {
    let (status, body) = post_json(&app(), "/api/auth/login", json!({ "email": "a@upt.edu.pe" })).await;
    assert!(status.is_client_error());
    assert_eq!(body["error"], "Solicitud inválida");
}

#[tokio::test]
async fn test_legacy_plain_text_row_can_log_in() {
    let repo = Arc::new(InMemoryUserRepository::new());
    repo.create(NewUser {
        email: Email::new("legacy@upt.edu.pe".to_string()).unwrap(),
        password: EncryptedPassword::legacy("admin".to_string()),
    })
    .await
    .unwrap();

    let (status, body) = post_json(
        &app_with(repo),
        "/api/auth/login",
        json!({ "email": "legacy@upt.edu.pe", "password": "admin" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], 1);
}

#[tokio::test]
async fn test_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_cors_preflight_allows_portal_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/auth/login")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:5173"
    );
}
