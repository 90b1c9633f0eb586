use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use shared::{AuthResponse, LoginRequest, RegisterRequest, LOGIN_PATH, REGISTER_PATH};
use crate::application::auth::commands as auth_commands;
use crate::infrastructure::AppState;
use super::error::ApiError;

pub fn setup_routes() -> Router<AppState> {
    Router::new()
        .route(REGISTER_PATH, post(register))
        .route(LOGIN_PATH, post(login))
}

async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let Json(payload) = payload?;
    let result = auth_commands::register::execute(&state, &payload.email, &payload.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: auth_commands::register::REGISTERED.to_string(),
            user_id: Some(result.user_id.value()),
        }),
    ))
}

async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Json(payload) = payload?;
    let result = auth_commands::login::execute(&state, &payload.email, &payload.password).await?;

    Ok(Json(AuthResponse {
        message: auth_commands::login::LOGGED_IN.to_string(),
        user_id: Some(result.user_id.value()),
    }))
}
