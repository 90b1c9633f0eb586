//! HTTP client for the auth service.

use reqwest::StatusCode;
use shared::{AuthResponse, ErrorResponse, LoginRequest, LOGIN_PATH};

use crate::error::PortalError;

#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Posts the credentials and returns the server's reply on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, PortalError> {
        let url = format!("{}{}", self.base_url, LOGIN_PATH);
        tracing::debug!(%url, %email, "sending login request");

        let response = self
            .http
            .post(&url)
            .json(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        interpret(status, &body)
    }
}

/// Maps a status and raw body to the outcome the login form cares about.
fn interpret(status: StatusCode, body: &[u8]) -> Result<AuthResponse, PortalError> {
    if status.is_success() {
        return match serde_json::from_slice::<AuthResponse>(body) {
            Ok(reply) if reply.user_id.is_some() => Ok(reply),
            _ => Err(PortalError::UnexpectedResponse { status: status.as_u16() }),
        };
    }

    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(ErrorResponse { error }) => Err(PortalError::Rejected(error)),
        Err(_) => Err(PortalError::UnexpectedResponse { status: status.as_u16() }),
    }
}
