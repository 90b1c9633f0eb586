use thiserror::Error;

pub const CAPTCHA_MISMATCH: &str = "El código CAPTCHA es incorrecto";
pub const MISSING_FIELDS: &str = "Completa todos los campos";
pub const LOGIN_FAILED: &str = "Error al iniciar sesión";
pub const UNEXPECTED: &str = "Error inesperado al intentar iniciar sesión";

#[derive(Debug, Error)]
pub enum PortalError {
    #[error("captcha mismatch")]
    Captcha,

    #[error("missing form fields")]
    MissingFields,

    /// The server said no and explained why.
    #[error("login rejected: {0}")]
    Rejected(String),

    #[error("unexpected response (status {status})")]
    UnexpectedResponse { status: u16 },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("session file error: {0}")]
    Session(#[from] std::io::Error),

    #[error("session file is corrupt: {0}")]
    CorruptSession(#[from] serde_json::Error),
}

impl PortalError {
    /// Every failure collapses into one line the form can show.
    pub fn user_message(&self) -> String {
        match self {
            PortalError::Captcha => CAPTCHA_MISMATCH.to_string(),
            PortalError::MissingFields => MISSING_FIELDS.to_string(),
            PortalError::Rejected(msg) if !msg.trim().is_empty() => msg.clone(),
            PortalError::Rejected(_) | PortalError::UnexpectedResponse { .. } => LOGIN_FAILED.to_string(),
            PortalError::Transport(_) | PortalError::Session(_) | PortalError::CorruptSession(_) => {
                UNEXPECTED.to_string()
            }
        }
    }
}
