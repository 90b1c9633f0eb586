use thiserror::Error;

use crate::application::ports::{CryptoError, RepositoryError};

pub const INVALID_CREDENTIALS: &str = "Credenciales inválidas";
pub const EMAIL_TAKEN: &str = "El correo ya está registrado";

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error("{0}")]
    Validation(String),

    /// Unknown account and wrong password are reported the same way.
    #[error("Credenciales inválidas")]
    InvalidCredentials,

    #[error("{0}")]
    Conflict(String),

    #[error("repository error: {0}")]
    Repository(String),

    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

impl ApplicationError {
    /// Text safe to hand back to a client. Internal failures are not echoed.
    pub fn public_message(&self) -> String {
        match self {
            ApplicationError::Validation(msg) | ApplicationError::Conflict(msg) => msg.clone(),
            ApplicationError::InvalidCredentials => INVALID_CREDENTIALS.to_string(),
            ApplicationError::Repository(_) | ApplicationError::Crypto(_) => {
                "Error interno del servidor".to_string()
            }
        }
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(_) => ApplicationError::Conflict(EMAIL_TAKEN.to_string()),
            RepositoryError::Backend(msg) => ApplicationError::Repository(msg),
        }
    }
}
