// Driven port - User repository (output port)

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Email, NewUser, User};

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("email already registered: {0}")]
    Duplicate(String),

    #[error("{0}")]
    Backend(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;
    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;
    /// Persists the user and returns it with its assigned id.
    async fn create(&self, user: NewUser) -> Result<User, RepositoryError>;
}
