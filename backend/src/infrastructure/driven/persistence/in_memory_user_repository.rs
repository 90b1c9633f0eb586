use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::{Email, NewUser, User, UserId};

/// Process-local user store, used when no database is configured.
#[derive(Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Email, User>,
    last_id: i64,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.users.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        Ok(self.inner.read().await.users.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        Ok(self.inner.read().await.users.contains_key(email))
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(&user.email) {
            return Err(RepositoryError::Duplicate(user.email.to_string()));
        }

        inner.last_id += 1;
        let created = User::from_persistence(
            UserId::new(inner.last_id),
            user.email.clone(),
            user.password,
            chrono::Utc::now(),
        );
        inner.users.insert(user.email, created.clone());
        Ok(created)
    }
}
