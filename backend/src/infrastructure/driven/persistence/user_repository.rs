use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use crate::application::ports::{RepositoryError, UserRepository};
use crate::domain::{Email, EncryptedPassword, NewUser, User, UserId};

/// Postgres SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

type UserRow = (i64, String, String, String, DateTime<Utc>);

/// Rows written before emails were normalized may not pass validation;
/// those are skipped and reported instead of failing the whole lookup.
fn into_user((id, email, password_cipher, password_iv, created_at): UserRow) -> Option<User> {
    let email = match Email::new(email) {
        Ok(email) => email,
        Err(e) => {
            tracing::warn!(user_id = id, error = %e, "skipping stored user with invalid email");
            return None;
        }
    };
    Some(User::from_persistence(
        UserId::new(id),
        email,
        EncryptedPassword::new(password_cipher, password_iv),
        created_at,
    ))
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, email, password_cipher, password_iv, created_at
             FROM users
             WHERE LOWER(email) = $1"
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::Backend(format!("Database error: {}", e)))?;

        Ok(row.and_then(into_user))
    }

    async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM users WHERE LOWER(email) = $1)"
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::Backend(format!("Database error: {}", e)))?;

        Ok(exists)
    }

    async fn create(&self, user: NewUser) -> Result<User, RepositoryError> {
        let (id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            "INSERT INTO users (email, password_cipher, password_iv)
             VALUES ($1, $2, $3)
             RETURNING id, created_at"
        )
        .bind(user.email.as_str())
        .bind(user.password.cipher_text())
        .bind(user.password.iv())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                RepositoryError::Duplicate(user.email.to_string())
            }
            _ => RepositoryError::Backend(format!("Failed to create user: {}", e)),
        })?;

        Ok(User::from_persistence(UserId::new(id), user.email, user.password, created_at))
    }
}
