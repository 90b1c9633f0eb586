use crate::application::error::ApplicationError;
use crate::domain::{Email, UserId};
use crate::infrastructure::AppState;

pub const LOGGED_IN: &str = "Inicio de sesión exitoso";

#[derive(Debug)]
pub struct LoginResult {
    pub user_id: UserId,
    pub email: Email,
}

pub async fn execute(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<LoginResult, ApplicationError> {
    // A malformed identifier can't belong to anyone.
    let email = Email::new(email.to_string()).map_err(|_| ApplicationError::InvalidCredentials)?;

    let user = state
        .user_repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| {
            tracing::info!(email = %email, "login rejected: unknown email");
            ApplicationError::InvalidCredentials
        })?;

    if !state.cipher.matches(password, user.password()) {
        tracing::info!(user_id = %user.id(), "login rejected: wrong password");
        return Err(ApplicationError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id(), email = %user.email(), "user logged in");

    Ok(LoginResult {
        user_id: user.id(),
        email: user.email().clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockPasswordCipher, MockUserRepository, RepositoryError};
    use crate::domain::{EncryptedPassword, User};
    use std::sync::Arc;

    fn state(repo: MockUserRepository, cipher: MockPasswordCipher) -> AppState {
        AppState {
            user_repo: Arc::new(repo),
            cipher: Arc::new(cipher),
        }
    }

    fn stored_user() -> User {
        User::from_persistence(
            UserId::new(42),
            Email::new("2023077282@upt.edu.pe".to_string()).unwrap(),
            EncryptedPassword::new("c2VhbGVk".to_string(), "aXY=".to_string()),
            chrono::Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(Some(stored_user())));

        let mut cipher = MockPasswordCipher::new();
        cipher.expect_matches().times(1).returning(|_, _| true);

        let result = execute(&state(repo, cipher), "2023077282@UPT.edu.pe", "123456")
            .await
            .unwrap();

        assert_eq!(result.user_id, UserId::new(42));
        assert_eq!(result.email.as_str(), "2023077282@upt.edu.pe");
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(Some(stored_user())));

        let mut cipher = MockPasswordCipher::new();
        cipher.expect_matches().returning(|_, _| false);

        let err = execute(&state(repo, cipher), "2023077282@upt.edu.pe", "654321")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_unknown_email_looks_like_wrong_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));

        let mut cipher = MockPasswordCipher::new();
        cipher.expect_matches().never();

        let err = execute(&state(repo, cipher), "nadie@upt.edu.pe", "123456")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidCredentials));
        assert_eq!(err.public_message(), "Credenciales inválidas");
    }

    #[tokio::test]
    async fn test_login_malformed_email_skips_lookup() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();

        let err = execute(&state(repo, MockPasswordCipher::new()), "admin", "admin")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_login_repository_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(RepositoryError::Backend("pool timed out".to_string())));

        let err = execute(&state(repo, MockPasswordCipher::new()), "a@upt.edu.pe", "123456")
            .await
            .unwrap_err();

        assert!(matches!(err, ApplicationError::Repository(_)));
    }
}
