use crate::application::error::{ApplicationError, EMAIL_TAKEN};
use crate::domain::{Email, NewUser, Password, UserId};
use crate::infrastructure::AppState;

pub const REGISTERED: &str = "Usuario registrado correctamente";

#[derive(Debug)]
pub struct RegisterResult {
    pub user_id: UserId,
    pub email: Email,
}

pub async fn execute(
    state: &AppState,
    email: &str,
    password: &str,
) -> Result<RegisterResult, ApplicationError> {
    let email = Email::new(email.to_string()).map_err(ApplicationError::Validation)?;
    let password = Password::new(password.to_string()).map_err(ApplicationError::Validation)?;

    if state.user_repo.exists_by_email(&email).await? {
        return Err(ApplicationError::Conflict(EMAIL_TAKEN.to_string()));
    }

    let sealed = state.cipher.encrypt(password.expose())?;

    // A concurrent registration can still win the race; the store's unique
    // index turns that into a Duplicate error, mapped to Conflict.
    let user = state
        .user_repo
        .create(NewUser {
            email,
            password: sealed,
        })
        .await?;

    tracing::info!(user_id = %user.id(), email = %user.email(), "user registered");

    Ok(RegisterResult {
        user_id: user.id(),
        email: user.email().clone(),
    })
}
