// Infrastructure layer - external concerns (database, crypto, HTTP)
// Implements interfaces defined in application layer

use std::sync::Arc;
use crate::application::ports::{PasswordCipher, UserRepository};

pub mod config;
pub mod driven;    // Output adapters (repositories, crypto)
pub mod driving;   // Input adapters (HTTP)

#[derive(Clone)]
pub struct AppState {
    pub user_repo: Arc<dyn UserRepository>,
    pub cipher: Arc<dyn PasswordCipher>,
}
