use std::path::PathBuf;

use crate::session::SessionStore;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub api_url: String,
    pub session_file: PathBuf,
}

impl PortalConfig {
    /// `INTEGRAUPT_API_URL` and `INTEGRAUPT_SESSION_FILE`, with defaults.
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("INTEGRAUPT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            session_file: std::env::var_os("INTEGRAUPT_SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(SessionStore::default_path),
        }
    }
}
