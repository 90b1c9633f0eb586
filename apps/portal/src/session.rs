//! The signed-in user, kept on disk between runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::LoginMode;

use crate::error::PortalError;

/// Identity held client-side after a successful login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    pub id: i64,
    pub email: String,
    pub login_type: LoginMode,
    pub role: String,
    /// What the user typed: student code or admin username
    pub identifier: String,
}

impl AuthenticatedUser {
    pub fn new(id: i64, email: String, login_type: LoginMode, identifier: String) -> Self {
        Self {
            id,
            email,
            login_type,
            role: login_type.role().to_string(),
            identifier,
        }
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/integraupt/session.json`, or the working directory when
    /// the platform has no config dir.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .map(|dir| dir.join("integraupt"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("session.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Restores the saved user. A file that can't be parsed is deleted.
    pub fn load(&self) -> Option<AuthenticatedUser> {
        match self.read() {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unreadable session");
                if let Err(e) = self.clear() {
                    tracing::warn!(error = %e, "failed to remove session file");
                }
                None
            }
        }
    }

    fn read(&self) -> Result<Option<AuthenticatedUser>, PortalError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    pub fn save(&self, user: &AuthenticatedUser) -> Result<(), PortalError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(user)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), PortalError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
