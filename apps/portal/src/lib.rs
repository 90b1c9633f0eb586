mod app;
pub mod captcha;
pub mod client;
pub mod config;
pub mod error;
pub mod screen;
pub mod session;

pub use app::PortalApp;
pub use client::AuthClient;
pub use config::PortalConfig;
pub use error::PortalError;
pub use screen::{LoginState, Screen, Submission};
pub use session::{AuthenticatedUser, SessionStore};
