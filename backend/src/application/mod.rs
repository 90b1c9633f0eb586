// Application layer - use cases
// Orchestrates domain logic, depends on domain layer only

pub mod auth;
pub mod error;
pub mod ports;

pub use error::ApplicationError;
