//! IntegraUPT authentication service.
//!
//! Hexagonal layout: `domain` holds the user model, `application` the
//! register/login use cases and the ports they need, `infrastructure` the
//! Postgres, AES-GCM and axum adapters.

pub mod domain;
pub mod application;
pub mod infrastructure;
