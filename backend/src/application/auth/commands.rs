// Auth commands

pub mod register;
pub mod login;
