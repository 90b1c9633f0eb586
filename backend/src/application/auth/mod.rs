// Email + password authentication use cases

pub mod commands;
