//! Shared utilities: error types, JWT verification, validation helpers

pub mod errors;
pub mod jwt;
pub mod validation;
