//! Request middleware: authentication extractors and CORS

pub mod auth;
pub mod cors;
