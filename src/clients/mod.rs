//! Thin clients for external collaborators (AI, object storage)

pub mod gemini_client;
pub mod storage_client;
