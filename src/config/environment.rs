//! Environment configuration
//!
//! All knobs come from environment variables (loaded from `.env` in
//! `main`). Defaults are development-friendly; production deployments
//! are expected to set every variable explicitly.

use std::env;

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    /// Secret used to verify the external auth provider's tokens
    pub auth_jwt_secret: String,
    pub cors_origins: Vec<String>,
    /// Image-recognition AI key; the ai-scan endpoint fails with a
    /// structured error when unset
    pub gemini_api_key: Option<String>,
    /// Object-store base URL and service key; image upload/cleanup fail
    /// with a structured error when unset
    pub storage_url: Option<String>,
    pub storage_service_key: Option<String>,
    pub storage_bucket: String,
    /// Preserve the historical "newest sorts by price descending"
    /// behavior instead of the corrected creation-time ordering
    pub legacy_newest_sort: bool,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            auth_jwt_secret: env::var("AUTH_JWT_SECRET")
                .unwrap_or_else(|_| "dev-only-secret".to_string()),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|v| v.split(',').map(|s| s.trim().to_string()).collect())
                .unwrap_or_default(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            storage_url: env::var("SUPABASE_URL").ok(),
            storage_service_key: env::var("SUPABASE_SERVICE_ROLE_KEY").ok(),
            storage_bucket: env::var("STORAGE_BUCKET")
                .unwrap_or_else(|_| "car-images".to_string()),
            legacy_newest_sort: env::var("LEGACY_NEWEST_SORT")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

impl EnvironmentConfig {
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
