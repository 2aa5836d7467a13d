//! Shared application state passed through the axum router

use reqwest::Client;
use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::dto::car_dto::NewestSortMode;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub http_client: Client,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig) -> Self {
        Self {
            pool,
            config,
            http_client: Client::new(),
        }
    }

    pub fn newest_sort_mode(&self) -> NewestSortMode {
        if self.config.legacy_newest_sort {
            NewestSortMode::LegacyPriceDesc
        } else {
            NewestSortMode::CreatedAt
        }
    }
}
