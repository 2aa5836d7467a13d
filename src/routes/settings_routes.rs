//! Public dealership info

use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::settings_controller::SettingsController;
use crate::dto::settings_dto::DealershipResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_settings_router() -> Router<AppState> {
    Router::new().route("/dealership", get(get_dealership))
}

async fn get_dealership(
    State(state): State<AppState>,
) -> Result<Json<DealershipResponse>, AppError> {
    let controller = SettingsController::new(&state);
    let response = controller.get_dealership().await?;
    Ok(Json(response))
}
