//! Routes for the signed-in user's own data

use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::booking_controller::BookingController;
use crate::controllers::wishlist_controller::WishlistController;
use crate::dto::booking_dto::BookingResponse;
use crate::dto::car_dto::CarResponse;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/wishlist", get(get_saved_cars))
        .route("/bookings", get(get_user_bookings))
}

async fn get_saved_cars(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = WishlistController::new(&state);
    let response = controller.saved_cars(&user).await?;
    Ok(Json(response))
}

async fn get_user_bookings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.list_for_user(&user).await?;
    Ok(Json(response))
}
