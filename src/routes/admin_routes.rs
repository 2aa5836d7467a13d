//! Admin-only routes; every handler checks the caller's role

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::admin_controller::AdminController;
use crate::controllers::booking_controller::BookingController;
use crate::controllers::settings_controller::SettingsController;
use crate::dto::ai_dto::{AiScanRequest, AiScanResponse};
use crate::dto::booking_dto::{AdminBookingsParams, BookingResponse, UpdateBookingStatusRequest};
use crate::dto::car_dto::{
    AddCarRequest, AdminCarsParams, CarResponse, DeleteCarResponse, UpdateCarRequest,
};
use crate::dto::settings_dto::{DealershipResponse, SaveWorkingHoursRequest};
use crate::dto::user_dto::{UpdateUserRoleRequest, UserResponse};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/cars", get(list_cars).post(add_car))
        .route("/cars/ai-scan", post(scan_car_image))
        .route("/cars/:id", patch(update_car).delete(delete_car))
        .route("/bookings", get(list_bookings))
        .route("/bookings/:id", patch(update_booking_status))
        .route("/settings/hours", put(save_working_hours))
        .route("/users", get(list_users))
        .route("/users/:id/role", patch(update_user_role))
}

async fn list_cars(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<AdminCarsParams>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.list_cars(&user, params).await?;
    Ok(Json(response))
}

async fn add_car(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<AddCarRequest>,
) -> Result<Json<CarResponse>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.add_car(&user, request).await?;
    Ok(Json(response))
}

async fn scan_car_image(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<AiScanRequest>,
) -> Result<Json<AiScanResponse>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.scan_car_image(&user, request).await?;
    Ok(Json(response))
}

async fn update_car(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCarRequest>,
) -> Result<Json<CarResponse>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.update_car(&user, id, request).await?;
    Ok(Json(response))
}

async fn delete_car(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteCarResponse>, AppError> {
    let controller = AdminController::new(&state);
    let response = controller.delete_car(&user, id).await?;
    Ok(Json(response))
}

async fn list_bookings(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<AdminBookingsParams>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.admin_list(&user, params).await?;
    Ok(Json(response))
}

async fn update_booking_status(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let controller = BookingController::new(&state);
    let response = controller.admin_update_status(&user, id, request).await?;
    Ok(Json(response))
}

async fn save_working_hours(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(request): Json<SaveWorkingHoursRequest>,
) -> Result<Json<DealershipResponse>, AppError> {
    let controller = SettingsController::new(&state);
    let response = controller.save_working_hours(&user, request).await?;
    Ok(Json(response))
}

async fn list_users(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let controller = SettingsController::new(&state);
    let response = controller.list_users(&user).await?;
    Ok(Json(response))
}

async fn update_user_role(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateUserRoleRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let controller = SettingsController::new(&state);
    let response = controller.update_user_role(&user, id, request).await?;
    Ok(Json(response))
}
