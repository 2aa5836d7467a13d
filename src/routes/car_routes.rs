//! Public car browsing routes

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::car_controller::{CarController, CarDetailResponse};
use crate::controllers::wishlist_controller::WishlistController;
use crate::dto::car_dto::{
    CarFacets, CarResponse, FeaturedCarsParams, SearchCarsParams, SearchCarsResponse,
    ToggleWishlistResponse,
};
use crate::middleware::auth::{AuthUser, OptionalAuthUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_car_router() -> Router<AppState> {
    Router::new()
        .route("/", get(search_cars))
        .route("/facets", get(get_facets))
        .route("/featured", get(get_featured_cars))
        .route("/:id", get(get_car_detail))
        .route("/:id/wishlist", post(toggle_wishlist))
}

async fn search_cars(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    Query(params): Query<SearchCarsParams>,
) -> Result<Json<SearchCarsResponse>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.search(params, user.as_ref()).await?;
    Ok(Json(response))
}

async fn get_facets(State(state): State<AppState>) -> Result<Json<CarFacets>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.facets().await?;
    Ok(Json(response))
}

async fn get_featured_cars(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    Query(params): Query<FeaturedCarsParams>,
) -> Result<Json<Vec<CarResponse>>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.featured(params, user.as_ref()).await?;
    Ok(Json(response))
}

async fn get_car_detail(
    State(state): State<AppState>,
    OptionalAuthUser(user): OptionalAuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<CarDetailResponse>, AppError> {
    let controller = CarController::new(&state);
    let response = controller.detail(id, user.as_ref()).await?;
    Ok(Json(response))
}

async fn toggle_wishlist(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleWishlistResponse>, AppError> {
    let controller = WishlistController::new(&state);
    let response = controller.toggle(&user, id).await?;
    Ok(Json(response))
}
