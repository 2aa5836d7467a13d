//! Wishlist toggling and the saved-cars list

use uuid::Uuid;

use crate::dto::car_dto::{CarResponse, ToggleWishlistResponse};
use crate::models::User;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::wishlist_repository::WishlistRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub struct WishlistController {
    cars: CarRepository,
    wishlist: WishlistRepository,
}

impl WishlistController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cars: CarRepository::new(state.pool.clone()),
            wishlist: WishlistRepository::new(state.pool.clone()),
        }
    }

    pub async fn toggle(
        &self,
        user: &User,
        car_id: Uuid,
    ) -> Result<ToggleWishlistResponse, AppError> {
        self.cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let saved = self.wishlist.toggle(user.id, car_id).await?;
        tracing::info!(
            "User {} {} car {}",
            user.id,
            if saved { "saved" } else { "unsaved" },
            car_id
        );

        Ok(ToggleWishlistResponse { saved })
    }

    pub async fn saved_cars(&self, user: &User) -> Result<Vec<CarResponse>, AppError> {
        let cars = self.wishlist.saved_cars(user.id).await?;
        Ok(cars.iter().map(|c| CarResponse::from_car(c, true)).collect())
    }
}
