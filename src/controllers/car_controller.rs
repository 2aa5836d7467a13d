//! Public car browsing: search, facets, featured, detail
//!
//! Search composes the query engine with the wishlist annotator: the
//! page of rows is fetched first, then one bulk membership lookup marks
//! the caller's saved cars. Anonymous requests skip the lookup entirely.

use std::collections::HashSet;

use serde::Serialize;
use uuid::Uuid;

use crate::dto::booking_dto::UserTestDrive;
use crate::dto::car_dto::{
    page_count, CarFacets, CarFilters, CarResponse, FeaturedCarsParams, NewestSortMode,
    SearchCarsParams, SearchCarsResponse,
};
use crate::dto::settings_dto::DealershipResponse;
use crate::models::{Car, User};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::car_repository::CarRepository;
use crate::repositories::dealership_repository::DealershipRepository;
use crate::repositories::wishlist_repository::WishlistRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Booking/dealership context layered onto the detail view
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestDriveInfo {
    pub user_test_drive: Option<UserTestDrive>,
    pub dealership: DealershipResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDetailResponse {
    #[serde(flatten)]
    pub car: CarResponse,
    pub test_drive_info: TestDriveInfo,
}

/// Set each row's `wishlisted` flag from the membership set.
pub fn apply_wishlist_flags(items: &mut [CarResponse], saved: &HashSet<Uuid>) {
    for item in items {
        item.wishlisted = saved.contains(&item.id);
    }
}

pub struct CarController {
    cars: CarRepository,
    wishlist: WishlistRepository,
    bookings: BookingRepository,
    dealership: DealershipRepository,
    newest_mode: NewestSortMode,
}

impl CarController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cars: CarRepository::new(state.pool.clone()),
            wishlist: WishlistRepository::new(state.pool.clone()),
            bookings: BookingRepository::new(state.pool.clone()),
            dealership: DealershipRepository::new(state.pool.clone()),
            newest_mode: state.newest_sort_mode(),
        }
    }

    pub async fn search(
        &self,
        params: SearchCarsParams,
        user: Option<&User>,
    ) -> Result<SearchCarsResponse, AppError> {
        let filters = CarFilters::from_params(params);
        let page = self.cars.search(&filters, self.newest_mode).await?;

        let items = self.annotate(&page.cars, user).await?;

        Ok(SearchCarsResponse {
            total: page.total,
            page: filters.page,
            page_size: filters.page_size,
            page_count: page_count(page.total, filters.page_size),
            items,
        })
    }

    pub async fn facets(&self) -> Result<CarFacets, AppError> {
        self.cars.facets().await
    }

    pub async fn featured(
        &self,
        params: FeaturedCarsParams,
        user: Option<&User>,
    ) -> Result<Vec<CarResponse>, AppError> {
        let cars = self.cars.featured(params.limit()).await?;
        self.annotate(&cars, user).await
    }

    pub async fn detail(
        &self,
        car_id: Uuid,
        user: Option<&User>,
    ) -> Result<CarDetailResponse, AppError> {
        let car = self
            .cars
            .find_by_id(car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let (wishlisted, user_test_drive) = match user {
            Some(user) => {
                let wishlisted = self.wishlist.is_saved(user.id, car.id).await?;
                let booking = self.bookings.latest_active_for(user.id, car.id).await?;
                (wishlisted, booking.as_ref().map(UserTestDrive::from))
            }
            None => (false, None),
        };

        let (dealership, hours) = self.dealership.get_or_create().await?;

        Ok(CarDetailResponse {
            car: CarResponse::from_car(&car, wishlisted),
            test_drive_info: TestDriveInfo {
                user_test_drive,
                dealership: DealershipResponse::from_parts(&dealership, &hours),
            },
        })
    }

    /// Serialize a batch of rows and mark the caller's saved cars with
    /// a single membership lookup. Anonymous callers get `false` flags
    /// without touching storage.
    async fn annotate(
        &self,
        cars: &[Car],
        user: Option<&User>,
    ) -> Result<Vec<CarResponse>, AppError> {
        let mut items: Vec<CarResponse> =
            cars.iter().map(|c| CarResponse::from_car(c, false)).collect();

        if let Some(user) = user {
            let ids: Vec<Uuid> = cars.iter().map(|c| c.id).collect();
            let saved = self.wishlist.saved_ids_for(user.id, &ids).await?;
            apply_wishlist_flags(&mut items, &saved);
        }

        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CarStatus;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn response_with_id(id: Uuid) -> CarResponse {
        let car = Car {
            id,
            make: "Kia".to_string(),
            model: "Sportage".to_string(),
            year: 2021,
            price: Decimal::new(18000, 0),
            mileage: 30000,
            color: "White".to_string(),
            fuel_type: "Hybrid".to_string(),
            transmission: "Automatic".to_string(),
            body_type: "SUV".to_string(),
            seats: Some(5),
            description: String::new(),
            images: vec![],
            status: CarStatus::Available,
            featured: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        CarResponse::from_car(&car, false)
    }

    #[test]
    fn test_apply_wishlist_flags_marks_members_only() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let mut items = vec![response_with_id(a), response_with_id(b), response_with_id(c)];

        let saved: HashSet<Uuid> = [a, c].into_iter().collect();
        apply_wishlist_flags(&mut items, &saved);

        assert!(items[0].wishlisted);
        assert!(!items[1].wishlisted);
        assert!(items[2].wishlisted);
    }

    #[test]
    fn test_apply_wishlist_flags_with_empty_set() {
        let mut items = vec![response_with_id(Uuid::new_v4())];
        apply_wishlist_flags(&mut items, &HashSet::new());
        assert!(!items[0].wishlisted);
    }
}
