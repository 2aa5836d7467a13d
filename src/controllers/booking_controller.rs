//! Test-drive booking flow

use uuid::Uuid;

use crate::dto::booking_dto::{
    AdminBookingsParams, BookTestDriveRequest, BookingResponse, UpdateBookingStatusRequest,
};
use crate::middleware::auth::require_admin;
use crate::models::{BookingStatus, CarStatus, User};
use crate::repositories::booking_repository::BookingRepository;
use crate::repositories::car_repository::CarRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_time_string;

pub struct BookingController {
    cars: CarRepository,
    bookings: BookingRepository,
}

impl BookingController {
    pub fn new(state: &AppState) -> Self {
        Self {
            cars: CarRepository::new(state.pool.clone()),
            bookings: BookingRepository::new(state.pool.clone()),
        }
    }

    pub async fn book(
        &self,
        user: &User,
        request: BookTestDriveRequest,
    ) -> Result<BookingResponse, AppError> {
        validate_time_string("startTime", &request.start_time)?;
        validate_time_string("endTime", &request.end_time)?;

        let car = self
            .cars
            .find_by_id(request.car_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        if car.status != CarStatus::Available {
            return Err(AppError::BadRequest(
                "Car is not available for test drives".to_string(),
            ));
        }

        if self.bookings.has_open_booking(user.id, car.id).await? {
            return Err(AppError::Conflict(
                "You already have an open test drive for this car".to_string(),
            ));
        }

        let booking = self
            .bookings
            .create(
                user.id,
                car.id,
                request.booking_date,
                &request.start_time,
                &request.end_time,
                request.notes.as_deref(),
            )
            .await?;

        tracing::info!("User {} booked a test drive for car {}", user.id, car.id);
        Ok(BookingResponse::from(&booking))
    }

    pub async fn list_for_user(&self, user: &User) -> Result<Vec<BookingResponse>, AppError> {
        let bookings = self.bookings.list_for_user(user.id).await?;
        Ok(bookings.iter().map(BookingResponse::from).collect())
    }

    /// Cancellation by the owner or an admin. Cancelling an already
    /// cancelled booking is a no-op success; completed test drives can
    /// no longer be cancelled.
    pub async fn cancel(&self, user: &User, booking_id: Uuid) -> Result<BookingResponse, AppError> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        if booking.user_id != user.id && !user.is_admin() {
            return Err(AppError::Forbidden(
                "You cannot cancel someone else's booking".to_string(),
            ));
        }

        match booking.status {
            BookingStatus::Cancelled => Ok(BookingResponse::from(&booking)),
            BookingStatus::Completed => Err(AppError::BadRequest(
                "A completed test drive cannot be cancelled".to_string(),
            )),
            _ => {
                let updated = self
                    .bookings
                    .update_status(booking.id, BookingStatus::Cancelled)
                    .await?;
                Ok(BookingResponse::from(&updated))
            }
        }
    }

    pub async fn admin_list(
        &self,
        admin: &User,
        params: AdminBookingsParams,
    ) -> Result<Vec<BookingResponse>, AppError> {
        require_admin(admin)?;
        let bookings = self.bookings.list_all(params.status).await?;
        Ok(bookings.iter().map(BookingResponse::from).collect())
    }

    pub async fn admin_update_status(
        &self,
        admin: &User,
        booking_id: Uuid,
        request: UpdateBookingStatusRequest,
    ) -> Result<BookingResponse, AppError> {
        require_admin(admin)?;
        let booking = self.bookings.update_status(booking_id, request.status).await?;
        Ok(BookingResponse::from(&booking))
    }
}
