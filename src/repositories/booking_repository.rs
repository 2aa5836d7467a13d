//! Test-drive booking storage access

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BookingStatus, TestDriveBooking};
use crate::utils::errors::AppError;

pub struct BookingRepository {
    pool: PgPool,
}

impl BookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent non-cancelled booking for (user, car); this is the
    /// one the detail view surfaces.
    pub async fn latest_active_for(
        &self,
        user_id: Uuid,
        car_id: Uuid,
    ) -> Result<Option<TestDriveBooking>, AppError> {
        let booking = sqlx::query_as::<_, TestDriveBooking>(
            r#"
            SELECT * FROM test_drive_bookings
            WHERE user_id = $1 AND car_id = $2
              AND status IN ('PENDING', 'CONFIRMED', 'COMPLETED')
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(car_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(booking)
    }

    /// Whether (user, car) already has a pending or confirmed booking.
    pub async fn has_open_booking(&self, user_id: Uuid, car_id: Uuid) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM test_drive_bookings
                WHERE user_id = $1 AND car_id = $2
                  AND status IN ('PENDING', 'CONFIRMED')
            )
            "#,
        )
        .bind(user_id)
        .bind(car_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        car_id: Uuid,
        booking_date: NaiveDate,
        start_time: &str,
        end_time: &str,
        notes: Option<&str>,
    ) -> Result<TestDriveBooking, AppError> {
        let booking = sqlx::query_as::<_, TestDriveBooking>(
            r#"
            INSERT INTO test_drive_bookings
                (id, user_id, car_id, booking_date, start_time, end_time, status, notes,
                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, 'PENDING', $7, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(car_id)
        .bind(booking_date)
        .bind(start_time)
        .bind(end_time)
        .bind(notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<TestDriveBooking>, AppError> {
        let booking =
            sqlx::query_as::<_, TestDriveBooking>("SELECT * FROM test_drive_bookings WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(booking)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<TestDriveBooking>, AppError> {
        let bookings = sqlx::query_as::<_, TestDriveBooking>(
            "SELECT * FROM test_drive_bookings WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn list_all(
        &self,
        status: Option<BookingStatus>,
    ) -> Result<Vec<TestDriveBooking>, AppError> {
        let bookings = match status {
            Some(status) => {
                sqlx::query_as::<_, TestDriveBooking>(
                    "SELECT * FROM test_drive_bookings WHERE status = $1 ORDER BY created_at DESC",
                )
                .bind(status)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, TestDriveBooking>(
                    "SELECT * FROM test_drive_bookings ORDER BY created_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(bookings)
    }

    pub async fn update_status(
        &self,
        id: Uuid,
        status: BookingStatus,
    ) -> Result<TestDriveBooking, AppError> {
        let booking = sqlx::query_as::<_, TestDriveBooking>(
            r#"
            UPDATE test_drive_bookings
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

        Ok(booking)
    }
}
