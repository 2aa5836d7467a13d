//! Dealership info storage access
//!
//! The dealership row is a singleton by convention: readers take the
//! oldest row, and the first access seeds it with default hours. Two
//! concurrent first-accesses may both insert; both then converge on
//! the oldest row, so the race is benign.

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::settings_dto::WorkingHourInput;
use crate::models::dealership::default_week;
use crate::models::{DealershipInfo, WorkingHour};
use crate::utils::errors::AppError;

const DEFAULT_NAME: &str = "Vehiql Motors";
const DEFAULT_ADDRESS: &str = "123 Main Street, Springfield, CA 94105";
const DEFAULT_PHONE: &str = "+1 (555) 123-4567";
const DEFAULT_EMAIL: &str = "contact@vehiql.com";

pub struct DealershipRepository {
    pool: PgPool,
}

impl DealershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_first(&self) -> Result<Option<DealershipInfo>, AppError> {
        let dealership = sqlx::query_as::<_, DealershipInfo>(
            "SELECT * FROM dealership_info ORDER BY created_at ASC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(dealership)
    }

    async fn hours_for(&self, dealership_id: Uuid) -> Result<Vec<WorkingHour>, AppError> {
        let mut hours = sqlx::query_as::<_, WorkingHour>(
            "SELECT * FROM working_hours WHERE dealership_id = $1",
        )
        .bind(dealership_id)
        .fetch_all(&self.pool)
        .await?;

        hours.sort_by_key(|h| h.day_of_week.sort_key());
        Ok(hours)
    }

    /// Idempotent get-or-create: returns the singleton dealership and its
    /// seven working-hour rows, seeding defaults on first access.
    pub async fn get_or_create(&self) -> Result<(DealershipInfo, Vec<WorkingHour>), AppError> {
        if let Some(dealership) = self.find_first().await? {
            let hours = self.hours_for(dealership.id).await?;
            return Ok((dealership, hours));
        }

        tracing::info!("No dealership record found, seeding default hours");

        let mut tx = self.pool.begin().await?;
        let dealership_id = Uuid::new_v4();

        sqlx::query(
            r#"
            INSERT INTO dealership_info (id, name, address, phone, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            "#,
        )
        .bind(dealership_id)
        .bind(DEFAULT_NAME)
        .bind(DEFAULT_ADDRESS)
        .bind(DEFAULT_PHONE)
        .bind(DEFAULT_EMAIL)
        .execute(&mut *tx)
        .await?;

        for hour in default_week() {
            sqlx::query(
                r#"
                INSERT INTO working_hours
                    (id, dealership_id, day_of_week, open_time, close_time, is_open,
                     created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(dealership_id)
            .bind(hour.day_of_week)
            .bind(hour.open_time)
            .bind(hour.close_time)
            .bind(hour.is_open)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        // re-read the oldest row so concurrent first-accesses converge
        // on one winner
        let dealership = self
            .find_first()
            .await?
            .ok_or_else(|| AppError::Internal("Dealership missing after create".to_string()))?;
        let hours = self.hours_for(dealership.id).await?;

        Ok((dealership, hours))
    }

    /// Replace the full week of working hours in one transaction.
    pub async fn replace_hours(
        &self,
        dealership_id: Uuid,
        hours: &[WorkingHourInput],
    ) -> Result<Vec<WorkingHour>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM working_hours WHERE dealership_id = $1")
            .bind(dealership_id)
            .execute(&mut *tx)
            .await?;

        for hour in hours {
            sqlx::query(
                r#"
                INSERT INTO working_hours
                    (id, dealership_id, day_of_week, open_time, close_time, is_open,
                     created_at, updated_at)
                VALUES ($1, $2, $3, $4, $5, $6, NOW(), NOW())
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(dealership_id)
            .bind(hour.day_of_week)
            .bind(&hour.open_time)
            .bind(&hour.close_time)
            .bind(hour.is_open)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        self.hours_for(dealership_id).await
    }
}
