//! Wishlist storage access
//!
//! Membership for a page of listings is resolved with one bulk query
//! (`car_id = ANY($ids)`), never one query per row.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Car;
use crate::utils::errors::AppError;

const UNIQUE_VIOLATION: &str = "23505";

/// A duplicate-key failure from the (user_id, car_id) constraint; the
/// only error a racing toggle can produce on insert.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err)
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION))
}

pub struct WishlistRepository {
    pool: PgPool,
}

impl WishlistRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bulk membership lookup for the ids on the current page.
    pub async fn saved_ids_for(
        &self,
        user_id: Uuid,
        car_ids: &[Uuid],
    ) -> Result<HashSet<Uuid>, AppError> {
        if car_ids.is_empty() {
            return Ok(HashSet::new());
        }

        let ids: Vec<Uuid> = sqlx::query_scalar(
            "SELECT car_id FROM user_saved_cars WHERE user_id = $1 AND car_id = ANY($2)",
        )
        .bind(user_id)
        .bind(car_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids.into_iter().collect())
    }

    /// Single existence check for the detail view.
    pub async fn is_saved(&self, user_id: Uuid, car_id: Uuid) -> Result<bool, AppError> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM user_saved_cars WHERE user_id = $1 AND car_id = $2)",
        )
        .bind(user_id)
        .bind(car_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists.0)
    }

    /// True toggle: an existing entry is removed (`false`), otherwise one
    /// is created (`true`). A unique violation from a racing toggle means
    /// another request created the entry first, so the pair is saved.
    pub async fn toggle(&self, user_id: Uuid, car_id: Uuid) -> Result<bool, AppError> {
        let removed = sqlx::query(
            "DELETE FROM user_saved_cars WHERE user_id = $1 AND car_id = $2",
        )
        .bind(user_id)
        .bind(car_id)
        .execute(&self.pool)
        .await?;

        if removed.rows_affected() > 0 {
            return Ok(false);
        }

        let insert = sqlx::query(
            "INSERT INTO user_saved_cars (id, user_id, car_id, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(car_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await;

        match insert {
            Ok(_) => Ok(true),
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!(
                    "Racing wishlist toggle for user {} car {}, treating as saved",
                    user_id,
                    car_id
                );
                Ok(true)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The user's saved cars, most recently saved first.
    pub async fn saved_cars(&self, user_id: Uuid) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            r#"
            SELECT c.* FROM cars c
            JOIN user_saved_cars s ON s.car_id = c.id
            WHERE s.user_id = $1
            ORDER BY s.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;

    #[derive(Debug)]
    struct DuplicateKeyError;

    impl std::fmt::Display for DuplicateKeyError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for DuplicateKeyError {}

    impl DatabaseError for DuplicateKeyError {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed("23505"))
        }

        fn kind(&self) -> ErrorKind {
            ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn test_racing_insert_is_classified_as_unique_violation() {
        let err = sqlx::Error::Database(Box::new(DuplicateKeyError));
        assert!(is_unique_violation(&err));
    }

    #[test]
    fn test_other_errors_are_not_unique_violations() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation(&sqlx::Error::PoolClosed));
    }
}
