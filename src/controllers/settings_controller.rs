//! Dealership settings and user administration

use std::collections::HashSet;

use uuid::Uuid;

use crate::dto::settings_dto::{DealershipResponse, SaveWorkingHoursRequest, WorkingHourInput};
use crate::dto::user_dto::{UpdateUserRoleRequest, UserResponse};
use crate::middleware::auth::require_admin;
use crate::models::{DayOfWeek, User};
use crate::repositories::dealership_repository::DealershipRepository;
use crate::repositories::user_repository::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::validation::validate_time_string;

/// The payload must cover the week: exactly one entry per day.
fn validate_week(hours: &[WorkingHourInput]) -> Result<(), AppError> {
    if hours.len() != 7 {
        return Err(AppError::BadRequest(format!(
            "workingHours must contain exactly 7 entries, got {}",
            hours.len()
        )));
    }

    let days: HashSet<DayOfWeek> = hours.iter().map(|h| h.day_of_week).collect();
    if days.len() != 7 {
        return Err(AppError::BadRequest(
            "workingHours must contain exactly one entry per day of week".to_string(),
        ));
    }

    for hour in hours {
        validate_time_string("openTime", &hour.open_time)?;
        validate_time_string("closeTime", &hour.close_time)?;
    }

    Ok(())
}

pub struct SettingsController {
    dealership: DealershipRepository,
    users: UserRepository,
}

impl SettingsController {
    pub fn new(state: &AppState) -> Self {
        Self {
            dealership: DealershipRepository::new(state.pool.clone()),
            users: UserRepository::new(state.pool.clone()),
        }
    }

    /// Public dealership info, auto-created with default hours.
    pub async fn get_dealership(&self) -> Result<DealershipResponse, AppError> {
        let (dealership, hours) = self.dealership.get_or_create().await?;
        Ok(DealershipResponse::from_parts(&dealership, &hours))
    }

    pub async fn save_working_hours(
        &self,
        admin: &User,
        request: SaveWorkingHoursRequest,
    ) -> Result<DealershipResponse, AppError> {
        require_admin(admin)?;
        validate_week(&request.working_hours)?;

        let (dealership, _) = self.dealership.get_or_create().await?;
        let hours = self
            .dealership
            .replace_hours(dealership.id, &request.working_hours)
            .await?;

        tracing::info!("Admin {} updated dealership working hours", admin.id);
        Ok(DealershipResponse::from_parts(&dealership, &hours))
    }

    pub async fn list_users(&self, admin: &User) -> Result<Vec<UserResponse>, AppError> {
        require_admin(admin)?;
        let users = self.users.list_all().await?;
        Ok(users.iter().map(UserResponse::from).collect())
    }

    pub async fn update_user_role(
        &self,
        admin: &User,
        user_id: Uuid,
        request: UpdateUserRoleRequest,
    ) -> Result<UserResponse, AppError> {
        require_admin(admin)?;
        let user = self.users.update_role(user_id, request.role).await?;
        tracing::info!("Admin {} set role {:?} for user {}", admin.id, user.role, user.id);
        Ok(UserResponse::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_week() -> Vec<WorkingHourInput> {
        DayOfWeek::ALL
            .iter()
            .map(|day| WorkingHourInput {
                day_of_week: *day,
                open_time: "09:00".to_string(),
                close_time: "18:00".to_string(),
                is_open: true,
            })
            .collect()
    }

    #[test]
    fn test_validate_week_accepts_full_week() {
        assert!(validate_week(&full_week()).is_ok());
    }

    #[test]
    fn test_validate_week_rejects_missing_day() {
        let mut week = full_week();
        week.pop();
        assert!(validate_week(&week).is_err());
    }

    #[test]
    fn test_validate_week_rejects_duplicate_day() {
        let mut week = full_week();
        week[6].day_of_week = DayOfWeek::Monday;
        assert!(validate_week(&week).is_err());
    }

    #[test]
    fn test_validate_week_rejects_bad_time() {
        let mut week = full_week();
        week[0].open_time = "9am".to_string();
        assert!(validate_week(&week).is_err());
    }
}
