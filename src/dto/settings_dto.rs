//! Dealership settings DTOs

use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{DayOfWeek, DealershipInfo, WorkingHour};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHourInput {
    pub day_of_week: DayOfWeek,
    pub open_time: String,
    pub close_time: String,
    pub is_open: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveWorkingHoursRequest {
    pub working_hours: Vec<WorkingHourInput>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHourResponse {
    pub id: Uuid,
    pub day_of_week: DayOfWeek,
    pub open_time: String,
    pub close_time: String,
    pub is_open: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&WorkingHour> for WorkingHourResponse {
    fn from(hour: &WorkingHour) -> Self {
        Self {
            id: hour.id,
            day_of_week: hour.day_of_week,
            open_time: hour.open_time.clone(),
            close_time: hour.close_time.clone(),
            is_open: hour.is_open,
            created_at: hour.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: hour.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DealershipResponse {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub working_hours: Vec<WorkingHourResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl DealershipResponse {
    /// Day entries are emitted Monday-first regardless of row order.
    pub fn from_parts(dealership: &DealershipInfo, hours: &[WorkingHour]) -> Self {
        let mut sorted: Vec<&WorkingHour> = hours.iter().collect();
        sorted.sort_by_key(|h| h.day_of_week.sort_key());

        Self {
            id: dealership.id,
            name: dealership.name.clone(),
            address: dealership.address.clone(),
            phone: dealership.phone.clone(),
            email: dealership.email.clone(),
            working_hours: sorted.into_iter().map(WorkingHourResponse::from).collect(),
            created_at: dealership
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: dealership
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
