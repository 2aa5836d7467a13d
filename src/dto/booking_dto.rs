//! Test-drive booking DTOs

use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{BookingStatus, TestDriveBooking};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookTestDriveRequest {
    pub car_id: Uuid,
    pub booking_date: NaiveDate,
    pub start_time: String,
    pub end_time: String,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: Uuid,
    pub car_id: Uuid,
    pub user_id: Uuid,
    pub booking_date: String,
    pub start_time: String,
    pub end_time: String,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&TestDriveBooking> for BookingResponse {
    fn from(booking: &TestDriveBooking) -> Self {
        Self {
            id: booking.id,
            car_id: booking.car_id,
            user_id: booking.user_id,
            booking_date: booking.booking_date.format("%Y-%m-%d").to_string(),
            start_time: booking.start_time.clone(),
            end_time: booking.end_time.clone(),
            status: booking.status,
            notes: booking.notes.clone(),
            created_at: booking
                .created_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: booking
                .updated_at
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// The caller's current booking as surfaced by the detail view:
/// id, status and date only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTestDrive {
    pub id: Uuid,
    pub status: BookingStatus,
    pub booking_date: String,
}

impl From<&TestDriveBooking> for UserTestDrive {
    fn from(booking: &TestDriveBooking) -> Self {
        Self {
            id: booking.id,
            status: booking.status,
            booking_date: booking.booking_date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminBookingsParams {
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
}
