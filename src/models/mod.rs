//! Database models
//!
//! Each struct maps exactly to one table; enums map to Postgres enum
//! types declared in the migrations.

pub mod booking;
pub mod car;
pub mod dealership;
pub mod user;

pub use booking::{BookingStatus, TestDriveBooking};
pub use car::{Car, CarStatus};
pub use dealership::{DayOfWeek, DealershipInfo, WorkingHour};
pub use user::{User, UserRole};
