//! Dealership info and working hours
//!
//! A single dealership row owns seven working-hour rows, one per day
//! of week. The row is auto-created with default hours on first access.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "day_of_week", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
        DayOfWeek::Sunday,
    ];

    /// Monday-first ordering used when serializing the week
    pub fn sort_key(&self) -> u8 {
        match self {
            DayOfWeek::Monday => 0,
            DayOfWeek::Tuesday => 1,
            DayOfWeek::Wednesday => 2,
            DayOfWeek::Thursday => 3,
            DayOfWeek::Friday => 4,
            DayOfWeek::Saturday => 5,
            DayOfWeek::Sunday => 6,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct DealershipInfo {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow)]
pub struct WorkingHour {
    pub id: Uuid,
    pub dealership_id: Uuid,
    pub day_of_week: DayOfWeek,
    pub open_time: String,
    pub close_time: String,
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Seed values for a freshly created dealership row
#[derive(Debug, Clone)]
pub struct DefaultHours {
    pub day_of_week: DayOfWeek,
    pub open_time: &'static str,
    pub close_time: &'static str,
    pub is_open: bool,
}

/// Default schedule: 09:00-18:00 every day, closed on Sunday
pub fn default_week() -> Vec<DefaultHours> {
    DayOfWeek::ALL
        .iter()
        .map(|day| DefaultHours {
            day_of_week: *day,
            open_time: "09:00",
            close_time: "18:00",
            is_open: !matches!(day, DayOfWeek::Sunday),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_week_has_one_entry_per_day() {
        let week = default_week();
        assert_eq!(week.len(), 7);
        for day in DayOfWeek::ALL {
            assert_eq!(
                week.iter().filter(|h| h.day_of_week == day).count(),
                1,
                "expected exactly one entry for {:?}",
                day
            );
        }
    }

    #[test]
    fn test_default_week_closed_on_sunday_only() {
        let week = default_week();
        for hours in &week {
            let expected_open = hours.day_of_week != DayOfWeek::Sunday;
            assert_eq!(hours.is_open, expected_open);
            assert_eq!(hours.open_time, "09:00");
            assert_eq!(hours.close_time, "18:00");
        }
    }

    #[test]
    fn test_sort_key_is_monday_first() {
        let mut keys: Vec<u8> = DayOfWeek::ALL.iter().map(|d| d.sort_key()).collect();
        keys.sort();
        assert_eq!(keys, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(DayOfWeek::Monday.sort_key(), 0);
        assert_eq!(DayOfWeek::Sunday.sort_key(), 6);
    }
}
