//! Validation helpers shared by controllers

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::errors::AppError;

lazy_static! {
    static ref TIME_RE: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();
}

/// Validate a 24h "HH:MM" time string (working hours, booking slots)
pub fn validate_time_string(field: &str, value: &str) -> Result<(), AppError> {
    if TIME_RE.is_match(value) {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{} must be a time in HH:MM format, got '{}'",
            field, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_format() {
        assert!(validate_time_string("openTime", "09:00").is_ok());
        assert!(validate_time_string("openTime", "23:59").is_ok());
        assert!(validate_time_string("openTime", "24:00").is_err());
        assert!(validate_time_string("openTime", "9:00").is_err());
        assert!(validate_time_string("openTime", "09:60").is_err());
        assert!(validate_time_string("openTime", "morning").is_err());
    }
}
