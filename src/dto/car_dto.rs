//! Car DTOs: wire-level search params, the typed filter structure,
//! and the serialized listing representation.
//!
//! Raw query params arrive as optional strings and are folded into
//! `CarFilters`, which enumerates every field with its default so that
//! absent, explicitly-empty and invalid values are distinguishable.
//! Invalid numeric bounds sanitize to "bound absent" instead of
//! rejecting the request.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::{Car, CarStatus};

/// Raw search parameters exactly as they arrive on the query string
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCarsParams {
    pub search: Option<String>,
    pub make: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub sort_by: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    Newest,
}

/// How the `newest` sort key is interpreted.
///
/// The upstream frontend historically ordered `newest` by price
/// descending. `CreatedAt` is the corrected behavior and the default;
/// `LegacyPriceDesc` preserves the old ordering behind a config flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewestSortMode {
    CreatedAt,
    LegacyPriceDesc,
}

/// Fully-typed filter set with every optional field and its default
#[derive(Debug, Clone, PartialEq)]
pub struct CarFilters {
    pub search: Option<String>,
    pub make: Option<String>,
    pub body_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub min_price: Decimal,
    /// `None` means unbounded: no upper-bound predicate is emitted
    pub max_price: Option<Decimal>,
    pub sort_by: SortBy,
    pub page: i64,
    pub page_size: i64,
}

impl CarFilters {
    pub const DEFAULT_PAGE_SIZE: i64 = 6;
    const MAX_PAGE_SIZE: i64 = 100;

    pub fn from_params(params: SearchCarsParams) -> Self {
        let text = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };

        let min_price = params
            .min_price
            .as_deref()
            .and_then(|s| s.trim().parse::<Decimal>().ok())
            .filter(|p| *p >= Decimal::ZERO)
            .unwrap_or(Decimal::ZERO);

        let max_price = params
            .max_price
            .as_deref()
            .and_then(|s| s.trim().parse::<Decimal>().ok())
            .filter(|p| *p >= Decimal::ZERO);

        let sort_by = match params.sort_by.as_deref() {
            Some("priceAsc") => SortBy::PriceAsc,
            Some("priceDesc") => SortBy::PriceDesc,
            _ => SortBy::Newest,
        };

        let page = params
            .page
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1);

        let page_size = params
            .page_size
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|s| (1..=Self::MAX_PAGE_SIZE).contains(s))
            .unwrap_or(Self::DEFAULT_PAGE_SIZE);

        Self {
            search: text(params.search),
            make: text(params.make),
            body_type: text(params.body_type),
            fuel_type: text(params.fuel_type),
            transmission: text(params.transmission),
            min_price,
            max_price,
            sort_by,
            page,
            page_size,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.page_size
    }
}

/// JSON-safe external representation of a listing.
///
/// Price is converted to a float and timestamps to ISO-8601 strings at
/// this boundary only; neither is used for further arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarResponse {
    pub id: Uuid,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: f64,
    pub mileage: i32,
    pub color: String,
    pub fuel_type: String,
    pub transmission: String,
    pub body_type: String,
    pub seats: Option<i32>,
    pub description: String,
    pub images: Vec<String>,
    pub status: CarStatus,
    pub featured: bool,
    pub created_at: String,
    pub updated_at: String,
    pub wishlisted: bool,
}

impl CarResponse {
    pub fn from_car(car: &Car, wishlisted: bool) -> Self {
        use chrono::SecondsFormat;
        use num_traits::ToPrimitive;

        Self {
            id: car.id,
            make: car.make.clone(),
            model: car.model.clone(),
            year: car.year,
            price: car.price.to_f64().unwrap_or(0.0),
            mileage: car.mileage,
            color: car.color.clone(),
            fuel_type: car.fuel_type.clone(),
            transmission: car.transmission.clone(),
            body_type: car.body_type.clone(),
            seats: car.seats,
            description: car.description.clone(),
            images: car.images.clone(),
            status: car.status,
            featured: car.featured,
            created_at: car.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            updated_at: car.updated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            wishlisted,
        }
    }
}

/// Paginated search envelope
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCarsResponse {
    pub items: Vec<CarResponse>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub page_count: i64,
}

/// `ceil(total / page_size)`, zero when nothing matched
pub fn page_count(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}

#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Distinct selectable values driving the filter UI
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarFacets {
    pub makes: Vec<String>,
    pub body_types: Vec<String>,
    pub fuel_types: Vec<String>,
    pub transmissions: Vec<String>,
    pub price_range: PriceRange,
}

/// Admin inventory list filter (free text across make/model/color/year)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCarsParams {
    pub search: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedCarsParams {
    pub limit: Option<String>,
}

impl FeaturedCarsParams {
    pub const DEFAULT_LIMIT: i64 = 3;

    pub fn limit(&self) -> i64 {
        self.limit
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .filter(|l| (1..=24).contains(l))
            .unwrap_or(Self::DEFAULT_LIMIT)
    }
}

/// Mirrors the CHECK constraint on the table so a bad payload fails as
/// a 400 validation error, not a storage error.
fn validate_non_negative_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(ValidationError::new("price_must_be_non_negative"));
    }
    Ok(())
}

/// Admin payload for creating a listing. Images arrive as data URLs
/// and are replaced by public object-store URLs before insert.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCarRequest {
    #[validate(length(min = 1, message = "make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub year: i32,
    #[validate(custom = "validate_non_negative_price")]
    pub price: Decimal,
    #[validate(range(min = 0))]
    pub mileage: i32,
    #[validate(length(min = 1, message = "color is required"))]
    pub color: String,
    #[validate(length(min = 1, message = "fuelType is required"))]
    pub fuel_type: String,
    #[validate(length(min = 1, message = "transmission is required"))]
    pub transmission: String,
    #[validate(length(min = 1, message = "bodyType is required"))]
    pub body_type: String,
    pub seats: Option<i32>,
    #[serde(default)]
    pub description: String,
    pub status: Option<CarStatus>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarRequest {
    pub status: Option<CarStatus>,
    pub featured: Option<bool>,
}

/// Deletion reports the primary outcome plus any secondary cleanup
/// failure; image-store cleanup never masks a successful delete.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCarResponse {
    pub deleted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleWishlistResponse {
    pub saved: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sample_car() -> Car {
        Car {
            id: Uuid::new_v4(),
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2022,
            price: Decimal::new(2049999, 2), // 20499.99
            mileage: 12000,
            color: "Blue".to_string(),
            fuel_type: "Petrol".to_string(),
            transmission: "Automatic".to_string(),
            body_type: "Sedan".to_string(),
            seats: Some(5),
            description: "Clean one-owner sedan".to_string(),
            images: vec!["https://cdn.example.com/cars/1/a.jpg".to_string()],
            status: CarStatus::Available,
            featured: false,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_filters_defaults() {
        let filters = CarFilters::from_params(SearchCarsParams::default());
        assert_eq!(filters.search, None);
        assert_eq!(filters.make, None);
        assert_eq!(filters.min_price, Decimal::ZERO);
        assert_eq!(filters.max_price, None);
        assert_eq!(filters.sort_by, SortBy::Newest);
        assert_eq!(filters.page, 1);
        assert_eq!(filters.page_size, CarFilters::DEFAULT_PAGE_SIZE);
        assert_eq!(filters.offset(), 0);
    }

    #[test]
    fn test_filters_sanitize_invalid_numbers() {
        let filters = CarFilters::from_params(SearchCarsParams {
            min_price: Some("abc".to_string()),
            max_price: Some("not-a-number".to_string()),
            page: Some("0".to_string()),
            page_size: Some("-5".to_string()),
            ..Default::default()
        });
        // unparsable bounds are dropped, never rejected
        assert_eq!(filters.min_price, Decimal::ZERO);
        assert_eq!(filters.max_price, None);
        assert_eq!(filters.page, 1);
        assert_eq!(filters.page_size, CarFilters::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_filters_parse_valid_params() {
        let filters = CarFilters::from_params(SearchCarsParams {
            search: Some("  civic ".to_string()),
            make: Some("Honda".to_string()),
            body_type: Some("".to_string()),
            min_price: Some("5000".to_string()),
            max_price: Some("30000".to_string()),
            sort_by: Some("priceAsc".to_string()),
            page: Some("3".to_string()),
            page_size: Some("12".to_string()),
            ..Default::default()
        });
        assert_eq!(filters.search.as_deref(), Some("civic"));
        assert_eq!(filters.make.as_deref(), Some("Honda"));
        // explicitly-empty is folded to absent
        assert_eq!(filters.body_type, None);
        assert_eq!(filters.min_price, Decimal::new(5000, 0));
        assert_eq!(filters.max_price, Some(Decimal::new(30000, 0)));
        assert_eq!(filters.sort_by, SortBy::PriceAsc);
        assert_eq!(filters.page, 3);
        assert_eq!(filters.page_size, 12);
        assert_eq!(filters.offset(), 24);
    }

    #[test]
    fn test_unknown_sort_falls_back_to_newest() {
        let filters = CarFilters::from_params(SearchCarsParams {
            sort_by: Some("mileage".to_string()),
            ..Default::default()
        });
        assert_eq!(filters.sort_by, SortBy::Newest);
    }

    #[test]
    fn test_serialization_converts_price_and_timestamps() {
        let car = sample_car();
        let response = CarResponse::from_car(&car, false);
        assert!((response.price - 20499.99).abs() < f64::EPSILON);
        assert_eq!(response.created_at, "2024-05-01T12:30:00.000Z");
        assert_eq!(response.updated_at, "2024-05-02T08:00:00.000Z");
        assert!(!response.wishlisted);
        // input is untouched
        assert_eq!(car.price, Decimal::new(2049999, 2));
    }

    #[test]
    fn test_serialization_is_idempotent() {
        let car = sample_car();
        let first = CarResponse::from_car(&car, true);
        let second = CarResponse::from_car(&car, true);
        assert_eq!(first, second);

        // round-tripping the serialized form yields the same JSON
        let json = serde_json::to_value(&first).unwrap();
        let reparsed: CarResponse = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(serde_json::to_value(&reparsed).unwrap(), json);
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 6), 0);
        assert_eq!(page_count(1, 6), 1);
        assert_eq!(page_count(6, 6), 1);
        assert_eq!(page_count(7, 6), 2);
        assert_eq!(page_count(13, 6), 3);
    }

    fn add_car_request() -> AddCarRequest {
        AddCarRequest {
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2022,
            price: Decimal::new(2050000, 2),
            mileage: 12000,
            color: "Blue".to_string(),
            fuel_type: "Petrol".to_string(),
            transmission: "Automatic".to_string(),
            body_type: "Sedan".to_string(),
            seats: Some(5),
            description: String::new(),
            status: None,
            featured: false,
            images: vec![],
        }
    }

    #[test]
    fn test_add_car_accepts_non_negative_price() {
        let mut request = add_car_request();
        assert!(request.validate().is_ok());
        request.price = Decimal::ZERO;
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_add_car_rejects_negative_price() {
        let mut request = add_car_request();
        request.price = Decimal::new(-100, 0);
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("price"));
    }

    #[test]
    fn test_featured_limit_sanitizes() {
        let params = FeaturedCarsParams {
            limit: Some("100".to_string()),
        };
        assert_eq!(params.limit(), FeaturedCarsParams::DEFAULT_LIMIT);
        let params = FeaturedCarsParams {
            limit: Some("6".to_string()),
        };
        assert_eq!(params.limit(), 6);
        assert_eq!(FeaturedCarsParams::default().limit(), 3);
    }
}
