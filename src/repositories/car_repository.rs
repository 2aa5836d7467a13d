//! Car inventory queries
//!
//! Builds the dynamic search/filter queries. The count and page queries
//! share one predicate builder so `total` always reflects the full
//! match set, not the current page.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::car_dto::{
    AddCarRequest, CarFacets, CarFilters, NewestSortMode, PriceRange, SortBy,
};
use crate::models::{Car, CarStatus};
use crate::utils::errors::AppError;

/// One page of results plus the unpaginated match count
#[derive(Debug)]
pub struct SearchPage {
    pub cars: Vec<Car>,
    pub total: i64,
}

pub struct CarRepository {
    pool: PgPool,
}

/// Build a `%...%` ILIKE pattern for a substring match. LIKE
/// metacharacters in the input are escaped so `100%` or `a_c` match
/// literally instead of acting as wildcards.
fn search_pattern(text: &str) -> String {
    let escaped = text
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Append the public-search WHERE clause: always restricted to
/// AVAILABLE inventory, then narrowed by each present filter. An unset
/// max price emits no upper-bound predicate at all.
fn push_search_predicates(qb: &mut QueryBuilder<Postgres>, filters: &CarFilters) {
    qb.push(" WHERE status = 'AVAILABLE'");

    if let Some(search) = &filters.search {
        let pattern = search_pattern(search);
        qb.push(" AND (make ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR model ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    let categorical: [(&str, &Option<String>); 4] = [
        ("make", &filters.make),
        ("body_type", &filters.body_type),
        ("fuel_type", &filters.fuel_type),
        ("transmission", &filters.transmission),
    ];
    for (column, value) in categorical {
        if let Some(value) = value {
            qb.push(format!(" AND LOWER({}) = LOWER(", column));
            qb.push_bind(value.clone());
            qb.push(")");
        }
    }

    qb.push(" AND price >= ");
    qb.push_bind(filters.min_price);

    if let Some(max_price) = filters.max_price {
        qb.push(" AND price <= ");
        qb.push_bind(max_price);
    }
}

/// Append the admin-list WHERE clause: no status restriction, free text
/// across make, model, color and exact year-as-string.
fn push_admin_predicates(qb: &mut QueryBuilder<Postgres>, search: Option<&str>) {
    let search = search.map(str::trim).filter(|s| !s.is_empty());
    if let Some(search) = search {
        let pattern = search_pattern(search);
        qb.push(" WHERE (make ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR model ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR color ILIKE ");
        qb.push_bind(pattern);
        qb.push(" OR CAST(year AS TEXT) = ");
        qb.push_bind(search.to_string());
        qb.push(")");
    }
}

/// Distinct values of one column over purchasable inventory only.
fn distinct_facet_sql(column: &str) -> String {
    format!(
        "SELECT DISTINCT {c} FROM cars WHERE status = 'AVAILABLE' ORDER BY {c} ASC",
        c = column
    )
}

/// Fold the MIN/MAX price aggregate into a display range; empty
/// inventory falls back to 0..100000.
fn price_range_from_bounds(
    min: Option<rust_decimal::Decimal>,
    max: Option<rust_decimal::Decimal>,
) -> PriceRange {
    use num_traits::ToPrimitive;

    PriceRange {
        min: min.and_then(|p| p.to_f64()).unwrap_or(0.0),
        max: max.and_then(|p| p.to_f64()).unwrap_or(100_000.0),
    }
}

fn order_clause(sort_by: SortBy, newest_mode: NewestSortMode) -> &'static str {
    match sort_by {
        SortBy::PriceAsc => " ORDER BY price ASC",
        SortBy::PriceDesc => " ORDER BY price DESC",
        SortBy::Newest => match newest_mode {
            NewestSortMode::CreatedAt => " ORDER BY created_at DESC",
            // the upstream frontend ordered "newest" by price descending
            NewestSortMode::LegacyPriceDesc => " ORDER BY price DESC",
        },
    }
}

impl CarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Public search: filtered, sorted, paginated, with full match count.
    pub async fn search(
        &self,
        filters: &CarFilters,
        newest_mode: NewestSortMode,
    ) -> Result<SearchPage, AppError> {
        let mut count_qb = QueryBuilder::new("SELECT COUNT(*) FROM cars");
        push_search_predicates(&mut count_qb, filters);
        let total: i64 = count_qb
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        let mut qb = QueryBuilder::new("SELECT * FROM cars");
        push_search_predicates(&mut qb, filters);
        qb.push(order_clause(filters.sort_by, newest_mode));
        qb.push(" LIMIT ");
        qb.push_bind(filters.page_size);
        qb.push(" OFFSET ");
        qb.push_bind(filters.offset());

        let cars = qb
            .build_query_as::<Car>()
            .fetch_all(&self.pool)
            .await?;

        Ok(SearchPage { cars, total })
    }

    /// Distinct filterable values and price bounds over purchasable
    /// inventory only. The category queries and the price aggregate are
    /// independent, so they run concurrently.
    pub async fn facets(&self) -> Result<CarFacets, AppError> {
        let makes_sql = distinct_facet_sql("make");
        let body_types_sql = distinct_facet_sql("body_type");
        let fuel_types_sql = distinct_facet_sql("fuel_type");
        let transmissions_sql = distinct_facet_sql("transmission");

        let (makes, body_types, fuel_types, transmissions, price_bounds) = tokio::try_join!(
            sqlx::query_scalar::<_, String>(&makes_sql).fetch_all(&self.pool),
            sqlx::query_scalar::<_, String>(&body_types_sql).fetch_all(&self.pool),
            sqlx::query_scalar::<_, String>(&fuel_types_sql).fetch_all(&self.pool),
            sqlx::query_scalar::<_, String>(&transmissions_sql).fetch_all(&self.pool),
            sqlx::query_as::<_, (Option<rust_decimal::Decimal>, Option<rust_decimal::Decimal>)>(
                "SELECT MIN(price), MAX(price) FROM cars WHERE status = 'AVAILABLE'"
            )
            .fetch_one(&self.pool),
        )?;

        let price_range = price_range_from_bounds(price_bounds.0, price_bounds.1);

        Ok(CarFacets {
            makes,
            body_types,
            fuel_types,
            transmissions,
            price_range,
        })
    }

    /// Admin inventory list: no status restriction, free text across
    /// make, model, color and exact year.
    pub async fn admin_search(&self, search: Option<&str>) -> Result<Vec<Car>, AppError> {
        let mut qb = QueryBuilder::new("SELECT * FROM cars");
        push_admin_predicates(&mut qb, search);
        qb.push(" ORDER BY created_at DESC");

        let cars = qb.build_query_as::<Car>().fetch_all(&self.pool).await?;
        Ok(cars)
    }

    pub async fn featured(&self, limit: i64) -> Result<Vec<Car>, AppError> {
        let cars = sqlx::query_as::<_, Car>(
            "SELECT * FROM cars WHERE featured = TRUE AND status = 'AVAILABLE' \
             ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(cars)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Car>, AppError> {
        let car = sqlx::query_as::<_, Car>("SELECT * FROM cars WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(car)
    }

    pub async fn create(
        &self,
        request: &AddCarRequest,
        id: Uuid,
        image_urls: Vec<String>,
    ) -> Result<Car, AppError> {
        let car = sqlx::query_as::<_, Car>(
            r#"
            INSERT INTO cars (id, make, model, year, price, mileage, color, fuel_type,
                              transmission, body_type, seats, description, images,
                              status, featured, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, NOW(), NOW())
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&request.make)
        .bind(&request.model)
        .bind(request.year)
        .bind(request.price)
        .bind(request.mileage)
        .bind(&request.color)
        .bind(&request.fuel_type)
        .bind(&request.transmission)
        .bind(&request.body_type)
        .bind(request.seats)
        .bind(&request.description)
        .bind(&image_urls)
        .bind(request.status.unwrap_or(CarStatus::Available))
        .bind(request.featured)
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    /// Status/featured update; transitions are unconstrained by design.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: Option<CarStatus>,
        featured: Option<bool>,
    ) -> Result<Car, AppError> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Car not found".to_string()))?;

        let car = sqlx::query_as::<_, Car>(
            r#"
            UPDATE cars
            SET status = $2, featured = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.unwrap_or(current.status))
        .bind(featured.unwrap_or(current.featured))
        .fetch_one(&self.pool)
        .await?;

        Ok(car)
    }

    /// Returns whether a row was actually deleted. Wishlist entries and
    /// bookings cascade at the schema level.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn base_filters() -> CarFilters {
        CarFilters::from_params(Default::default())
    }

    fn built_sql(filters: &CarFilters) -> String {
        let mut qb = QueryBuilder::new("SELECT * FROM cars");
        push_search_predicates(&mut qb, filters);
        qb.sql().to_string()
    }

    #[test]
    fn test_base_predicate_restricts_to_available() {
        let sql = built_sql(&base_filters());
        assert!(sql.contains("WHERE status = 'AVAILABLE'"));
    }

    #[test]
    fn test_unset_max_price_emits_no_upper_bound() {
        let sql = built_sql(&base_filters());
        assert!(sql.contains("price >= "));
        assert!(!sql.contains("price <= "));
    }

    #[test]
    fn test_set_max_price_emits_upper_bound() {
        let mut filters = base_filters();
        filters.max_price = Some(Decimal::new(30000, 0));
        let sql = built_sql(&filters);
        assert!(sql.contains("price <= "));
    }

    #[test]
    fn test_free_text_matches_make_or_model() {
        let mut filters = base_filters();
        filters.search = Some("civic".to_string());
        let sql = built_sql(&filters);
        assert!(sql.contains("make ILIKE "));
        assert!(sql.contains("OR model ILIKE "));
        // public search never matches on color
        assert!(!sql.contains("color"));
    }

    #[test]
    fn test_absent_categorical_filters_emit_nothing() {
        let sql = built_sql(&base_filters());
        assert!(!sql.contains("LOWER(make)"));
        assert!(!sql.contains("LOWER(body_type)"));
    }

    #[test]
    fn test_present_categorical_filters_are_case_insensitive_equality() {
        let mut filters = base_filters();
        filters.make = Some("honda".to_string());
        filters.fuel_type = Some("Petrol".to_string());
        let sql = built_sql(&filters);
        assert!(sql.contains("LOWER(make) = LOWER("));
        assert!(sql.contains("LOWER(fuel_type) = LOWER("));
        assert!(!sql.contains("LOWER(transmission)"));
    }

    #[test]
    fn test_order_clause_mapping() {
        assert_eq!(
            order_clause(SortBy::PriceAsc, NewestSortMode::CreatedAt),
            " ORDER BY price ASC"
        );
        assert_eq!(
            order_clause(SortBy::PriceDesc, NewestSortMode::CreatedAt),
            " ORDER BY price DESC"
        );
        assert_eq!(
            order_clause(SortBy::Newest, NewestSortMode::CreatedAt),
            " ORDER BY created_at DESC"
        );
    }

    #[test]
    fn test_legacy_newest_sorts_by_price_descending() {
        // the historical behavior, kept behind LEGACY_NEWEST_SORT:
        // "newest" ordered by price, not by creation time
        assert_eq!(
            order_clause(SortBy::Newest, NewestSortMode::LegacyPriceDesc),
            " ORDER BY price DESC"
        );
    }

    #[test]
    fn test_admin_search_matches_color_and_exact_year() {
        let mut qb = QueryBuilder::new("SELECT * FROM cars");
        push_admin_predicates(&mut qb, Some("2022"));
        let sql = qb.sql();
        assert!(sql.contains("make ILIKE "));
        assert!(sql.contains("color ILIKE "));
        assert!(sql.contains("CAST(year AS TEXT) = "));
        // admin list is not restricted to AVAILABLE inventory
        assert!(!sql.contains("status"));
    }

    #[test]
    fn test_admin_search_blank_text_emits_no_predicates() {
        let mut qb = QueryBuilder::new("SELECT * FROM cars");
        push_admin_predicates(&mut qb, Some("   "));
        assert_eq!(qb.sql(), "SELECT * FROM cars");
    }

    #[test]
    fn test_search_pattern_escapes_like_metacharacters() {
        assert_eq!(search_pattern("civic"), "%civic%");
        // % and _ must match themselves, not act as wildcards
        assert_eq!(search_pattern("100%"), "%100\\%%");
        assert_eq!(search_pattern("a_c"), "%a\\_c%");
        assert_eq!(search_pattern("back\\slash"), "%back\\\\slash%");
    }

    #[test]
    fn test_facet_sql_restricts_to_available() {
        let sql = distinct_facet_sql("body_type");
        assert!(sql.contains("WHERE status = 'AVAILABLE'"));
        assert!(sql.contains("SELECT DISTINCT body_type"));
        assert!(sql.contains("ORDER BY body_type ASC"));
    }

    #[test]
    fn test_price_range_falls_back_on_empty_inventory() {
        let range = price_range_from_bounds(None, None);
        assert_eq!(range, PriceRange { min: 0.0, max: 100_000.0 });
    }

    #[test]
    fn test_price_range_converts_bounds() {
        let range = price_range_from_bounds(
            Some(Decimal::new(499999, 2)),
            Some(Decimal::new(8999900, 2)),
        );
        assert!((range.min - 4999.99).abs() < f64::EPSILON);
        assert!((range.max - 89999.0).abs() < f64::EPSILON);
    }
}
