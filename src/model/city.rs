use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// City contribution standard: base floor/ceiling and employer rate.
/// One row per city/year; the whole table is replaced on each import.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct CityStandard {
    pub id: u64,

    #[schema(example = "上海")]
    pub city_name: String,

    #[schema(example = 2024)]
    pub year: Option<i32>,

    #[schema(example = "3000.00", value_type = String)]
    pub base_min: Decimal,

    #[schema(example = "25000.00", value_type = String)]
    pub base_max: Decimal,

    /// Employer contribution rate as a fraction, e.g. 0.16 for 16%.
    #[schema(example = "0.16", value_type = String)]
    pub rate: Decimal,
}

/// City row coming out of the ingest boundary, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCityStandard {
    pub city_name: String,
    pub year: Option<i32>,
    pub base_min: Decimal,
    pub base_max: Decimal,
    pub rate: Decimal,
}
