use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One salary row per employee per month. Replaced wholesale on import.
///
/// `employee_id` and `month` arrive from spreadsheets as either strings or
/// numbers; they are coerced to strings at the ingest boundary and play no
/// part in the calculation — aggregation keys on `employee_name` alone.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct SalaryRecord {
    pub id: u64,

    #[schema(example = "E-1001")]
    pub employee_id: String,

    #[schema(example = "张三")]
    pub employee_name: String,

    #[schema(example = "2024-01")]
    pub month: String,

    #[schema(example = "5000.00", value_type = String)]
    pub salary_amount: Decimal,
}

/// Salary row coming out of the ingest boundary, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSalaryRecord {
    pub employee_id: String,
    pub employee_name: String,
    pub month: String,
    pub salary_amount: Decimal,
}
