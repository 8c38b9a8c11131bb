use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted calculation output, one row per distinct employee name.
/// Derived only — never hand-edited, fully replaced on every run.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct ContributionResult {
    pub id: u64,

    #[schema(example = "张三")]
    pub employee_name: String,

    #[schema(example = "5000.00", value_type = String)]
    pub avg_salary: Decimal,

    #[schema(example = "5000.00", value_type = String)]
    pub contribution_base: Decimal,

    #[schema(example = "800.00", value_type = String)]
    pub company_fee: Decimal,
}

/// Calculator output before it is written to the results table.
/// All three money fields are already rounded to 2 decimal places.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContributionResult {
    pub employee_name: String,
    pub avg_salary: Decimal,
    pub contribution_base: Decimal,
    pub company_fee: Decimal,
}
