use crate::api::calculation::RunCalculation;
use crate::api::salary::{SalaryListResponse, SalaryQuery};
use crate::model::{CityStandard, ContributionResult, SalaryRecord};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contribution Calculator API",
        version = "1.0.0",
        description = r#"
## Social Insurance & Housing Fund Contribution Calculator

Computes the mandatory employer contribution per employee from a city's
base floor/ceiling and rate plus monthly salary records.

### 🔹 Workflow
- **Import city standards** — decoded sheet rows with headers
  `city_name, year, base_min, base_max, rate` (full replace)
- **Import salary records** — decoded sheet rows with headers
  `employee_id, employee_name, month, salary_amount` (full replace)
- **Run the calculation** — salaries grouped by employee name, averaged
  over 12 months, clamped to the city bounds, multiplied by the rate
- **Read the results** — JSON rows or a formatted plain-text report

### 📦 Response Format
- JSON-based RESTful responses; money values are decimal strings
- Result rows are fully replaced on every calculation run

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::city::import_cities,
        crate::api::city::list_cities,

        crate::api::salary::import_salaries,
        crate::api::salary::list_salaries,

        crate::api::calculation::run_calculation,
        crate::api::calculation::list_results,
        crate::api::calculation::results_report
    ),
    components(
        schemas(
            CityStandard,
            SalaryRecord,
            SalaryQuery,
            SalaryListResponse,
            RunCalculation,
            ContributionResult
        )
    ),
    tags(
        (name = "Cities", description = "City contribution standard imports and listing"),
        (name = "Salaries", description = "Salary record imports and listing"),
        (name = "Calculation", description = "Contribution calculation and results"),
    )
)]
pub struct ApiDoc;
