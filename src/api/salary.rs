use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};

use crate::error::AppError;
use crate::ingest::{self, RawRow};
use crate::model::SalaryRecord;
use crate::store;

#[derive(Deserialize, IntoParams, ToSchema)]
pub struct SalaryQuery {
    #[schema(example = 1)]
    pub page: Option<u32>,

    #[schema(example = 20)]
    pub per_page: Option<u32>,
}

#[derive(Serialize, ToSchema)]
pub struct SalaryListResponse {
    pub data: Vec<SalaryRecord>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Import salary records
///
/// Takes the decoded rows of a salary sheet and replaces the whole
/// salary table with them.
#[utoipa::path(
    post,
    path = "/api/v1/salaries/import",
    request_body = Object,
    responses(
        (status = 200, description = "Salary records replaced", body = Object, example = json!({
            "message": "Salary records imported successfully",
            "rows": 24
        })),
        (status = 400, description = "Row validation failed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Salaries"
)]
pub async fn import_salaries(
    pool: web::Data<MySqlPool>,
    payload: web::Json<Vec<RawRow>>,
) -> Result<impl Responder, AppError> {
    let rows = ingest::parse_salary_rows(&payload)?;

    store::replace_salaries(pool.get_ref(), &rows)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to replace salary records");
            AppError::Persistence(e)
        })?;

    info!(rows = rows.len(), "Salary records imported");

    Ok(HttpResponse::Ok().json(json!({
        "message": "Salary records imported successfully",
        "rows": rows.len()
    })))
}

/// List salary records
#[utoipa::path(
    get,
    path = "/api/v1/salaries",
    params(SalaryQuery),
    responses(
        (status = 200, description = "Paginated salary records", body = SalaryListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Salaries"
)]
pub async fn list_salaries(
    pool: web::Data<MySqlPool>,
    query: web::Query<SalaryQuery>,
) -> Result<impl Responder, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);
    let offset = (page - 1) * per_page;

    let total = store::count_salaries(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to count salary records");
        AppError::Persistence(e)
    })?;

    let data = store::fetch_salaries_page(pool.get_ref(), per_page as i64, offset as i64)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch salary records");
            AppError::Persistence(e)
        })?;

    Ok(HttpResponse::Ok().json(SalaryListResponse {
        data,
        page,
        per_page,
        total,
    }))
}
