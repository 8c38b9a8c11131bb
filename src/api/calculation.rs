use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::calc;
use crate::error::AppError;
use crate::model::ContributionResult;
use crate::report;
use crate::store;

/// Serializes calculation runs: at most one may be in flight. A second
/// trigger while one is running gets 409 instead of racing the
/// delete+insert result swap.
pub struct CalcGuard(pub tokio::sync::Mutex<()>);

impl CalcGuard {
    pub fn new() -> Self {
        CalcGuard(tokio::sync::Mutex::new(()))
    }
}

#[derive(Deserialize, ToSchema)]
pub struct RunCalculation {
    /// Id of the city standard to calculate against.
    #[schema(example = 1)]
    pub city_id: Option<u64>,
}

/// Run the contribution calculation
///
/// Averages every employee's salary over 12 months, clamps to the
/// selected city's base floor/ceiling, applies the employer rate and
/// atomically replaces the stored result set.
#[utoipa::path(
    post,
    path = "/api/v1/calculations",
    request_body = RunCalculation,
    responses(
        (status = 200, description = "Results replaced", body = Object, example = json!({
            "message": "Calculation completed successfully",
            "employees": 3
        })),
        (status = 400, description = "No city selected, city not found or no salary data"),
        (status = 409, description = "A calculation is already in flight"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Calculation"
)]
pub async fn run_calculation(
    pool: web::Data<MySqlPool>,
    guard: web::Data<CalcGuard>,
    payload: web::Json<RunCalculation>,
) -> Result<impl Responder, AppError> {
    let Ok(_running) = guard.0.try_lock() else {
        warn!("Calculation trigger rejected, another run is in flight");
        return Ok(HttpResponse::Conflict().json(json!({
            "message": "A calculation is already running, try again shortly"
        })));
    };

    let city_id = payload.city_id.ok_or_else(|| {
        AppError::Validation("no city selected, pass city_id".into())
    })?;

    let city = store::fetch_city(pool.get_ref(), city_id)
        .await
        .map_err(|e| {
            error!(error = %e, city_id, "Failed to fetch city standard");
            AppError::Persistence(e)
        })?
        .ok_or_else(|| {
            AppError::Validation(format!("city {} not found, re-import city standards", city_id))
        })?;

    // All salary rows participate in every run; there is no city or
    // date-range filter on the salary table.
    let salaries = store::fetch_salaries(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch salary records");
        AppError::Persistence(e)
    })?;

    let results = calc::compute_contributions(&city, &salaries)?;

    // Transactional swap: a failure here leaves the previous result set
    // untouched rather than a mix of old and new rows.
    store::replace_results(pool.get_ref(), &results)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to replace calculation results");
            AppError::Persistence(e)
        })?;

    info!(
        city = %city.city_name,
        employees = results.len(),
        "Calculation completed"
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": "Calculation completed successfully",
        "city": city.city_name,
        "employees": results.len()
    })))
}

/// List calculation results
#[utoipa::path(
    get,
    path = "/api/v1/results",
    responses(
        (status = 200, description = "Result rows in insertion order", body = [ContributionResult]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Calculation"
)]
pub async fn list_results(pool: web::Data<MySqlPool>) -> Result<impl Responder, AppError> {
    let results = store::fetch_results(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch calculation results");
        AppError::Persistence(e)
    })?;

    Ok(HttpResponse::Ok().json(results))
}

/// Plain-text contribution report
#[utoipa::path(
    get,
    path = "/api/v1/results/report",
    responses(
        (status = 200, description = "Formatted report", content_type = "text/plain"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Calculation"
)]
pub async fn results_report(pool: web::Data<MySqlPool>) -> Result<impl Responder, AppError> {
    let results = store::fetch_results(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch calculation results");
        AppError::Persistence(e)
    })?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(report::render_report(&results)))
}
