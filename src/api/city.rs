use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::MySqlPool;
use tracing::{error, info};

use crate::error::AppError;
use crate::ingest::{self, RawRow};
use crate::model::CityStandard;
use crate::store;

/// Import city standards
///
/// Takes the decoded rows of a city-standard sheet (one JSON object per
/// row, keyed by header) and replaces the whole city table with them.
#[utoipa::path(
    post,
    path = "/api/v1/cities/import",
    request_body = Object,
    responses(
        (status = 200, description = "City standards replaced", body = Object, example = json!({
            "message": "City standards imported successfully",
            "rows": 3
        })),
        (status = 400, description = "Row validation failed"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Cities"
)]
pub async fn import_cities(
    pool: web::Data<MySqlPool>,
    payload: web::Json<Vec<RawRow>>,
) -> Result<impl Responder, AppError> {
    let rows = ingest::parse_city_rows(&payload)?;

    store::replace_cities(pool.get_ref(), &rows)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to replace city standards");
            AppError::Persistence(e)
        })?;

    info!(rows = rows.len(), "City standards imported");

    Ok(HttpResponse::Ok().json(json!({
        "message": "City standards imported successfully",
        "rows": rows.len()
    })))
}

/// List city standards
///
/// Read-through query against the store; the city list is never cached
/// in process, so a fresh import is visible immediately.
#[utoipa::path(
    get,
    path = "/api/v1/cities",
    responses(
        (status = 200, description = "All city standards", body = [CityStandard]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Cities"
)]
pub async fn list_cities(pool: web::Data<MySqlPool>) -> Result<impl Responder, AppError> {
    let cities = store::fetch_cities(pool.get_ref()).await.map_err(|e| {
        error!(error = %e, "Failed to fetch city standards");
        AppError::Persistence(e)
    })?;

    Ok(HttpResponse::Ok().json(cities))
}
