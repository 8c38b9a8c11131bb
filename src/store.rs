//! Row-store access for the three collections. Each collection is only
//! ever read in full or replaced in full; replacement runs inside one
//! transaction so readers never observe a half-swapped or empty table.

use sqlx::MySqlPool;

use crate::model::{
    CityStandard, ContributionResult, NewCityStandard, NewContributionResult,
    NewSalaryRecord, SalaryRecord,
};

pub async fn fetch_cities(pool: &MySqlPool) -> Result<Vec<CityStandard>, sqlx::Error> {
    sqlx::query_as::<_, CityStandard>(
        "SELECT id, city_name, year, base_min, base_max, rate FROM cities ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_city(
    pool: &MySqlPool,
    city_id: u64,
) -> Result<Option<CityStandard>, sqlx::Error> {
    sqlx::query_as::<_, CityStandard>(
        "SELECT id, city_name, year, base_min, base_max, rate FROM cities WHERE id = ?",
    )
    .bind(city_id)
    .fetch_optional(pool)
    .await
}

pub async fn replace_cities(
    pool: &MySqlPool,
    rows: &[NewCityStandard],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM cities").execute(&mut *tx).await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO cities (city_name, year, base_min, base_max, rate) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&row.city_name)
        .bind(row.year)
        .bind(row.base_min)
        .bind(row.base_max)
        .bind(row.rate)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

pub async fn fetch_salaries(pool: &MySqlPool) -> Result<Vec<SalaryRecord>, sqlx::Error> {
    sqlx::query_as::<_, SalaryRecord>(
        "SELECT id, employee_id, employee_name, month, salary_amount \
         FROM salaries ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn count_salaries(pool: &MySqlPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM salaries")
        .fetch_one(pool)
        .await
}

pub async fn fetch_salaries_page(
    pool: &MySqlPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<SalaryRecord>, sqlx::Error> {
    sqlx::query_as::<_, SalaryRecord>(
        "SELECT id, employee_id, employee_name, month, salary_amount \
         FROM salaries ORDER BY id LIMIT ? OFFSET ?",
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

pub async fn replace_salaries(
    pool: &MySqlPool,
    rows: &[NewSalaryRecord],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM salaries").execute(&mut *tx).await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO salaries (employee_id, employee_name, month, salary_amount) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&row.employee_id)
        .bind(&row.employee_name)
        .bind(&row.month)
        .bind(row.salary_amount)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}

/// Results are listed in insertion order; the calculator's output order
/// becomes the display order.
pub async fn fetch_results(
    pool: &MySqlPool,
) -> Result<Vec<ContributionResult>, sqlx::Error> {
    sqlx::query_as::<_, ContributionResult>(
        "SELECT id, employee_name, avg_salary, contribution_base, company_fee \
         FROM results ORDER BY id",
    )
    .fetch_all(pool)
    .await
}

pub async fn replace_results(
    pool: &MySqlPool,
    rows: &[NewContributionResult],
) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM results").execute(&mut *tx).await?;

    for row in rows {
        sqlx::query(
            "INSERT INTO results (employee_name, avg_salary, contribution_base, company_fee) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(&row.employee_name)
        .bind(row.avg_salary)
        .bind(row.contribution_base)
        .bind(row.company_fee)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await
}
