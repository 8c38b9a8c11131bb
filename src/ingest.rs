use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::error::AppError;
use crate::model::{NewCityStandard, NewSalaryRecord};

/// One decoded spreadsheet row: cell values keyed by header name.
/// This is what the upstream tabular-file decoder hands over.
pub type RawRow = Map<String, Value>;

/// Validate and coerce decoded city rows into typed records.
/// Required headers: `city_name, year, base_min, base_max, rate`.
///
/// Rows are loosely typed straight out of the file decoder, so every
/// required column is checked here and nothing loosely typed travels
/// further in. `year` is the only optional column.
pub fn parse_city_rows(rows: &[RawRow]) -> Result<Vec<NewCityStandard>, AppError> {
    if rows.is_empty() {
        return Err(AppError::Validation(
            "city import contains no rows".into(),
        ));
    }

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let row_no = idx + 1;
            let city_name = require_text(row, "city_name", row_no)?;
            let year = optional_year(row, "year", row_no)?;
            let base_min = require_decimal(row, "base_min", row_no)?;
            let base_max = require_decimal(row, "base_max", row_no)?;
            let rate = require_decimal(row, "rate", row_no)?;

            if base_min > base_max {
                return Err(AppError::Validation(format!(
                    "row {}: base_min {} exceeds base_max {}",
                    row_no, base_min, base_max
                )));
            }

            // Rate is a fraction of salary, e.g. 0.16; a value above 1
            // almost certainly means a percentage slipped through.
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(AppError::Validation(format!(
                    "row {}: rate {} must be a fraction between 0 and 1",
                    row_no, rate
                )));
            }

            Ok(NewCityStandard {
                city_name,
                year,
                base_min,
                base_max,
                rate,
            })
        })
        .collect()
}

/// Validate and coerce decoded salary rows into typed records.
/// Required headers: `employee_id, employee_name, month, salary_amount`.
pub fn parse_salary_rows(rows: &[RawRow]) -> Result<Vec<NewSalaryRecord>, AppError> {
    if rows.is_empty() {
        return Err(AppError::Validation(
            "salary import contains no rows".into(),
        ));
    }

    rows.iter()
        .enumerate()
        .map(|(idx, row)| {
            let row_no = idx + 1;
            Ok(NewSalaryRecord {
                employee_id: require_text(row, "employee_id", row_no)?,
                employee_name: require_text(row, "employee_name", row_no)?,
                month: require_text(row, "month", row_no)?,
                salary_amount: require_decimal(row, "salary_amount", row_no)?,
            })
        })
        .collect()
}

fn missing(column: &str, row_no: usize) -> AppError {
    AppError::Validation(format!(
        "row {}: missing required column '{}' (check the sheet headers)",
        row_no, column
    ))
}

/// A required textual cell. Excel decoders emit ids and months as either
/// strings or numbers, so both are accepted and kept as text.
fn require_text(row: &RawRow, column: &str, row_no: usize) -> Result<String, AppError> {
    match row.get(column) {
        Some(Value::String(s)) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Null) | None => Err(missing(column, row_no)),
        Some(_) => Err(AppError::Validation(format!(
            "row {}: column '{}' must be text",
            row_no, column
        ))),
    }
}

/// A required numeric cell. Non-numeric values are rejected outright —
/// never treated as zero.
fn require_decimal(row: &RawRow, column: &str, row_no: usize) -> Result<Decimal, AppError> {
    let invalid = |v: &Value| {
        AppError::Validation(format!(
            "row {}: column '{}' has non-numeric value {}",
            row_no, column, v
        ))
    };

    match row.get(column) {
        Some(Value::Number(n)) => decimal_from_number(n)
            .ok_or_else(|| invalid(&Value::Number(n.clone()))),
        Some(Value::String(s)) if !s.trim().is_empty() => Decimal::from_str(s.trim())
            .map_err(|_| invalid(&Value::String(s.clone()))),
        Some(Value::Null) | None => Err(missing(column, row_no)),
        Some(other) => Err(invalid(other)),
    }
}

/// Optional integer year; absent, null or blank cells become None.
fn optional_year(row: &RawRow, column: &str, row_no: usize) -> Result<Option<i32>, AppError> {
    match row.get(column) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse::<i32>().map(Some).map_err(|_| {
            AppError::Validation(format!(
                "row {}: column '{}' has non-integer value '{}'",
                row_no, column, s
            ))
        }),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .map(Some)
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "row {}: column '{}' has non-integer value {}",
                    row_no, column, n
                ))
            }),
        Some(other) => Err(AppError::Validation(format!(
            "row {}: column '{}' has non-integer value {}",
            row_no, column, other
        ))),
    }
}

fn decimal_from_number(n: &serde_json::Number) -> Option<Decimal> {
    if let Some(i) = n.as_i64() {
        return Some(Decimal::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Decimal::from(u));
    }
    // Floats round-trip through their shortest decimal representation;
    // very large magnitudes fall back to scientific notation.
    let text = n.to_string();
    Decimal::from_str(&text)
        .ok()
        .or_else(|| Decimal::from_scientific(&text).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows(value: Value) -> Vec<RawRow> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn city_rows_coerce_numbers_and_numeric_strings() {
        let parsed = parse_city_rows(&rows(json!([
            { "city_name": "上海", "year": 2024, "base_min": 3000,
              "base_max": "25000", "rate": "0.16" },
            { "city_name": "北京", "base_min": "6326", "base_max": 31884.0,
              "rate": 0.16 }
        ])))
        .unwrap();

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].year, Some(2024));
        assert_eq!(parsed[0].base_max, Decimal::from(25000));
        assert_eq!(parsed[1].year, None);
        assert_eq!(parsed[1].base_min, Decimal::from(6326));
    }

    #[test]
    fn missing_header_is_rejected_with_column_name() {
        let err = parse_city_rows(&rows(json!([
            { "city_name": "上海", "base_min": 3000, "base_max": 25000 }
        ])))
        .unwrap_err();

        assert!(err.to_string().contains("rate"));
    }

    #[test]
    fn non_numeric_base_is_rejected_not_zeroed() {
        let err = parse_city_rows(&rows(json!([
            { "city_name": "上海", "year": 2024, "base_min": "三千",
              "base_max": 25000, "rate": 0.16 }
        ])))
        .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("base_min"));
    }

    #[test]
    fn inverted_bounds_are_rejected_at_import() {
        let err = parse_city_rows(&rows(json!([
            { "city_name": "上海", "year": 2024, "base_min": 25000,
              "base_max": 3000, "rate": 0.16 }
        ])))
        .unwrap_err();

        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn percentage_style_rate_is_rejected() {
        let err = parse_city_rows(&rows(json!([
            { "city_name": "上海", "year": 2024, "base_min": 3000,
              "base_max": 25000, "rate": 16 }
        ])))
        .unwrap_err();

        assert!(err.to_string().contains("fraction"));
    }

    #[test]
    fn salary_rows_accept_numeric_ids_and_months() {
        let parsed = parse_salary_rows(&rows(json!([
            { "employee_id": 1001, "employee_name": "张三", "month": 1,
              "salary_amount": 5000 },
            { "employee_id": "E-7", "employee_name": "李四",
              "month": "2024-02", "salary_amount": "4321.50" }
        ])))
        .unwrap();

        assert_eq!(parsed[0].employee_id, "1001");
        assert_eq!(parsed[0].month, "1");
        assert_eq!(parsed[1].salary_amount, Decimal::from_str("4321.50").unwrap());
    }

    #[test]
    fn blank_employee_name_is_rejected() {
        let err = parse_salary_rows(&rows(json!([
            { "employee_id": 1001, "employee_name": "  ", "month": 1,
              "salary_amount": 5000 }
        ])))
        .unwrap_err();

        assert!(err.to_string().contains("employee_name"));
    }

    #[test]
    fn empty_imports_are_rejected() {
        assert!(parse_city_rows(&[]).is_err());
        assert!(parse_salary_rows(&[]).is_err());
    }

    #[test]
    fn float_salary_cells_keep_decimal_precision() {
        let parsed = parse_salary_rows(&rows(json!([
            { "employee_id": 1, "employee_name": "张三", "month": 1,
              "salary_amount": 5123.45 }
        ])))
        .unwrap();

        assert_eq!(
            parsed[0].salary_amount,
            Decimal::from_str("5123.45").unwrap()
        );
    }
}
