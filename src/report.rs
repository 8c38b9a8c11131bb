use chrono::Local;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::model::ContributionResult;

/// Format a money value with thousands separators and exactly two
/// decimal places, e.g. `33333.333 → "33,333.33"`.
pub fn format_money(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());

    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, f),
        None => (text.as_str(), "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Render the persisted result set as a plain-text report table.
pub fn render_report(results: &[ContributionResult]) -> String {
    let mut out = String::new();

    out.push_str("Company Contribution Report\n");
    out.push_str(&format!(
        "Generated at {}\n\n",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    ));

    out.push_str(&format!(
        "{:<20} {:>16} {:>20} {:>16}\n",
        "Employee", "Avg Salary", "Contribution Base", "Company Fee"
    ));
    out.push_str(&format!("{}\n", "-".repeat(76)));

    for row in results {
        out.push_str(&format!(
            "{:<20} {:>16} {:>20} {:>16}\n",
            row.employee_name,
            format_money(row.avg_salary),
            format_money(row.contribution_base),
            format_money(row.company_fee),
        ));
    }

    out.push_str(&format!("\n{} employee(s)\n", results.len()));
    out
}
