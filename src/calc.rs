use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::AppError;
use crate::model::{CityStandard, NewContributionResult, SalaryRecord};

/// Round a money value to 2 decimal places, half away from zero.
///
/// The rounding strategy is fixed here so that avg_salary,
/// contribution_base and company_fee all round the same way on every
/// platform; exact decimal arithmetic avoids the binary float drift a
/// `toFixed`-style formatter would introduce.
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Compute one contribution row per distinct employee name.
///
/// Salary totals are grouped by `employee_name` only — duplicate months
/// and differing employee ids under the same name sum together. The
/// yearly average always divides by 12, never by the number of months
/// actually present.
pub fn compute_contributions(
    city: &CityStandard,
    salaries: &[SalaryRecord],
) -> Result<Vec<NewContributionResult>, AppError> {
    if salaries.is_empty() {
        return Err(AppError::Validation(
            "no salary records found, upload a salary sheet first".into(),
        ));
    }

    // A floor above the ceiling would make the clamp order-dependent;
    // such city rows are rejected at import, re-checked here.
    if city.base_min > city.base_max {
        return Err(AppError::Validation(format!(
            "city '{}' has base_min {} above base_max {}",
            city.city_name, city.base_min, city.base_max
        )));
    }

    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for record in salaries {
        let name = record.employee_name.as_str();
        match totals.get_mut(name) {
            Some(total) => *total += record.salary_amount,
            None => {
                totals.insert(name, record.salary_amount);
                order.push(name);
            }
        }
    }

    let months = Decimal::from(12);
    let mut results = Vec::with_capacity(order.len());

    for name in order {
        let total = totals[name];
        let avg_salary = total / months;

        let contribution_base = if avg_salary < city.base_min {
            city.base_min
        } else if avg_salary > city.base_max {
            city.base_max
        } else {
            avg_salary
        };

        // Fee is taken from the unrounded base; all three figures are
        // then rounded independently.
        let company_fee = contribution_base * city.rate;

        results.push(NewContributionResult {
            employee_name: name.to_string(),
            avg_salary: round_money(avg_salary),
            contribution_base: round_money(contribution_base),
            company_fee: round_money(company_fee),
        });
    }

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn city(base_min: &str, base_max: &str, rate: &str) -> CityStandard {
        CityStandard {
            id: 1,
            city_name: "上海".to_string(),
            year: Some(2024),
            base_min: d(base_min),
            base_max: d(base_max),
            rate: d(rate),
        }
    }

    fn salary(name: &str, month: u32, amount: &str) -> SalaryRecord {
        SalaryRecord {
            id: 0,
            employee_id: format!("E-{}", name.len()),
            employee_name: name.to_string(),
            month: format!("2024-{:02}", month),
            salary_amount: d(amount),
        }
    }

    fn monthly(name: &str, amount: &str, months: u32) -> Vec<SalaryRecord> {
        (1..=months).map(|m| salary(name, m, amount)).collect()
    }

    #[test]
    fn average_within_bounds_passes_through() {
        // 12 × 5000 → total 60000 → avg 5000 → fee 800
        let results = compute_contributions(
            &city("3000", "25000", "0.16"),
            &monthly("张三", "5000", 12),
        )
        .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].employee_name, "张三");
        assert_eq!(results[0].avg_salary, d("5000.00"));
        assert_eq!(results[0].contribution_base, d("5000.00"));
        assert_eq!(results[0].company_fee, d("800.00"));
    }

    #[test]
    fn average_below_floor_clamps_to_base_min() {
        // 12 × 2000 → avg 2000 < 3000 → base 3000 → fee 480
        let results = compute_contributions(
            &city("3000", "25000", "0.16"),
            &monthly("李四", "2000", 12),
        )
        .unwrap();

        assert_eq!(results[0].avg_salary, d("2000.00"));
        assert_eq!(results[0].contribution_base, d("3000.00"));
        assert_eq!(results[0].company_fee, d("480.00"));
    }

    #[test]
    fn average_above_ceiling_clamps_to_base_max() {
        // total 400000 → avg 33333.33 > 25000 → base 25000 → fee 4000
        let mut rows = monthly("王五", "33333", 11);
        rows.push(salary("王五", 12, "33337"));
        let results =
            compute_contributions(&city("3000", "25000", "0.16"), &rows).unwrap();

        assert_eq!(results[0].avg_salary, d("33333.33"));
        assert_eq!(results[0].contribution_base, d("25000.00"));
        assert_eq!(results[0].company_fee, d("4000.00"));
    }

    #[test]
    fn exact_bounds_do_not_clamp() {
        let at_floor = compute_contributions(
            &city("3000", "25000", "0.16"),
            &monthly("甲", "3000", 12),
        )
        .unwrap();
        assert_eq!(at_floor[0].contribution_base, d("3000.00"));

        let at_ceiling = compute_contributions(
            &city("3000", "25000", "0.16"),
            &monthly("乙", "25000", 12),
        )
        .unwrap();
        assert_eq!(at_ceiling[0].contribution_base, d("25000.00"));
    }

    #[test]
    fn partial_year_still_divides_by_twelve() {
        // 6 months of 6000 → total 36000 → avg 3000, not 6000
        let results = compute_contributions(
            &city("3000", "25000", "0.16"),
            &monthly("赵六", "6000", 6),
        )
        .unwrap();

        assert_eq!(results[0].avg_salary, d("3000.00"));
        assert_eq!(results[0].contribution_base, d("3000.00"));
    }

    #[test]
    fn same_name_sums_across_employee_ids() {
        let mut rows = monthly("张三", "5000", 6);
        let mut other_id: Vec<SalaryRecord> = monthly("张三", "7000", 6)
            .into_iter()
            .map(|mut r| {
                r.employee_id = "E-9999".to_string();
                r
            })
            .collect();
        rows.append(&mut other_id);

        let results =
            compute_contributions(&city("3000", "25000", "0.16"), &rows).unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].avg_salary, d("6000.00"));
    }

    #[test]
    fn multiple_employees_keep_first_seen_order() {
        let mut rows = monthly("张三", "5000", 12);
        rows.extend(monthly("李四", "2000", 12));
        rows.extend(monthly("王五", "40000", 12));

        let results =
            compute_contributions(&city("3000", "25000", "0.16"), &rows).unwrap();

        let names: Vec<&str> =
            results.iter().map(|r| r.employee_name.as_str()).collect();
        assert_eq!(names, vec!["张三", "李四", "王五"]);
    }

    #[test]
    fn recalculation_on_same_input_is_identical() {
        let rows = monthly("张三", "5123.45", 12);
        let c = city("3000", "25000", "0.16");

        let first = compute_contributions(&c, &rows).unwrap();
        let second = compute_contributions(&c, &rows).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // total 100 → avg 8.3333… → 8.33
        let rows = vec![salary("测试", 1, "100")];
        let results =
            compute_contributions(&city("0", "25000", "0.16"), &rows).unwrap();
        assert_eq!(results[0].avg_salary, d("8.33"));

        // avg 0.125 rounds up to 0.13, not down to 0.12 (banker's would give 0.12)
        let rows = vec![salary("测试", 1, "1.50")];
        let results =
            compute_contributions(&city("0", "25000", "0.16"), &rows).unwrap();
        assert_eq!(results[0].avg_salary, d("0.13"));
    }

    #[test]
    fn empty_salary_set_is_rejected() {
        let err = compute_contributions(&city("3000", "25000", "0.16"), &[])
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = compute_contributions(
            &city("25000", "3000", "0.16"),
            &monthly("张三", "5000", 12),
        )
        .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
