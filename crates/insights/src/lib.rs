//! # sheethub-insights
//!
//! Short, human-readable observations about a cleaned table. Nothing here
//! talks to a model or a network service; every sentence comes from simple
//! statistics over well-known column names (`department`, `salary`,
//! `hiredate`).
//!
//! ```
//! use sheethub_insights::generate_insights;
//! use sheethub_sheet::Table;
//!
//! let table = Table::from_data(
//!     vec!["name", "department"],
//!     vec![vec!["Ann", "Ops"], vec!["Ben", "Ops"], vec!["Cy", "Sales"]],
//! ).unwrap();
//!
//! let insights = generate_insights(&table);
//! assert_eq!(insights[0], "The dataset contains 3 records and 2 columns.");
//! assert_eq!(insights[1], "The largest department is Ops with 2 employees.");
//! ```

use chrono::Datelike;
use indexmap::IndexMap;
use sheethub_sheet::{CellValue, Table};
use std::hash::Hash;

pub const DEPARTMENT_COLUMN: &str = "department";
pub const SALARY_COLUMN: &str = "salary";
pub const HIRE_DATE_COLUMN: &str = "hiredate";

/// Build the list of insight sentences for a table, in a fixed order.
#[must_use]
pub fn generate_insights(table: &Table) -> Vec<String> {
    if table.row_count() == 0 || table.col_count() == 0 {
        return vec!["Dataset is empty.".to_string()];
    }

    let mut insights = vec![format!(
        "The dataset contains {} records and {} columns.",
        table.row_count(),
        table.col_count()
    )];

    if let Ok(values) = table.column(DEPARTMENT_COLUMN) {
        let departments = values
            .into_iter()
            .filter(|v| !v.is_missing())
            .map(|v| v.render().trim().to_string());
        if let Some((department, count)) = most_common(departments) {
            insights.push(format!(
                "The largest department is {department} with {count} employees."
            ));
        }
    }

    if let Ok(values) = table.column(SALARY_COLUMN) {
        let salaries: Vec<f64> = values.into_iter().filter_map(CellValue::as_float).collect();
        if let Some(stats) = SalaryStats::from_values(&salaries) {
            insights.push(format!(
                "The average salary is approximately {}.",
                stats.mean.trunc() as i64
            ));
            insights.push(format!("The highest salary is {}.", stats.max.trunc() as i64));
            if stats.outliers > 0 {
                insights.push(format!(
                    "{} employees have unusually high salaries.",
                    stats.outliers
                ));
            }
        }
    }

    if let Ok(values) = table.column(HIRE_DATE_COLUMN) {
        let years = values
            .into_iter()
            .filter_map(CellValue::as_date)
            .map(|d| d.year());
        if let Some((year, _)) = most_common(years) {
            insights.push(format!("The most common hiring year is {year}."));
        }
    }

    let missing = table.missing_count();
    if missing > 0 {
        insights.push(format!(
            "There are {missing} missing values remaining in the dataset."
        ));
    } else {
        insights.push("No missing values detected. Data quality is high.".to_string());
    }

    tracing::debug!(count = insights.len(), "generated insights");
    insights
}

/// Most frequent item and its count. Ties go to the item seen first.
fn most_common<T: Hash + Eq>(items: impl IntoIterator<Item = T>) -> Option<(T, usize)> {
    let mut counts: IndexMap<T, usize> = IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (item, count) in counts {
        match &best {
            Some((_, top)) if count <= *top => {}
            _ => best = Some((item, count)),
        }
    }
    best
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SalaryStats {
    mean: f64,
    max: f64,
    /// Values strictly above mean + 2 sample standard deviations.
    outliers: usize,
}

impl SalaryStats {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // A single value has no sample deviation, so nothing can stand out.
        let outliers = if values.len() < 2 {
            0
        } else {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            let threshold = mean + 2.0 * variance.sqrt();
            values.iter().filter(|v| **v > threshold).count()
        };

        Some(SalaryStats {
            mean,
            max,
            outliers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn staff_table() -> Table {
        Table::new(
            vec![
                "name".to_string(),
                "department".to_string(),
                "salary".to_string(),
                "hiredate".to_string(),
            ],
            vec![
                vec![
                    "Ann".into(),
                    "Ops".into(),
                    CellValue::Int(50_000),
                    NaiveDate::from_ymd_opt(2020, 1, 15).unwrap().into(),
                ],
                vec![
                    "Ben".into(),
                    "Sales".into(),
                    CellValue::Float(60_500.5),
                    "2021-07-01".into(),
                ],
                vec![
                    "Cy".into(),
                    "Ops".into(),
                    CellValue::Int(55_000),
                    NaiveDate::from_ymd_opt(2020, 9, 1).unwrap().into(),
                ],
                vec!["Di".into(), CellValue::Null, CellValue::Null, CellValue::Null],
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(generate_insights(&Table::empty()), vec!["Dataset is empty."]);

        let no_rows = Table::new(vec!["salary".to_string()], vec![]).unwrap();
        assert_eq!(generate_insights(&no_rows), vec!["Dataset is empty."]);
    }

    #[test]
    fn test_staff_insights_in_order() {
        let insights = generate_insights(&staff_table());
        assert_eq!(
            insights,
            vec![
                "The dataset contains 4 records and 4 columns.",
                "The largest department is Ops with 2 employees.",
                "The average salary is approximately 55166.",
                "The highest salary is 60500.",
                "The most common hiring year is 2020.",
                "There are 3 missing values remaining in the dataset.",
            ]
        );
    }

    #[test]
    fn test_no_missing_values_sentence() {
        let table = Table::from_data(vec!["name"], vec![vec!["Ann"], vec!["Ben"]]).unwrap();
        let insights = generate_insights(&table);
        assert_eq!(
            insights.last().map(String::as_str),
            Some("No missing values detected. Data quality is high.")
        );
        assert_eq!(insights.len(), 2);
    }

    #[test]
    fn test_salary_outliers_reported() {
        let mut rows: Vec<Vec<CellValue>> =
            (0..10).map(|_| vec![CellValue::Int(50_000)]).collect();
        rows.push(vec![CellValue::Int(1_000_000)]);
        let table = Table::new(vec!["salary".to_string()], rows).unwrap();

        let insights = generate_insights(&table);
        assert!(insights.contains(&"1 employees have unusually high salaries.".to_string()));
        assert!(insights.contains(&"The highest salary is 1000000.".to_string()));
    }

    #[test]
    fn test_non_numeric_salary_column_is_skipped() {
        let table = Table::from_data(vec!["salary"], vec![vec!["n/a"], vec!["tbd"]]).unwrap();
        let insights = generate_insights(&table);
        assert!(insights.iter().all(|s| !s.contains("salary")));
    }

    #[test]
    fn test_most_common_prefers_first_on_tie() {
        assert_eq!(most_common(["b", "a", "a", "b"]), Some(("b", 2)));
        assert_eq!(most_common(Vec::<i32>::new()), None);
    }

    #[test]
    fn test_single_salary_has_no_outliers() {
        let stats = SalaryStats::from_values(&[42.0]).unwrap();
        assert_eq!(stats.outliers, 0);
        assert!((stats.mean - 42.0).abs() < f64::EPSILON);
    }
}
