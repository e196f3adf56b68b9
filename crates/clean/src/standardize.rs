//! Canonical snake_case column names.

use regex::Regex;
use std::collections::{HashMap, HashSet};

fn punctuation_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("valid regex"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Rewrite one label as a lowercase identifier.
///
/// `%` becomes `pct`, `&` becomes `and`, other punctuation is removed and
/// whitespace runs become single underscores. Falls back to `column`.
#[must_use]
pub fn standardize_name(name: &str) -> String {
    let lowered = name
        .trim()
        .to_lowercase()
        .replace('%', " pct")
        .replace('&', " and ");
    let stripped = punctuation_regex().replace_all(&lowered, "");
    let snake = whitespace_regex().replace_all(&stripped, "_");
    let snake = snake.trim_matches('_');
    if snake.is_empty() {
        "column".to_string()
    } else {
        snake.to_string()
    }
}

/// Standardize every name, then resolve collisions with [`make_unique`].
#[must_use]
pub fn standardize_column_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let standardized: Vec<String> = names.iter().map(|n| standardize_name(n.as_ref())).collect();
    make_unique(standardized)
}

/// Suffix repeated names with `_1`, `_2`, ... in first-seen order.
///
/// The first occurrence keeps the bare name. A suffixed name that is
/// already taken moves on to the next free number, so the output never
/// contains duplicates.
#[must_use]
pub fn make_unique(names: Vec<String>) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut used: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());

    for base in names {
        let count = counts.entry(base.clone()).or_insert(0);
        let mut candidate = if *count == 0 {
            base.clone()
        } else {
            format!("{base}_{count}")
        };
        while used.contains(&candidate) {
            *count += 1;
            candidate = format!("{base}_{count}");
        }
        *count += 1;
        used.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standardize_name() {
        assert_eq!(standardize_name("EmployeeID"), "employeeid");
        assert_eq!(standardize_name("  First   Name "), "first_name");
        assert_eq!(standardize_name("Growth %"), "growth_pct");
        assert_eq!(standardize_name("R&D Cost ($)"), "r_and_d_cost");
        assert_eq!(standardize_name("Hire-Date"), "hiredate");
        assert_eq!(standardize_name("!!!"), "column");
        assert_eq!(standardize_name(""), "column");
    }

    #[test]
    fn test_collisions_get_suffixes_in_order() {
        assert_eq!(
            standardize_column_names(&["Name", "name", "NAME ", "Dept"]),
            vec!["name", "name_1", "name_2", "dept"]
        );
    }

    #[test]
    fn test_suffix_skips_taken_names() {
        assert_eq!(
            make_unique(vec!["a".into(), "a".into(), "a_1".into()]),
            vec!["a", "a_1", "a_1_1"]
        );
        assert_eq!(
            make_unique(vec!["a_1".into(), "a".into(), "a".into()]),
            vec!["a_1", "a", "a_2"]
        );
    }

    #[test]
    fn test_standardizing_twice_is_a_noop() {
        let once = standardize_column_names(&["Total Sales %", "Q1 & Q2", "Q1 & Q2", "", "column"]);
        let twice = standardize_column_names(&once);
        assert_eq!(once, twice);
    }
}
