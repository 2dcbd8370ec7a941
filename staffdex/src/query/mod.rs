//! Pure aggregation functions over an employee collection.
//!
//! These are deterministic and cache-agnostic: the consistency engine
//! resolves a collection first, then runs these over it. Records
//! missing a field an aggregation needs are skipped, never fatal.

use crate::model::Employee;

/// Filters employees whose name contains `query` as a case-sensitive
/// substring.
///
/// An empty query returns the full collection unfiltered. Records
/// without a name never match a non-empty query.
pub fn search_by_name(employees: &[Employee], query: &str) -> Vec<Employee> {
    if query.is_empty() {
        return employees.to_vec();
    }

    employees
        .iter()
        .filter(|e| e.name.as_deref().is_some_and(|name| name.contains(query)))
        .cloned()
        .collect()
}

/// The highest salary present in the collection, ignoring records
/// without one. `None` when no record carries a salary.
pub fn highest_salary(employees: &[Employee]) -> Option<i64> {
    employees.iter().filter_map(|e| e.salary).max()
}

/// Names of the top earners, descending by salary, at most `limit`.
///
/// Records lacking a name or salary are skipped. The sort is stable:
/// ties keep their original collection order.
pub fn top_earning_names(employees: &[Employee], limit: usize) -> Vec<String> {
    let mut earners: Vec<(&str, i64)> = employees
        .iter()
        .filter(|e| e.has_aggregatable_fields())
        .map(|e| (e.name.as_deref().unwrap_or_default(), e.salary.unwrap_or_default()))
        .collect();

    earners.sort_by(|a, b| b.1.cmp(&a.1));

    earners
        .into_iter()
        .take(limit)
        .map(|(name, _)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn employee(id: &str, name: Option<&str>, salary: Option<i64>) -> Employee {
        Employee {
            id: Some(id.to_string()),
            name: name.map(String::from),
            salary,
            ..Default::default()
        }
    }

    #[test]
    fn test_search_empty_query_returns_everything() {
        let employees = vec![
            employee("e-1", Some("Alice"), Some(5000)),
            employee("e-2", None, Some(100)),
        ];
        assert_eq!(search_by_name(&employees, "").len(), 2);
    }

    #[test]
    fn test_search_is_case_sensitive_substring() {
        let employees = vec![
            employee("e-1", Some("Natalie"), None),
            employee("e-2", Some("Alice"), None),
            employee("e-3", Some("Salim"), None),
        ];

        let matched = search_by_name(&employees, "ali");
        let names: Vec<_> = matched.iter().filter_map(|e| e.name.as_deref()).collect();
        assert_eq!(names, vec!["Natalie", "Salim"]);

        assert!(search_by_name(&employees, "ALI").is_empty());
    }

    #[test]
    fn test_search_skips_nameless_records() {
        let employees = vec![employee("e-1", None, Some(5000))];
        assert!(search_by_name(&employees, "a").is_empty());
    }

    #[test]
    fn test_highest_salary_ignores_missing() {
        let employees = vec![
            employee("e-1", Some("A"), Some(5000)),
            employee("e-2", Some("B"), Some(10000)),
            employee("e-3", Some("C"), None),
        ];
        assert_eq!(highest_salary(&employees), Some(10000));
    }

    #[test]
    fn test_highest_salary_none_when_no_salaries() {
        let employees = vec![employee("e-1", Some("A"), None)];
        assert_eq!(highest_salary(&employees), None);
        assert_eq!(highest_salary(&[]), None);
    }

    #[test]
    fn test_top_earners_descending_with_limit_beyond_len() {
        let employees = vec![
            employee("e-1", Some("Alice"), Some(5000)),
            employee("e-2", Some("Bob"), Some(10000)),
        ];
        assert_eq!(
            top_earning_names(&employees, 10),
            vec!["Bob".to_string(), "Alice".to_string()]
        );
    }

    #[test]
    fn test_top_earners_empty_input_is_empty() {
        assert!(top_earning_names(&[], 10).is_empty());
    }

    #[test]
    fn test_top_earners_skips_partial_records() {
        let employees = vec![
            employee("e-1", Some("Alice"), Some(5000)),
            employee("e-2", None, Some(90000)),
            employee("e-3", Some("NoPay"), None),
            employee("e-4", Some("Bob"), Some(6000)),
        ];
        assert_eq!(
            top_earning_names(&employees, 10),
            vec!["Bob".to_string(), "Alice".to_string()]
        );
    }

    #[test]
    fn test_top_earners_ties_keep_collection_order() {
        let employees = vec![
            employee("e-1", Some("First"), Some(5000)),
            employee("e-2", Some("Second"), Some(5000)),
            employee("e-3", Some("Third"), Some(5000)),
        ];
        assert_eq!(
            top_earning_names(&employees, 2),
            vec!["First".to_string(), "Second".to_string()]
        );
    }

    proptest! {
        #[test]
        fn prop_top_earners_never_exceeds_limit(
            salaries in prop::collection::vec(0i64..1_000_000, 0..40),
            limit in 0usize..20,
        ) {
            let employees: Vec<Employee> = salaries
                .iter()
                .enumerate()
                .map(|(i, &s)| employee(&format!("e-{}", i), Some(&format!("n{}", i)), Some(s)))
                .collect();

            let top = top_earning_names(&employees, limit);
            prop_assert!(top.len() <= limit);
            prop_assert!(top.len() <= employees.len());
        }

        #[test]
        fn prop_top_earners_sorted_descending(
            salaries in prop::collection::vec(0i64..1_000_000, 0..40),
        ) {
            let employees: Vec<Employee> = salaries
                .iter()
                .enumerate()
                .map(|(i, &s)| employee(&format!("e-{}", i), Some(&format!("n{}", i)), Some(s)))
                .collect();

            let top = top_earning_names(&employees, employees.len());
            let ranked: Vec<i64> = top
                .iter()
                .map(|name| {
                    employees
                        .iter()
                        .find(|e| e.name.as_deref() == Some(name))
                        .and_then(|e| e.salary)
                        .unwrap_or_default()
                })
                .collect();
            prop_assert!(ranked.windows(2).all(|w| w[0] >= w[1]));
        }

        #[test]
        fn prop_highest_salary_is_max_of_present(
            salaries in prop::collection::vec(prop::option::of(0i64..1_000_000), 0..40),
        ) {
            let employees: Vec<Employee> = salaries
                .iter()
                .enumerate()
                .map(|(i, &s)| employee(&format!("e-{}", i), Some("n"), s))
                .collect();

            let expected = salaries.iter().flatten().copied().max();
            prop_assert_eq!(highest_salary(&employees), expected);
        }
    }
}
