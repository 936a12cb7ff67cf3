use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use survey_insights_core::AnalyticsError;
use survey_insights_stats::*;

fn repeat(value: &str, times: usize) -> Vec<String> {
    vec![value.to_string(); times]
}

#[test]
fn test_cross_tab_known_table() {
    // Table: (a, x)=10, (a, y)=20, (b, x)=30, (b, y)=40
    let mut rows = Vec::new();
    let mut columns = Vec::new();
    for (row, column, count) in [("a", "x", 10), ("a", "y", 20), ("b", "x", 30), ("b", "y", 40)] {
        rows.extend(repeat(row, count));
        columns.extend(repeat(column, count));
    }

    let result = CrossTabulator::default().cross_tabulate(&rows, &columns).unwrap();

    assert_eq!(result.row_categories, vec!["a", "b"]);
    assert_eq!(result.column_categories, vec!["x", "y"]);
    assert_eq!(result.observed, vec![vec![10, 20], vec![30, 40]]);
    assert_eq!(result.total, 100);

    let chi = 4.0 / 12.0 + 4.0 / 18.0 + 4.0 / 28.0 + 4.0 / 42.0;
    assert_relative_eq!(result.chi_square.test_statistic, chi, epsilon = 1e-12);
    assert_relative_eq!(result.cramers_v, (chi / 100.0).sqrt(), epsilon = 1e-12);
}

#[test]
fn test_cross_tab_categories_sorted() {
    let rows = ["yes", "no", "maybe", "yes"];
    let columns = ["mobile", "desktop", "mobile", "tablet"];
    let result = CrossTabulator::default().cross_tabulate(&rows, &columns).unwrap();

    assert_eq!(result.row_categories, vec!["maybe", "no", "yes"]);
    assert_eq!(result.column_categories, vec!["desktop", "mobile", "tablet"]);
    assert_eq!(result.observed[2], vec![0, 1, 1]);
    assert_eq!(result.chi_square.degrees_of_freedom, 4.0);
}

#[test]
fn test_cross_tab_perfect_association() {
    let rows = ["a", "a", "b", "b"];
    let columns = ["x", "x", "y", "y"];
    let result = CrossTabulator::default().cross_tabulate(&rows, &columns).unwrap();

    assert_relative_eq!(result.cramers_v, 1.0, epsilon = 1e-12);
}

#[test]
fn test_cross_tab_single_category_has_zero_v() {
    let rows = ["a", "a", "a"];
    let columns = ["x", "y", "x"];
    let result = CrossTabulator::default().cross_tabulate(&rows, &columns).unwrap();

    assert_eq!(result.cramers_v, 0.0);
    assert_eq!(result.chi_square.test_statistic, 0.0);
    assert_eq!(result.chi_square.degrees_of_freedom, 0.0);
}

#[test]
fn test_cross_tab_length_mismatch() {
    let err = CrossTabulator::default()
        .cross_tabulate(&["a", "b"], &["x"])
        .unwrap_err();
    assert_eq!(err, AnalyticsError::LengthMismatch { left: 2, right: 1 });
}

#[test]
fn test_cross_tab_empty() {
    let empty: [&str; 0] = [];
    let err = CrossTabulator::default().cross_tabulate(&empty, &empty).unwrap_err();
    assert!(matches!(err, AnalyticsError::EmptyInput(_)));
}

#[test]
fn test_cramers_v_helper() {
    assert_eq!(cramers_v(10.0, 0, 2, 2), 0.0);
    assert_relative_eq!(cramers_v(25.0, 100, 3, 2), 0.5, epsilon = 1e-12);
}
