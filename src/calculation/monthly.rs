//! Monthly aggregation over the record set.
//!
//! This module reduces a set of shift records to the [`MonthlySummary`] for
//! one calendar month. The reduction is a pure sum: deterministic,
//! order-independent and idempotent.

use crate::models::{MonthlySummary, ShiftRecord};

/// Aggregates the records falling in the given calendar month.
///
/// Filters `records` to those whose date matches `year`/`month` (naive
/// calendar date, no timezone rule), then sums income, distance, points and
/// weight; `shift_count` is the filtered count. An empty or non-matching
/// input yields the all-zero summary, never an error.
///
/// # Example
///
/// ```
/// use driver_pay_engine::calculation::aggregate_month;
///
/// let summary = aggregate_month(&[], 2024, 5);
/// assert_eq!(summary.shift_count, 0);
/// ```
pub fn aggregate_month(records: &[ShiftRecord], year: i32, month: u32) -> MonthlySummary {
    records
        .iter()
        .filter(|record| record.falls_in(year, month))
        .fold(MonthlySummary::default(), |mut summary, record| {
            summary.total_income += record.total_income;
            summary.total_distance_km += record.kind.distance_km();
            summary.total_points += record.kind.points_total();
            summary.total_weight += record.kind.weight();
            summary.shift_count += 1;
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShiftKind;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    fn city_record(id: &str, date: &str, points: u32, weight: &str, income: &str) -> ShiftRecord {
        ShiftRecord {
            id: id.to_string(),
            date: make_date(date),
            kind: ShiftKind::CityMain {
                points,
                extra_points: 0,
                weight: dec(weight),
            },
            total_income: dec(income),
        }
    }

    fn intercity_record(id: &str, date: &str, km: &str, income: &str) -> ShiftRecord {
        ShiftRecord {
            id: id.to_string(),
            date: make_date(date),
            kind: ShiftKind::Intercity {
                distance_km: dec(km),
                price_per_km: dec("8"),
            },
            total_income: dec(income),
        }
    }

    /// MA-001: empty input yields the all-zero summary
    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = aggregate_month(&[], 2024, 5);
        assert_eq!(summary, MonthlySummary::default());
    }

    /// MA-002: mixed months are filtered to the requested one
    #[test]
    fn test_filters_to_requested_month() {
        let records = vec![
            city_record("a", "2024-05-01", 3, "1", "130"),
            intercity_record("b", "2024-05-20", "100", "800"),
            city_record("c", "2024-06-01", 9, "9", "999"),
            city_record("d", "2023-05-15", 9, "9", "999"),
        ];

        let summary = aggregate_month(&records, 2024, 5);

        assert_eq!(summary.shift_count, 2);
        assert_eq!(summary.total_income, dec("930"));
        assert_eq!(summary.total_distance_km, dec("100"));
        assert_eq!(summary.total_points, 3);
        assert_eq!(summary.total_weight, dec("1"));
    }

    /// MA-003: month boundaries are inclusive of the first and last day
    #[test]
    fn test_month_boundary_days_are_included() {
        let records = vec![
            city_record("first", "2024-02-01", 1, "0", "10"),
            city_record("last", "2024-02-29", 1, "0", "10"),
            city_record("next", "2024-03-01", 1, "0", "10"),
        ];

        let summary = aggregate_month(&records, 2024, 2);

        assert_eq!(summary.shift_count, 2);
        assert_eq!(summary.total_income, dec("20"));
    }

    /// MA-004: points sum across both city pay models
    #[test]
    fn test_points_and_weight_sum_across_city_kinds() {
        let records = vec![
            city_record("a", "2024-05-01", 5, "2", "260"),
            ShiftRecord {
                id: "b".to_string(),
                date: make_date("2024-05-02"),
                kind: ShiftKind::CityExtra {
                    points: 2,
                    extra_points: 3,
                    weight: dec("1.5"),
                    manual_base: dec("300"),
                },
                total_income: dec("370"),
            },
        ];

        let summary = aggregate_month(&records, 2024, 5);

        assert_eq!(summary.total_points, 10);
        assert_eq!(summary.total_weight, dec("3.5"));
    }

    /// MA-005: re-aggregating the same input is idempotent
    #[test]
    fn test_aggregation_is_idempotent() {
        let records = vec![
            city_record("a", "2024-05-01", 3, "1", "130"),
            intercity_record("b", "2024-05-20", "100", "800"),
        ];

        assert_eq!(
            aggregate_month(&records, 2024, 5),
            aggregate_month(&records, 2024, 5)
        );
    }

    proptest! {
        /// Permuting the input never changes the summary.
        #[test]
        fn prop_order_independent(incomes in proptest::collection::vec(0i64..100_000, 0..30)) {
            let records: Vec<ShiftRecord> = incomes
                .iter()
                .enumerate()
                .map(|(i, n)| {
                    city_record(
                        &format!("rec_{}", i),
                        "2024-05-10",
                        (*n % 50) as u32,
                        "1",
                        &Decimal::new(*n, 2).to_string(),
                    )
                })
                .collect();
            let mut reversed = records.clone();
            reversed.reverse();

            prop_assert_eq!(
                aggregate_month(&records, 2024, 5),
                aggregate_month(&reversed, 2024, 5)
            );
        }

        /// Every record outside the month leaves the summary untouched.
        #[test]
        fn prop_other_months_do_not_contribute(month in 1u32..=12, other in 1u32..=12) {
            prop_assume!(month != other);
            let record = city_record(
                "a",
                &format!("2024-{:02}-15", other),
                3,
                "1",
                "130",
            );

            let summary = aggregate_month(std::slice::from_ref(&record), 2024, month);
            prop_assert_eq!(summary, MonthlySummary::default());
        }
    }
}
