//! Earnings calculation for a single shift.
//!
//! This module provides the pure income formula for each pay model. The
//! calculation is total: every [`ShiftKind`] has a defined formula, negative
//! raw inputs are clamped to zero before the arithmetic, and the function
//! never fails.

use rust_decimal::Decimal;

use crate::models::{PricingConfig, ShiftKind};

/// Clamps a raw numeric input to zero.
///
/// Missing inputs default to zero at the deserialization boundary; negative
/// inputs are treated as zero here, so both behave identically.
fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}

/// Computes the income for one shift under the given pricing.
///
/// Pure and side-effect free. The formula depends on the pay model:
///
/// - `CITY_MAIN`: `base_rate + (points + extra_points) * price_per_point +
///   weight * price_per_ton`
/// - `CITY_EXTRA`: as `CITY_MAIN`, with the caller-supplied `manual_base`
///   in place of the configured `base_rate`
/// - `INTERCITY`: `distance_km * price_per_km`, ignoring pricing entirely
///
/// Negative inputs — including negative pricing values — are clamped to
/// zero, so the result is never derived from a negative operand.
///
/// # Example
///
/// ```
/// use driver_pay_engine::calculation::compute_income;
/// use driver_pay_engine::models::{PricingConfig, ShiftKind};
/// use rust_decimal::Decimal;
///
/// let pricing = PricingConfig {
///     base_rate: Decimal::new(100, 0),
///     price_per_point: Decimal::new(10, 0),
///     price_per_ton: Decimal::new(50, 0),
/// };
/// let kind = ShiftKind::CityMain {
///     points: 5,
///     extra_points: 1,
///     weight: Decimal::new(2, 0),
/// };
/// assert_eq!(compute_income(&kind, &pricing), Decimal::new(260, 0));
/// ```
pub fn compute_income(kind: &ShiftKind, pricing: &PricingConfig) -> Decimal {
    match kind {
        ShiftKind::CityMain {
            points,
            extra_points,
            weight,
        } => {
            non_negative(pricing.base_rate)
                + city_variable_part(*points, *extra_points, *weight, pricing)
        }
        ShiftKind::CityExtra {
            points,
            extra_points,
            weight,
            manual_base,
        } => {
            non_negative(*manual_base)
                + city_variable_part(*points, *extra_points, *weight, pricing)
        }
        ShiftKind::Intercity {
            distance_km,
            price_per_km,
        } => non_negative(*distance_km) * non_negative(*price_per_km),
    }
}

/// The per-point and per-ton part shared by both city pay models.
fn city_variable_part(
    points: u32,
    extra_points: u32,
    weight: Decimal,
    pricing: &PricingConfig,
) -> Decimal {
    let points_total = Decimal::from(u64::from(points) + u64::from(extra_points));
    points_total * non_negative(pricing.price_per_point)
        + non_negative(weight) * non_negative(pricing.price_per_ton)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_pricing() -> PricingConfig {
        PricingConfig {
            base_rate: dec("100"),
            price_per_point: dec("10"),
            price_per_ton: dec("50"),
        }
    }

    /// EC-001: city main with points, extra points and weight
    #[test]
    fn test_city_main_scenario() {
        let kind = ShiftKind::CityMain {
            points: 5,
            extra_points: 1,
            weight: dec("2"),
        };

        // 100 + 6*10 + 2*50 = 260
        assert_eq!(compute_income(&kind, &test_pricing()), dec("260"));
    }

    /// EC-002: intercity is distance times rate
    #[test]
    fn test_intercity_scenario() {
        let kind = ShiftKind::Intercity {
            distance_km: dec("120"),
            price_per_km: dec("8.5"),
        };

        assert_eq!(compute_income(&kind, &test_pricing()), dec("1020"));
    }

    /// EC-003: city extra takes its base from the caller
    #[test]
    fn test_city_extra_scenario() {
        let kind = ShiftKind::CityExtra {
            points: 2,
            extra_points: 0,
            weight: dec("1"),
            manual_base: dec("300"),
        };

        // 300 + 2*10 + 1*50 = 370
        assert_eq!(compute_income(&kind, &test_pricing()), dec("370"));
    }

    /// EC-004: all-zero inputs produce zero, never an error
    #[test]
    fn test_zero_inputs_produce_zero() {
        let pricing = PricingConfig::default();
        let kinds = [
            ShiftKind::CityMain {
                points: 0,
                extra_points: 0,
                weight: Decimal::ZERO,
            },
            ShiftKind::CityExtra {
                points: 0,
                extra_points: 0,
                weight: Decimal::ZERO,
                manual_base: Decimal::ZERO,
            },
            ShiftKind::Intercity {
                distance_km: Decimal::ZERO,
                price_per_km: Decimal::ZERO,
            },
        ];

        for kind in kinds {
            assert_eq!(compute_income(&kind, &pricing), Decimal::ZERO);
        }
    }

    /// EC-005: negative raw inputs behave like explicit zero
    #[test]
    fn test_negative_weight_clamps_to_zero() {
        let negative = ShiftKind::CityMain {
            points: 5,
            extra_points: 1,
            weight: dec("-3"),
        };
        let zero = ShiftKind::CityMain {
            points: 5,
            extra_points: 1,
            weight: Decimal::ZERO,
        };

        assert_eq!(
            compute_income(&negative, &test_pricing()),
            compute_income(&zero, &test_pricing())
        );
    }

    /// EC-006: negative pricing never drives the result below zero
    #[test]
    fn test_negative_pricing_clamps_to_zero() {
        let pricing = PricingConfig {
            base_rate: dec("-100"),
            price_per_point: dec("-10"),
            price_per_ton: dec("-50"),
        };
        let kind = ShiftKind::CityMain {
            points: 5,
            extra_points: 1,
            weight: dec("2"),
        };

        assert_eq!(compute_income(&kind, &pricing), Decimal::ZERO);
    }

    /// EC-007: city main base comes from pricing, not from the shift
    #[test]
    fn test_city_main_only_differs_from_city_extra_in_base_source() {
        let pricing = test_pricing();
        let main = ShiftKind::CityMain {
            points: 3,
            extra_points: 2,
            weight: dec("1.5"),
        };
        let extra = ShiftKind::CityExtra {
            points: 3,
            extra_points: 2,
            weight: dec("1.5"),
            manual_base: pricing.base_rate,
        };

        assert_eq!(
            compute_income(&main, &pricing),
            compute_income(&extra, &pricing)
        );
    }

    fn money() -> impl Strategy<Value = Decimal> {
        // Two decimal places, bounded well away from Decimal overflow.
        (0i64..1_000_000).prop_map(|n| Decimal::new(n, 2))
    }

    proptest! {
        /// The city main formula holds for all valid inputs.
        #[test]
        fn prop_city_main_formula(
            points in 0u32..10_000,
            extra_points in 0u32..10_000,
            weight in money(),
            base_rate in money(),
            price_per_point in money(),
            price_per_ton in money(),
        ) {
            let pricing = PricingConfig { base_rate, price_per_point, price_per_ton };
            let kind = ShiftKind::CityMain { points, extra_points, weight };

            let expected = base_rate
                + Decimal::from(u64::from(points) + u64::from(extra_points)) * price_per_point
                + weight * price_per_ton;
            prop_assert_eq!(compute_income(&kind, &pricing), expected);
        }

        /// Intercity income depends only on distance and the per-km rate.
        #[test]
        fn prop_intercity_ignores_pricing(
            distance_km in money(),
            price_per_km in money(),
            base_rate in money(),
            price_per_point in money(),
            price_per_ton in money(),
        ) {
            let kind = ShiftKind::Intercity { distance_km, price_per_km };
            let pricing = PricingConfig { base_rate, price_per_point, price_per_ton };

            prop_assert_eq!(
                compute_income(&kind, &pricing),
                compute_income(&kind, &PricingConfig::default())
            );
            prop_assert_eq!(compute_income(&kind, &pricing), distance_km * price_per_km);
        }

        /// A negative input is indistinguishable from an explicit zero.
        #[test]
        fn prop_negative_inputs_behave_like_zero(
            magnitude in 1i64..1_000_000,
            points in 0u32..10_000,
        ) {
            let pricing = test_pricing();
            let negative = ShiftKind::CityExtra {
                points,
                extra_points: 0,
                weight: Decimal::new(-magnitude, 2),
                manual_base: Decimal::new(-magnitude, 2),
            };
            let zero = ShiftKind::CityExtra {
                points,
                extra_points: 0,
                weight: Decimal::ZERO,
                manual_base: Decimal::ZERO,
            };

            prop_assert_eq!(
                compute_income(&negative, &pricing),
                compute_income(&zero, &pricing)
            );
        }

        /// With non-negative inputs the result is never negative.
        #[test]
        fn prop_result_is_non_negative(
            points in 0u32..10_000,
            extra_points in 0u32..10_000,
            weight in money(),
            manual_base in money(),
        ) {
            let kind = ShiftKind::CityExtra { points, extra_points, weight, manual_base };
            prop_assert!(compute_income(&kind, &test_pricing()) >= Decimal::ZERO);
        }
    }
}
