//! Shift record model and related types.
//!
//! This module defines the [`ShiftKind`] tagged union, the persisted
//! [`ShiftRecord`] entity and the [`ShiftDraft`] that a store turns into a
//! record at creation time.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The pay model of a single work shift.
///
/// A closed set: every shift is paid under exactly one of these three
/// models, and each variant carries only the fields its formula reads.
/// Adding a fourth pay model means adding a variant here, which forces
/// every `match` over the kind to be revisited at compile time.
///
/// # Example
///
/// ```
/// use driver_pay_engine::models::ShiftKind;
/// use rust_decimal::Decimal;
///
/// let kind = ShiftKind::Intercity {
///     distance_km: Decimal::new(120, 0),
///     price_per_km: Decimal::new(85, 1),
/// };
/// assert_eq!(kind.type_code(), "INTERCITY");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShiftKind {
    /// A city shift paid from the configured base rate plus per-point and
    /// per-ton rates.
    #[serde(rename = "CITY_MAIN")]
    CityMain {
        /// Delivery points served.
        #[serde(default)]
        points: u32,
        /// Additional points on top of the planned route.
        #[serde(default)]
        extra_points: u32,
        /// Cargo weight in tons.
        #[serde(default)]
        weight: Decimal,
    },

    /// A city shift paid from a manually entered base amount plus the same
    /// per-point and per-ton rates.
    #[serde(rename = "CITY_EXTRA")]
    CityExtra {
        /// Delivery points served.
        #[serde(default)]
        points: u32,
        /// Additional points on top of the planned route.
        #[serde(default)]
        extra_points: u32,
        /// Cargo weight in tons.
        #[serde(default)]
        weight: Decimal,
        /// The caller-supplied base amount replacing the configured rate.
        #[serde(default)]
        manual_base: Decimal,
    },

    /// An intercity trip paid purely by distance times rate per kilometre.
    #[serde(rename = "INTERCITY")]
    Intercity {
        /// Distance driven in kilometres.
        #[serde(default)]
        distance_km: Decimal,
        /// Agreed price per kilometre.
        #[serde(default)]
        price_per_km: Decimal,
    },
}

impl ShiftKind {
    /// Returns the wire code for this pay model (`CITY_MAIN`, `CITY_EXTRA`
    /// or `INTERCITY`).
    pub fn type_code(&self) -> &'static str {
        match self {
            ShiftKind::CityMain { .. } => "CITY_MAIN",
            ShiftKind::CityExtra { .. } => "CITY_EXTRA",
            ShiftKind::Intercity { .. } => "INTERCITY",
        }
    }

    /// Returns points plus extra points, zero for intercity trips.
    pub fn points_total(&self) -> u64 {
        match self {
            ShiftKind::CityMain {
                points,
                extra_points,
                ..
            }
            | ShiftKind::CityExtra {
                points,
                extra_points,
                ..
            } => u64::from(*points) + u64::from(*extra_points),
            ShiftKind::Intercity { .. } => 0,
        }
    }

    /// Returns the cargo weight in tons, zero for intercity trips.
    pub fn weight(&self) -> Decimal {
        match self {
            ShiftKind::CityMain { weight, .. } | ShiftKind::CityExtra { weight, .. } => *weight,
            ShiftKind::Intercity { .. } => Decimal::ZERO,
        }
    }

    /// Returns the distance in kilometres, zero for city shifts.
    pub fn distance_km(&self) -> Decimal {
        match self {
            ShiftKind::Intercity { distance_km, .. } => *distance_km,
            ShiftKind::CityMain { .. } | ShiftKind::CityExtra { .. } => Decimal::ZERO,
        }
    }
}

/// The caller-supplied half of a shift record, before a store assigns the
/// id and snapshots the computed income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftDraft {
    /// The calendar date the shift was worked.
    pub date: NaiveDate,
    /// The pay model and its raw inputs.
    #[serde(flatten)]
    pub kind: ShiftKind,
}

/// One persisted work shift and its income snapshot.
///
/// `total_income` is the authoritative value computed at save time from the
/// pricing then in force. It is historical fact: later pricing changes are
/// not retroactive and nothing recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftRecord {
    /// Unique identifier, assigned at creation, immutable.
    pub id: String,
    /// The calendar date the shift was worked.
    pub date: NaiveDate,
    /// The pay model and its raw inputs.
    #[serde(flatten)]
    pub kind: ShiftKind,
    /// The income computed at save time.
    pub total_income: Decimal,
}

impl ShiftRecord {
    /// Checks whether this record's date falls in the given calendar month.
    ///
    /// Dates are naive calendar dates; the comparison reads the stored
    /// date's year and month directly.
    pub fn falls_in(&self, year: i32, month: u32) -> bool {
        self.date.year() == year && self.date.month() == month
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(s: &str) -> NaiveDate {
        NaiveDate::from_str(s).unwrap()
    }

    #[test]
    fn test_type_codes_are_the_closed_set() {
        let main = ShiftKind::CityMain {
            points: 0,
            extra_points: 0,
            weight: Decimal::ZERO,
        };
        let extra = ShiftKind::CityExtra {
            points: 0,
            extra_points: 0,
            weight: Decimal::ZERO,
            manual_base: Decimal::ZERO,
        };
        let intercity = ShiftKind::Intercity {
            distance_km: Decimal::ZERO,
            price_per_km: Decimal::ZERO,
        };

        assert_eq!(main.type_code(), "CITY_MAIN");
        assert_eq!(extra.type_code(), "CITY_EXTRA");
        assert_eq!(intercity.type_code(), "INTERCITY");
    }

    #[test]
    fn test_points_total_sums_both_point_fields() {
        let kind = ShiftKind::CityMain {
            points: 5,
            extra_points: 3,
            weight: Decimal::ZERO,
        };
        assert_eq!(kind.points_total(), 8);
    }

    #[test]
    fn test_points_total_is_zero_for_intercity() {
        let kind = ShiftKind::Intercity {
            distance_km: dec("120"),
            price_per_km: dec("8.5"),
        };
        assert_eq!(kind.points_total(), 0);
        assert_eq!(kind.weight(), Decimal::ZERO);
    }

    #[test]
    fn test_distance_is_zero_for_city_shifts() {
        let kind = ShiftKind::CityExtra {
            points: 2,
            extra_points: 0,
            weight: dec("1.5"),
            manual_base: dec("300"),
        };
        assert_eq!(kind.distance_km(), Decimal::ZERO);
        assert_eq!(kind.weight(), dec("1.5"));
    }

    #[test]
    fn test_falls_in_matches_year_and_month() {
        let record = ShiftRecord {
            id: "rec_1".to_string(),
            date: make_date("2024-03-31"),
            kind: ShiftKind::Intercity {
                distance_km: dec("10"),
                price_per_km: dec("1"),
            },
            total_income: dec("10"),
        };

        assert!(record.falls_in(2024, 3));
        assert!(!record.falls_in(2024, 4));
        assert!(!record.falls_in(2023, 3));
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let record = ShiftRecord {
            id: "rec_1".to_string(),
            date: make_date("2024-05-12"),
            kind: ShiftKind::CityMain {
                points: 5,
                extra_points: 1,
                weight: dec("2"),
            },
            total_income: dec("260"),
        };

        let json = serde_json::to_string(&record).unwrap();
        let deserialized: ShiftRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, deserialized);
    }

    #[test]
    fn test_kind_tag_is_flattened_into_the_record() {
        let record = ShiftRecord {
            id: "rec_1".to_string(),
            date: make_date("2024-05-12"),
            kind: ShiftKind::Intercity {
                distance_km: dec("120"),
                price_per_km: dec("8.5"),
            },
            total_income: dec("1020"),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "INTERCITY");
        assert_eq!(json["distance_km"], "120");
    }

    #[test]
    fn test_missing_numeric_fields_default_to_zero() {
        let json = r#"{
            "date": "2024-05-12",
            "type": "CITY_MAIN",
            "points": 4
        }"#;

        let draft: ShiftDraft = serde_json::from_str(json).unwrap();
        match draft.kind {
            ShiftKind::CityMain {
                points,
                extra_points,
                weight,
            } => {
                assert_eq!(points, 4);
                assert_eq!(extra_points, 0);
                assert_eq!(weight, Decimal::ZERO);
            }
            other => panic!("Expected CityMain, got {:?}", other),
        }
    }
}
