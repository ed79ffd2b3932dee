//! Monthly summary model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The aggregate over all shifts whose date falls within one calendar month.
///
/// Derived, never persisted: produced by
/// [`aggregate_month`](crate::calculation::aggregate_month) from the record
/// set and thrown away after display.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Sum of every record's income snapshot.
    pub total_income: Decimal,
    /// Sum of intercity distances in kilometres.
    pub total_distance_km: Decimal,
    /// Sum of points plus extra points across city shifts.
    pub total_points: u64,
    /// Sum of cargo weight in tons across city shifts.
    pub total_weight: Decimal,
    /// Number of shifts worked in the month.
    pub shift_count: usize,
}
