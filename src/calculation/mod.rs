//! Calculation logic for the driver pay engine.
//!
//! This module contains the pure functions of the system: the per-shift
//! income formula and the monthly aggregation. Both are total — they
//! normalize bad numeric input to zero rather than failing.

mod earnings;
mod monthly;

pub use earnings::compute_income;
pub use monthly::aggregate_month;
