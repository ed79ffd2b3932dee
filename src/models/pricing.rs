//! Pricing configuration model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The per-account tariff values used by city shift calculations.
///
/// One configuration exists per identity. It is created lazily with all-zero
/// defaults, read on every calculation, and replaced wholesale on save —
/// there are no partial-field updates.
///
/// # Example
///
/// ```
/// use driver_pay_engine::models::PricingConfig;
/// use rust_decimal::Decimal;
///
/// let pricing = PricingConfig::default();
/// assert_eq!(pricing.base_rate, Decimal::ZERO);
/// assert_eq!(pricing.price_per_point, Decimal::ZERO);
/// assert_eq!(pricing.price_per_ton, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Flat amount paid for every `CITY_MAIN` shift.
    #[serde(default)]
    pub base_rate: Decimal,
    /// Rate paid per delivery point.
    #[serde(default)]
    pub price_per_point: Decimal,
    /// Rate paid per ton of cargo.
    #[serde(default)]
    pub price_per_ton: Decimal,
}
