//! Warranty, age and depreciation calculations
//!
//! Everything here is pure: the current date is always an argument, nothing is
//! read from the clock or the database. Derived values are never stored, the
//! services recompute them on every read.

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Months};
use rust_decimal::prelude::{Decimal, FromPrimitive};
use serde::Serialize;
use utoipa::ToSchema;

use crate::config::ValuationStrategyKind;
use crate::models::asset::Asset;

/// Purchase date plus the warranty duration, using calendar months.
///
/// The day is clamped when the target month is shorter
/// (2024-01-31 + 1 month = 2024-02-29).
pub fn warranty_expiry(purchase_date: Option<NaiveDate>, warranty_months: u32) -> Option<NaiveDate> {
    purchase_date.and_then(|date| date.checked_add_months(Months::new(warranty_months)))
}

/// Whole calendar months between the purchase date and `today`.
///
/// A month is counted once `purchase_date + n months <= today`. Unknown or
/// future purchase dates give 0.
pub fn age_in_months(purchase_date: Option<NaiveDate>, today: NaiveDate) -> i32 {
    let Some(purchase) = purchase_date else {
        return 0;
    };
    if purchase >= today {
        return 0;
    }

    let mut months = (today.year() - purchase.year()) * 12 + today.month() as i32
        - purchase.month() as i32;

    let anniversary = purchase.checked_add_months(Months::new(months.max(0) as u32));
    if anniversary.map_or(true, |date| date > today) {
        months -= 1;
    }
    months.max(0)
}

/// A depreciation formula: how much of the purchase cost is left after `years`.
pub trait ValuationStrategy: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    /// Fraction of the purchase cost retained, for an annual rate in percent.
    fn retained_fraction(&self, depreciation_rate_pct: f64, years: f64) -> f64;
}

/// `1 - (rate/100)^years`.
///
/// This is the formula existing reports were built on. It is not a real
/// depreciation curve: the value dips to `1 - rate` after one year and then
/// climbs back toward the purchase cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct PowerOfRate;

impl ValuationStrategy for PowerOfRate {
    fn name(&self) -> &'static str {
        "power_of_rate"
    }

    fn retained_fraction(&self, depreciation_rate_pct: f64, years: f64) -> f64 {
        1.0 - (depreciation_rate_pct / 100.0).powf(years)
    }
}

/// Conventional declining balance, `(1 - rate/100)^years`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecliningBalance;

impl ValuationStrategy for DecliningBalance {
    fn name(&self) -> &'static str {
        "declining_balance"
    }

    fn retained_fraction(&self, depreciation_rate_pct: f64, years: f64) -> f64 {
        (1.0 - depreciation_rate_pct / 100.0).powf(years)
    }
}

/// Build the strategy selected in configuration
pub fn strategy_for(kind: ValuationStrategyKind) -> Arc<dyn ValuationStrategy> {
    match kind {
        ValuationStrategyKind::PowerOfRate => Arc::new(PowerOfRate),
        ValuationStrategyKind::DecliningBalance => Arc::new(DecliningBalance),
    }
}

const MONEY_SCALE: u32 = 2;

/// Depreciated value of an asset, never below its residual value.
///
/// A missing or zero purchase cost short-circuits to zero, residual value
/// included. The result always carries two decimal places.
pub fn current_value(
    strategy: &dyn ValuationStrategy,
    purchase_cost: Option<Decimal>,
    depreciation_rate_pct: f64,
    residual_value: Decimal,
    age_in_months: i32,
) -> Decimal {
    let cost = match purchase_cost {
        Some(cost) if !cost.is_zero() => cost,
        _ => return Decimal::new(0, MONEY_SCALE),
    };

    let years = f64::from(age_in_months) / 12.0;
    let factor = strategy.retained_fraction(depreciation_rate_pct, years);
    let factor = Decimal::from_f64(factor).unwrap_or(Decimal::ZERO);

    let mut value = (cost * factor).max(residual_value).round_dp(MONEY_SCALE);
    value.rescale(MONEY_SCALE);
    value
}

/// Warranty coverage relative to a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WarrantyStatus {
    Active { days_remaining: i64 },
    Expired { days_elapsed: i64 },
    Unknown,
}

impl WarrantyStatus {
    pub fn classify(expiry: Option<NaiveDate>, today: NaiveDate) -> Self {
        match expiry {
            None => WarrantyStatus::Unknown,
            Some(expiry) if expiry >= today => WarrantyStatus::Active {
                days_remaining: (expiry - today).num_days(),
            },
            Some(expiry) => WarrantyStatus::Expired {
                days_elapsed: (today - expiry).num_days(),
            },
        }
    }
}

impl fmt::Display for WarrantyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarrantyStatus::Active { days_remaining } => {
                write!(f, "Active ({} days left)", days_remaining)
            }
            WarrantyStatus::Expired { days_elapsed } => {
                write!(f, "Expired ({} days ago)", days_elapsed)
            }
            WarrantyStatus::Unknown => write!(f, "No warranty info"),
        }
    }
}

/// Derived fields of one asset for one day
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Valuation {
    pub warranty_expiry: Option<NaiveDate>,
    #[schema(value_type = Object)]
    pub warranty_status: WarrantyStatus,
    /// Human readable warranty status
    pub warranty_label: String,
    pub age_in_months: i32,
    pub current_value: Decimal,
}

/// Applies the configured strategy to stored asset data
#[derive(Debug, Clone)]
pub struct Valuator {
    strategy: Arc<dyn ValuationStrategy>,
}

impl Valuator {
    pub fn new(strategy: Arc<dyn ValuationStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    pub fn appraise(&self, asset: &Asset, today: NaiveDate) -> Valuation {
        let expiry = warranty_expiry(asset.purchase_date, asset.warranty_months.max(0) as u32);
        let age = age_in_months(asset.purchase_date, today);
        let status = WarrantyStatus::classify(expiry, today);

        Valuation {
            warranty_expiry: expiry,
            warranty_status: status,
            warranty_label: status.to_string(),
            age_in_months: age,
            current_value: current_value(
                self.strategy.as_ref(),
                asset.purchase_cost,
                asset.depreciation_rate,
                asset.residual_value,
                age,
            ),
        }
    }
}

impl Default for Valuator {
    fn default() -> Self {
        Self::new(Arc::new(PowerOfRate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_warranty_expiry() {
        assert_eq!(warranty_expiry(Some(date(2024, 1, 15)), 12), Some(date(2025, 1, 15)));
        assert_eq!(warranty_expiry(Some(date(2024, 1, 31)), 1), Some(date(2024, 2, 29)));
        assert_eq!(warranty_expiry(Some(date(2024, 3, 10)), 0), Some(date(2024, 3, 10)));
        assert_eq!(warranty_expiry(None, 12), None);
    }

    #[test]
    fn test_age_in_months() {
        assert_eq!(age_in_months(Some(date(2023, 1, 1)), date(2024, 7, 1)), 18);
        assert_eq!(age_in_months(Some(date(2023, 1, 15)), date(2024, 7, 14)), 17);
        assert_eq!(age_in_months(Some(date(2024, 5, 3)), date(2024, 5, 20)), 0);
        assert_eq!(age_in_months(None, date(2024, 7, 1)), 0);
    }

    #[test]
    fn test_age_in_months_end_of_month() {
        // Jan 31 + 1 month is Feb 29 in a leap year, not reached on Feb 28
        assert_eq!(age_in_months(Some(date(2024, 1, 31)), date(2024, 2, 28)), 0);
        assert_eq!(age_in_months(Some(date(2024, 1, 31)), date(2024, 2, 29)), 1);
        assert_eq!(age_in_months(Some(date(2023, 1, 31)), date(2023, 2, 28)), 1);
    }

    #[test]
    fn test_age_in_months_future_purchase() {
        assert_eq!(age_in_months(Some(date(2025, 1, 1)), date(2024, 7, 1)), 0);
    }

    #[test]
    fn test_current_value_power_of_rate() {
        let cost = Some(Decimal::new(1000, 0));
        assert_eq!(
            current_value(&PowerOfRate, cost, 20.0, Decimal::ZERO, 12),
            Decimal::new(800, 0)
        );
        // Value goes up again after the first year
        assert_eq!(
            current_value(&PowerOfRate, cost, 20.0, Decimal::ZERO, 24),
            Decimal::new(960, 0)
        );
    }

    #[test]
    fn test_current_value_has_two_decimals() {
        let cost = Some(Decimal::new(1000, 0));
        let cases = [
            (current_value(&PowerOfRate, cost, 20.0, Decimal::ZERO, 12), "800.00"),
            (current_value(&PowerOfRate, cost, 20.0, Decimal::ZERO, 24), "960.00"),
            (current_value(&PowerOfRate, cost, 20.0, Decimal::new(9005, 1), 12), "900.50"),
            (current_value(&PowerOfRate, None, 20.0, Decimal::ZERO, 12), "0.00"),
        ];
        for (value, expected) in cases {
            assert_eq!(value.scale(), 2);
            assert_eq!(value.to_string(), expected);
        }
    }

    #[test]
    fn test_current_value_brand_new_asset_is_floored_at_residual() {
        // 0.2^0 == 1, so the factor is 0 on the purchase month
        let cost = Some(Decimal::new(1000, 0));
        assert_eq!(
            current_value(&PowerOfRate, cost, 20.0, Decimal::new(50, 0), 0),
            Decimal::new(50, 0)
        );
    }

    #[test]
    fn test_current_value_missing_or_zero_cost() {
        assert_eq!(current_value(&PowerOfRate, None, 20.0, Decimal::new(100, 0), 12), Decimal::ZERO);
        assert_eq!(
            current_value(&PowerOfRate, Some(Decimal::ZERO), 35.0, Decimal::new(100, 0), 40),
            Decimal::ZERO
        );
        assert_eq!(
            current_value(&DecliningBalance, Some(Decimal::ZERO), 20.0, Decimal::new(100, 0), 12),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_current_value_residual_floor() {
        let cost = Some(Decimal::new(1000, 0));
        assert_eq!(
            current_value(&PowerOfRate, cost, 20.0, Decimal::new(900, 0), 12),
            Decimal::new(900, 0)
        );
    }

    #[test]
    fn test_current_value_declining_balance() {
        let cost = Some(Decimal::new(1000, 0));
        assert_eq!(
            current_value(&DecliningBalance, cost, 20.0, Decimal::ZERO, 12),
            Decimal::new(800, 0)
        );
        assert_eq!(
            current_value(&DecliningBalance, cost, 20.0, Decimal::ZERO, 24),
            Decimal::new(640, 0)
        );
    }

    #[test]
    fn test_warranty_status() {
        let today = date(2024, 6, 1);
        assert_eq!(
            WarrantyStatus::classify(Some(date(2024, 6, 11)), today),
            WarrantyStatus::Active { days_remaining: 10 }
        );
        assert_eq!(
            WarrantyStatus::classify(Some(today), today),
            WarrantyStatus::Active { days_remaining: 0 }
        );
        assert_eq!(
            WarrantyStatus::classify(Some(date(2024, 5, 30)), today),
            WarrantyStatus::Expired { days_elapsed: 2 }
        );
        assert_eq!(WarrantyStatus::classify(None, today), WarrantyStatus::Unknown);
    }

    #[test]
    fn test_warranty_status_labels() {
        assert_eq!(
            WarrantyStatus::Active { days_remaining: 3 }.to_string(),
            "Active (3 days left)"
        );
        assert_eq!(
            WarrantyStatus::Expired { days_elapsed: 7 }.to_string(),
            "Expired (7 days ago)"
        );
        assert_eq!(WarrantyStatus::Unknown.to_string(), "No warranty info");
    }

    #[test]
    fn test_warranty_status_serialization() {
        let json = serde_json::to_value(WarrantyStatus::Active { days_remaining: 4 }).unwrap();
        assert_eq!(json, serde_json::json!({"state": "active", "days_remaining": 4}));
        let json = serde_json::to_value(WarrantyStatus::Unknown).unwrap();
        assert_eq!(json, serde_json::json!({"state": "unknown"}));
    }

    #[test]
    fn test_strategy_for() {
        assert_eq!(strategy_for(ValuationStrategyKind::PowerOfRate).name(), "power_of_rate");
        assert_eq!(
            strategy_for(ValuationStrategyKind::DecliningBalance).name(),
            "declining_balance"
        );
    }
}
