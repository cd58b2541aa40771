//! Asset model and related types

use std::net::IpAddr;

use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    valuation::Valuation,
};

pub const DEFAULT_WARRANTY_MONTHS: i32 = 12;
pub const DEFAULT_DEPRECIATION_RATE: f64 = 20.0;

static MAC_ADDRESS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$").unwrap());

/// Asset record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Asset {
    pub id: i32,
    /// Unique inventory tag
    pub asset_tag: String,
    pub serial_number: Option<String>,
    pub model_id: i32,
    pub status_id: i32,
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    pub warranty_months: i32,
    /// Annual depreciation rate, in percent
    pub depreciation_rate: f64,
    pub residual_value: Decimal,
    pub assigned_to_id: Option<i32>,
    pub company_id: Option<i32>,
    pub site_id: Option<i32>,
    pub location: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub last_audit: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Asset with its derived warranty and value fields
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssetDetails {
    #[serde(flatten)]
    pub asset: Asset,
    #[serde(flatten)]
    pub valuation: Valuation,
}

/// Create asset request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 50, message = "Asset tag must be 1-50 characters"))]
    pub asset_tag: String,
    #[validate(length(max = 100))]
    pub serial_number: Option<String>,
    pub model_id: i32,
    pub status_id: i32,
    /// Purchase date (YYYY-MM-DD)
    pub purchase_date: Option<NaiveDate>,
    pub purchase_cost: Option<Decimal>,
    #[validate(range(min = 0, max = 1200, message = "Warranty must be between 0 and 1200 months"))]
    pub warranty_months: Option<i32>,
    #[validate(range(min = 0.0, max = 100.0, message = "Depreciation rate must be between 0 and 100"))]
    pub depreciation_rate: Option<f64>,
    pub residual_value: Option<Decimal>,
    pub assigned_to_id: Option<i32>,
    pub company_id: Option<i32>,
    pub site_id: Option<i32>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    pub ip_address: Option<String>,
    #[validate(regex(path = *MAC_ADDRESS_RE, message = "Invalid MAC address"))]
    pub mac_address: Option<String>,
    pub notes: Option<String>,
}

impl CreateAsset {
    /// Field checks the derive cannot express
    pub fn check_values(&self) -> AppResult<()> {
        check_amounts(self.purchase_cost, self.residual_value)?;
        check_ip_address(self.ip_address.as_deref())
    }
}

/// Update asset request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 50, message = "Asset tag must be 1-50 characters"))]
    pub asset_tag: Option<String>,
    #[validate(length(max = 100))]
    pub serial_number: Option<String>,
    pub model_id: Option<i32>,
    pub status_id: Option<i32>,
    /// `null` clears the purchase date
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub purchase_date: Option<Option<NaiveDate>>,
    /// `null` clears the purchase cost
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub purchase_cost: Option<Option<Decimal>>,
    #[validate(range(min = 0, max = 1200, message = "Warranty must be between 0 and 1200 months"))]
    pub warranty_months: Option<i32>,
    #[validate(range(min = 0.0, max = 100.0, message = "Depreciation rate must be between 0 and 100"))]
    pub depreciation_rate: Option<f64>,
    pub residual_value: Option<Decimal>,
    pub company_id: Option<i32>,
    pub site_id: Option<i32>,
    #[validate(length(max = 100))]
    pub location: Option<String>,
    pub ip_address: Option<String>,
    #[validate(regex(path = *MAC_ADDRESS_RE, message = "Invalid MAC address"))]
    pub mac_address: Option<String>,
    pub notes: Option<String>,
}

impl UpdateAsset {
    pub fn check_values(&self) -> AppResult<()> {
        check_amounts(self.purchase_cost.flatten(), self.residual_value)?;
        check_ip_address(self.ip_address.as_deref())
    }
}

/// Assign an asset to a user, or unassign it with `null`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AssignAsset {
    pub user_id: Option<i32>,
}

/// Record an audit; defaults to today
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AuditAsset {
    pub audit_date: Option<NaiveDate>,
}

/// Sort order for asset lists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetSort {
    #[default]
    AssetTag,
    PurchaseDate,
    PurchaseCost,
}

impl AssetSort {
    pub fn order_by(self) -> &'static str {
        match self {
            AssetSort::AssetTag => "a.asset_tag",
            AssetSort::PurchaseDate => "a.purchase_date NULLS LAST, a.asset_tag",
            AssetSort::PurchaseCost => "a.purchase_cost NULLS LAST, a.asset_tag",
        }
    }
}

/// Asset query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct AssetQuery {
    pub status_id: Option<i32>,
    pub model_id: Option<i32>,
    pub manufacturer_id: Option<i32>,
    pub category_id: Option<i32>,
    pub assigned_to_id: Option<i32>,
    /// Only assets with (false) or without (true) an assignee
    pub unassigned: Option<bool>,
    pub purchased_after: Option<NaiveDate>,
    pub purchased_before: Option<NaiveDate>,
    /// Matches tag, serial number and notes
    pub search: Option<String>,
    pub sort: Option<AssetSort>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Paginated asset list
#[derive(Debug, Serialize, ToSchema)]
pub struct AssetList {
    pub items: Vec<AssetDetails>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}

/// Query parameters for the report endpoints
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct ReportQuery {
    /// Overrides the configured window, in days
    pub days: Option<i64>,
}

/// Totals across the whole inventory
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ValuationSummary {
    pub asset_count: i64,
    pub total_purchase_cost: Decimal,
    pub total_current_value: Decimal,
    /// Name of the depreciation formula in use
    pub strategy: String,
    pub as_of: NaiveDate,
}

fn check_amounts(purchase_cost: Option<Decimal>, residual_value: Option<Decimal>) -> AppResult<()> {
    if purchase_cost.is_some_and(|cost| cost < Decimal::ZERO) {
        return Err(AppError::Validation("Purchase cost cannot be negative".to_string()));
    }
    if residual_value.is_some_and(|value| value < Decimal::ZERO) {
        return Err(AppError::Validation("Residual value cannot be negative".to_string()));
    }
    Ok(())
}

fn check_ip_address(ip: Option<&str>) -> AppResult<()> {
    match ip {
        Some(ip) if ip.parse::<IpAddr>().is_err() => {
            Err(AppError::Validation(format!("Invalid IP address: {}", ip)))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(tag: &str) -> CreateAsset {
        CreateAsset {
            asset_tag: tag.to_string(),
            serial_number: None,
            model_id: 1,
            status_id: 1,
            purchase_date: None,
            purchase_cost: None,
            warranty_months: None,
            depreciation_rate: None,
            residual_value: None,
            assigned_to_id: None,
            company_id: None,
            site_id: None,
            location: None,
            ip_address: None,
            mac_address: None,
            notes: None,
        }
    }

    #[test]
    fn test_negative_purchase_cost_rejected() {
        let mut data = create("LT-0001");
        data.purchase_cost = Some(Decimal::new(-1, 2));
        assert!(matches!(data.check_values(), Err(AppError::Validation(_))));

        data.purchase_cost = Some(Decimal::ZERO);
        assert!(data.check_values().is_ok());
    }

    #[test]
    fn test_negative_residual_rejected() {
        let mut data = create("LT-0001");
        data.residual_value = Some(Decimal::new(-100, 0));
        assert!(data.check_values().is_err());
    }

    #[test]
    fn test_ip_address() {
        let mut data = create("SRV-01");
        data.ip_address = Some("10.0.0.12".to_string());
        assert!(data.check_values().is_ok());
        data.ip_address = Some("fe80::1".to_string());
        assert!(data.check_values().is_ok());
        data.ip_address = Some("10.0.0.300".to_string());
        assert!(data.check_values().is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_missing() {
        let untouched: UpdateAsset = serde_json::from_str(r#"{"notes": "moved"}"#).unwrap();
        assert_eq!(untouched.purchase_date, None);
        assert_eq!(untouched.purchase_cost, None);

        let cleared: UpdateAsset =
            serde_json::from_str(r#"{"purchase_date": null, "purchase_cost": null}"#).unwrap();
        assert_eq!(cleared.purchase_date, Some(None));
        assert_eq!(cleared.purchase_cost, Some(None));
        assert!(cleared.check_values().is_ok());

        let set: UpdateAsset =
            serde_json::from_str(r#"{"purchase_date": "2024-02-01", "purchase_cost": "-3.00"}"#)
                .unwrap();
        assert_eq!(set.purchase_date, Some(NaiveDate::from_ymd_opt(2024, 2, 1)));
        assert!(matches!(set.check_values(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_derive_validation() {
        let mut data = create("");
        assert!(data.validate().is_err());

        data.asset_tag = "NET-SW-04".to_string();
        data.mac_address = Some("00:1A:2b:3C:4d:5E".to_string());
        data.depreciation_rate = Some(25.0);
        assert!(data.validate().is_ok());

        data.mac_address = Some("00:1A:2B:3C:4D".to_string());
        assert!(data.validate().is_err());

        data.mac_address = None;
        data.depreciation_rate = Some(120.0);
        assert!(data.validate().is_err());
    }
}
