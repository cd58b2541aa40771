//! Maintenance record model and related types

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::enums::{MaintenanceStatus, Priority};
use crate::error::{AppError, AppResult};

/// Maintenance record as stored
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct MaintenanceRecord {
    pub id: i32,
    pub asset_id: i32,
    pub maintenance_type_id: Option<i32>,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: MaintenanceStatus,
    pub created_by_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub scheduled_date: NaiveDate,
    /// Set when the record is completed or cancelled
    pub completed_date: Option<NaiveDate>,
    /// Only set once the work is completed
    pub cost: Option<Decimal>,
    pub resolution: Option<String>,
    pub technician: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl MaintenanceRecord {
    /// Not yet completed or cancelled
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }

    /// Past its scheduled date while still open
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.is_open() && today > self.scheduled_date
    }

    /// Days from creation to closing, or to `today` while still open.
    ///
    /// A closed record without a close date falls back to its last update.
    pub fn days_open(&self, today: NaiveDate) -> DaysOpen {
        let created_on = self.created_at.date_naive();
        match self.completed_date {
            Some(closed_on) => DaysOpen::Finalized {
                days: (closed_on - created_on).num_days(),
            },
            None if !self.is_open() => DaysOpen::Finalized {
                days: (self.updated_at.date_naive() - created_on).num_days(),
            },
            None => DaysOpen::Ongoing {
                days: (today - created_on).num_days(),
            },
        }
    }
}

/// How long a record has been (or was) open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DaysOpen {
    /// Closed duration, will not change
    Finalized { days: i64 },
    /// Still counting
    Ongoing { days: i64 },
}

impl DaysOpen {
    pub fn days(self) -> i64 {
        match self {
            DaysOpen::Finalized { days } | DaysOpen::Ongoing { days } => days,
        }
    }

    pub fn is_finalized(self) -> bool {
        matches!(self, DaysOpen::Finalized { .. })
    }
}

impl fmt::Display for DaysOpen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaysOpen::Finalized { days } => write!(f, "{} days", days),
            DaysOpen::Ongoing { days } => write!(f, "{} days (ongoing)", days),
        }
    }
}

/// Maintenance record with its derived fields
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MaintenanceDetails {
    #[serde(flatten)]
    pub record: MaintenanceRecord,
    pub is_overdue: bool,
    #[schema(value_type = Object)]
    pub days_open: DaysOpen,
}

impl MaintenanceDetails {
    pub fn new(record: MaintenanceRecord, today: NaiveDate) -> Self {
        Self {
            is_overdue: record.is_overdue(today),
            days_open: record.days_open(today),
            record,
        }
    }
}

/// Create maintenance record request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    pub asset_id: i32,
    pub maintenance_type_id: Option<i32>,
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    /// Scheduled date (YYYY-MM-DD)
    pub scheduled_date: NaiveDate,
    pub created_by_id: Option<i32>,
    #[validate(length(max = 100))]
    pub technician: Option<String>,
}

/// Update maintenance record request; status goes through [`StatusChange`]
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateMaintenance {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub scheduled_date: Option<NaiveDate>,
    /// `null` detaches the maintenance type
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<i32>)]
    pub maintenance_type_id: Option<Option<i32>>,
    #[validate(length(max = 100))]
    pub technician: Option<String>,
    pub resolution: Option<String>,
}

/// Move a record to another status
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusChange {
    pub status: MaintenanceStatus,
    /// Close date when completing or cancelling, defaults to today
    pub completed_date: Option<NaiveDate>,
    /// Final cost, only accepted when completing
    pub cost: Option<Decimal>,
    pub resolution: Option<String>,
}

impl StatusChange {
    pub fn check_values(&self) -> AppResult<()> {
        if let Some(cost) = self.cost {
            if self.status != MaintenanceStatus::Completed {
                return Err(AppError::Validation(
                    "Cost can only be recorded when completing".to_string(),
                ));
            }
            if cost < Decimal::ZERO {
                return Err(AppError::Validation("Cost cannot be negative".to_string()));
            }
        }
        Ok(())
    }
}

/// Fields written by a status change
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub status: MaintenanceStatus,
    pub completed_date: Option<NaiveDate>,
    pub cost: Option<Decimal>,
    pub resolution: Option<String>,
}

/// Maintenance query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
pub struct MaintenanceQuery {
    pub asset_id: Option<i32>,
    pub priority: Option<Priority>,
    pub status: Option<MaintenanceStatus>,
    /// Only records not yet completed or cancelled (true), or only closed ones (false)
    pub is_open: Option<bool>,
    pub created_by_id: Option<i32>,
    pub created_after: Option<NaiveDate>,
    pub created_before: Option<NaiveDate>,
    /// Matches title, description and resolution
    pub search: Option<String>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

/// Paginated maintenance list
#[derive(Debug, Serialize, ToSchema)]
pub struct MaintenanceList {
    pub items: Vec<MaintenanceDetails>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
}
