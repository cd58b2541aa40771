//! Maintenance status transitions

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    config::TransitionPolicyKind,
    error::{AppError, AppResult},
    models::{
        enums::MaintenanceStatus,
        maintenance::{MaintenanceRecord, StatusChange, StatusUpdate},
    },
};

/// Decides which status changes are legal
pub trait TransitionPolicy: Send + Sync + fmt::Debug {
    fn name(&self) -> &'static str;

    fn allows(&self, from: MaintenanceStatus, to: MaintenanceStatus) -> bool;

    fn check(&self, from: MaintenanceStatus, to: MaintenanceStatus) -> AppResult<()> {
        if self.allows(from, to) {
            Ok(())
        } else {
            Err(AppError::BusinessRule(format!(
                "Cannot move maintenance from {} to {}",
                from.as_str(),
                to.as_str()
            )))
        }
    }
}

/// Any status may follow any other
#[derive(Debug, Clone, Copy, Default)]
pub struct Unrestricted;

impl TransitionPolicy for Unrestricted {
    fn name(&self) -> &'static str {
        "unrestricted"
    }

    fn allows(&self, _from: MaintenanceStatus, _to: MaintenanceStatus) -> bool {
        true
    }
}

/// Completed and cancelled are final; open states move freely between
/// themselves and into either final state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

impl TransitionPolicy for Strict {
    fn name(&self) -> &'static str {
        "strict"
    }

    fn allows(&self, from: MaintenanceStatus, to: MaintenanceStatus) -> bool {
        from == to || !from.is_terminal()
    }
}

pub fn policy_for(kind: TransitionPolicyKind) -> Arc<dyn TransitionPolicy> {
    match kind {
        TransitionPolicyKind::Unrestricted => Arc::new(Unrestricted),
        TransitionPolicyKind::Strict => Arc::new(Strict),
    }
}

/// Work out the fields to write for a status change.
///
/// Closing a record (completed or cancelled) stamps `completed_date`, today
/// unless given; completing also records cost and resolution. Reopening drops
/// the close date and cost.
pub fn plan_transition(
    policy: &dyn TransitionPolicy,
    record: &MaintenanceRecord,
    change: &StatusChange,
    today: NaiveDate,
) -> AppResult<StatusUpdate> {
    change.check_values()?;
    policy.check(record.status, change.status)?;

    let resolution = change.resolution.clone().or_else(|| record.resolution.clone());

    if !change.status.is_terminal() {
        return Ok(StatusUpdate {
            status: change.status,
            completed_date: None,
            cost: None,
            resolution,
        });
    }

    // re-setting the same closed status keeps its date
    let kept = (record.status == change.status)
        .then_some(record.completed_date)
        .flatten();
    let closed_on = change.completed_date.or(kept).unwrap_or(today);
    if closed_on < record.created_at.date_naive() {
        return Err(AppError::Validation(
            "Completion date is before the record was created".to_string(),
        ));
    }
    if closed_on > today {
        return Err(AppError::Validation(
            "Completion date cannot be in the future".to_string(),
        ));
    }

    let cost = match change.status {
        MaintenanceStatus::Completed => change.cost.or(kept.and(record.cost)),
        _ => None,
    };

    Ok(StatusUpdate {
        status: change.status,
        completed_date: Some(closed_on),
        cost,
        resolution,
    })
}
