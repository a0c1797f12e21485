use crate::checks::CheckType;
use crate::finding::NonRoutineFinding;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a check's progress. `Deferred` is set only by the
/// hangar-capacity rule and overrides the progress-based tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Deferred,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Ok => write!(f, "OK"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Critical => write!(f, "CRITICAL"),
            Severity::Deferred => write!(f, "DEFERRED"),
        }
    }
}

/// Reported percentages and counters carry one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Maps a progress percentage onto a severity tier. Purely a function of the
/// current value; boundary values belong to the higher tier.
pub fn classify(progress: f64) -> Severity {
    if progress >= 90.0 {
        Severity::Critical
    } else if progress >= 75.0 {
        Severity::Warning
    } else {
        Severity::Ok
    }
}

/// Computed state of one check tier for one aircraft.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaintenanceStatus {
    pub check_type: CheckType,
    pub remaining_flight_hours: Option<f64>,
    pub remaining_flight_cycles: Option<f64>,
    pub remaining_days: i64,
    pub progress_percent: f64,
    pub severity: Severity,
    pub action_required: bool,
    pub projected_due_date: NaiveDate,
    pub base_duration_days: u32,
    pub adjusted_duration_days: u32,
    pub finding: NonRoutineFinding,
    pub deferred: bool,
    pub deferral_reason: String,
}
