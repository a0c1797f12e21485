use crate::aircraft::AircraftSnapshot;
use crate::checks::{CheckType, LimitRegistry};
use crate::error::MaintenanceError;
use crate::finding::{self, NonRoutineFinding, StochasticParams};
use crate::hangar::HangarState;
use crate::status::{MaintenanceStatus, Severity, classify, round1};
use chrono::{NaiveDate, TimeDelta};
use std::collections::BTreeMap;

/// ETA sentinel when the daily utilization rate cannot project a due date.
const FAR_FUTURE_DAYS: i64 = 999;

pub fn parse_date(value: &str) -> Result<NaiveDate, MaintenanceError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| MaintenanceError::InvalidDateFormat(value.to_string()))
}

/// Usage counters fed into one check-tier computation. Which of them matter
/// is decided by the limit row: a `None` limit ignores its counter.
struct CheckUsage {
    flight_hours: f64,
    flight_cycles: f64,
    elapsed_days: i64,
}

/// Computes per-aircraft maintenance statuses against the limit registry.
/// Holds only configuration; every `evaluate` call is an independent pure
/// computation over its inputs.
#[derive(Debug, Clone, Default)]
pub struct MaintenancePlanner {
    pub limits: LimitRegistry,
    pub stochastic: StochasticParams,
}

impl MaintenancePlanner {
    pub fn new(limits: LimitRegistry, stochastic: StochasticParams) -> MaintenancePlanner {
        MaintenancePlanner { limits, stochastic }
    }

    /// Computes all four check statuses for one aircraft.
    ///
    /// A failure on any check aborts the whole evaluation; a partial map
    /// would let a caller mistake a never-computed check for a clean one.
    pub fn evaluate(
        &self,
        aircraft: &AircraftSnapshot,
        hangar: Option<&HangarState>,
        apply_stochastic: bool,
        reference_date: NaiveDate,
    ) -> Result<BTreeMap<CheckType, MaintenanceStatus>, MaintenanceError> {
        let last_check = parse_date(&aircraft.last_check_date)?;
        let last_heavy_check = parse_date(&aircraft.last_heavy_check_date)?;
        let days_since_check = (reference_date - last_check).num_days();
        let days_since_heavy_check = (reference_date - last_heavy_check).num_days();

        let mut statuses = BTreeMap::new();
        for check in CheckType::ALL {
            let usage = match check {
                CheckType::A | CheckType::B => CheckUsage {
                    flight_hours: aircraft.flight_hours_since_check,
                    flight_cycles: aircraft.flight_cycles_since_check,
                    elapsed_days: days_since_check,
                },
                // The snapshot carries no separate C-tier FH counter; doubled
                // A-tier usage stands in for accumulation since the last
                // heavy check.
                CheckType::C => CheckUsage {
                    flight_hours: aircraft.flight_hours_since_check * 2.0,
                    flight_cycles: aircraft.flight_cycles_since_check,
                    elapsed_days: days_since_check,
                },
                CheckType::D => CheckUsage {
                    flight_hours: aircraft.flight_hours_since_check,
                    flight_cycles: aircraft.flight_cycles_since_check,
                    elapsed_days: days_since_heavy_check,
                },
            };
            let status =
                self.check_status(check, aircraft, usage, hangar, apply_stochastic, reference_date);
            statuses.insert(check, status);
        }
        Ok(statuses)
    }

    fn check_status(
        &self,
        check: CheckType,
        aircraft: &AircraftSnapshot,
        usage: CheckUsage,
        hangar: Option<&HangarState>,
        apply_stochastic: bool,
        reference_date: NaiveDate,
    ) -> MaintenanceStatus {
        let limit = self.limits.limits_for(check);

        // Margins may go negative once a limit is overshot.
        let remaining_flight_hours = limit.flight_hour_limit.map(|l| l - usage.flight_hours);
        let remaining_flight_cycles = limit.flight_cycle_limit.map(|l| l - usage.flight_cycles);

        let mut progress: f64 = 0.0;
        if let Some(fh_limit) = limit.flight_hour_limit {
            progress = progress.max(usage.flight_hours / fh_limit * 100.0);
        }
        if let Some(fc_limit) = limit.flight_cycle_limit {
            progress = progress.max(usage.flight_cycles / fc_limit * 100.0);
        }
        if let Some(day_limit) = limit.elapsed_day_limit {
            progress = progress.max(usage.elapsed_days as f64 / day_limit as f64 * 100.0);
        }

        let remaining_days = match limit.elapsed_day_limit {
            Some(day_limit) => (day_limit - usage.elapsed_days).max(0),
            None => Self::flight_hour_eta(remaining_flight_hours, aircraft.daily_flight_hours),
        };

        let finding = if apply_stochastic {
            let seed_key = format!("{}{}", aircraft.tail_number, check);
            finding::generate(&seed_key, &self.stochastic)
        } else {
            NonRoutineFinding::absent()
        };

        let mut severity = classify(progress);
        let mut deferred = false;
        let mut deferral_reason = String::new();
        if let (Some(threshold), Some(hangar)) = (check.deferral_threshold(), hangar) {
            if progress >= threshold {
                let (available, reason) = hangar.available(aircraft.category);
                if !available {
                    deferred = true;
                    deferral_reason = reason;
                    severity = Severity::Deferred;
                }
            }
        }

        let projected_due_date = TimeDelta::try_days(remaining_days)
            .and_then(|delta| reference_date.checked_add_signed(delta))
            .unwrap_or(NaiveDate::MAX);

        MaintenanceStatus {
            check_type: check,
            remaining_flight_hours: remaining_flight_hours.map(round1),
            remaining_flight_cycles: remaining_flight_cycles.map(round1),
            remaining_days,
            progress_percent: round1(progress.clamp(0.0, 100.0)),
            severity,
            action_required: progress >= check.action_threshold(),
            projected_due_date,
            base_duration_days: limit.base_duration_days,
            adjusted_duration_days: limit.base_duration_days + finding.extra_days,
            finding,
            deferred,
            deferral_reason,
        }
    }

    /// Projects days until the flight-hour limit at the current daily rate,
    /// truncated toward zero. A zero or negative rate cannot project a date
    /// and yields the far-future sentinel instead of a division fault.
    fn flight_hour_eta(remaining_flight_hours: Option<f64>, daily_rate: f64) -> i64 {
        match remaining_flight_hours {
            Some(hours) if daily_rate > 0.0 => (hours / daily_rate) as i64,
            _ => FAR_FUTURE_DAYS,
        }
    }
}

/// Reports the check closest to its limit: highest raw progress wins, ties
/// break to the earliest tier in A, B, C, D order. Selection is by progress
/// magnitude, not severity tier, so a deferred check outranks a critical one
/// only when its progress is higher.
pub fn most_critical(
    statuses: &BTreeMap<CheckType, MaintenanceStatus>,
) -> Option<(CheckType, &MaintenanceStatus)> {
    let mut best: Option<(CheckType, &MaintenanceStatus)> = None;
    for (check, status) in statuses {
        match best {
            Some((_, current)) if status.progress_percent <= current.progress_percent => {}
            _ => best = Some((*check, status)),
        }
    }
    best
}

/// Collects the checks whose evaluation produced a non-routine finding.
pub fn findings(
    statuses: &BTreeMap<CheckType, MaintenanceStatus>,
) -> Vec<(CheckType, &NonRoutineFinding)> {
    statuses
        .iter()
        .filter(|(_, status)| status.finding.present)
        .map(|(check, status)| (*check, &status.finding))
        .collect()
}
