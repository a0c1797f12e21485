use crate::error::MaintenanceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regulatory maintenance tiers, lightest to heaviest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CheckType {
    A,
    B,
    C,
    D,
}

impl CheckType {
    /// Fixed evaluation and tie-break order.
    pub const ALL: [CheckType; 4] = [CheckType::A, CheckType::B, CheckType::C, CheckType::D];

    /// Progress at which the check must enter the maintenance plan.
    /// Heavier checks need longer planning lead time, so they trigger earlier.
    pub fn action_threshold(&self) -> f64 {
        match self {
            CheckType::A | CheckType::B => 90.0,
            CheckType::C => 85.0,
            CheckType::D => 80.0,
        }
    }

    /// Hangar-gated checks return the progress at which a slot is requested.
    /// A and B checks are line maintenance and never defer.
    pub fn deferral_threshold(&self) -> Option<f64> {
        match self {
            CheckType::C => Some(85.0),
            CheckType::D => Some(80.0),
            _ => None,
        }
    }
}

impl fmt::Display for CheckType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckType::A => write!(f, "A"),
            CheckType::B => write!(f, "B"),
            CheckType::C => write!(f, "C"),
            CheckType::D => write!(f, "D"),
        }
    }
}

impl FromStr for CheckType {
    type Err = MaintenanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(CheckType::A),
            "B" => Ok(CheckType::B),
            "C" => Ok(CheckType::C),
            "D" => Ok(CheckType::D),
            other => Err(MaintenanceError::UnknownCheckType(other.to_string())),
        }
    }
}

/// Thresholds for one check tier. Only the limit combination that applies to
/// the tier is populated: A tracks FH+FC, B and D track elapsed days, C tracks
/// FH+days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckLimit {
    pub flight_hour_limit: Option<f64>,
    pub flight_cycle_limit: Option<f64>,
    pub elapsed_day_limit: Option<i64>,
    pub base_duration_days: u32,
    pub description: String,
}

/// The four threshold rows, EASA/FAA interval conventions by default.
/// A deployment may construct a registry with its own rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitRegistry {
    rows: [CheckLimit; 4],
}

impl LimitRegistry {
    pub fn new(rows: [CheckLimit; 4]) -> LimitRegistry {
        LimitRegistry { rows }
    }

    pub fn limits_for(&self, check: CheckType) -> &CheckLimit {
        &self.rows[check as usize]
    }
}

impl Default for LimitRegistry {
    fn default() -> LimitRegistry {
        LimitRegistry::new([
            CheckLimit {
                flight_hour_limit: Some(600.0),
                flight_cycle_limit: Some(400.0),
                elapsed_day_limit: None,
                base_duration_days: 1,
                description: "Light Maintenance Check".to_string(),
            },
            CheckLimit {
                flight_hour_limit: None,
                flight_cycle_limit: None,
                elapsed_day_limit: Some(180),
                base_duration_days: 3,
                description: "Phased/Block Check".to_string(),
            },
            CheckLimit {
                flight_hour_limit: Some(6000.0),
                flight_cycle_limit: None,
                elapsed_day_limit: Some(730),
                base_duration_days: 7,
                description: "Heavy Base Maintenance".to_string(),
            },
            CheckLimit {
                flight_hour_limit: None,
                flight_cycle_limit: None,
                elapsed_day_limit: Some(2190),
                base_duration_days: 30,
                description: "Structural Overhaul (Heavy)".to_string(),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rows() {
        let registry = LimitRegistry::default();

        let a = registry.limits_for(CheckType::A);
        assert_eq!(Some(600.0), a.flight_hour_limit);
        assert_eq!(Some(400.0), a.flight_cycle_limit);
        assert_eq!(None, a.elapsed_day_limit);
        assert_eq!(1, a.base_duration_days);

        let b = registry.limits_for(CheckType::B);
        assert_eq!(None, b.flight_hour_limit);
        assert_eq!(Some(180), b.elapsed_day_limit);
        assert_eq!(3, b.base_duration_days);

        let c = registry.limits_for(CheckType::C);
        assert_eq!(Some(6000.0), c.flight_hour_limit);
        assert_eq!(None, c.flight_cycle_limit);
        assert_eq!(Some(730), c.elapsed_day_limit);
        assert_eq!(7, c.base_duration_days);

        let d = registry.limits_for(CheckType::D);
        assert_eq!(Some(2190), d.elapsed_day_limit);
        assert_eq!(30, d.base_duration_days);
    }

    #[test]
    fn test_parse_check_type() {
        assert_eq!(Ok(CheckType::C), "C".parse());
        assert_eq!(
            Err(MaintenanceError::UnknownCheckType("E".to_string())),
            "E".parse::<CheckType>()
        );
        assert_eq!(
            Err(MaintenanceError::UnknownCheckType("a".to_string())),
            "a".parse::<CheckType>()
        );
    }

    #[test]
    fn test_thresholds_per_tier() {
        assert_eq!(90.0, CheckType::A.action_threshold());
        assert_eq!(90.0, CheckType::B.action_threshold());
        assert_eq!(85.0, CheckType::C.action_threshold());
        assert_eq!(80.0, CheckType::D.action_threshold());

        assert_eq!(None, CheckType::A.deferral_threshold());
        assert_eq!(None, CheckType::B.deferral_threshold());
        assert_eq!(Some(85.0), CheckType::C.deferral_threshold());
        assert_eq!(Some(80.0), CheckType::D.deferral_threshold());
    }
}
