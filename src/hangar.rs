use crate::aircraft::{BodyCategory, Fleet, OperationalState};
use crate::status::round1;
use serde::{Deserialize, Serialize};

/// Fixed ceiling on simultaneous maintenance inductions per body class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HangarCapacity {
    pub wide_body: usize,
    pub narrow_body: usize,
    pub total: usize,
}

impl Default for HangarCapacity {
    fn default() -> HangarCapacity {
        HangarCapacity {
            wide_body: 5,
            narrow_body: 12,
            total: 15,
        }
    }
}

/// Fleet-wide occupancy aggregate, recomputed fresh from the full snapshot
/// set on every query. Holds no cross-call state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HangarState {
    pub wide_body_count: usize,
    pub narrow_body_count: usize,
    pub total_count: usize,
    pub wide_body_available: usize,
    pub narrow_body_available: usize,
    pub utilization_percent: f64,
    pub is_full: bool,
    pub capacity: HangarCapacity,
}

impl HangarState {
    /// Aggregates the aircraft currently in maintenance against the capacity
    /// ceiling. Fullness is gated on wide-body congestion or the total
    /// ceiling; a saturated narrow-body pool alone does not flag the hangar
    /// as full.
    pub fn compute(fleet: &Fleet, capacity: HangarCapacity) -> HangarState {
        let in_maintenance = fleet
            .aircraft
            .iter()
            .filter(|a| a.state == OperationalState::InMaintenance);

        let mut wide_body_count = 0;
        let mut narrow_body_count = 0;
        for aircraft in in_maintenance {
            match aircraft.category {
                BodyCategory::Wide | BodyCategory::Cargo => wide_body_count += 1,
                BodyCategory::Narrow => narrow_body_count += 1,
            }
        }
        let total_count = wide_body_count + narrow_body_count;

        let utilization_percent = if capacity.total == 0 {
            100.0
        } else {
            round1(total_count as f64 / capacity.total as f64 * 100.0)
        };

        HangarState {
            wide_body_count,
            narrow_body_count,
            total_count,
            wide_body_available: capacity.wide_body.saturating_sub(wide_body_count),
            narrow_body_available: capacity.narrow_body.saturating_sub(narrow_body_count),
            utilization_percent,
            is_full: wide_body_count >= capacity.wide_body || total_count >= capacity.total,
            capacity,
        }
    }

    /// Point-in-time availability for one body class. Wide and cargo frames
    /// draw on the wide-body pool, everything else on the narrow-body pool.
    /// The reason string names the constraint that applies.
    pub fn available(&self, category: BodyCategory) -> (bool, String) {
        match category {
            BodyCategory::Wide | BodyCategory::Cargo => {
                if self.wide_body_available == 0 {
                    (
                        false,
                        format!(
                            "wide-body hangar capacity exhausted ({}/{} bays occupied)",
                            self.wide_body_count, self.capacity.wide_body
                        ),
                    )
                } else {
                    (
                        true,
                        format!("wide-body slot available ({} free)", self.wide_body_available),
                    )
                }
            }
            BodyCategory::Narrow => {
                if self.narrow_body_available == 0 {
                    (
                        false,
                        format!(
                            "narrow-body hangar capacity exhausted ({}/{} bays occupied)",
                            self.narrow_body_count, self.capacity.narrow_body
                        ),
                    )
                } else {
                    (
                        true,
                        format!(
                            "narrow-body slot available ({} free)",
                            self.narrow_body_available
                        ),
                    )
                }
            }
        }
    }
}
