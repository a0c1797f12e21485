use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Non-routine defect classes discovered during a check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingKind {
    #[default]
    None,
    Corrosion,
    FatigueCrack,
    SystemFailure,
}

impl FindingKind {
    fn description(&self) -> &'static str {
        match self {
            FindingKind::None => "",
            FindingKind::Corrosion => "Corrosion detected in structural components",
            FindingKind::FatigueCrack => "Fatigue crack found during NDT inspection",
            FindingKind::SystemFailure => "System malfunction during functional test",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::None => write!(f, "None"),
            FindingKind::Corrosion => write!(f, "Corrosion"),
            FindingKind::FatigueCrack => write!(f, "Fatigue Crack"),
            FindingKind::SystemFailure => write!(f, "System Malfunction"),
        }
    }
}

/// Outcome of one non-routine-finding draw. Created fresh on every status
/// computation and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NonRoutineFinding {
    pub present: bool,
    pub kind: FindingKind,
    pub extra_days: u32,
    pub description: String,
}

impl NonRoutineFinding {
    pub fn absent() -> NonRoutineFinding {
        NonRoutineFinding::default()
    }
}

/// Parameters of the non-routine-finding model. EASA reports put the
/// non-routine rate at roughly 15% of checks, each extending the check by
/// one to three days.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StochasticParams {
    pub probability: f64,
    pub min_extra_days: u32,
    pub max_extra_days: u32,
}

impl Default for StochasticParams {
    fn default() -> StochasticParams {
        StochasticParams {
            probability: 0.15,
            min_extra_days: 1,
            max_extra_days: 3,
        }
    }
}

fn seed_from_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}

/// Draws one non-routine-finding outcome for the given seed key.
///
/// The key (tail number + check letter) fully determines the stream, so the
/// same key always yields the same outcome regardless of call order. Each
/// evaluation is an independent Bernoulli trial; below `probability` a finding
/// is present with a flat uniform kind and a uniform extra-day delay in
/// `[min_extra_days, max_extra_days]`.
pub fn generate(seed_key: &str, params: &StochasticParams) -> NonRoutineFinding {
    let mut rng = StdRng::seed_from_u64(seed_from_key(seed_key));

    if rng.random::<f64>() < params.probability {
        let kind = match rng.random_range(0..3) {
            0 => FindingKind::Corrosion,
            1 => FindingKind::FatigueCrack,
            _ => FindingKind::SystemFailure,
        };
        let extra_days = rng.random_range(params.min_extra_days..=params.max_extra_days);
        NonRoutineFinding {
            present: true,
            kind,
            extra_days,
            description: kind.description().to_string(),
        }
    } else {
        NonRoutineFinding::absent()
    }
}
