use crate::error::MaintenanceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::sync::Arc;
use tabled::Tabled;

pub type TailNumber = Arc<str>;

/// Airframe body class. Wide and cargo frames compete for the same
/// (wide-body) hangar bays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BodyCategory {
    Narrow,
    Wide,
    Cargo,
}

impl fmt::Display for BodyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyCategory::Narrow => write!(f, "NARROW"),
            BodyCategory::Wide => write!(f, "WIDE"),
            BodyCategory::Cargo => write!(f, "CARGO"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalState {
    Active,
    InMaintenance,
}

impl fmt::Display for OperationalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationalState::Active => write!(f, "active"),
            OperationalState::InMaintenance => write!(f, "in maintenance"),
        }
    }
}

/// Point-in-time usage counters for one airframe. Owned by the data layer and
/// passed read-only into the calculator; date fields stay in their wire form
/// (`YYYY-MM-DD`) and are parsed during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tabled)]
pub struct AircraftSnapshot {
    pub tail_number: TailNumber,
    pub category: BodyCategory,
    pub flight_hours_since_check: f64,
    pub flight_cycles_since_check: f64,
    pub last_check_date: String,
    pub last_heavy_check_date: String,
    pub daily_flight_hours: f64,
    pub state: OperationalState,
}

/// Loosely-typed record shape as it arrives from the data layer. Every field
/// is optional here; `AircraftSnapshot::try_from` rejects absent fields at the
/// boundary instead of failing deep inside the calculation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAircraftRecord {
    pub tail_number: Option<String>,
    pub category: Option<BodyCategory>,
    pub flight_hours_since_check: Option<f64>,
    pub flight_cycles_since_check: Option<f64>,
    pub last_check_date: Option<String>,
    pub last_heavy_check_date: Option<String>,
    pub daily_flight_hours: Option<f64>,
    pub state: Option<OperationalState>,
}

impl TryFrom<RawAircraftRecord> for AircraftSnapshot {
    type Error = MaintenanceError;

    fn try_from(raw: RawAircraftRecord) -> Result<Self, Self::Error> {
        use MaintenanceError::MissingField;

        Ok(AircraftSnapshot {
            tail_number: Arc::from(raw.tail_number.ok_or(MissingField("tail_number"))?),
            category: raw.category.ok_or(MissingField("category"))?,
            flight_hours_since_check: raw
                .flight_hours_since_check
                .ok_or(MissingField("flight_hours_since_check"))?,
            flight_cycles_since_check: raw
                .flight_cycles_since_check
                .ok_or(MissingField("flight_cycles_since_check"))?,
            last_check_date: raw.last_check_date.ok_or(MissingField("last_check_date"))?,
            last_heavy_check_date: raw
                .last_heavy_check_date
                .ok_or(MissingField("last_heavy_check_date"))?,
            daily_flight_hours: raw
                .daily_flight_hours
                .ok_or(MissingField("daily_flight_hours"))?,
            state: raw.state.ok_or(MissingField("state"))?,
        })
    }
}

/// The current fleet snapshot set.
#[derive(Debug, Clone, Default)]
pub struct Fleet {
    pub aircraft: Vec<AircraftSnapshot>,
}

impl Fleet {
    pub fn new(mut aircraft: Vec<AircraftSnapshot>) -> Fleet {
        aircraft.sort_by(|a, b| a.tail_number.cmp(&b.tail_number));
        Fleet { aircraft }
    }

    pub fn load_from_file(path: &str) -> io::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        #[derive(Deserialize)]
        struct RawData {
            aircraft: Vec<RawAircraftRecord>,
        }
        let raw: RawData = serde_json::from_str(&data)?;

        let aircraft = raw
            .aircraft
            .into_iter()
            .map(AircraftSnapshot::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(io::Error::other)?;

        Ok(Fleet::new(aircraft))
    }

    pub fn find(&self, tail_number: &str) -> Option<&AircraftSnapshot> {
        self.aircraft
            .iter()
            .find(|a| a.tail_number.as_ref() == tail_number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawAircraftRecord {
        RawAircraftRecord {
            tail_number: Some("TC-JJK25".to_string()),
            category: Some(BodyCategory::Wide),
            flight_hours_since_check: Some(520.0),
            flight_cycles_since_check: Some(340.0),
            last_check_date: Some("2025-11-01".to_string()),
            last_heavy_check_date: Some("2022-06-15".to_string()),
            daily_flight_hours: Some(12.5),
            state: Some(OperationalState::Active),
        }
    }

    #[test]
    fn test_raw_record_conversion() {
        let snapshot = AircraftSnapshot::try_from(raw()).unwrap();
        assert_eq!("TC-JJK25", snapshot.tail_number.as_ref());
        assert_eq!(BodyCategory::Wide, snapshot.category);
        assert_eq!(520.0, snapshot.flight_hours_since_check);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let mut record = raw();
        record.category = None;
        assert_eq!(
            Err(MaintenanceError::MissingField("category")),
            AircraftSnapshot::try_from(record)
        );

        let mut record = raw();
        record.daily_flight_hours = None;
        assert_eq!(
            Err(MaintenanceError::MissingField("daily_flight_hours")),
            AircraftSnapshot::try_from(record)
        );
    }

    #[test]
    fn test_fleet_lookup_sorted() {
        let b = AircraftSnapshot::try_from(raw()).unwrap();
        let mut a = b.clone();
        a.tail_number = Arc::from("TC-JFA10");
        let fleet = Fleet::new(vec![b, a]);

        assert_eq!("TC-JFA10", fleet.aircraft[0].tail_number.as_ref());
        assert!(fleet.find("TC-JJK25").is_some());
        assert!(fleet.find("TC-ZZZ99").is_none());
    }

    #[test]
    fn test_category_wire_form() {
        let category: BodyCategory = serde_json::from_str("\"WIDE\"").unwrap();
        assert_eq!(BodyCategory::Wide, category);
        let state: OperationalState = serde_json::from_str("\"in_maintenance\"").unwrap();
        assert_eq!(OperationalState::InMaintenance, state);
    }
}
