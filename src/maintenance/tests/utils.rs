use crate::aircraft::{AircraftSnapshot, BodyCategory, Fleet, OperationalState};
use chrono::NaiveDate;
use std::sync::Arc;

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn snapshot(
    tail_number: &str,
    category: BodyCategory,
    flight_hours: f64,
    flight_cycles: f64,
    last_check_date: &str,
    last_heavy_check_date: &str,
    daily_flight_hours: f64,
) -> AircraftSnapshot {
    AircraftSnapshot {
        tail_number: Arc::from(tail_number),
        category,
        flight_hours_since_check: flight_hours,
        flight_cycles_since_check: flight_cycles,
        last_check_date: last_check_date.to_string(),
        last_heavy_check_date: last_heavy_check_date.to_string(),
        daily_flight_hours,
        state: OperationalState::Active,
    }
}

/// A fleet whose only members are aircraft currently occupying hangar bays.
pub fn occupied_fleet(wide: usize, narrow: usize) -> Fleet {
    let mut aircraft = Vec::new();
    for i in 0..wide {
        let mut frame = snapshot(
            &format!("TC-HW{:02}", i),
            BodyCategory::Wide,
            100.0,
            80.0,
            "2025-10-01",
            "2023-01-01",
            9.0,
        );
        frame.state = OperationalState::InMaintenance;
        aircraft.push(frame);
    }
    for i in 0..narrow {
        let mut frame = snapshot(
            &format!("TC-HN{:02}", i),
            BodyCategory::Narrow,
            100.0,
            80.0,
            "2025-10-01",
            "2023-01-01",
            9.0,
        );
        frame.state = OperationalState::InMaintenance;
        aircraft.push(frame);
    }
    Fleet::new(aircraft)
}
