//! Weekday beat calendar: which territory areas get visited on which day.

use crate::customer::CustomerRecord;
use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Fixed weekday → area assignment. The field agent covers one area most
/// days and doubles up on Saturday; Sunday is off, so it resolves to no
/// areas and the day route comes out empty.
///
/// Deserializable so a config file can override individual days; any day
/// left out keeps its built-in assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeatCalendar {
    pub monday: Vec<String>,
    pub tuesday: Vec<String>,
    pub wednesday: Vec<String>,
    pub thursday: Vec<String>,
    pub friday: Vec<String>,
    pub saturday: Vec<String>,
    pub sunday: Vec<String>,
}

impl Default for BeatCalendar {
    fn default() -> Self {
        let areas = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();
        Self {
            monday: areas(&["Juria"]),
            tuesday: areas(&["Kantabanji"]),
            wednesday: areas(&["Titlagarh"]),
            thursday: areas(&["Sindhekela"]),
            friday: areas(&["Bangomunda"]),
            saturday: areas(&["Belpara", "Patnagarh"]),
            sunday: Vec::new(),
        }
    }
}

impl BeatCalendar {
    pub fn areas_for(&self, day: Weekday) -> &[String] {
        match day {
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
            Weekday::Sun => &self.sunday,
        }
    }
}

/// The day's route: customers whose area is scheduled today, in their
/// original ingestion order. Deliberately NOT the score-ranked order; the
/// feed's row order is the pre-assigned visiting sequence.
pub fn day_route(customers: &[CustomerRecord], areas: &[String]) -> Vec<CustomerRecord> {
    customers
        .iter()
        .filter(|c| areas.iter().any(|a| a == &c.area))
        .cloned()
        .collect()
}
