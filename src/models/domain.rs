use serde::{Deserialize, Serialize};

/// Airport as listed by the directory and referenced by prediction requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    pub id: i64,
    pub name: String,
}

impl Airport {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Outcome of a single delay prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    #[serde(rename = "delayChance")]
    pub delay_chance: f64,
    pub confidence: f64,
}

impl PredictionResult {
    /// True when both values are finite, `delay_chance` lies in [0, 1]
    /// and `confidence` lies in (0, 1]
    pub fn is_within_bounds(&self) -> bool {
        self.delay_chance.is_finite()
            && self.confidence.is_finite()
            && (0.0..=1.0).contains(&self.delay_chance)
            && self.confidence > 0.0
            && self.confidence <= 1.0
    }
}

/// Input features handed to the model, keyed by the names used in the
/// exported coefficient file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightFeatures {
    pub day_of_week: f64,
    pub origin_airport_id: f64,
}

impl FlightFeatures {
    pub const DAY_OF_WEEK: &'static str = "DayOfWeek";
    pub const ORIGIN_AIRPORT_ID: &'static str = "OriginAirportID";

    pub fn new(day_of_week_id: i64, airport_id: i64) -> Self {
        Self {
            day_of_week: day_of_week_id as f64,
            origin_airport_id: airport_id as f64,
        }
    }

    /// Look up a feature value by its model name
    pub fn get(&self, name: &str) -> Option<f64> {
        match name {
            Self::DAY_OF_WEEK => Some(self.day_of_week),
            Self::ORIGIN_AIRPORT_ID => Some(self.origin_airport_id),
            _ => None,
        }
    }
}
