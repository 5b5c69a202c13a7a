//! Weather snapshot

use serde::{Deserialize, Serialize};

/// Current conditions for a city, fetched on demand and never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Degrees Celsius
    pub temperature: f64,
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub city: String,
}

impl WeatherSnapshot {
    /// Temperature rounded for display
    pub fn rounded_temperature(&self) -> i64 {
        self.temperature.round() as i64
    }

    /// Coarse icon bucket derived from the condition label
    pub fn sky(&self) -> Sky {
        let condition = self.condition.to_lowercase();
        if condition.contains("sun") || condition.contains("clear") {
            Sky::Clear
        } else if condition.contains("rain") {
            Sky::Rain
        } else if condition.contains("snow") {
            Sky::Snow
        } else {
            Sky::Cloudy
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sky {
    Clear,
    Rain,
    Snow,
    Cloudy,
}
