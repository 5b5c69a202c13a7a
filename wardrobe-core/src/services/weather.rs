//! Current weather lookup

use std::sync::Arc;

use crate::adapters::http::ApiClient;
use crate::domain::result::{Error, Result};
use crate::domain::WeatherSnapshot;

pub struct WeatherService {
    client: Arc<ApiClient>,
}

impl WeatherService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Current conditions for `city`; the snapshot always names the city
    pub fn current(&self, city: &str) -> Result<WeatherSnapshot> {
        let city = city.trim();
        if city.is_empty() {
            return Err(Error::validation("City is required"));
        }

        let mut snapshot: WeatherSnapshot =
            self.client.send_json(self.client.get(&["weather", city])?)?;
        if snapshot.city.trim().is_empty() {
            snapshot.city = city.to_string();
        }
        Ok(snapshot)
    }
}
