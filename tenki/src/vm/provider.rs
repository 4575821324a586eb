//! Open-Meteo forecast provider

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Deserialize;
use thiserror::Error;

use crate::model::{Area, Condition, Weather};

/// Why a fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("weather response had no daily data for {0}")]
    MissingData(Area),
}

/// Fetch seam between the view models and the forecast service.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, area: Area, at: DateTime<Local>) -> Result<Weather, FetchError>;
}

/// Daily forecast response from Open-Meteo
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Daily,
}

#[derive(Debug, Deserialize)]
struct Daily {
    weather_code: Vec<u8>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

/// Provider backed by the Open-Meteo daily forecast endpoint.
pub struct OpenMeteoProvider {
    client: reqwest::Client,
}

impl OpenMeteoProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch(&self, area: Area, at: DateTime<Local>) -> Result<Weather, FetchError> {
        let (lat, lon) = area.coordinates();
        let url = format!(
            "https://api.open-meteo.com/v1/forecast?latitude={lat}&longitude={lon}\
             &daily=weather_code,temperature_2m_max,temperature_2m_min\
             &timezone=Asia%2FTokyo&forecast_days=1"
        );

        tracing::debug!(area = area.name(), "Fetching forecast");
        let response = self.client.get(&url).send().await?;
        let data: ForecastResponse = response.json().await?;

        let daily = data.daily;
        match (
            daily.weather_code.first(),
            daily.temperature_2m_max.first(),
            daily.temperature_2m_min.first(),
        ) {
            (Some(&code), Some(&max), Some(&min)) => Ok(Weather {
                condition: condition_for_code(code),
                min_temperature: min.round() as i32,
                max_temperature: max.round() as i32,
                observed_at: at,
            }),
            _ => Err(FetchError::MissingData(area)),
        }
    }
}

/// Classify a WMO weather code into a condition identifier.
fn condition_for_code(code: u8) -> Condition {
    match code {
        0 | 1 => Condition::Sunny,
        2 | 3 | 45 | 48 => Condition::Cloudy,
        71..=77 | 85 | 86 => Condition::Snowy,
        _ => Condition::Rainy,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_for_clear_codes() {
        assert_eq!(condition_for_code(0), Condition::Sunny);
        assert_eq!(condition_for_code(1), Condition::Sunny);
    }

    #[test]
    fn test_condition_for_cloud_and_fog_codes() {
        assert_eq!(condition_for_code(3), Condition::Cloudy);
        assert_eq!(condition_for_code(45), Condition::Cloudy);
    }

    #[test]
    fn test_condition_for_snow_codes() {
        assert_eq!(condition_for_code(71), Condition::Snowy);
        assert_eq!(condition_for_code(86), Condition::Snowy);
    }

    #[test]
    fn test_condition_for_rain_codes() {
        assert_eq!(condition_for_code(61), Condition::Rainy);
        assert_eq!(condition_for_code(95), Condition::Rainy);
    }

    #[test]
    fn test_forecast_response_shape() {
        let json = r#"{
            "daily": {
                "weather_code": [61],
                "temperature_2m_max": [19.6],
                "temperature_2m_min": [10.4]
            }
        }"#;
        let parsed: ForecastResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.daily.weather_code, vec![61]);
        assert_eq!(parsed.daily.temperature_2m_max, vec![19.6]);
    }
}
