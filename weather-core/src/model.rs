use serde::{Deserialize, Serialize};

use crate::aqi::aqi_category;

/// Format used for timestamps produced by live readings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Conditions at a single point in time, serialized as the `current` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: i64,
    pub pressure: i64,
    pub wind_speed: f64,
    pub clouds: i64,
    pub weather: String,
    pub description: String,
    pub aqi: i64,
    pub aqi_category: String,
    pub pm2_5: f64,
    pub pm10: f64,
}

impl CurrentConditions {
    /// Set the AQI value and keep `aqi_category` in step with it.
    pub fn with_aqi(mut self, aqi: i64) -> Self {
        self.aqi = aqi;
        self.aqi_category = aqi_category(aqi).to_string();
        self
    }
}

/// Immutable weather snapshot for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub timestamp: String,
    pub current: CurrentConditions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlPrediction {
    pub predicted_temperature: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_aqi: Option<i64>,
}

/// What `/api/predict` returns as `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    #[serde(flatten)]
    pub reading: WeatherReading,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_predictions: Option<MlPrediction>,
}

impl Prediction {
    pub fn from_reading(reading: WeatherReading) -> Self {
        Self {
            reading,
            health_advice: None,
            ml_predictions: None,
        }
    }

    pub fn current(&self) -> &CurrentConditions {
        &self.reading.current
    }
}
