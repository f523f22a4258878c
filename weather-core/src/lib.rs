//! Core library for the weather and air-quality service.
//!
//! This crate defines:
//! - Configuration handling
//! - Shared domain models (readings, predictions) and the AQI scale
//! - The historical dataset used as a fallback source
//! - Abstraction over live weather providers and the predictor built on them
//! - Fallback resolution and the keyword chat responder
//!
//! It is used by `weather-server`, but can also be reused by other binaries.

pub mod aqi;
pub mod chat;
pub mod config;
pub mod dataset;
pub mod model;
pub mod predictor;
pub mod provider;
pub mod resolver;

pub use aqi::{aqi_category, health_advice};
pub use chat::ChatTopic;
pub use config::{Config, ProviderConfig};
pub use dataset::{CitySummary, Dataset, DatasetError, DatasetRow};
pub use model::{CurrentConditions, MlPrediction, Prediction, WeatherReading};
pub use predictor::{LivePredictor, Predictor};
pub use provider::WeatherProvider;
pub use resolver::{Resolution, resolve, resolve_city};

#[cfg(test)]
pub(crate) mod test_support {
    use crate::model::{CurrentConditions, Prediction, WeatherReading};

    pub fn sample_conditions() -> CurrentConditions {
        CurrentConditions {
            temperature: 21.5,
            feels_like: 20.9,
            humidity: 60,
            pressure: 1012,
            wind_speed: 3.2,
            clouds: 40,
            weather: "Clouds".into(),
            description: "scattered clouds".into(),
            aqi: 0,
            aqi_category: String::new(),
            pm2_5: 12.0,
            pm10: 20.0,
        }
        .with_aqi(2)
    }

    pub fn sample_prediction(city: &str) -> Prediction {
        Prediction::from_reading(WeatherReading {
            city: city.to_string(),
            timestamp: "2024-01-01 12:00:00".into(),
            current: sample_conditions(),
        })
    }
}
