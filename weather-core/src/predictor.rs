use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

use crate::{model::Prediction, provider::WeatherProvider};

/// Produces a prediction for a city from live data.
#[async_trait]
pub trait Predictor: Send + Sync + Debug {
    /// Any error means live data isn't usable and callers should fall back.
    async fn predict_for_city(&self, city: &str) -> Result<Prediction>;

    fn health_advice(&self, aqi: i64, pm2_5: f64) -> String {
        crate::aqi::health_advice(aqi, pm2_5)
    }
}

/// Predictor backed by a live [`WeatherProvider`].
///
/// It reports current conditions with health advice. No model runs here, so
/// `ml_predictions` is left empty.
#[derive(Debug, Clone)]
pub struct LivePredictor {
    provider: Arc<dyn WeatherProvider>,
}

impl LivePredictor {
    pub fn new(provider: Arc<dyn WeatherProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl Predictor for LivePredictor {
    async fn predict_for_city(&self, city: &str) -> Result<Prediction> {
        let reading = self
            .provider
            .fetch_weather(city)
            .await?
            .ok_or_else(|| anyhow!("Could not fetch weather data for {city}"))?;

        let mut prediction = Prediction::from_reading(reading);
        let (aqi, pm2_5) = (prediction.current().aqi, prediction.current().pm2_5);
        prediction.health_advice = Some(self.health_advice(aqi, pm2_5));

        Ok(prediction)
    }
}
