use std::sync::Arc;
use weather_core::{Config, Dataset, Predictor, WeatherProvider};

/// Shared, read-only state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// `None` when the dataset file couldn't be loaded at startup.
    pub dataset: Option<Dataset>,
    pub provider: Arc<dyn WeatherProvider>,
    pub predictor: Arc<dyn Predictor>,
}

impl AppState {
    pub fn new(
        config: Config,
        dataset: Option<Dataset>,
        provider: Arc<dyn WeatherProvider>,
        predictor: Arc<dyn Predictor>,
    ) -> Self {
        Self {
            config,
            dataset,
            provider,
            predictor,
        }
    }

    pub fn has_data(&self) -> bool {
        self.dataset.is_some()
    }
}
