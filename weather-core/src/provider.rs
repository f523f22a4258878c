use crate::{Config, WeatherReading, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

const MISSING_API_KEY: &str = "No API key configured for provider 'openweather'.\n\
    Hint: set OPENWEATHER_API_KEY or add [openweather] api_key to the config file.";

/// A source of live weather and air-quality readings.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the current reading for `city`.
    ///
    /// `Ok(None)` means the provider doesn't know the city.
    async fn fetch_weather(&self, city: &str) -> anyhow::Result<Option<WeatherReading>>;
}

/// Stand-in used when no API key is configured. Every call fails, so callers
/// fall back to cached data.
#[derive(Debug, Clone, Default)]
pub struct UnconfiguredProvider;

#[async_trait]
impl WeatherProvider for UnconfiguredProvider {
    async fn fetch_weather(&self, _city: &str) -> anyhow::Result<Option<WeatherReading>> {
        Err(anyhow::anyhow!(MISSING_API_KEY))
    }
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let provider = config
        .openweather
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!(MISSING_API_KEY))?;

    let client = match provider.base_url.as_deref() {
        Some(base_url) => OpenWeatherProvider::with_base_url(provider.api_key.clone(), base_url)?,
        None => OpenWeatherProvider::new(provider.api_key.clone())?,
    };

    Ok(Arc::new(client))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderConfig;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No API key configured for provider"));
    }

    #[test]
    fn provider_from_config_works_when_configured() {
        let mut cfg = Config::default();
        cfg.openweather = Some(ProviderConfig {
            api_key: "KEY".into(),
            base_url: None,
        });

        assert!(provider_from_config(&cfg).is_ok());
    }

    #[tokio::test]
    async fn unconfigured_provider_always_errors() {
        let err = UnconfiguredProvider.fetch_weather("Delhi").await.unwrap_err();
        assert!(err.to_string().contains("OPENWEATHER_API_KEY"));
    }

    #[tokio::test]
    async fn missing_key_message_is_shared() {
        let from_config = provider_from_config(&Config::default()).unwrap_err();
        let from_provider = UnconfiguredProvider.fetch_weather("Delhi").await.unwrap_err();
        assert_eq!(from_config.to_string(), MISSING_API_KEY);
        assert_eq!(from_provider.to_string(), MISSING_API_KEY);
    }
}
