use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::model::{CurrentConditions, TIMESTAMP_FORMAT, WeatherReading};

use super::WeatherProvider;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Current weather plus air pollution from OpenWeather's free 2.5 API.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(api_key: String, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .context("Failed to build HTTP client for OpenWeather")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn fetch_current(&self, city: &str) -> Result<Option<OwCurrentResponse>> {
        let url = format!("{}/data/2.5/weather", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (current weather)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather current response body")?;

        if status == StatusCode::NOT_FOUND {
            debug!(city, "OpenWeather does not know this city");
            return Ok(None);
        }

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather current request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).context("Failed to parse OpenWeather current JSON")?;

        Ok(Some(parsed))
    }

    async fn fetch_air_pollution(&self, coord: &OwCoord) -> Result<OwPollutionEntry> {
        let url = format!("{}/data/2.5/air_pollution", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[
                ("lat", coord.lat.to_string()),
                ("lon", coord.lon.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather (air pollution)")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather air pollution response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather air pollution request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: OwPollutionResponse = serde_json::from_str(&body)
            .context("Failed to parse OpenWeather air pollution JSON")?;

        parsed
            .list
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("OpenWeather air pollution response contained no data"))
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: i64,
    pressure: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
}

#[derive(Debug, Deserialize)]
struct OwPollutionMain {
    aqi: i64,
}

#[derive(Debug, Deserialize)]
struct OwComponents {
    pm2_5: f64,
    pm10: f64,
}

#[derive(Debug, Deserialize)]
struct OwPollutionEntry {
    main: OwPollutionMain,
    components: OwComponents,
}

#[derive(Debug, Deserialize)]
struct OwPollutionResponse {
    list: Vec<OwPollutionEntry>,
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_weather(&self, city: &str) -> Result<Option<WeatherReading>> {
        let Some(weather) = self.fetch_current(city).await? else {
            return Ok(None);
        };
        let pollution = self.fetch_air_pollution(&weather.coord).await?;

        let observation_time = DateTime::<Utc>::from_timestamp(weather.dt, 0).unwrap_or_else(Utc::now);

        let (condition, description) = weather
            .weather
            .first()
            .map(|w| (w.main.clone(), w.description.clone()))
            .unwrap_or_else(|| ("Unknown".to_string(), "Unknown".to_string()));

        let current = CurrentConditions {
            temperature: weather.main.temp,
            feels_like: weather.main.feels_like,
            humidity: weather.main.humidity,
            pressure: weather.main.pressure,
            wind_speed: weather.wind.speed,
            clouds: weather.clouds.all,
            weather: condition,
            description,
            aqi: 0,
            aqi_category: String::new(),
            pm2_5: pollution.components.pm2_5,
            pm10: pollution.components.pm10,
        }
        .with_aqi(pollution.main.aqi);

        debug!(city, resolved = %weather.name, aqi = current.aqi, "Fetched live reading");

        Ok(Some(WeatherReading {
            city: city.to_string(),
            timestamp: observation_time.format(TIMESTAMP_FORMAT).to_string(),
            current,
        }))
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
