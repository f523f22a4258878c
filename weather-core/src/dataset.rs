//! Historical readings loaded from CSV once at startup.
//!
//! The dataset is the fallback source when live data can't be fetched. It is
//! never mutated after [`Dataset::load`] returns.

use serde::Deserialize;
use std::{collections::BTreeMap, fs::File, io::Read, path::Path};
use thiserror::Error;
use tracing::warn;

use crate::model::{CurrentConditions, WeatherReading};

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open dataset file {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dataset row {row}: {source}")]
    Row {
        row: usize,
        #[source]
        source: csv::Error,
    },
}

/// One CSV row. Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetRow {
    pub city: String,
    pub timestamp: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub clouds: f64,
    pub weather_main: String,
    pub weather_description: String,
    pub aqi: f64,
    pub pm2_5: f64,
    pub pm10: f64,
}

impl DatasetRow {
    /// Build a reading for `city` from this row.
    ///
    /// The requested city name is used even when this row belongs to another
    /// city (the last-row fallback).
    pub fn to_reading(&self, city: &str) -> WeatherReading {
        let current = CurrentConditions {
            temperature: self.temperature,
            feels_like: self.feels_like,
            humidity: self.humidity as i64,
            pressure: self.pressure as i64,
            wind_speed: self.wind_speed,
            clouds: self.clouds as i64,
            weather: self.weather_main.clone(),
            description: self.weather_description.clone(),
            aqi: 0,
            aqi_category: String::new(),
            pm2_5: self.pm2_5,
            pm10: self.pm10,
        }
        .with_aqi(self.aqi as i64);

        WeatherReading {
            city: city.to_string(),
            timestamp: self.timestamp.clone(),
            current,
        }
    }
}

/// Per-city aggregates shown on the dashboard.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CitySummary {
    pub city: String,
    pub readings: usize,
    pub mean_temperature: f64,
    pub mean_humidity: f64,
    pub mean_aqi: f64,
    pub latest_timestamp: String,
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn new(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    /// Load a dataset from a CSV file with a header row.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let file = File::open(path).map_err(|source| DatasetError::Open {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_reader(file)
    }

    /// Parse CSV with a header row.
    ///
    /// Rows that fail to parse (blank or non-numeric cells) are skipped with a
    /// warning. It is an error only when every data row is malformed.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut rows = Vec::new();
        let mut first_error = None;
        for (idx, row) in rdr.deserialize::<DatasetRow>().enumerate() {
            match row {
                Ok(row) => rows.push(row),
                Err(source) => {
                    warn!(row = idx + 1, error = %source, "Skipping malformed dataset row");
                    if first_error.is_none() {
                        first_error = Some(DatasetError::Row { row: idx + 1, source });
                    }
                }
            }
        }

        match first_error {
            Some(err) if rows.is_empty() => Err(err),
            _ => Ok(Self { rows }),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Latest row for `city`, or the dataset's last row when the city has none.
    ///
    /// Returns `None` only for an empty dataset. City names match exactly.
    pub fn latest_for(&self, city: &str) -> Option<&DatasetRow> {
        self.rows
            .iter()
            .rev()
            .find(|row| row.city == city)
            .or_else(|| self.rows.last())
    }

    /// Aggregates per city, ordered by city name.
    pub fn city_summaries(&self) -> Vec<CitySummary> {
        let mut by_city: BTreeMap<&str, Vec<&DatasetRow>> = BTreeMap::new();
        for row in &self.rows {
            by_city.entry(row.city.as_str()).or_default().push(row);
        }

        by_city
            .into_iter()
            .map(|(city, rows)| {
                let n = rows.len() as f64;
                let mean = |f: fn(&DatasetRow) -> f64| rows.iter().map(|r| f(r)).sum::<f64>() / n;

                CitySummary {
                    city: city.to_string(),
                    readings: rows.len(),
                    mean_temperature: mean(|r| r.temperature),
                    mean_humidity: mean(|r| r.humidity),
                    mean_aqi: mean(|r| r.aqi),
                    latest_timestamp: rows
                        .last()
                        .map(|r| r.timestamp.clone())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }
}
