//! Picks the data source for a city: live prediction first, then the dataset.

use tracing::{debug, warn};

use crate::{dataset::Dataset, model::Prediction, predictor::Predictor};

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The predictor succeeded.
    Live(Prediction),
    /// Built from the dataset after the predictor failed.
    Cached(Prediction),
    /// Nothing usable; carries the user-facing message.
    NotFound(String),
}

impl Resolution {
    pub fn into_prediction(self) -> Option<Prediction> {
        match self {
            Resolution::Live(p) | Resolution::Cached(p) => Some(p),
            Resolution::NotFound(_) => None,
        }
    }
}

/// Decide between a live result and the dataset fallback.
///
/// `advice` supplies health advice for cached rows from their AQI and PM2.5.
pub fn resolve(
    city: &str,
    live: anyhow::Result<Prediction>,
    dataset: Option<&Dataset>,
    advice: impl Fn(i64, f64) -> String,
) -> Resolution {
    let live_err = match live {
        Ok(prediction) => return Resolution::Live(prediction),
        Err(e) => e,
    };
    debug!(city, error = %live_err, "Live prediction failed, trying dataset");

    match dataset.and_then(|ds| ds.latest_for(city)) {
        Some(row) => {
            let mut prediction = Prediction::from_reading(row.to_reading(city));
            let (aqi, pm2_5) = (prediction.current().aqi, prediction.current().pm2_5);
            prediction.health_advice = Some(advice(aqi, pm2_5));
            Resolution::Cached(prediction)
        }
        None => {
            warn!(city, "No live or cached data available");
            Resolution::NotFound(format!(
                "Could not fetch data for {city}. Check API key or generate sample data."
            ))
        }
    }
}

/// Ask `predictor` for live data and resolve against `dataset`.
pub async fn resolve_city(
    predictor: &dyn Predictor,
    dataset: Option<&Dataset>,
    city: &str,
) -> Resolution {
    let live = predictor.predict_for_city(city).await;
    resolve(city, live, dataset, |aqi, pm2_5| predictor.health_advice(aqi, pm2_5))
}
