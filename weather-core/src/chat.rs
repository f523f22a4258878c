//! Keyword chat responder.
//!
//! Not a parser: the lowercased message is checked for weather keywords first,
//! then air-quality keywords, and the first match picks the reply template.

use std::fmt::Write;

use crate::model::Prediction;

const WEATHER_KEYWORDS: &[&str] = &["weather", "temperature", "temp", "forecast", "climate"];
const AIR_QUALITY_KEYWORDS: &[&str] = &["aqi", "air quality", "pollution", "pm2.5"];

pub const HELP_MESSAGE: &str = "Hi! I can help you with:\n\
    • Weather information\n\
    • Temperature forecasts\n\
    • Air quality (AQI)\n\
    • Health advice\n\n\
    Just ask me about weather or AQI for any city!";

pub const NO_DATA_MESSAGE: &str = "No data available. Please generate sample data first!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTopic {
    Weather,
    AirQuality,
    Help,
}

impl ChatTopic {
    pub fn detect(message: &str) -> Self {
        let message = message.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| message.contains(w));

        if mentions(WEATHER_KEYWORDS) {
            ChatTopic::Weather
        } else if mentions(AIR_QUALITY_KEYWORDS) {
            ChatTopic::AirQuality
        } else {
            ChatTopic::Help
        }
    }
}

/// Render the reply for `topic` using the readings in `prediction`.
pub fn compose_reply(topic: ChatTopic, city: &str, prediction: &Prediction) -> String {
    match topic {
        ChatTopic::Weather => weather_reply(city, prediction),
        ChatTopic::AirQuality => air_quality_reply(city, prediction),
        ChatTopic::Help => HELP_MESSAGE.to_string(),
    }
}

/// Whole numbers keep one decimal place (`18.0`, not `18`).
fn decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn weather_reply(city: &str, prediction: &Prediction) -> String {
    let c = prediction.current();
    let mut reply = format!("🌍 Weather in {city}:\n\n");

    // fmt::Write for String never fails.
    let _ = writeln!(
        reply,
        "🌡️ Temperature: {}°C (Feels like {}°C)",
        decimal(c.temperature),
        decimal(c.feels_like)
    );
    let _ = writeln!(reply, "☁️ Condition: {} - {}", c.weather, c.description);
    let _ = writeln!(reply, "💧 Humidity: {}%", c.humidity);
    let _ = writeln!(reply, "💨 Wind: {} m/s\n", decimal(c.wind_speed));
    let _ = writeln!(reply, "🏭 Air Quality: {} (AQI: {})", c.aqi_category, c.aqi);
    let _ = writeln!(reply, "PM2.5: {} µg/m³\n", decimal(c.pm2_5));

    if let Some(ml) = &prediction.ml_predictions {
        let _ = writeln!(
            reply,
            "🤖 ML Prediction: Temperature will be around {}°C\n",
            decimal(ml.predicted_temperature)
        );
    }

    let _ = write!(reply, "💡 {}", prediction.health_advice.as_deref().unwrap_or_default());
    reply
}

fn air_quality_reply(city: &str, prediction: &Prediction) -> String {
    let c = prediction.current();
    let mut reply = format!("💨 Air Quality in {city}:\n\n");

    let _ = writeln!(reply, "AQI Level: {} ({})", c.aqi_category, c.aqi);
    let _ = writeln!(reply, "PM2.5: {} µg/m³", decimal(c.pm2_5));
    let _ = writeln!(reply, "PM10: {} µg/m³\n", decimal(c.pm10));
    let _ = write!(reply, "💡 {}", prediction.health_advice.as_deref().unwrap_or_default());
    reply
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::MlPrediction, test_support::sample_prediction};

    #[test]
    fn weather_keywords_win_over_air_quality() {
        assert_eq!(ChatTopic::detect("What's the weather and AQI?"), ChatTopic::Weather);
        assert_eq!(ChatTopic::detect("pollution forecast please"), ChatTopic::Weather);
        assert_eq!(ChatTopic::detect("TEMP"), ChatTopic::Weather);
    }

    #[test]
    fn air_quality_keywords() {
        for msg in ["aqi?", "How is the Air Quality", "pollution levels", "PM2.5 today"] {
            assert_eq!(ChatTopic::detect(msg), ChatTopic::AirQuality, "{msg}");
        }
    }

    #[test]
    fn anything_else_is_help() {
        assert_eq!(ChatTopic::detect(""), ChatTopic::Help);
        assert_eq!(ChatTopic::detect("hello there"), ChatTopic::Help);
    }

    #[test]
    fn keyword_match_is_substring_based() {
        // "attempt" contains "temp"
        assert_eq!(ChatTopic::detect("one more attempt"), ChatTopic::Weather);
    }

    #[test]
    fn weather_reply_lists_readings_and_advice() {
        let mut prediction = sample_prediction("Delhi");
        prediction.health_advice = Some("Stay hydrated.".into());

        let reply = compose_reply(ChatTopic::Weather, "Delhi", &prediction);
        assert!(reply.starts_with("🌍 Weather in Delhi:\n\n"));
        assert!(reply.contains("Temperature: 21.5°C (Feels like 20.9°C)"));
        assert!(reply.contains("Condition: Clouds - scattered clouds"));
        assert!(reply.contains("Humidity: 60%"));
        assert!(reply.contains("Air Quality: Fair (AQI: 2)"));
        assert!(!reply.contains("ML Prediction"));
        assert!(reply.ends_with("💡 Stay hydrated."));
    }

    #[test]
    fn weather_reply_includes_ml_line_when_present() {
        let mut prediction = sample_prediction("Delhi");
        prediction.ml_predictions = Some(MlPrediction {
            predicted_temperature: 23.4,
            predicted_aqi: None,
        });

        let reply = compose_reply(ChatTopic::Weather, "Delhi", &prediction);
        assert!(reply.contains("🤖 ML Prediction: Temperature will be around 23.4°C"));
    }

    #[test]
    fn whole_number_readings_keep_a_decimal() {
        let mut prediction = sample_prediction("Delhi");
        prediction.reading.current.temperature = 18.0;
        prediction.reading.current.wind_speed = 3.0;
        prediction.ml_predictions = Some(MlPrediction {
            predicted_temperature: 19.0,
            predicted_aqi: None,
        });

        let reply = compose_reply(ChatTopic::Weather, "Delhi", &prediction);
        assert!(reply.contains("🌡️ Temperature: 18.0°C (Feels like 20.9°C)"));
        assert!(reply.contains("💨 Wind: 3.0 m/s"));
        assert!(reply.contains("PM2.5: 12.0 µg/m³"));
        assert!(reply.contains("Temperature will be around 19.0°C"));
    }

    #[test]
    fn decimal_formatting() {
        assert_eq!(decimal(18.0), "18.0");
        assert_eq!(decimal(-2.0), "-2.0");
        assert_eq!(decimal(20.9), "20.9");
        assert_eq!(decimal(0.25), "0.25");
        assert_eq!(decimal(f64::NAN), "NaN");
    }

    #[test]
    fn air_quality_reply_lists_particulates() {
        let prediction = sample_prediction("Pune");
        let reply = compose_reply(ChatTopic::AirQuality, "Pune", &prediction);
        assert!(reply.starts_with("💨 Air Quality in Pune:"));
        assert!(reply.contains("AQI Level: Fair (2)"));
        assert!(reply.contains("PM2.5: 12.0 µg/m³"));
        assert!(reply.contains("PM10: 20.0 µg/m³"));
        assert!(reply.ends_with("💡 "));
    }

    #[test]
    fn help_reply_is_static() {
        let prediction = sample_prediction("Pune");
        assert_eq!(compose_reply(ChatTopic::Help, "Pune", &prediction), HELP_MESSAGE);
    }
}
