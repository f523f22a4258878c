//! The 1..5 air quality scale used by OpenWeather's air pollution API.

/// PM2.5 concentration (µg/m³) above which sensitive groups get an extra warning.
const PM2_5_SENSITIVE_THRESHOLD: f64 = 35.0;

/// Convert an AQI number to its category name.
pub fn aqi_category(aqi: i64) -> &'static str {
    match aqi {
        1 => "Good",
        2 => "Fair",
        3 => "Moderate",
        4 => "Poor",
        5 => "Very Poor",
        _ => "Unknown",
    }
}

/// One-line health advice for the given AQI and PM2.5 reading.
pub fn health_advice(aqi: i64, pm2_5: f64) -> String {
    let base = match aqi {
        1 => "Air quality is good. Perfect for outdoor activities!",
        2 => "Air quality is acceptable. Unusually sensitive people should limit prolonged outdoor exertion.",
        3 => "Air quality is moderate. Sensitive groups should reduce outdoor activity.",
        4 => "Air quality is poor. Everyone should limit outdoor activity and consider wearing a mask.",
        5 => "Air quality is very poor. Avoid outdoor activity and keep windows closed.",
        _ => return "Air quality data is unavailable. Check local advisories before going out.".to_string(),
    };

    if pm2_5 > PM2_5_SENSITIVE_THRESHOLD {
        format!(
            "{base} PM2.5 is elevated ({pm2_5:.1} µg/m³); people with asthma or heart conditions should take extra care."
        )
    } else {
        base.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_categories_cover_one_to_five() {
        assert_eq!(aqi_category(1), "Good");
        assert_eq!(aqi_category(2), "Fair");
        assert_eq!(aqi_category(3), "Moderate");
        assert_eq!(aqi_category(4), "Poor");
        assert_eq!(aqi_category(5), "Very Poor");
    }

    #[test]
    fn out_of_range_is_unknown() {
        for aqi in [0, -1, 6, 42, i64::MAX, i64::MIN] {
            assert_eq!(aqi_category(aqi), "Unknown", "aqi = {aqi}");
        }
    }

    #[test]
    fn advice_mentions_pm2_5_only_when_elevated() {
        let clean = health_advice(2, 10.0);
        assert!(!clean.contains("PM2.5"));

        let dirty = health_advice(2, 80.0);
        assert!(dirty.starts_with(&clean));
        assert!(dirty.contains("80.0 µg/m³"));
    }

    #[test]
    fn advice_for_unknown_aqi_ignores_pm2_5() {
        let advice = health_advice(9, 500.0);
        assert!(advice.contains("unavailable"));
        assert!(!advice.contains("PM2.5"));
    }
}
