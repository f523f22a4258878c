use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Env var that overrides the OpenWeather API key from the config file.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Credentials for the live weather provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,

    /// Override for the API host, mainly for tests and proxies.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// port = 5000
/// default_city = "Delhi"
/// cities = ["Delhi", "Mumbai"]
/// dataset_file = "data/weather_data.csv"
///
/// [openweather]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub default_city: String,
    pub cities: Vec<String>,
    pub dataset_file: PathBuf,
    pub openweather: Option<ProviderConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            default_city: "Delhi".to_string(),
            cities: [
                "Delhi",
                "Mumbai",
                "Bangalore",
                "Chennai",
                "Kolkata",
                "Hyderabad",
                "Pune",
                "Ahmedabad",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            dataset_file: PathBuf::from("data/weather_data.csv"),
            openweather: None,
        }
    }
}

impl Config {
    /// Load config from `path`, or from the platform config dir when `None`.
    ///
    /// A missing file yields the defaults. The API key env var is applied last.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_file_path()?,
        };

        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;

            Self::from_toml(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            cfg.set_api_key(key);
        }

        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-ml", "weather-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set or replace the OpenWeather API key, keeping any base URL override.
    /// Blank keys are ignored.
    pub fn set_api_key(&mut self, api_key: String) {
        if api_key.trim().is_empty() {
            return;
        }

        match self.openweather.as_mut() {
            Some(provider) => provider.api_key = api_key,
            None => {
                self.openweather = Some(ProviderConfig {
                    api_key,
                    base_url: None,
                })
            }
        }
    }

    /// Returns the API key, if present.
    pub fn api_key(&self) -> Option<&str> {
        self.openweather.as_ref().map(|cfg| cfg.api_key.as_str())
    }

    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let cfg = Config::default();
        assert_eq!(cfg.listen_address(), "0.0.0.0:5000");
        assert!(cfg.cities.contains(&cfg.default_city));
        assert!(cfg.api_key().is_none());
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let cfg = Config::from_toml(
            r#"
            port = 8080
            cities = ["Oslo", "Bergen"]

            [openweather]
            api_key = "OPEN_KEY"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.cities, ["Oslo", "Bergen"]);
        assert_eq!(cfg.dataset_file, PathBuf::from("data/weather_data.csv"));
        assert_eq!(cfg.api_key(), Some("OPEN_KEY"));
    }

    #[test]
    fn set_api_key_keeps_base_url() {
        let mut cfg = Config::default();
        cfg.openweather = Some(ProviderConfig {
            api_key: "OLD".into(),
            base_url: Some("http://localhost:9999".into()),
        });

        cfg.set_api_key("NEW".into());

        let provider = cfg.openweather.as_ref().unwrap();
        assert_eq!(provider.api_key, "NEW");
        assert_eq!(provider.base_url.as_deref(), Some("http://localhost:9999"));
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());
        assert!(cfg.api_key().is_none());
    }

    #[test]
    fn load_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_city = \"Mumbai\"\n").unwrap();

        let cfg = Config::load(Some(&path)).unwrap();
        assert_eq!(cfg.default_city, "Mumbai");
    }

    #[test]
    fn load_missing_path_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(Some(&dir.path().join("missing.toml"))).unwrap();
        assert_eq!(cfg.port, 5000);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "port = \"not a number\"").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
