use anyhow::Context;
use clap::Parser;
use std::{path::PathBuf, sync::Arc};
use tracing::{info, warn};
use weather_core::{
    Config, Dataset, LivePredictor,
    provider::{UnconfiguredProvider, WeatherProvider, provider_from_config},
};

use crate::{routes, state::AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-server", version, about = "Weather and air-quality server")]
pub struct Cli {
    /// Path to the TOML config file; defaults to the platform config dir.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind, overriding the config file.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind, overriding the config file.
    #[arg(short, long)]
    pub port: Option<u16>,

    /// CSV dataset used when live data is unavailable.
    #[arg(long)]
    pub dataset: Option<PathBuf>,
}

impl Cli {
    fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(dataset) = &self.dataset {
            config.dataset_file = dataset.clone();
        }

        Ok(config)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.load_config()?;

        let dataset = match Dataset::load(&config.dataset_file) {
            Ok(ds) => {
                info!(records = ds.len(), path = %config.dataset_file.display(), "Loaded sample records");
                Some(ds)
            }
            Err(e) => {
                warn!(error = %e, "No sample data found, continuing with live data only");
                None
            }
        };

        let provider: Arc<dyn WeatherProvider> = match provider_from_config(&config) {
            Ok(provider) => provider,
            Err(e) => {
                warn!("{e}");
                Arc::new(UnconfiguredProvider)
            }
        };
        let predictor = Arc::new(LivePredictor::new(provider.clone()));

        let listen_address = config.listen_address();
        let has_data = dataset.is_some();
        let state = Arc::new(AppState::new(config, dataset, provider, predictor));
        let app = routes::router(state);

        let listener = tokio::net::TcpListener::bind(&listen_address)
            .await
            .with_context(|| format!("Failed to bind {listen_address}"))?;

        info!("Main app: http://{listen_address}");
        info!("Dashboard: http://{listen_address}/dashboard");
        if has_data {
            info!("Data: available");
        } else {
            info!("Data: not available, generate sample data to enable the fallback");
        }

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .context("Server error")?;

        info!("Server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
