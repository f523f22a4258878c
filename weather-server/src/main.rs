//! Binary crate for the weather and air-quality HTTP server.
//!
//! This crate focuses on:
//! - Parsing CLI arguments and wiring configuration
//! - Route handlers and JSON response shapes
//! - Rendering the index and dashboard pages

use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod error;
mod pages;
mod routes;
mod state;

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("weather_server=info,weather_core=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
