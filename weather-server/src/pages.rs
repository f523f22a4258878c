//! HTML pages rendered with Tera from templates compiled into the binary.

use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;
use tera::{Context, Tera};
use tracing::error;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../templates/dashboard.html");

pub async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let mut context = Context::new();
    context.insert("cities", &state.config.cities);
    context.insert("default_city", &state.config.default_city);

    match Tera::one_off(INDEX_TEMPLATE, &context, true) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = ?e, "Failed to render index page");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error rendering page: {e}")).into_response()
        }
    }
}

pub async fn dashboard_handler(State(state): State<Arc<AppState>>) -> Response {
    match render_dashboard(&state) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to create dashboard");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!(
                    "Error creating dashboard: {e}. Make sure you have data in {}",
                    state.config.dataset_file.display()
                ),
            )
                .into_response()
        }
    }
}

fn render_dashboard(state: &AppState) -> anyhow::Result<String> {
    let dataset = state
        .dataset
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("no dataset loaded"))?;
    if dataset.is_empty() {
        anyhow::bail!("dataset is empty");
    }

    let mut context = Context::new();
    context.insert("summaries", &dataset.city_summaries());
    context.insert("total_records", &dataset.len());

    Ok(Tera::one_off(DASHBOARD_TEMPLATE, &context, true)?)
}
