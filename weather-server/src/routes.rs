use crate::error::ApiError;
use crate::pages::{dashboard_handler, index_handler};
use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use weather_core::{
    ChatTopic, Resolution,
    chat::{NO_DATA_MESSAGE, compose_reply},
    resolve_city,
};

// --- Request Structs ---

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PredictRequest {
    city: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    message: Option<String>,
    city: Option<String>,
}

// --- Route Handlers ---

async fn predict_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload?;
    let city = payload
        .city
        .unwrap_or_else(|| state.config.default_city.clone());

    match resolve_city(state.predictor.as_ref(), state.dataset.as_ref(), &city).await {
        Resolution::Live(prediction) => Ok(Json(json!({ "success": true, "data": prediction }))),
        Resolution::Cached(prediction) => {
            info!(city = %city, "Serving cached sample data");
            Ok(Json(json!({ "success": true, "data": prediction })))
        }
        Resolution::NotFound(message) => Err(ApiError::NotFound(message)),
    }
}

async fn weather_handler(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let reading = state
        .provider
        .fetch_weather(&city)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Could not fetch weather data for {city}")))?;

    Ok(Json(json!({ "success": true, "data": reading })))
}

async fn cities_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "success": true, "cities": state.config.cities }))
}

async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            warn!("Rejected chat body: {}", rejection.body_text());
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "success": false,
                    "reply": format!("Sorry, something went wrong: {}", rejection.body_text()),
                })),
            )
                .into_response();
        }
    };

    let message = payload.message.unwrap_or_default();
    let city = payload
        .city
        .unwrap_or_else(|| state.config.default_city.clone());

    let resolved = resolve_city(state.predictor.as_ref(), state.dataset.as_ref(), &city).await;
    let Some(prediction) = resolved.into_prediction() else {
        return Json(json!({ "success": false, "reply": NO_DATA_MESSAGE })).into_response();
    };

    let topic = ChatTopic::detect(&message);
    let reply = compose_reply(topic, &city, &prediction);

    let body = match topic {
        ChatTopic::Help => json!({ "success": true, "reply": reply }),
        ChatTopic::Weather | ChatTopic::AirQuality => {
            json!({ "success": true, "reply": reply, "data": prediction })
        }
    };
    Json(body).into_response()
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "status": "healthy",
        "message": "Weather ML API is running",
        "data_available": state.has_data(),
    }))
}

// --- Router ---

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/dashboard", get(dashboard_handler))
        .route("/api/predict", post(predict_handler))
        .route("/api/weather/{city}", get(weather_handler))
        .route("/api/cities", get(cities_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
