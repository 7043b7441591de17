use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::instrument;

use crate::{error::AppResult, extract::AppJson, state::AppState};

use super::services::{lookup, WeatherReport};

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    #[serde(default)]
    pub city: String,
}

pub fn weather_routes() -> Router<AppState> {
    Router::new().route("/weather", post(get_weather))
}

#[instrument(skip(state))]
pub async fn get_weather(
    State(state): State<AppState>,
    AppJson(req): AppJson<WeatherRequest>,
) -> AppResult<Json<WeatherReport>> {
    let delay = state.config.simulation.weather_delay();
    let report = lookup(&state.weather_guard, &req.city, delay).await?;
    Ok(Json(report))
}
