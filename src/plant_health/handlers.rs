use axum::{
    extract::{DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use tracing::instrument;

use crate::{error::AppResult, extract::AppJson, state::AppState};

use super::dto::PlantHealthRequest;
use super::services::{analyze, HealthReport};

pub fn plant_health_routes() -> Router<AppState> {
    Router::new()
        .route("/plant-health", post(analyze_plant))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[instrument(skip_all, fields(bytes = body.image.len()))]
pub async fn analyze_plant(
    State(state): State<AppState>,
    AppJson(body): AppJson<PlantHealthRequest>,
) -> AppResult<Json<HealthReport>> {
    let delay = state.config.simulation.plant_health_delay();
    let report = analyze(
        &state.plant_health_guard,
        &body.image,
        body.content_type.as_deref(),
        delay,
    )
    .await?;
    Ok(Json(report))
}
