use axum::{extract::Query, routing::get, Json, Router};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::state::AppState;

use super::services::{search, PlantInfo};

#[derive(Debug, Deserialize)]
pub struct PlantQuery {
    #[serde(default)]
    pub q: String,
}

pub fn plant_routes() -> Router<AppState> {
    Router::new().route("/plants", get(list_plants))
}

#[instrument]
pub async fn list_plants(Query(query): Query<PlantQuery>) -> Json<Vec<&'static PlantInfo>> {
    let plants = search(&query.q);
    debug!(matches = plants.len(), "plant search");
    Json(plants)
}
