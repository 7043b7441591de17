use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::instrument;

use crate::{
    auth::{dto::PublicUser, extractors::CurrentUser},
    error::{AppError, AppResult},
    extract::AppJson,
    state::AppState,
};

use super::dto::{DashboardResponse, LogItem, LogUsageRequest, LoggedUsageResponse};

pub fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/logs", get(list_logs).post(log_usage))
        .route("/dashboard", get(dashboard))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn log_usage(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    AppJson(payload): AppJson<LogUsageRequest>,
) -> AppResult<(StatusCode, Json<LoggedUsageResponse>)> {
    if payload.plant_name.is_empty() || payload.pesticide.is_empty() || payload.amount.is_empty()
    {
        return Err(AppError::MissingFields);
    }
    let entry = state.model.lock().await.append_usage_log(
        user.id,
        &payload.plant_name,
        &payload.pesticide,
        &payload.amount,
    )?;
    Ok((
        StatusCode::CREATED,
        Json(LoggedUsageResponse {
            message: format!("Pesticide usage logged for {}!", entry.plant_name),
            entry: entry.into(),
        }),
    ))
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn list_logs(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<Vec<LogItem>> {
    let logs = state.model.lock().await.logs_for_user(user.id);
    Json(logs.into_iter().map(LogItem::from).collect())
}

#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Json<DashboardResponse> {
    let now = OffsetDateTime::now_utc();
    let model = state.model.lock().await;
    Json(DashboardResponse {
        user: PublicUser::from(&user),
        total_applications: model.total_count_for_user(user.id),
        plants_monitored: model.distinct_plants_for_user(user.id).len(),
        monthly_applications: model.monthly_count_for_user(user.id, now.month(), now.year()),
        recent_logs: model
            .logs_for_user(user.id)
            .into_iter()
            .map(LogItem::from)
            .collect(),
    })
}
