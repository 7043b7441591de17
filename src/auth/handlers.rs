use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use crate::{
    auth::{
        dto::{LoginRequest, MessageResponse, PublicUser, SignupRequest},
        extractors::CurrentUser,
        services::{validate_login, validate_signup},
    },
    error::AppResult,
    extract::AppJson,
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

pub fn me_routes() -> Router<AppState> {
    Router::new().route("/me", get(get_me))
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    validate_signup(&payload)?;

    let mut model = state.model.lock().await;
    let user = model.create_user(&payload.name, &payload.email, &payload.password)?;

    info!(user_id = %user.id, "signup complete");
    Ok((StatusCode::CREATED, Json(PublicUser::from(&user))))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> AppResult<Json<PublicUser>> {
    validate_login(&payload)?;

    // model before session, everywhere both are held
    let model = state.model.lock().await;
    let mut session = state.session.lock().await;
    let user = session.login(&model, &payload.email, &payload.password)?;
    Ok(Json(PublicUser::from(user)))
}

#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> AppResult<Json<MessageResponse>> {
    state.session.lock().await.logout()?;
    Ok(Json(MessageResponse {
        message: "Logged out successfully!".into(),
    }))
}

#[instrument(skip_all)]
pub async fn get_me(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(PublicUser::from(&user))
}

#[cfg(test)]
mod me_tests {
    use super::*;
    use crate::db::{User, DEMO_USER_ID};
    use time::OffsetDateTime;

    #[test]
    fn public_user_hides_password() {
        let user = User {
            id: DEMO_USER_ID,
            name: "Demo User".into(),
            email: "test@example.com".into(),
            password: "demo123".into(),
            join_date: OffsetDateTime::now_utc(),
        };

        let json = serde_json::to_string(&PublicUser::from(&user)).unwrap();
        assert!(json.contains("test@example.com"));
        assert!(json.contains("join_date"));
        assert!(!json.contains("demo123"));
    }
}
