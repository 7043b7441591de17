use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{db::User, error::AppError, state::AppState};

/// Resolves the logged-in user from the session, or rejects with
/// [`AppError::AuthRequired`].
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = state.session.lock().await;
        let user = session.require_user()?.clone();
        Ok(CurrentUser(user))
    }
}
