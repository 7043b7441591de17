//! Application errors and their HTTP rendering.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::storage::StoreError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Broad class of an [`AppError`], used by callers to decide how to react.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Auth,
    Busy,
    Storage,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Please fill in all fields.")]
    MissingFields,

    #[error("Password must be at least 6 characters long.")]
    WeakPassword,

    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("User already exists with this email.")]
    DuplicateEmail,

    #[error("{0}")]
    BadRequest(String),

    #[error("Invalid email or password.")]
    InvalidCredentials,

    #[error("Please login to continue.")]
    AuthRequired,

    #[error("A request is already in progress.")]
    Busy,

    #[error("storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::MissingFields
            | AppError::WeakPassword
            | AppError::PasswordMismatch
            | AppError::DuplicateEmail
            | AppError::BadRequest(_) => ErrorKind::Validation,
            AppError::InvalidCredentials | AppError::AuthRequired => ErrorKind::Auth,
            AppError::Busy => ErrorKind::Busy,
            AppError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Everything except storage failures can be shown to the user and retried.
    pub fn is_recoverable(&self) -> bool {
        self.kind() != ErrorKind::Storage
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::MissingFields => "missing_fields",
            AppError::WeakPassword => "weak_password",
            AppError::PasswordMismatch => "password_mismatch",
            AppError::DuplicateEmail => "duplicate_email",
            AppError::BadRequest(_) => "bad_request",
            AppError::InvalidCredentials => "invalid_credentials",
            AppError::AuthRequired => "auth_required",
            AppError::Busy => "busy",
            AppError::Storage(_) => "storage_error",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::AuthRequired => StatusCode::UNAUTHORIZED,
            AppError::Busy => StatusCode::TOO_MANY_REQUESTS,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    kind: ErrorKind,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = if self.is_recoverable() {
            self.to_string()
        } else {
            tracing::error!(error = %self, "unrecoverable error");
            "Something went wrong while saving your data.".to_string()
        };
        let body = ErrorBody {
            error: self.code(),
            kind: self.kind(),
            message,
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
