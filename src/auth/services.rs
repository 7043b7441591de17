use crate::auth::dto::{LoginRequest, SignupRequest};
use crate::error::{AppError, AppResult, MIN_PASSWORD_LEN};

pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Form-level checks for signup, in the order the user sees them. The email
/// is taken as typed; only its uniqueness is checked, by the data model.
pub fn validate_signup(req: &SignupRequest) -> AppResult<()> {
    if req.name.is_empty()
        || req.email.is_empty()
        || req.password.is_empty()
        || req.confirm_password.is_empty()
    {
        return Err(AppError::MissingFields);
    }
    if !is_valid_password(&req.password) {
        return Err(AppError::WeakPassword);
    }
    if req.password != req.confirm_password {
        return Err(AppError::PasswordMismatch);
    }
    Ok(())
}

pub fn validate_login(req: &LoginRequest) -> AppResult<()> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(AppError::MissingFields);
    }
    Ok(())
}
