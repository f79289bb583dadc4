//! API handlers for the ShareIt REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};
use validator::Validate;

use crate::{error::AppError, AppState};

/// Header carrying the caller's user id.
///
/// The value is trusted as-is: there is no signature or session behind it.
/// Authentication is an explicit non-goal of this service.
pub const SHARER_USER_ID: &str = "X-Sharer-User-Id";

/// Extractor for the calling user's id from the `X-Sharer-User-Id` header
pub struct SharerId(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for SharerId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(SHARER_USER_ID)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::BadRequest(format!("Missing {} header", SHARER_USER_ID)))?;

        let user_id = header
            .parse::<i64>()
            .map_err(|_| AppError::BadRequest(format!("Invalid {} header", SHARER_USER_ID)))?;

        Ok(SharerId(user_id))
    }
}

/// Run DTO validation, surfacing failures as a validation error
pub(crate) fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))
}
