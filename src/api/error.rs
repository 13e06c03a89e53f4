use crate::domain::{GeoError, ProfileUpdateError};
use crate::prayer_times::PrayerTimesError;
use crate::repository::RepositoryError;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    InvalidCoordinate(#[from] GeoError),

    #[error("missing query parameter '{0}'")]
    MissingQueryParameter(&'static str),

    #[error("radius must be a non-negative number of kilometers, got {0}")]
    InvalidRadius(f64),

    #[error("malformed query: {0}")]
    MalformedQuery(String),

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("invalid profile: {0}")]
    InvalidProfile(#[from] ProfileUpdateError),

    #[error(transparent)]
    PrayerTimes(#[from] PrayerTimesError),

    #[error("could not validate credentials")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(#[from] RepositoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::PrayerTimes(PrayerTimesError::NoUpcomingPrayer) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::InvalidCoordinate(_)
            | ApiError::MissingQueryParameter(_)
            | ApiError::InvalidRadius(_)
            | ApiError::MalformedQuery(_)
            | ApiError::PrayerTimes(_) => StatusCode::BAD_REQUEST,
            ApiError::MalformedPayload(_) | ApiError::InvalidProfile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("🔴 {}", self);
        }

        let mut response = (status, Json(json!({ "detail": self.to_string() }))).into_response();
        if matches!(self, ApiError::Unauthorized) {
            response.headers_mut().insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}
