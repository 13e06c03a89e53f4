use crate::api::{ApiError, AppState};
use crate::domain::User;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;
use tracing::debug;

/// The user that authenticated the request with a bearer token. Extracting it rejects the request with
/// `401 Unauthorized` before the handler runs.
#[derive(Debug)]
pub struct CurrentUser(pub User);

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &Arc<AppState>) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(&parts.headers) else {
            debug!("🔒 Rejected request without bearer token");
            return Err(ApiError::Unauthorized);
        };

        let Some(user_id) = state.token_validator.validate(token).await else {
            debug!("🔒 Rejected request with unknown token");
            return Err(ApiError::Unauthorized);
        };

        match state.users.get(&user_id).await {
            Some(user) if user.is_active => Ok(CurrentUser(user)),
            _ => {
                debug!(user_id = %user_id, "🔒 Rejected token of unknown or inactive user");
                Err(ApiError::Unauthorized)
            }
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
