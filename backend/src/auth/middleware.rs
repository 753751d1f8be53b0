//! Bearer token extraction
//!
//! `AuthUser` rejects the request with 401 before the handler body runs
//! when the `Authorization` header is missing, malformed, or carries
//! anything but a valid access token.

use crate::error::ApiError;
use crate::state::AppState;
use account_api_shared::AuthError;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use uuid::Uuid;

/// Authenticated caller extracted from the access token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = bearer_token(auth_header).ok_or(AuthError::InvalidToken)?;

        let claims = app_state.jwt().validate_access_token(token)?;
        let subject = claims.subject()?;

        Ok(AuthUser {
            user_id: subject.user_id,
        })
    }
}

/// Pull the token out of a `Bearer <token>` header value
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token)
}
