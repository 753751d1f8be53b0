//! Registration and token routes
//!
//! All three are open to unauthenticated callers.

use super::extract::ValidatedJson;
use super::method_not_allowed;
use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use account_api_shared::{
    AccessToken, CreateUserRequest, TokenObtainRequest, TokenPair, TokenRefreshRequest, UserView,
};
use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/create/", post(create_user).fallback(method_not_allowed))
        .route("/token/", post(obtain_token_pair).fallback(method_not_allowed))
        .route("/token/refresh/", post(refresh_token).fallback(method_not_allowed))
}

/// Register a new account
///
/// POST /api/user/create/
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<UserView>)> {
    let user = AccountService::register(state.store(), req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Exchange email and password for an access/refresh pair
///
/// POST /api/user/token/
async fn obtain_token_pair(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TokenObtainRequest>,
) -> ApiResult<Json<TokenPair>> {
    let tokens = AccountService::obtain_token_pair(state.store(), state.jwt(), req).await?;
    Ok(Json(tokens))
}

/// Mint a new access token from a refresh token
///
/// POST /api/user/token/refresh/
async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<TokenRefreshRequest>,
) -> ApiResult<Json<AccessToken>> {
    let token = AccountService::refresh_access(state.jwt(), req)?;
    Ok(Json(token))
}
