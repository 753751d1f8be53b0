//! Profile routes for the authenticated caller

use super::extract::ValidatedJson;
use super::method_not_allowed;
use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::AccountService;
use crate::state::AppState;
use account_api_shared::{UpdateProfileRequest, UserView};
use axum::{extract::State, routing::get, Json, Router};

/// Create profile routes
///
/// Only GET and PATCH exist; any other method gets 405 before the token is
/// looked at.
pub fn profile_routes() -> Router<AppState> {
    Router::new().route(
        "/me/",
        get(get_profile)
            .patch(update_profile)
            .fallback(method_not_allowed),
    )
}

/// GET /api/user/me/ - the caller's name and email
async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserView>> {
    let profile = AccountService::profile(state.store(), auth.user_id).await?;
    Ok(Json(profile))
}

/// PATCH /api/user/me/ - update name and/or password
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<UserView>> {
    let profile = AccountService::update_profile(state.store(), auth.user_id, req).await?;
    Ok(Json(profile))
}
