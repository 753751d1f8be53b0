//! Account service: registration, token issuance, refresh, and profile
//!
//! Request payloads arrive here already validated by the route extractor.
//! Argon2 work runs on the blocking pool and the JWT service is borrowed
//! from `AppState`.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{NewUser, UserChanges, UserStore};
use account_api_shared::validation::normalize_email;
use account_api_shared::{
    AccessToken, AuthError, CreateUserRequest, TokenObtainRequest, TokenPair, TokenRefreshRequest,
    UpdateProfileRequest, UserView,
};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Account operations
pub struct AccountService;

impl AccountService {
    /// Create an account and return its public view
    ///
    /// A duplicate email surfaces as a validation error on `email`; the
    /// store decides, so concurrent attempts cannot both succeed.
    pub async fn register(store: &dyn UserStore, req: CreateUserRequest) -> Result<UserView, ApiError> {
        let email = normalize_email(&req.email);

        let password_hash = PasswordService::hash_async(req.password)
            .await
            .map_err(ApiError::Internal)?;

        let user = store
            .create(NewUser {
                id: Uuid::new_v4(),
                email,
                password_hash,
                name: req.name,
            })
            .await?;

        info!(user_id = %user.id, "Account created");
        Ok(user.view())
    }

    /// Check credentials and mint an access/refresh pair
    pub async fn obtain_token_pair(
        store: &dyn UserStore,
        jwt_service: &JwtService,
        req: TokenObtainRequest,
    ) -> Result<TokenPair, ApiError> {
        let email = normalize_email(&req.email);

        let Some(user) = store.find_by_email(&email).await? else {
            // Spend the same argon2 time an existing account costs so the
            // response time does not reveal which accounts exist.
            let _ = PasswordService::hash_async(req.password).await;
            warn!("Token request for unknown account");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone())
            .await
            .map_err(ApiError::Internal)?;

        if !valid {
            warn!(user_id = %user.id, "Token request with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let pair = jwt_service
            .issue_pair(&user.token_subject())
            .map_err(ApiError::Internal)?;

        info!(user_id = %user.id, "Token pair issued");
        Ok(pair)
    }

    /// Mint a new access token from a refresh token
    ///
    /// Trust rests on the refresh token's signature and expiry alone; the
    /// store is not consulted.
    pub fn refresh_access(jwt_service: &JwtService, req: TokenRefreshRequest) -> Result<AccessToken, ApiError> {
        let claims = jwt_service.validate_refresh_token(&req.refresh)?;
        let subject = claims.subject()?;

        let access = jwt_service
            .generate_access_token(&subject)
            .map_err(ApiError::Internal)?;

        debug!(user_id = %subject.user_id, "Access token refreshed");
        Ok(AccessToken { access })
    }

    /// Public view of the caller's own account
    pub async fn profile(store: &dyn UserStore, user_id: Uuid) -> Result<UserView, ApiError> {
        let user = store
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        Ok(user.view())
    }

    /// Apply a partial update to the caller's own account
    pub async fn update_profile(
        store: &dyn UserStore,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Result<UserView, ApiError> {
        if req.is_empty() {
            return Self::profile(store, user_id).await;
        }

        let password_hash = match req.password {
            Some(password) => Some(
                PasswordService::hash_async(password)
                    .await
                    .map_err(ApiError::Internal)?,
            ),
            None => None,
        };
        let password_changed = password_hash.is_some();

        let user = store
            .update(
                user_id,
                UserChanges {
                    name: req.name,
                    password_hash,
                },
            )
            .await?
            .ok_or(AuthError::UnknownUser)?;

        info!(user_id = %user.id, password_changed, "Profile updated");
        Ok(user.view())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::MemoryUserStore;

    fn jwt() -> JwtService {
        JwtService::new("service-test-secret", 300, 86400)
    }

    fn create_request(email: &str, password: &str, name: &str) -> CreateUserRequest {
        CreateUserRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        }
    }

    fn credentials(email: &str, password: &str) -> TokenObtainRequest {
        TokenObtainRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let store = MemoryUserStore::new();
        let view = AccountService::register(
            &store,
            create_request("testuser@email.com", "Testpassword123", "Testestrone"),
        )
        .await
        .unwrap();

        assert_eq!(view.email, "testuser@email.com");
        assert_eq!(view.name, "Testestrone");

        let stored = store.find_by_email("testuser@email.com").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "Testpassword123");
        assert!(PasswordService::verify("Testpassword123", &stored.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_register_normalizes_email_domain() {
        let store = MemoryUserStore::new();
        let view = AccountService::register(&store, create_request("Someone@EXAMPLE.com", "Testpass123", ""))
            .await
            .unwrap();

        assert_eq!(view.email, "Someone@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_leaves_original() {
        let store = MemoryUserStore::new();
        AccountService::register(&store, create_request("testuser@email.com", "Testpass123", "First"))
            .await
            .unwrap();

        let result =
            AccountService::register(&store, create_request("testuser@email.com", "Otherpass123", "Second")).await;
        assert!(matches!(result, Err(ApiError::Validation { .. })));

        let stored = store.find_by_email("testuser@email.com").await.unwrap().unwrap();
        assert_eq!(stored.name, "First");
        assert!(PasswordService::verify("Testpass123", &stored.password_hash).unwrap());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_token_pair_for_valid_credentials() {
        let store = MemoryUserStore::new();
        let jwt = jwt();
        AccountService::register(&store, create_request("testuser@email.com", "testpass123", "Testosterone"))
            .await
            .unwrap();

        let pair = AccountService::obtain_token_pair(&store, &jwt, credentials("testuser@email.com", "testpass123"))
            .await
            .unwrap();

        let claims = jwt.validate_access_token(&pair.access).unwrap();
        assert_eq!(claims.name, "Testosterone");
        assert_eq!(claims.email, "testuser@email.com");
        assert!(jwt.validate_refresh_token(&pair.refresh).is_ok());
    }

    #[tokio::test]
    async fn test_token_pair_email_lookup_is_normalized() {
        let store = MemoryUserStore::new();
        let jwt = jwt();
        AccountService::register(&store, create_request("user@example.com", "testpass123", ""))
            .await
            .unwrap();

        let result =
            AccountService::obtain_token_pair(&store, &jwt, credentials("user@Example.COM", "testpass123")).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_the_same() {
        let store = MemoryUserStore::new();
        let jwt = jwt();
        AccountService::register(&store, create_request("testuser@email.com", "secretpassword", ""))
            .await
            .unwrap();

        let wrong_password =
            AccountService::obtain_token_pair(&store, &jwt, credentials("testuser@email.com", "wrongpass"))
                .await
                .unwrap_err();
        let unknown_user =
            AccountService::obtain_token_pair(&store, &jwt, credentials("nobody@email.com", "testpass"))
                .await
                .unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_refresh_mints_access_with_profile_claims() {
        let store = MemoryUserStore::new();
        let jwt = jwt();
        AccountService::register(&store, create_request("testuser@email.com", "testpass123", "Refreshed"))
            .await
            .unwrap();
        let pair = AccountService::obtain_token_pair(&store, &jwt, credentials("testuser@email.com", "testpass123"))
            .await
            .unwrap();

        let token = AccountService::refresh_access(&jwt, TokenRefreshRequest { refresh: pair.refresh }).unwrap();

        let claims = jwt.validate_access_token(&token.access).unwrap();
        assert_eq!(claims.name, "Refreshed");
        assert_eq!(claims.email, "testuser@email.com");
    }

    #[test]
    fn test_refresh_rejects_access_token() {
        let jwt = jwt();
        let subject = crate::auth::TokenSubject {
            user_id: Uuid::new_v4(),
            name: String::new(),
            email: "a@example.com".to_string(),
        };
        let access = jwt.generate_access_token(&subject).unwrap();

        let result = AccountService::refresh_access(&jwt, TokenRefreshRequest { refresh: access });
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_update_profile_changes_name_and_password() {
        let store = MemoryUserStore::new();
        let jwt = jwt();
        AccountService::register(&store, create_request("testuser@email.com", "Testpassword123", "Old Name"))
            .await
            .unwrap();
        let user_id = store.find_by_email("testuser@email.com").await.unwrap().unwrap().id;

        let view = AccountService::update_profile(
            &store,
            user_id,
            UpdateProfileRequest {
                name: Some("New Name".to_string()),
                password: Some("Newpassword123".to_string()),
            },
        )
        .await
        .unwrap();
        assert_eq!(view.name, "New Name");

        let old = AccountService::obtain_token_pair(&store, &jwt, credentials("testuser@email.com", "Testpassword123")).await;
        let new = AccountService::obtain_token_pair(&store, &jwt, credentials("testuser@email.com", "Newpassword123")).await;
        assert!(old.is_err());
        assert!(new.is_ok());
    }

    #[tokio::test]
    async fn test_empty_update_returns_current_profile() {
        let store = MemoryUserStore::new();
        AccountService::register(&store, create_request("testuser@email.com", "Testpassword123", "Same"))
            .await
            .unwrap();
        let user_id = store.find_by_email("testuser@email.com").await.unwrap().unwrap().id;

        let view = AccountService::update_profile(&store, user_id, UpdateProfileRequest::default())
            .await
            .unwrap();
        assert_eq!(view.name, "Same");
    }

    #[tokio::test]
    async fn test_profile_for_vanished_user_is_unauthorized() {
        let store = MemoryUserStore::new();
        let result = AccountService::profile(&store, Uuid::new_v4()).await;
        assert!(matches!(result, Err(ApiError::Unauthorized(_))));
    }
}
