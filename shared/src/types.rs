//! API request and response types

use serde::{Deserialize, Serialize};
use validator::Validate;

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

// ============================================================================
// Account Types
// ============================================================================

/// Registration request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(
        min = 8,
        max = 1024,
        message = "Ensure this field has between 8 and 1024 characters."
    ))]
    pub password: String,
    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: String,
}

/// Partial profile update; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    #[validate(length(max = 255, message = "Ensure this field has no more than 255 characters."))]
    pub name: Option<String>,
    #[serde(default)]
    #[validate(length(
        min = 8,
        max = 1024,
        message = "Ensure this field has between 8 and 1024 characters."
    ))]
    pub password: Option<String>,
}

impl UpdateProfileRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.password.is_none()
    }
}

/// Public view of an account. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub email: String,
    pub name: String,
}

// ============================================================================
// Token Types
// ============================================================================

/// Credentials submitted to obtain a token pair
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenObtainRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub email: String,
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub password: String,
}

/// Access and refresh tokens issued on login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub refresh: String,
    pub access: String,
}

/// Refresh token submitted to mint a new access token
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TokenRefreshRequest {
    #[validate(length(min = 1, message = "This field may not be blank."))]
    pub refresh: String,
}

/// Freshly minted access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access: String,
}
