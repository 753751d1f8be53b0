//! Error types for the account API

use thiserror::Error;

/// Authentication error types
///
/// Display strings are safe to hand to callers: they never say which of
/// email or password was wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("No active account found with the given credentials")]
    InvalidCredentials,

    #[error("Token is invalid or expired")]
    TokenExpired,

    #[error("Token is invalid or expired")]
    InvalidToken,

    #[error("Token has wrong type")]
    WrongTokenType,

    #[error("Authentication credentials were not provided")]
    MissingToken,

    #[error("User not found")]
    UnknownUser,
}
