//! JWT token generation and validation
//!
//! Every token minted here carries the account's `name` and `email` next to
//! the standard claims. Refresh tokens carry them too, so a new access token
//! can be minted from a refresh token alone.

use account_api_shared::{AuthError, TokenPair};
use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Token type marker embedded as `token_type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    fn as_str(self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Display name of the account at mint time
    pub name: String,
    /// Email of the account at mint time
    pub email: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Unique token id
    pub jti: String,
    pub token_type: TokenType,
}

impl Claims {
    /// Recover the identity the token was minted for
    pub fn subject(&self) -> Result<TokenSubject, AuthError> {
        let user_id = Uuid::parse_str(&self.sub).map_err(|_| AuthError::InvalidToken)?;
        Ok(TokenSubject {
            user_id,
            name: self.name.clone(),
            email: self.email.clone(),
        })
    }
}

/// Identity a token is minted for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
}

/// Pre-computed JWT keys, shared behind `Arc`s
#[derive(Clone)]
struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }
}

/// JWT service for token operations
///
/// Build once at startup and keep it in `AppState`; cloning is cheap.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    validation: Arc<Validation>,
    access_token_expiry_secs: i64,
    refresh_token_expiry_secs: i64,
}

impl JwtService {
    pub fn new(secret: &str, access_token_expiry_secs: i64, refresh_token_expiry_secs: i64) -> Self {
        let mut validation = Validation::default();
        validation.set_required_spec_claims(&["exp", "sub"]);
        // A token is dead the second `exp` passes
        validation.leeway = 0;

        Self {
            keys: JwtKeys::new(secret),
            validation: Arc::new(validation),
            access_token_expiry_secs,
            refresh_token_expiry_secs,
        }
    }

    /// Mint an access/refresh pair for a freshly authenticated account
    pub fn issue_pair(&self, subject: &TokenSubject) -> Result<TokenPair> {
        Ok(TokenPair {
            refresh: self.generate_refresh_token(subject)?,
            access: self.generate_access_token(subject)?,
        })
    }

    #[inline]
    pub fn generate_access_token(&self, subject: &TokenSubject) -> Result<String> {
        self.generate_token(subject, TokenType::Access, self.access_token_expiry_secs)
    }

    #[inline]
    pub fn generate_refresh_token(&self, subject: &TokenSubject) -> Result<String> {
        self.generate_token(subject, TokenType::Refresh, self.refresh_token_expiry_secs)
    }

    fn generate_token(&self, subject: &TokenSubject, token_type: TokenType, expiry_secs: i64) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(expiry_secs);

        let claims = Claims {
            sub: subject.user_id.to_string(),
            name: subject.name.clone(),
            email: subject.email.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().simple().to_string(),
            token_type,
        };

        encode(&Header::default(), &claims, &self.keys.encoding)
            .map_err(|e| anyhow::anyhow!("Failed to generate {} token: {}", token_type.as_str(), e))
    }

    /// Check signature and expiry and return the claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.keys.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Token rejected");
                match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })
    }

    #[inline]
    pub fn validate_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_typed(token, TokenType::Access)
    }

    #[inline]
    pub fn validate_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.validate_typed(token, TokenType::Refresh)
    }

    fn validate_typed(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let claims = self.validate_token(token)?;
        if claims.token_type != expected {
            debug!(expected = expected.as_str(), "Token has wrong type");
            return Err(AuthError::WrongTokenType);
        }
        Ok(claims)
    }

    #[inline]
    pub fn access_token_expiry_secs(&self) -> i64 {
        self.access_token_expiry_secs
    }
}
