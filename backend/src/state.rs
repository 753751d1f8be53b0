//! Application state management
//!
//! This module provides the shared application state that is passed
//! to all request handlers via Axum's state extraction.
//!
//! The store and the signing keys are injected here and nowhere else, so
//! tests can run against an isolated store with their own keys.

use crate::auth::JwtService;
use crate::config::AppConfig;
use crate::repositories::{MemoryUserStore, UserStore};
use secrecy::ExposeSecret;
use std::sync::Arc;

/// Shared application state
///
/// Every field is an `Arc` or holds `Arc`s, so cloning per request is O(1).
#[derive(Clone)]
pub struct AppState {
    /// User account store
    pub store: Arc<dyn UserStore>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys from the configured secret; call once at startup.
    pub fn new(store: Arc<dyn UserStore>, config: AppConfig) -> Self {
        let jwt = JwtService::new(
            config.jwt.secret.expose_secret(),
            config.jwt.access_token_expiry_secs,
            config.jwt.refresh_token_expiry_secs,
        );

        Self {
            store,
            config: Arc::new(config),
            jwt,
        }
    }

    /// State backed by a fresh in-process store
    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Arc::new(MemoryUserStore::new()), config)
    }

    #[inline]
    pub fn store(&self) -> &dyn UserStore {
        self.store.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }
}
