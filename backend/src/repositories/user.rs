//! User store: the `UserStore` seam and its PostgreSQL implementation

use crate::auth::TokenSubject;
use crate::db;
use account_api_shared::UserView;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

/// User record from the store
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserRecord {
    /// Public view, without the password hash
    pub fn view(&self) -> UserView {
        UserView {
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }

    /// Identity to embed in tokens minted for this account
    pub fn token_subject(&self) -> TokenSubject {
        TokenSubject {
            user_id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Input for creating a user. The password must already be hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// Partial update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
}

/// Store failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for user accounts
///
/// Implementations must make `create` the arbiter of email uniqueness:
/// of two concurrent creates with one email, exactly one succeeds and the
/// other returns `StoreError::DuplicateEmail`.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError>;

    /// Apply `changes`; `Ok(None)` when no such user exists
    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<UserRecord>, StoreError>;

    /// Cheap liveness probe for readiness checks
    async fn ping(&self) -> Result<(), StoreError>;
}

/// PostgreSQL-backed user store
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, StoreError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (id, email, password_hash, name)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, name, created_at, updated_at
            "#,
        )
        .bind(new_user.id)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(&new_user.name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => StoreError::DuplicateEmail,
            other => StoreError::Database(other),
        })
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                password_hash = COALESCE($3, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.password_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        db::ping(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: "testuser@email.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
            name: "Testestrone".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_view_omits_password_hash() {
        let view = record().view();
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("argon2"));
        assert!(json.contains("testuser@email.com"));
    }

    #[test]
    fn test_token_subject_matches_record() {
        let record = record();
        let subject = record.token_subject();
        assert_eq!(subject.user_id, record.id);
        assert_eq!(subject.name, record.name);
        assert_eq!(subject.email, record.email);
    }

    // PostgreSQL behaviour is covered by tests/postgres_store_test.rs
}
