//! MySQL implementation of the SessionStore trait.
//!
//! Backing table:
//!
//! ```sql
//! CREATE TABLE auth_sessions (
//!     id                  VARCHAR(64)   NOT NULL PRIMARY KEY,
//!     refresh_secret_hash CHAR(64)      NOT NULL,
//!     refresh_expires_at  TIMESTAMP(6)  NOT NULL,
//!     token_version       BIGINT        NOT NULL,
//!     created_at          TIMESTAMP(6)  NOT NULL,
//!     UNIQUE KEY uq_auth_sessions_secret (refresh_secret_hash)
//! );
//! ```
//!
//! The rotation update is conditional on the stored secret hash, so of two
//! concurrent rotations presenting the same secret exactly one row update
//! reports an affected row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use sg_core::domain::entities::session::SessionRecord;
use sg_core::errors::{DomainError, SessionError};
use sg_core::repositories::SessionStore;

/// MySQL implementation of SessionStore
pub struct MySqlSessionStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionStore {
    /// Create a new MySQL session store
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to SessionRecord entity
    fn row_to_record(row: &sqlx::mysql::MySqlRow) -> Result<SessionRecord, DomainError> {
        Ok(SessionRecord {
            id: row.try_get("id").map_err(|e| DomainError::Internal {
                message: format!("Failed to get id: {}", e),
            })?,
            refresh_secret_hash: row.try_get("refresh_secret_hash").map_err(|e| {
                DomainError::Internal {
                    message: format!("Failed to get refresh_secret_hash: {}", e),
                }
            })?,
            refresh_expires_at: row
                .try_get::<DateTime<Utc>, _>("refresh_expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get refresh_expires_at: {}", e),
                })?,
            token_version: row
                .try_get("token_version")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get token_version: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
        })
    }

    fn store_error(err: sqlx::Error) -> DomainError {
        SessionError::StoreUnavailable {
            message: err.to_string(),
        }
        .into()
    }
}

#[async_trait]
impl SessionStore for MySqlSessionStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<SessionRecord>, DomainError> {
        let query = r#"
            SELECT id, refresh_secret_hash, refresh_expires_at, token_version, created_at
            FROM auth_sessions
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::store_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn find_by_secret_hash(
        &self,
        secret_hash: &str,
    ) -> Result<Option<SessionRecord>, DomainError> {
        let query = r#"
            SELECT id, refresh_secret_hash, refresh_expires_at, token_version, created_at
            FROM auth_sessions
            WHERE refresh_secret_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(secret_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::store_error)?;

        match result {
            Some(row) => Ok(Some(Self::row_to_record(&row)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, record: SessionRecord) -> Result<SessionRecord, DomainError> {
        let query = r#"
            INSERT INTO auth_sessions (
                id, refresh_secret_hash, refresh_expires_at, token_version, created_at
            ) VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(&record.id)
            .bind(&record.refresh_secret_hash)
            .bind(record.refresh_expires_at)
            .bind(record.token_version)
            .bind(record.created_at)
            .execute(&self.pool)
            .await
            .map_err(Self::store_error)?;

        Ok(record)
    }

    async fn update_if_secret_matches(
        &self,
        expected_secret_hash: &str,
        record: &SessionRecord,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE auth_sessions
            SET refresh_secret_hash = ?,
                refresh_expires_at = ?,
                token_version = ?
            WHERE id = ? AND refresh_secret_hash = ?
        "#;

        let result = sqlx::query(query)
            .bind(&record.refresh_secret_hash)
            .bind(record.refresh_expires_at)
            .bind(record.token_version)
            .bind(&record.id)
            .bind(expected_secret_hash)
            .execute(&self.pool)
            .await
            .map_err(Self::store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
