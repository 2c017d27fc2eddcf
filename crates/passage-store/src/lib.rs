//! # passage-store
//!
//! Storage layer for the Passage admin service: one [`Store`] implementation
//! per backing database. The connection URL picks the backend; each
//! implementation owns its native SQL dialect, so no placeholder rewriting
//! happens at runtime.

pub mod admin;
mod error;
mod postgres;
mod sqlite;

pub use error::StoreError;
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;

use passage_core::{ClientField, ClientRecord, PipelineStats};

/// The single administrator row.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AdminAccount {
    pub id: i64,
    pub username: String,
    /// SHA-256 hex digest, or plaintext on rows that predate hashing.
    pub password: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Persistence operations shared by every backend.
#[async_trait]
pub trait Store: Send + Sync {
    /// Create the `admin_users` and `clients` tables when absent.
    async fn init_schema(&self) -> Result<(), StoreError>;

    /// Fetch the administrator row, if one exists.
    async fn find_admin(&self) -> Result<Option<AdminAccount>, StoreError>;

    /// Fetch the administrator row by exact username.
    async fn find_admin_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminAccount>, StoreError>;

    /// Insert the administrator row.
    async fn insert_admin(&self, username: &str, password_digest: &str) -> Result<(), StoreError>;

    /// Overwrite only the stored password digest.
    async fn reset_admin_password(
        &self,
        id: i64,
        password_digest: &str,
    ) -> Result<(), StoreError>;

    /// Overwrite username and password digest, refreshing `updated_at`.
    async fn update_admin_credentials(
        &self,
        id: i64,
        username: &str,
        password_digest: &str,
    ) -> Result<(), StoreError>;

    /// All client rows, newest first.
    async fn list_clients(&self) -> Result<Vec<ClientRecord>, StoreError>;

    /// One client row by id.
    async fn get_client(&self, id: i64) -> Result<Option<ClientRecord>, StoreError>;

    /// Insert a row from whitelisted fields, returning the new id.
    /// Callers must supply at least one field.
    async fn insert_client(&self, fields: &[ClientField]) -> Result<i64, StoreError>;

    /// Update the given fields on one row, always refreshing `updated_at`.
    /// A missing id affects zero rows and is not an error.
    async fn update_client(&self, id: i64, fields: &[ClientField]) -> Result<(), StoreError>;

    /// Delete one row; absence is not an error.
    async fn delete_client(&self, id: i64) -> Result<(), StoreError>;

    /// Delete every client row.
    async fn clear_clients(&self) -> Result<(), StoreError>;

    /// Dashboard aggregates, each from an independent query.
    async fn stats(&self) -> Result<PipelineStats, StoreError>;

    /// Short backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}

/// Open the store selected by the connection URL.
pub async fn connect(database_url: &str) -> Result<Arc<dyn Store>, StoreError> {
    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        Ok(Arc::new(PostgresStore::connect(database_url).await?))
    } else {
        Ok(Arc::new(SqliteStore::connect(database_url).await?))
    }
}
