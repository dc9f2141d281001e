//! Durable key/value storage.
//!
//! [`KvStore`] is the seam between the HTTP layer and the backing database.
//! Production code uses [`PgStore`]; tests swap in the in-process
//! `MemoryStore`, which follows the same contract.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

pub use postgres::PgStore;

/// Table used when no other name is configured.
pub const DEFAULT_TABLE: &str = "data";

/// Coarse classification of a failure, stable enough for tests to match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    NotFound,
    Storage,
}

/// Errors returned by [`KvStore`] operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the key
    #[error("key not found: {0}")]
    NotFound(String),
    /// The database rejected the statement or could not be reached
    #[error("storage error: {0}")]
    Backend(#[from] sqlx::Error),
    /// The table was never created, or has been dropped by `reset_all`
    #[error("storage error: table \"{0}\" does not exist")]
    MissingTable(String),
    #[error("invalid table name: {0:?}")]
    InvalidTableName(String),
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::NotFound(_) => StoreErrorKind::NotFound,
            _ => StoreErrorKind::Storage,
        }
    }
}

/// Durable mapping from string keys to string values.
///
/// Every call is a round trip to the backing store; nothing is cached in
/// process, so read-after-write consistency is whatever the backend gives a
/// single session.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Create the table if it does not exist yet. Safe to call repeatedly.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// Insert `key` or atomically replace its value.
    async fn set(&self, key: &str, val: &str) -> Result<(), StoreError>;

    /// Current value of `key`, or [`StoreError::NotFound`].
    async fn get(&self, key: &str) -> Result<String, StoreError>;

    /// Drop the whole table. Maintenance only; not reachable over HTTP.
    async fn reset_all(&self) -> Result<(), StoreError>;

    /// Cheap round trip used to verify connectivity.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Accept only plain SQL identifiers so the name can be interpolated into DDL.
pub(crate) fn validate_table_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid_start = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    // Postgres truncates identifiers beyond 63 bytes
    if valid_start && valid_rest && name.len() <= 63 {
        Ok(())
    } else {
        Err(StoreError::InvalidTableName(name.to_string()))
    }
}
