use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use super::{DEFAULT_TABLE, KvStore, StoreError, validate_table_name};
use crate::config::Config;
use crate::error::StartupError;

/// SQL text for one table, rendered once at construction
#[derive(Debug, Clone)]
struct Statements {
    create: String,
    upsert: String,
    select: String,
    drop: String,
}

impl Statements {
    fn for_table(table: &str) -> Self {
        Self {
            create: format!("CREATE TABLE IF NOT EXISTS {table} (key TEXT PRIMARY KEY, val TEXT)"),
            upsert: format!(
                "INSERT INTO {table} (key, val) VALUES ($1, $2) \
                 ON CONFLICT (key) DO UPDATE SET val = EXCLUDED.val"
            ),
            select: format!("SELECT val FROM {table} WHERE key = $1"),
            drop: format!("DROP TABLE {table}"),
        }
    }
}

/// PostgreSQL-backed store, shareable across handlers
///
/// Cloning is cheap: the pool is reference counted internally.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    table: String,
    sql: Statements,
}

impl PgStore {
    /// Open the connection pool described by `config` and verify the
    /// database answers.
    ///
    /// Schema setup is left to the caller via [`KvStore::ensure_schema`].
    pub async fn from_config(config: &Config) -> Result<Self, StartupError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(|err| StartupError::Connectivity(err.into()))?;

        let store = Self::new(pool);
        store.ping().await.map_err(StartupError::Connectivity)?;

        tracing::info!("Successfully connected to database");
        Ok(store)
    }

    /// Wrap an existing pool using the default table.
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            table: DEFAULT_TABLE.to_string(),
            sql: Statements::for_table(DEFAULT_TABLE),
        }
    }

    /// Wrap an existing pool using `table` instead of the default.
    pub fn with_table(pool: PgPool, table: &str) -> Result<Self, StoreError> {
        validate_table_name(table)?;
        Ok(Self {
            pool,
            table: table.to_string(),
            sql: Statements::for_table(table),
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

#[async_trait]
impl KvStore for PgStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(&self.sql.create).execute(&self.pool).await?;
        tracing::info!("Table ready: {}", self.table);
        Ok(())
    }

    async fn set(&self, key: &str, val: &str) -> Result<(), StoreError> {
        sqlx::query(&self.sql.upsert)
            .bind(key)
            .bind(val)
            .execute(&self.pool)
            .await?;

        tracing::debug!("Upserted key: {}", key);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, StoreError> {
        let row: Option<Option<String>> = sqlx::query_scalar(&self.sql.select)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            // NULL is never written by `set`; read it back as empty
            Some(val) => Ok(val.unwrap_or_default()),
            None => {
                tracing::debug!("Key not found: {}", key);
                Err(StoreError::NotFound(key.to_string()))
            }
        }
    }

    async fn reset_all(&self) -> Result<(), StoreError> {
        sqlx::query(&self.sql.drop).execute(&self.pool).await?;
        tracing::warn!("Dropped table: {}", self.table);
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
