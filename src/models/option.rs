//! Site option storage
//!
//! Options are string-keyed JSON values. Absence of a key is never an error;
//! callers supply their own defaults.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use sqlx::PgPool;

use crate::AppResult;

/// Persistent key-value settings store
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read an option, `None` when it was never written
    async fn get_option(&self, name: &str) -> AppResult<Option<Value>>;

    /// Create or overwrite an option (last write wins)
    async fn update_option(&self, name: &str, value: Value) -> AppResult<()>;
}

/// PostgreSQL-backed store using the `options` table
pub struct PgSettingsStore {
    pool: PgPool,
}

impl PgSettingsStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn get_option(&self, name: &str) -> AppResult<Option<Value>> {
        let row: Option<(Value,)> = sqlx::query_as(
            "SELECT option_value FROM options WHERE option_name = $1"
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(value,)| value))
    }

    async fn update_option(&self, name: &str, value: Value) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO options (option_name, option_value)
            VALUES ($1, $2)
            ON CONFLICT (option_name)
            DO UPDATE SET option_value = EXCLUDED.option_value, updated_at = NOW()
            "#
        )
        .bind(name)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Process-local store, used when no database is configured
#[derive(Default)]
pub struct MemorySettingsStore {
    values: RwLock<HashMap<String, Value>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_option(&self, name: &str) -> AppResult<Option<Value>> {
        Ok(self.values.read().get(name).cloned())
    }

    async fn update_option(&self, name: &str, value: Value) -> AppResult<()> {
        self.values.write().insert(name.to_string(), value);
        Ok(())
    }
}
