use crate::store::{PreferenceStore, StoreError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Preference {
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Open (creating if needed) the SQLite database at `database_path` and
    /// create tables.
    pub async fn new(database_path: &str) -> Result<Self> {
        let pool = SqlitePool::connect(&format!("sqlite:{database_path}?mode=rwc"))
            .await
            .context(format!("Failed to open database at {}", database_path))?;

        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    /// A private in-memory database, gone when the last handle is dropped.
    pub async fn in_memory() -> Result<Self> {
        let opts = SqliteConnectOptions::from_str("sqlite::memory:")?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opts)
            .await
            .context("Failed to open in-memory database")?;

        Self::init_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn init_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS preferences (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(pool)
        .await
        .context("Failed to create preferences table")?;

        Ok(())
    }

    /// Read one preference row.
    pub async fn get_preference(&self, key: &str) -> Result<Option<Preference>, sqlx::Error> {
        sqlx::query_as::<_, Preference>(
            "SELECT key, value, updated_at FROM preferences WHERE key = ?",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await
    }

    /// Insert or overwrite a preference, stamping `updated_at`.
    pub async fn set_preference(&self, key: &str, value: &str) -> Result<(), sqlx::Error> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO preferences (key, value, updated_at) VALUES (?, ?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for Database {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_preference(key).await?.map(|pref| pref.value))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Ok(self.set_preference(key, value).await?)
    }
}
