//! sqlx `Any`-driver implementation of [`PromptStore`].
//!
//! One store speaks both Postgres (production) and SQLite (tests, local
//! hacking); the driver is picked from the URL scheme at runtime.  Schema
//! setup happens in [`AnyStore::ensure_schema`] with per-dialect DDL, since
//! the two engines disagree on auto-increment syntax.
//!
//! # Queries
//!
//! The `sqlx::query` (runtime-verified) form is used deliberately so that no
//! `DATABASE_URL` environment variable is needed at compile time.  `$n`
//! placeholders bind on both engines.  `created_at` is stored as RFC 3339
//! text because the `Any` driver cannot decode engine-native timestamps;
//! the fixed `+00:00` offset keeps lexicographic and chronological order
//! identical.

use std::str::FromStr;
use std::sync::Once;
use std::time::Duration;

use chrono::Utc;
use sqlx::any::{AnyConnectOptions, AnyPoolOptions};
use sqlx::AnyPool;

use super::{PromptRecord, PromptStore};

static INSTALL_DRIVERS: Once = Once::new();

/// Postgres/SQLite-backed prompt store.
#[derive(Clone, Debug)]
pub struct AnyStore {
    pool: AnyPool,
    /// `true` when the URL scheme selected SQLite; switches the DDL dialect.
    sqlite: bool,
}

impl AnyStore {
    /// Build a lazy pool for the database at `url`.
    ///
    /// `url` should be a sqlx-compatible connection string, e.g.
    /// `"postgres://user:pw@localhost:5432/promptstash"` or
    /// `"sqlite::memory:"` for tests.  No connection is attempted here;
    /// the first query opens one, so a down database does not prevent the
    /// server from starting.
    pub fn connect_lazy(url: &str, pool_size: u32) -> Result<Self, sqlx::Error> {
        // install_default_drivers may only run once per process.
        INSTALL_DRIVERS.call_once(sqlx::any::install_default_drivers);
        let options = AnyConnectOptions::from_str(url)?;
        // A short acquire timeout keeps `/api/status` honest: an unreachable
        // database turns into an error within seconds, not the pool default
        // of thirty.
        let pool = AnyPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy_with(options);
        Ok(Self {
            pool,
            sqlite: url.starts_with("sqlite"),
        })
    }

    /// Create the `prompts` table when missing.
    pub async fn ensure_schema(&self) -> Result<(), sqlx::Error> {
        let ddl = if self.sqlite {
            "CREATE TABLE IF NOT EXISTS prompts ( \
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             content TEXT NOT NULL, \
             created_at TEXT NOT NULL)"
        } else {
            "CREATE TABLE IF NOT EXISTS prompts ( \
             id BIGSERIAL PRIMARY KEY, \
             content TEXT NOT NULL, \
             created_at TEXT NOT NULL)"
        };
        sqlx::query(ddl).execute(&self.pool).await?;
        Ok(())
    }
}

impl PromptStore for AnyStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_prompt(&self, content: &str) -> Result<PromptRecord, sqlx::Error> {
        let created_at = Utc::now();
        let stamp = created_at.to_rfc3339();
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO prompts (content, created_at) VALUES ($1, $2) RETURNING id",
        )
        .bind(content)
        .bind(&stamp)
        .fetch_one(&self.pool)
        .await?;
        Ok(PromptRecord {
            id,
            content: content.to_owned(),
            created_at,
        })
    }

    async fn list_prompts(&self) -> Result<Vec<PromptRecord>, sqlx::Error> {
        let rows: Vec<(i64, String, String)> = sqlx::query_as(
            "SELECT id, content, created_at FROM prompts \
             ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|(id, content, created_at)| PromptRecord {
                id,
                content,
                created_at: created_at.parse().unwrap_or_else(|e: chrono::ParseError| {
                    tracing::warn!(raw = %created_at, error = %e, "failed to parse prompt created_at; using now");
                    Utc::now()
                }),
            })
            .collect())
    }

    async fn delete_prompt(&self, id: i64) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM prompts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::db::PromptStore;

    /// A single-connection pool keeps one in-memory database alive for the
    /// whole test.
    async fn memory_store() -> AnyStore {
        let store = AnyStore::connect_lazy("sqlite::memory:", 1).expect("open in-memory store");
        store.ensure_schema().await.expect("create schema");
        store
    }

    #[tokio::test]
    async fn ensure_schema_is_idempotent() {
        let store = memory_store().await;
        store.ensure_schema().await.expect("second run");
        store.ping().await.expect("ping");
    }

    #[tokio::test]
    async fn insert_then_list_returns_newest_first() {
        let store = memory_store().await;
        for content in ["first", "second", "third"] {
            store.insert_prompt(content).await.expect("insert");
        }

        let listed = store.list_prompts().await.expect("list");
        let contents: Vec<&str> = listed.iter().map(|p| p.content.as_str()).collect();
        assert_eq!(contents, ["third", "second", "first"]);
        // Ids ascend with insertion order even when timestamps collide.
        assert!(listed[0].id > listed[2].id);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_matched() {
        let store = memory_store().await;
        let saved = store.insert_prompt("disposable").await.expect("insert");

        assert!(store.delete_prompt(saved.id).await.expect("delete"));
        assert!(!store.delete_prompt(saved.id).await.expect("second delete"));
        assert!(store.list_prompts().await.expect("list").is_empty());
    }
}
