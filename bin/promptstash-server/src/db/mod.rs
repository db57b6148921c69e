//! Database abstraction layer.
//!
//! [`PromptStore`] defines the interface for persisting prompts.  The default
//! implementation is [`any::AnyStore`], which speaks Postgres and SQLite
//! through sqlx's `Any` driver.  To swap to another database, implement
//! [`PromptStore`] for your new type and change the concrete type in
//! [`crate::state::AppState`].
//!
//! All trait methods use `impl Future` in their signatures (stable since Rust
//! 1.75) so no extra `async-trait` crate is required.

pub mod any;

use chrono::{DateTime, Utc};

/// A single row in the `prompts` table.
#[derive(Debug, Clone)]
pub struct PromptRecord {
    /// Database-assigned identifier, strictly increasing per insert.
    pub id: i64,
    /// The prompt text, stored exactly as submitted.
    pub content: String,
    /// Timestamp when the prompt was saved.
    pub created_at: DateTime<Utc>,
}

/// Trait for persisting prompts.
///
/// Implement this trait to swap the backing database without touching any
/// handler code.
pub trait PromptStore: Send + Sync + 'static {
    /// Cheap connectivity probe (`SELECT 1`), used by `/api/status`.
    fn ping(&self) -> impl std::future::Future<Output = Result<(), sqlx::Error>> + Send;

    /// Persist a new prompt and return the stored row.
    fn insert_prompt(
        &self,
        content: &str,
    ) -> impl std::future::Future<Output = Result<PromptRecord, sqlx::Error>> + Send;

    /// All prompts, newest first.
    fn list_prompts(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<PromptRecord>, sqlx::Error>> + Send;

    /// Delete a prompt by id.  Returns `false` if no row matched.
    fn delete_prompt(
        &self,
        id: i64,
    ) -> impl std::future::Future<Output = Result<bool, sqlx::Error>> + Send;
}
