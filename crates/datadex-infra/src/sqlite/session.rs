//! SQLite session store implementation.
//!
//! Implements `SessionStore` from `datadex-core` as a partitioned document
//! store: one row per `(session id, user id)` pair with `user_id` as the
//! partition key. Point reads filter on both keys, so a mismatched
//! `user_id` reads as absent; a write under a mismatched `user_id` lands
//! in its own partition and never touches another user's row. Writes are
//! full-document upserts; the transcript lives in a JSON column.

use chrono::Utc;
use datadex_core::session::store::SessionStore;
use datadex_types::error::StorageError;
use datadex_types::session::{LoginType, MessageEntry, SessionDocument};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionStore`.
pub struct SqliteSessionStore {
    pool: DatabasePool,
}

impl SqliteSessionStore {
    /// Create a new store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to domain SessionDocument.
struct SessionRow {
    id: String,
    user_id: String,
    login_type: String,
    user_name: String,
    messages: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            login_type: row.try_get("login_type")?,
            user_name: row.try_get("user_name")?,
            messages: row.try_get("messages")?,
        })
    }

    fn into_document(self) -> Result<SessionDocument, StorageError> {
        let login_type: LoginType = self
            .login_type
            .parse()
            .map_err(StorageError::Serialization)?;
        let messages: Vec<MessageEntry> = serde_json::from_str(&self.messages)
            .map_err(|e| StorageError::Serialization(format!("invalid messages column: {e}")))?;

        Ok(SessionDocument {
            session_id: self.id,
            user_id: self.user_id,
            login_type,
            user_name: self.user_name,
            messages,
        })
    }
}

impl SessionStore for SqliteSessionStore {
    async fn get(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> Result<Option<SessionDocument>, StorageError> {
        let row = sqlx::query(
            "SELECT id, user_id, login_type, user_name, messages
             FROM sessions WHERE id = ? AND user_id = ?",
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        match row {
            Some(row) => {
                let row = SessionRow::from_row(&row)
                    .map_err(|e| StorageError::Backend(e.to_string()))?;
                Ok(Some(row.into_document()?))
            }
            None => Ok(None),
        }
    }

    async fn put(&self, document: &SessionDocument) -> Result<(), StorageError> {
        let messages = serde_json::to_string(&document.messages)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO sessions (id, user_id, login_type, user_name, messages, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(id, user_id) DO UPDATE SET
                 login_type = excluded.login_type,
                 user_name = excluded.user_name,
                 messages = excluded.messages,
                 updated_at = excluded.updated_at",
        )
        .bind(&document.session_id)
        .bind(&document.user_id)
        .bind(document.login_type.to_string())
        .bind(&document.user_name)
        .bind(&messages)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| StorageError::Backend(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use datadex_types::session::MessageEntry;

    async fn store() -> (tempfile::TempDir, SqliteSessionStore) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("test.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        (dir, SqliteSessionStore::new(pool))
    }

    #[tokio::test]
    async fn test_put_then_get_round_trip() {
        let (_dir, store) = store().await;

        let mut doc = SessionDocument::guest("s1", "u1");
        doc.messages.push(MessageEntry::user("hi"));
        doc.messages.push(MessageEntry::bot("hello"));

        store.put(&doc).await.unwrap();
        let fetched = store.get("s1", "u1").await.unwrap().unwrap();
        assert_eq!(fetched, doc);
    }

    #[tokio::test]
    async fn test_get_absent_returns_none() {
        let (_dir, store) = store().await;
        assert!(store.get("missing", "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_partition_mismatch_reads_as_absent() {
        let (_dir, store) = store().await;
        store.put(&SessionDocument::guest("s1", "u1")).await.unwrap();
        assert!(store.get("s1", "other").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mismatched_user_write_lands_in_own_partition() {
        let (_dir, store) = store().await;

        let mut owned = SessionDocument::guest("s1", "u1");
        owned.messages.push(MessageEntry::user("hi"));
        owned.messages.push(MessageEntry::bot("hello"));
        store.put(&owned).await.unwrap();

        // Same session id, different partition key: must not replace u1's row.
        let intruder = SessionDocument::guest("s1", "u2");
        store.put(&intruder).await.unwrap();

        let fetched = store.get("s1", "u1").await.unwrap().unwrap();
        assert_eq!(fetched, owned);
        let fetched = store.get("s1", "u2").await.unwrap().unwrap();
        assert_eq!(fetched, intruder);
    }

    #[tokio::test]
    async fn test_put_replaces_whole_document() {
        let (_dir, store) = store().await;

        let mut doc = SessionDocument::guest("s1", "u1");
        store.put(&doc).await.unwrap();

        doc.messages.push(MessageEntry::user("hi"));
        doc.messages.push(MessageEntry::bot("hello"));
        store.put(&doc).await.unwrap();

        let fetched = store.get("s1", "u1").await.unwrap().unwrap();
        assert_eq!(fetched.messages.len(), 2);

        // Last write wins: an overwrite with fewer messages clobbers.
        doc.messages.clear();
        store.put(&doc).await.unwrap();
        let fetched = store.get("s1", "u1").await.unwrap().unwrap();
        assert!(fetched.messages.is_empty());
    }
}
