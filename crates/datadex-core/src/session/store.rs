//! SessionStore trait definition.
//!
//! The session-persistence contract: a key-value document keyed by session
//! id, partitioned by user id, with full-document overwrite semantics.
//! Implementations live in datadex-infra (`SqliteSessionStore`,
//! `BlobSessionStore`). Uses native async fn in traits (RPITIT, Rust 2024
//! edition).

use datadex_types::error::StorageError;
use datadex_types::session::SessionDocument;

/// Storage adapter for session documents.
///
/// `put` is a full-document replacement: no partial update and no
/// optimistic-concurrency token, so concurrent writers to the same session
/// last-write-win.
pub trait SessionStore: Send + Sync {
    /// Load a document by session id.
    ///
    /// The partitioned backend requires `user_id` as the partition key,
    /// reads a mismatched id as absent, and keeps each partition's writes
    /// isolated; the blob backend ignores `user_id` entirely.
    fn get(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<SessionDocument>, StorageError>> + Send;

    /// Persist a document, overwriting any existing one with the same keys.
    fn put(
        &self,
        document: &SessionDocument,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
