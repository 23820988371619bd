//! Runtime-selected storage backend.
//!
//! The two `SessionStore` implementations are interchangeable deployment
//! variants; this enum pins whichever one configuration selected so the
//! service layer stays generic over a single concrete type.

use datadex_core::session::store::SessionStore;
use datadex_types::config::{AppConfig, StorageBackendKind};
use datadex_types::error::StorageError;
use datadex_types::session::SessionDocument;
use tracing::info;

use crate::blob::BlobSessionStore;
use crate::sqlite::{DatabasePool, SqliteSessionStore};

/// The storage backend selected at startup.
pub enum SessionBackend {
    Sqlite(SqliteSessionStore),
    Blob(BlobSessionStore),
}

impl SessionBackend {
    /// Construct the backend named by the configuration.
    ///
    /// The SQLite variant creates the data directory and runs migrations;
    /// the blob variant only builds the HTTP client (the container is
    /// provisioned out of band).
    pub async fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        match config.backend {
            StorageBackendKind::Sqlite => {
                tokio::fs::create_dir_all(&config.data_dir).await?;
                let db_url = format!(
                    "sqlite://{}?mode=rwc",
                    config.data_dir.join("datadex.db").display()
                );
                let pool = DatabasePool::new(&db_url).await?;
                info!(path = %config.data_dir.display(), "Using SQLite session store");
                Ok(SessionBackend::Sqlite(SqliteSessionStore::new(pool)))
            }
            StorageBackendKind::Blob => {
                let blob = config
                    .blob
                    .clone()
                    .ok_or_else(|| anyhow::anyhow!("blob backend selected but not configured"))?;
                info!(endpoint = %blob.endpoint, "Using blob session store");
                Ok(SessionBackend::Blob(BlobSessionStore::new(blob)?))
            }
        }
    }
}

impl SessionStore for SessionBackend {
    async fn get(
        &self,
        session_id: &str,
        user_id: &str,
    ) -> Result<Option<SessionDocument>, StorageError> {
        match self {
            SessionBackend::Sqlite(store) => store.get(session_id, user_id).await,
            SessionBackend::Blob(store) => store.get(session_id, user_id).await,
        }
    }

    async fn put(&self, document: &SessionDocument) -> Result<(), StorageError> {
        match self {
            SessionBackend::Sqlite(store) => store.put(document).await,
            SessionBackend::Blob(store) => store.put(document).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_backend_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            backend: StorageBackendKind::Sqlite,
            data_dir: dir.path().to_path_buf(),
            blob: None,
            oauth: None,
        };

        let backend = SessionBackend::from_config(&config).await.unwrap();
        let doc = SessionDocument::guest("s1", "u1");
        backend.put(&doc).await.unwrap();
        assert_eq!(backend.get("s1", "u1").await.unwrap(), Some(doc));
    }

    #[tokio::test]
    async fn test_blob_backend_requires_blob_config() {
        let config = AppConfig {
            backend: StorageBackendKind::Blob,
            data_dir: std::path::PathBuf::from("/tmp"),
            blob: None,
            oauth: None,
        };
        assert!(SessionBackend::from_config(&config).await.is_err());
    }
}
