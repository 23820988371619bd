//! Remote blob store implementation of `SessionStore`.
//!
//! One JSON object per session at `sessions/{session_id}.json` inside a
//! blob container. Reads are keyed by session id alone (the partition key
//! is ignored) and writes overwrite the whole object. Requests are
//! authorized by a shared-access-signature query token.
//!
//! The SAS token is wrapped in [`secrecy::SecretString`] and never appears
//! in Debug output or tracing logs.

use std::time::Duration;

use datadex_core::session::store::SessionStore;
use datadex_types::config::BlobConfig;
use datadex_types::error::StorageError;
use datadex_types::session::SessionDocument;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Blob-container-backed implementation of `SessionStore`.
pub struct BlobSessionStore {
    client: reqwest::Client,
    /// Container endpoint, no trailing slash.
    endpoint: String,
    sas_token: SecretString,
}

impl BlobSessionStore {
    /// Create a new store against the configured container.
    pub fn new(config: BlobConfig) -> Result<Self, StorageError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| StorageError::Backend(format!("HTTP client error: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            sas_token: config.sas_token,
        })
    }

    /// Object name for a session, matching the layout of existing data.
    fn blob_name(session_id: &str) -> String {
        format!("sessions/{session_id}.json")
    }

    /// Full signed URL for a session object. Contains the SAS token, so it
    /// must never be logged.
    fn blob_url(&self, session_id: &str) -> String {
        format!(
            "{}/{}?{}",
            self.endpoint,
            Self::blob_name(session_id),
            self.sas_token.expose_secret()
        )
    }
}

impl SessionStore for BlobSessionStore {
    async fn get(
        &self,
        session_id: &str,
        _user_id: &str,
    ) -> Result<Option<SessionDocument>, StorageError> {
        let response = self
            .client
            .get(self.blob_url(session_id))
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(session_id, "Blob absent");
                Ok(None)
            }
            status if status.is_success() => {
                let document = response
                    .json::<SessionDocument>()
                    .await
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(document))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(StorageError::BadStatus {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }

    async fn put(&self, document: &SessionDocument) -> Result<(), StorageError> {
        let body = serde_json::to_vec(document)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        let response = self
            .client
            .put(self.blob_url(&document.session_id))
            .header("x-ms-blob-type", "BlockBlob")
            .header("content-type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Backend(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::BadStatus {
                status: status.as_u16(),
                body,
            });
        }

        debug!(session_id = %document.session_id, "Blob overwritten");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> BlobSessionStore {
        BlobSessionStore::new(BlobConfig {
            endpoint: "https://account.blob.example.net/chat-sessions/".to_string(),
            sas_token: SecretString::from("sv=2024&sig=secret"),
        })
        .unwrap()
    }

    #[test]
    fn test_blob_name_layout() {
        assert_eq!(BlobSessionStore::blob_name("abc"), "sessions/abc.json");
    }

    #[test]
    fn test_blob_url_strips_trailing_slash_and_signs() {
        let url = store().blob_url("abc");
        assert_eq!(
            url,
            "https://account.blob.example.net/chat-sessions/sessions/abc.json?sv=2024&sig=secret"
        );
    }
}
