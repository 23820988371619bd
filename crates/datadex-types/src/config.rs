//! Application configuration types.
//!
//! All values are environment-supplied; the loader lives in `datadex-infra`.
//! Secrets are wrapped in [`secrecy::SecretString`] so they never appear in
//! Debug output or logs.

use secrecy::SecretString;

use std::fmt;
use std::str::FromStr;

/// Which storage backend persists session documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackendKind {
    /// Partitioned document store: one row per session, partition key = user id.
    Sqlite,
    /// Remote blob store: one JSON object per session, full-document overwrite.
    Blob,
}

impl fmt::Display for StorageBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackendKind::Sqlite => write!(f, "sqlite"),
            StorageBackendKind::Blob => write!(f, "blob"),
        }
    }
}

impl FromStr for StorageBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackendKind::Sqlite),
            "blob" => Ok(StorageBackendKind::Blob),
            other => Err(format!("invalid storage backend: '{other}'")),
        }
    }
}

impl Default for StorageBackendKind {
    fn default() -> Self {
        StorageBackendKind::Sqlite
    }
}

/// Connection settings for the blob-backed store.
#[derive(Debug, Clone)]
pub struct BlobConfig {
    /// Container endpoint, e.g. `https://account.blob.core.windows.net/sessions`.
    pub endpoint: String,
    /// Shared-access-signature query string granting read/write on the container.
    pub sas_token: SecretString,
}

/// OAuth2/OIDC client settings for the optional auth gateway.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    /// Identity-provider tenant identifier used to derive the endpoints.
    pub tenant: String,
    /// First-party callback URL registered with the provider.
    pub redirect_uri: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub backend: StorageBackendKind,
    /// Data directory for the SQLite backend.
    pub data_dir: std::path::PathBuf,
    /// Present only when the blob backend is selected.
    pub blob: Option<BlobConfig>,
    /// Present only when the auth gateway is enabled.
    pub oauth: Option<OAuthConfig>,
}
