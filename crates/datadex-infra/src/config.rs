//! Environment configuration loader.
//!
//! Every setting is environment-supplied; the only default beyond the
//! storage backend and data directory is the localhost redirect URI. The
//! blob backend and the auth gateway are enabled by the presence of their
//! respective variables.

use std::path::PathBuf;

use datadex_types::config::{AppConfig, BlobConfig, OAuthConfig, StorageBackendKind};
use datadex_types::error::ConfigError;
use secrecy::SecretString;

const STORAGE_BACKEND: &str = "DATADEX_STORAGE_BACKEND";
const DATA_DIR: &str = "DATADEX_DATA_DIR";
const BLOB_ENDPOINT: &str = "DATADEX_BLOB_ENDPOINT";
const BLOB_SAS_TOKEN: &str = "DATADEX_BLOB_SAS_TOKEN";
const OAUTH_CLIENT_ID: &str = "DATADEX_OAUTH_CLIENT_ID";
const OAUTH_CLIENT_SECRET: &str = "DATADEX_OAUTH_CLIENT_SECRET";
const OAUTH_TENANT: &str = "DATADEX_OAUTH_TENANT";
const OAUTH_REDIRECT_URI: &str = "DATADEX_OAUTH_REDIRECT_URI";

const DEFAULT_REDIRECT_URI: &str = "http://localhost:8080/auth/callback";

fn env_var(name: &'static str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    env_var(name).ok_or(ConfigError::MissingVar(name))
}

/// Resolve the data directory: `DATADEX_DATA_DIR`, else `~/.datadex`.
pub fn resolve_data_dir() -> PathBuf {
    env_var(DATA_DIR).map(PathBuf::from).unwrap_or_else(|| {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".datadex")
    })
}

/// Load the full application configuration from the environment.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let backend = match env_var(STORAGE_BACKEND) {
        Some(value) => value
            .parse::<StorageBackendKind>()
            .map_err(|reason| ConfigError::InvalidVar {
                var: STORAGE_BACKEND,
                reason,
            })?,
        None => StorageBackendKind::default(),
    };

    let blob = if backend == StorageBackendKind::Blob {
        Some(BlobConfig {
            endpoint: required_var(BLOB_ENDPOINT)?,
            sas_token: SecretString::from(required_var(BLOB_SAS_TOKEN)?),
        })
    } else {
        None
    };

    // Auth gateway is optional: enabled by the presence of a client id.
    let oauth = match env_var(OAUTH_CLIENT_ID) {
        Some(client_id) => Some(OAuthConfig {
            client_id,
            client_secret: SecretString::from(required_var(OAUTH_CLIENT_SECRET)?),
            tenant: required_var(OAUTH_TENANT)?,
            redirect_uri: env_var(OAUTH_REDIRECT_URI)
                .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string()),
        }),
        None => None,
    };

    Ok(AppConfig {
        backend,
        data_dir: resolve_data_dir(),
        blob,
        oauth,
    })
}
