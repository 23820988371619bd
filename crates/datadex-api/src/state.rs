//! Application state wiring the services together.
//!
//! Adapter instances are constructed here and injected into the service
//! layer; no process-wide singletons. The service generics are pinned to
//! the runtime-selected backend.

use std::sync::Arc;

use dashmap::DashMap;
use datadex_core::session::SessionService;
use datadex_infra::auth::OidcClient;
use datadex_infra::store::SessionBackend;
use datadex_types::config::AppConfig;

/// Concrete session service pinned to the configured backend.
pub type ConcreteSessionService = SessionService<SessionBackend>;

/// A first-party auth record established after a successful OIDC exchange.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub user_id: String,
    pub user_name: String,
}

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<ConcreteSessionService>,
    /// Present only when the auth gateway is configured.
    pub oidc: Option<Arc<OidcClient>>,
    /// First-party auth sessions keyed by the sid cookie value.
    pub auth_sessions: Arc<DashMap<String, AuthSession>>,
}

impl AppState {
    /// Initialize the application state: build the storage backend and
    /// wire the services.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let backend = SessionBackend::from_config(&config).await?;
        let session_service = SessionService::new(backend);

        let oidc = match config.oauth {
            Some(oauth) => Some(Arc::new(OidcClient::new(oauth)?)),
            None => None,
        };

        Ok(Self {
            session_service: Arc::new(session_service),
            oidc,
            auth_sessions: Arc::new(DashMap::new()),
        })
    }
}
