use std::sync::Arc;

use crate::application::services::{ReconciliationService, SessionBackend};
use crate::domain::repositories::SessionRepository;
use crate::domain::routing::MetadataPolicy;
use crate::infrastructure::database::Database;
use crate::infrastructure::repositories::sessions::SqlSessionRepository;

/// Settings that vary between deployments and tests.
#[derive(Debug, Clone, Default)]
pub struct AppStateConfig {
    /// Origin used to build advertised URLs. Derived from request headers
    /// when unset.
    pub public_url: Option<String>,
    pub metadata_policy: MetadataPolicy,
}

#[derive(Clone)]
pub struct AppState {
    pub reconciler: ReconciliationService,
    pub public_url: Option<String>,
    /// Fallback `Host` when a request carries none.
    pub default_host: String,
}

impl AppState {
    /// Build state backed by the SQLite session store.
    pub fn from_database(database: &Database, config: AppStateConfig) -> Self {
        let session_repo: Arc<dyn SessionRepository> =
            Arc::new(SqlSessionRepository::new(database.clone_pool()));
        Self::with_session_repo(Some(session_repo), config)
    }

    /// Build state around an arbitrary store; `None` disables session
    /// resolution entirely.
    pub fn with_session_repo(
        session_repo: Option<Arc<dyn SessionRepository>>,
        config: AppStateConfig,
    ) -> Self {
        let backend = match session_repo {
            Some(repo) => SessionBackend::Store(repo),
            None => SessionBackend::Disabled,
        };

        Self {
            reconciler: ReconciliationService::new(backend, config.metadata_policy),
            public_url: config
                .public_url
                .map(|url| url.trim_end_matches('/').to_string()),
            default_host: "localhost".to_string(),
        }
    }
}
