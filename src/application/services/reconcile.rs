use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::RepositoryError;
use crate::domain::repositories::SessionRepository;
use crate::domain::routing::{
    MetadataPolicy, RequestTarget, RoutingDecision, ShareParams, decide_share, path_based,
    session_redirect,
};

/// Where `ssid -> qv` mappings live, if anywhere.
#[derive(Clone)]
pub enum SessionBackend {
    /// No mappings are written or read.
    Disabled,
    Store(Arc<dyn SessionRepository>),
}

/// Outcome of the session-resolution route. It always redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRedirect {
    pub target: String,
    /// `qv` was missing from the request and came from the store.
    pub resolved_from_store: bool,
}

/// Turns raw request queries into routing decisions, reading and writing the
/// session store along the way.
#[derive(Clone)]
pub struct ReconciliationService {
    backend: SessionBackend,
    policy: MetadataPolicy,
}

impl ReconciliationService {
    pub fn new(backend: SessionBackend, policy: MetadataPolicy) -> Self {
        Self { backend, policy }
    }

    pub fn home(&self, target: &RequestTarget<'_>) -> RoutingDecision {
        path_based(target)
    }

    /// Decide how to answer a share request. A request carrying both `qv` and
    /// `ssid` always writes the mapping, even when it is unchanged.
    pub async fn share(
        &self,
        target: &RequestTarget<'_>,
    ) -> Result<RoutingDecision, RepositoryError> {
        let params = ShareParams::from_raw_query(target.raw_query());
        let decision = decide_share(target, &params, self.policy);

        if let (Some(qv), Some(ssid), SessionBackend::Store(repo)) =
            (params.qv.as_deref(), params.ssid.as_deref(), &self.backend)
        {
            repo.put(ssid, qv).await?;
            info!(ssid, qv, "stored session mapping");
        }

        debug!(
            page_url = %decision.page_url,
            metadata_url = %decision.metadata_url,
            redirect = ?decision.redirect_target,
            "share decision"
        );
        Ok(decision)
    }

    /// Resolve a session-resolution request into its redirect. A missing
    /// mapping is not an error; the redirect then carries only `ssid`.
    pub async fn resolve_session(
        &self,
        target: &RequestTarget<'_>,
    ) -> Result<SessionRedirect, RepositoryError> {
        let params = ShareParams::from_raw_query(target.raw_query());
        let mut qv = params.qv;
        let mut resolved_from_store = false;

        if qv.is_none()
            && let Some(ssid) = params.ssid.as_deref()
            && let SessionBackend::Store(repo) = &self.backend
        {
            qv = repo.get(ssid).await?;
            resolved_from_store = qv.is_some();
            if !resolved_from_store {
                debug!(ssid, "no session mapping found");
            }
        }

        let target = session_redirect(
            target.origin,
            target.raw_query(),
            qv.as_deref(),
            params.ssid.as_deref(),
        );
        debug!(%target, resolved_from_store, "session redirect");

        Ok(SessionRedirect {
            target,
            resolved_from_store,
        })
    }
}
