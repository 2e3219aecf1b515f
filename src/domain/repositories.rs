use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::sessions::SessionMapping;

/// Durable `ssid -> qv` store. Each call is atomic on its own; nothing spans
/// more than one call.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert or overwrite the mapping for `ssid` (last write wins).
    async fn put(&self, ssid: &str, qv: &str) -> Result<(), RepositoryError>;

    async fn get_mapping(&self, ssid: &str) -> Result<Option<SessionMapping>, RepositoryError>;

    /// Look up the value for `ssid`. A missing mapping is `Ok(None)`.
    async fn get(&self, ssid: &str) -> Result<Option<String>, RepositoryError> {
        Ok(self.get_mapping(ssid).await?.map(|mapping| mapping.qv))
    }
}
