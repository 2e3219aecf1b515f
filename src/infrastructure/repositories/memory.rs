use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::RepositoryError;
use crate::domain::repositories::SessionRepository;
use crate::domain::sessions::SessionMapping;

/// Non-durable session store, used where a database file is unwanted.
#[derive(Default)]
pub struct MemorySessionRepository {
    mappings: RwLock<HashMap<String, SessionMapping>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for MemorySessionRepository {
    async fn put(&self, ssid: &str, qv: &str) -> Result<(), RepositoryError> {
        let mut mappings = self
            .mappings
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        mappings
            .entry(ssid.to_string())
            .and_modify(|mapping| mapping.qv = qv.to_string())
            .or_insert_with(|| SessionMapping {
                ssid: ssid.to_string(),
                qv: qv.to_string(),
                created_at: Utc::now(),
            });
        Ok(())
    }

    async fn get_mapping(&self, ssid: &str) -> Result<Option<SessionMapping>, RepositoryError> {
        let mappings = self
            .mappings
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(mappings.get(ssid).cloned())
    }
}
