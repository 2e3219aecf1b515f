use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{query, query_as};

use crate::domain::RepositoryError;
use crate::domain::repositories::SessionRepository;
use crate::domain::sessions::SessionMapping;
use crate::infrastructure::database::DatabasePool;

#[derive(Clone)]
pub struct SqlSessionRepository {
    pool: DatabasePool,
}

impl SqlSessionRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    fn into_domain(record: SessionMappingRecord) -> SessionMapping {
        SessionMapping {
            ssid: record.ssid,
            qv: record.qv,
            created_at: record.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SessionMappingRecord {
    ssid: String,
    qv: String,
    created_at: DateTime<Utc>,
}

#[async_trait]
impl SessionRepository for SqlSessionRepository {
    async fn put(&self, ssid: &str, qv: &str) -> Result<(), RepositoryError> {
        query(
            r"INSERT INTO session_mappings (ssid, qv, created_at)
               VALUES (?, ?, ?)
               ON CONFLICT (ssid)
               DO UPDATE SET qv = excluded.qv",
        )
        .bind(ssid)
        .bind(qv)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(())
    }

    async fn get_mapping(&self, ssid: &str) -> Result<Option<SessionMapping>, RepositoryError> {
        let record = query_as::<_, SessionMappingRecord>(
            r"SELECT ssid, qv, created_at
               FROM session_mappings
               WHERE ssid = ?",
        )
        .bind(ssid)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::unexpected(e.to_string()))?;

        Ok(record.map(Self::into_domain))
    }
}
