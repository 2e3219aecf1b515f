use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored association between a short session identifier and the full value
/// it stands in for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMapping {
    pub ssid: String,
    pub qv: String,
    /// Set on first write; overwrites keep the original timestamp.
    pub created_at: DateTime<Utc>,
}
