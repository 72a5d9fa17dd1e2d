use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A café that café reviews reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cafe {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}
