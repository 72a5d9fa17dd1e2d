use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A home-brewed coffee (bag) that reviews can reference. Created once via
/// the new-coffee form and never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coffee {
    pub id: String,
    pub name: String,
    pub roast: String,
    pub created_at: DateTime<Utc>,
}
