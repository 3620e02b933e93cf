use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory entry for a credential tracked in rotation.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CredentialMeta {
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub rotated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl CredentialMeta {
    /// Timestamp of the last password change, falling back to creation.
    pub fn last_changed(&self) -> Option<DateTime<Utc>> {
        self.rotated_at.or(self.created_at)
    }
}

/// A credential identifier paired with the days since its last change.
///
/// This is the only input the scheduler needs. The age is signed so that a
/// last-change date in the future surfaces as a validation error instead of
/// wrapping around.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialAge {
    pub id: String,
    pub age_days: i64,
}

impl CredentialAge {
    pub fn new(id: impl Into<String>, age_days: i64) -> Self {
        Self {
            id: id.into(),
            age_days,
        }
    }
}
