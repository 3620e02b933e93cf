//! Rotation configuration file model.

use crate::models::credential::CredentialMeta;
use crate::models::schedule_settings::ScheduleSection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RotationFile {
    #[serde(default)]
    pub schedule: ScheduleSection,
    #[serde(default)]
    pub credentials: Vec<CredentialMeta>,
}
