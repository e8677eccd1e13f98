// libs/video-api-cell/src/models/project.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::composition::from_epoch_millis;
use crate::models::enums::{lenient, ProjectEnvironment, ProjectStatus};

/// Account-level details of the project an application belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub id: String,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub status: Option<ProjectStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::deserialize"
    )]
    pub environment: Option<ProjectEnvironment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl ProjectDetails {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at.and_then(from_epoch_millis)
    }

    pub fn is_active(&self) -> bool {
        self.status == Some(ProjectStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_project_decoding() {
        let project: ProjectDetails = serde_json::from_value(json!({
            "id": "123456",
            "status": "ACTIVE",
            "name": "Project X",
            "environment": "enterprise",
            "createdAt": 1414642898000i64
        }))
        .unwrap();

        assert!(project.is_active());
        assert_eq!(project.environment, Some(ProjectEnvironment::Enterprise));
        assert_eq!(project.created_at().unwrap().timestamp(), 1414642898);
    }

    #[test]
    fn test_unknown_values_are_lenient() {
        let project: ProjectDetails =
            serde_json::from_value(json!({"id": "1", "status": "ARCHIVED", "environment": "lab"}))
                .unwrap();
        assert_eq!(project.status, None);
        assert_eq!(project.environment, None);
        assert!(!project.is_active());
    }
}
