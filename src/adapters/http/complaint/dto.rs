//! Request and response bodies for the complaint endpoints.
//!
//! Enumerated fields arrive as strings and are parsed in the handlers so a
//! bad value is a `VALIDATION_FAILED` response naming the field.

use serde::{Deserialize, Serialize};

use crate::domain::complaint::ComplaintStatus;
use crate::domain::foundation::ValidationError;
use crate::domain::user::UserProfile;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct CreateComplaintRequest {
    /// `common_area` or `personal_room`.
    #[serde(alias = "type")]
    pub complaint_type: String,
    pub floor: String,
    #[serde(default)]
    pub room: Option<String>,
    pub category: String,
    pub subcategory: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "media")]
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApproveComplaintRequest {
    pub worker_id: String,
    #[serde(default)]
    pub expected_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RejectComplaintRequest {
    #[serde(alias = "rejection_reason")]
    pub reason: String,
    #[serde(default)]
    pub expected_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewComplaintRequest {
    /// `Completed` or `RequestedChanges`.
    pub action: String,
    #[serde(default)]
    pub expected_status: Option<String>,
}

/// Worker status update: `In Progress` starts work, `Resolved` or
/// `Cannot be Resolved` submits it.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskStatusRequest {
    pub status: String,
    #[serde(default)]
    pub resolution: Option<String>,
    #[serde(default, alias = "proof_image")]
    pub proof_media: Option<String>,
    #[serde(default)]
    pub expected_status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminComplaintsQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkerTasksQuery {
    #[serde(default)]
    pub bucket: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkersQuery {
    #[serde(default)]
    pub category: Option<String>,
}

/// Parses an optional expected source status.
pub fn expected_status(raw: Option<&str>) -> Result<Option<ComplaintStatus>, ValidationError> {
    raw.map(str::parse::<ComplaintStatus>).transpose()
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Roster entry offered when assigning a complaint.
#[derive(Debug, Clone, Serialize)]
pub struct WorkerResponse {
    pub id: String,
    pub full_name: String,
    pub specialization: Option<String>,
}

impl From<UserProfile> for WorkerResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            full_name: profile.full_name,
            specialization: profile.specialization.map(|s| s.as_str().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::user::Specialization;

    #[test]
    fn create_request_accepts_original_field_names() {
        let req: CreateComplaintRequest = serde_json::from_value(serde_json::json!({
            "type": "common_area",
            "floor": "2",
            "category": "Electrical",
            "subcategory": "Light not working",
            "media": "https://cdn.example/leak.jpg"
        }))
        .unwrap();

        assert_eq!(req.complaint_type, "common_area");
        assert_eq!(req.room, None);
        assert_eq!(req.media_url.as_deref(), Some("https://cdn.example/leak.jpg"));
    }

    #[test]
    fn expected_status_is_optional_but_checked() {
        assert_eq!(expected_status(None).unwrap(), None);
        assert_eq!(
            expected_status(Some("Pending")).unwrap(),
            Some(ComplaintStatus::Pending)
        );
        assert!(expected_status(Some("Done-ish")).is_err());
    }

    #[test]
    fn worker_response_flattens_specialization() {
        let profile = UserProfile::worker(
            UserId::new("worker-1").unwrap(),
            "Asha Rao",
            Specialization::Plumber,
        );
        let response = WorkerResponse::from(profile);
        assert_eq!(response.id, "worker-1");
        assert_eq!(
            response.specialization.as_deref(),
            Some(Specialization::Plumber.as_str())
        );
    }
}
