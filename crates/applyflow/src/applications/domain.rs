use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::store::StoreError;

/// Identifier wrapper for stored applications. Assigned by the store,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Reference to the job listing an application targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl JobId {
    /// Converts a caller-supplied string into the store's reference type.
    /// Empty or whitespace-only values never name a listing.
    pub fn parse(value: &str) -> Result<Self, StoreError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidId {
                value: value.to_string(),
            });
        }
        Ok(JobId(trimmed.to_string()))
    }
}

/// Workflow status of an application. Any label may move to any other
/// label (itself included); there is deliberately no transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Reviewed,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Reviewed => "reviewed",
            ApplicationStatus::Accepted => "accepted",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "pending" => Some(ApplicationStatus::Pending),
            "reviewed" => Some(ApplicationStatus::Reviewed),
            "accepted" => Some(ApplicationStatus::Accepted),
            "rejected" => Some(ApplicationStatus::Rejected),
            _ => None,
        }
    }
}

/// Stored resume attachment. The binary payload is write-only from the
/// API consumer's perspective: list and detail responses expose only the
/// filename, and the bytes leave the service solely through the dedicated
/// download route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAttachment {
    pub data: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

/// One persisted application, exactly as the store holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeAttachment>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApplicationRecord {
    /// The redacted form every read path returns: the resume collapses to
    /// its filename, the payload and content type stay behind.
    pub fn redacted(&self) -> ApplicationView {
        ApplicationView {
            id: self.id.clone(),
            job_id: self.job_id.clone(),
            applicant_name: self.applicant_name.clone(),
            email: self.email.clone(),
            cover_letter: self.cover_letter.clone(),
            submitted_by: self.submitted_by.clone(),
            resume: self.resume.as_ref().map(|attachment| ResumeRef {
                filename: attachment.filename.clone(),
            }),
            status: self.status,
            applied_at: self.applied_at,
            updated_at: self.updated_at,
        }
    }
}

/// Resume as exposed on the output boundary: exactly one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRef {
    pub filename: String,
}

/// An application as it crosses the core's output boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationView {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_letter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitted_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume: Option<ResumeRef>,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Creation payload as the route layer hands it over. `job_id` arrives as
/// a string, and the resume may come either as a structured attachment or
/// as a base64 string (`resume_base64`), never both persisted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    pub job_id: String,
    pub applicant_name: String,
    pub email: String,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub submitted_by: Option<String>,
    #[serde(default)]
    pub resume: Option<ResumeAttachment>,
    #[serde(default)]
    pub resume_base64: Option<String>,
}

/// Normalized creation payload handed to the store. The store assigns the
/// id, defaults `status` to pending and `applied_at` to now.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub job_id: JobId,
    pub applicant_name: String,
    pub email: String,
    pub cover_letter: Option<String>,
    pub submitted_by: Option<String>,
    pub resume: Option<ResumeAttachment>,
}
