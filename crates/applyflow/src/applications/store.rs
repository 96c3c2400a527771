use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationStatus, JobId, NewApplication};

/// Narrows a `find` to one job listing and/or one submitter. An empty
/// filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationFilter {
    pub job_id: Option<JobId>,
    pub submitted_by: Option<String>,
}

impl ApplicationFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_job(job_id: JobId) -> Self {
        ApplicationFilter {
            job_id: Some(job_id),
            submitted_by: None,
        }
    }

    pub fn by_submitter(submitter: impl Into<String>) -> Self {
        ApplicationFilter {
            job_id: None,
            submitted_by: Some(submitter.into()),
        }
    }

    pub fn matches(&self, record: &ApplicationRecord) -> bool {
        if let Some(job_id) = &self.job_id {
            if &record.job_id != job_id {
                return false;
            }
        }
        if let Some(submitter) = &self.submitted_by {
            if record.submitted_by.as_deref() != Some(submitter.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Atomic patch applied by `find_by_id_and_update`: the status and the
/// accompanying `updated_at` touch land in one store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPatch {
    pub status: ApplicationStatus,
    pub updated_at: DateTime<Utc>,
}

/// Opaque persistence contract. Any document store can sit behind this;
/// the service only ever sees these four operations. Implementations own
/// id assignment and the pending/applied_at defaults on `save`, and report
/// schema violations as `StoreError::Validation`.
pub trait ApplicationStore: Send + Sync {
    fn find(&self, filter: &ApplicationFilter) -> Result<Vec<ApplicationRecord>, StoreError>;

    fn find_by_id(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError>;

    /// Applies the patch and returns the post-update record, or `None`
    /// when no record matched. Last writer wins on concurrent patches.
    fn find_by_id_and_update(
        &self,
        id: &ApplicationId,
        patch: StatusPatch,
    ) -> Result<Option<ApplicationRecord>, StoreError>;

    fn save(&self, application: NewApplication) -> Result<ApplicationRecord, StoreError>;
}

/// Failures surfaced by a store implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Schema violation recognized by the store, with per-field details.
    #[error("validation failed")]
    Validation { errors: BTreeMap<String, String> },
    /// A supplied identifier could not be cast to the store's reference type.
    #[error("invalid identifier: {value}")]
    InvalidId { value: String },
    /// Anything else the backend reports: connectivity, serialization,
    /// internal constraints. The message travels verbatim, and the backend
    /// may already have classified the failure with a status code.
    #[error("{message}")]
    Backend {
        message: String,
        status: Option<u16>,
    },
}

impl StoreError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = BTreeMap::new();
        errors.insert(field.into(), message.into());
        StoreError::Validation { errors }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend {
            message: message.into(),
            status: None,
        }
    }

    pub fn backend_with_status(message: impl Into<String>, status: u16) -> Self {
        StoreError::Backend {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Status code carried by the failure itself, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            StoreError::Backend { status, .. } => *status,
            _ => None,
        }
    }
}
