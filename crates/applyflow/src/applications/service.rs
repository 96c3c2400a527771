use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::domain::{
    ApplicationId, ApplicationStatus, CreateApplicationRequest, JobId, NewApplication,
    ResumeAttachment,
};
use super::outcome::Outcome;
use super::store::{ApplicationFilter, ApplicationStore, StatusPatch, StoreError};

const NOT_FOUND_MESSAGE: &str = "Job application not found";

/// Content type assumed for resumes that arrive base64-encoded without
/// their own metadata.
const BASE64_RESUME_CONTENT_TYPE: &str = "application/pdf";

/// Lifecycle operations over an explicitly injected store. Every
/// operation terminates in an [`Outcome`]; store failures are folded in
/// at the operation boundary and never escape.
pub struct ApplicationService<S> {
    store: Arc<S>,
}

impl<S> ApplicationService<S>
where
    S: ApplicationStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every stored application, resume redacted to its filename.
    pub fn list_all(&self) -> Outcome {
        self.list(&ApplicationFilter::all(), "list_all")
    }

    pub fn list_by_job(&self, job_id: &JobId) -> Outcome {
        self.list(&ApplicationFilter::by_job(job_id.clone()), "list_by_job")
    }

    pub fn list_by_submitter(&self, submitter: &str) -> Outcome {
        self.list(
            &ApplicationFilter::by_submitter(submitter),
            "list_by_submitter",
        )
    }

    pub fn get_by_id(&self, id: &ApplicationId) -> Outcome {
        match self.store.find_by_id(id) {
            Ok(Some(record)) => Outcome::success(payload(&record.redacted())),
            Ok(None) => Outcome::not_found_with_message(NOT_FOUND_MESSAGE),
            Err(err) => fail("get_by_id", &err),
        }
    }

    /// Patches `status` and `updated_at` in one store operation. The
    /// status arrives already typed: label validation happens at the route
    /// layer, and any of the four labels may follow any other.
    pub fn update_status(&self, id: &ApplicationId, status: ApplicationStatus) -> Outcome {
        let patch = StatusPatch {
            status,
            updated_at: Utc::now(),
        };
        match self.store.find_by_id_and_update(id, patch) {
            Ok(Some(record)) => Outcome::success(payload(&record.redacted())),
            Ok(None) => Outcome::not_found_with_message(NOT_FOUND_MESSAGE),
            Err(err) => fail("update_status", &err),
        }
    }

    /// Normalizes and persists a new application, answering 201 with the
    /// redacted saved record.
    pub fn create(&self, request: CreateApplicationRequest) -> Outcome {
        let application = match normalize(request) {
            Ok(application) => application,
            Err(err) => return fail("create", &err),
        };
        match self.store.save(application) {
            Ok(record) => Outcome::success_with_status(payload(&record.redacted()), 201),
            Err(err) => fail("create", &err),
        }
    }

    /// The one unredacted read: full attachment bytes for the dedicated
    /// download route. Absent records, absent attachments, and empty
    /// payloads all read as `None`.
    pub fn resume(&self, id: &ApplicationId) -> Result<Option<ResumeAttachment>, StoreError> {
        let record = self.store.find_by_id(id)?;
        Ok(record
            .and_then(|record| record.resume)
            .filter(|attachment| !attachment.data.is_empty()))
    }

    fn list(&self, filter: &ApplicationFilter, operation: &'static str) -> Outcome {
        match self.store.find(filter) {
            Ok(records) => {
                let views: Vec<_> = records.iter().map(|record| record.redacted()).collect();
                Outcome::success(payload(&views))
            }
            Err(err) => fail(operation, &err),
        }
    }
}

/// Applies the creation normalization steps in order: cast the job
/// reference, then materialize a base64 resume (which replaces any
/// directly supplied attachment and is itself never persisted).
fn normalize(request: CreateApplicationRequest) -> Result<NewApplication, StoreError> {
    let job_id = JobId::parse(&request.job_id)?;

    let resume = match request.resume_base64 {
        Some(encoded) => {
            let data = STANDARD.decode(encoded.as_bytes()).map_err(|err| {
                StoreError::validation("resumeBase64", format!("invalid base64 payload: {err}"))
            })?;
            Some(ResumeAttachment {
                data,
                content_type: BASE64_RESUME_CONTENT_TYPE.to_string(),
                filename: String::new(),
            })
        }
        None => request.resume,
    };

    Ok(NewApplication {
        job_id,
        applicant_name: request.applicant_name,
        email: request.email,
        cover_letter: request.cover_letter,
        submitted_by: request.submitted_by,
        resume,
    })
}

fn fail(operation: &'static str, err: &StoreError) -> Outcome {
    warn!(%operation, error = %err, "job application operation failed");
    Outcome::from_error(err)
}

fn payload<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
