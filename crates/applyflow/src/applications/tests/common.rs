use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use crate::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, CreateApplicationRequest, JobId,
    NewApplication, ResumeAttachment,
};
use crate::applications::service::ApplicationService;
use crate::applications::store::{
    ApplicationFilter, ApplicationStore, StatusPatch, StoreError,
};

pub(super) fn attachment(filename: &str) -> ResumeAttachment {
    ResumeAttachment {
        data: b"%PDF-1.7 sample resume".to_vec(),
        content_type: "application/pdf".to_string(),
        filename: filename.to_string(),
    }
}

pub(super) fn create_request() -> CreateApplicationRequest {
    CreateApplicationRequest {
        job_id: "job-42".to_string(),
        applicant_name: "Dana Smith".to_string(),
        email: "dana@example.com".to_string(),
        cover_letter: Some("I build reliable services.".to_string()),
        submitted_by: Some("dana".to_string()),
        resume: None,
        resume_base64: None,
    }
}

pub(super) fn build_service() -> (ApplicationService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    (ApplicationService::new(store.clone()), store)
}

/// In-memory store double with insertion-consistent listing order, the
/// shape any document store behind the trait is assumed to provide.
#[derive(Default)]
pub(super) struct MemoryStore {
    records: Mutex<Vec<ApplicationRecord>>,
    sequence: AtomicU64,
}

impl MemoryStore {
    pub(super) fn seeded(&self, applications: Vec<NewApplication>) -> Vec<ApplicationRecord> {
        applications
            .into_iter()
            .map(|application| self.save(application).expect("seed saves"))
            .collect()
    }

    pub(super) fn stored(&self, id: &ApplicationId) -> Option<ApplicationRecord> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .iter()
            .find(|record| &record.id == id)
            .cloned()
    }
}

impl ApplicationStore for MemoryStore {
    fn find(&self, filter: &ApplicationFilter) -> Result<Vec<ApplicationRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect())
    }

    fn find_by_id(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.iter().find(|record| &record.id == id).cloned())
    }

    fn find_by_id_and_update(
        &self,
        id: &ApplicationId,
        patch: StatusPatch,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        let Some(record) = guard.iter_mut().find(|record| &record.id == id) else {
            return Ok(None);
        };
        record.status = patch.status;
        record.updated_at = Some(patch.updated_at);
        Ok(Some(record.clone()))
    }

    fn save(&self, application: NewApplication) -> Result<ApplicationRecord, StoreError> {
        let sequence = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let record = ApplicationRecord {
            id: ApplicationId(format!("app-{sequence:06}")),
            job_id: application.job_id,
            applicant_name: application.applicant_name,
            email: application.email,
            cover_letter: application.cover_letter,
            submitted_by: application.submitted_by,
            resume: application.resume,
            status: ApplicationStatus::Pending,
            applied_at: Utc::now(),
            updated_at: None,
        };
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.push(record.clone());
        Ok(record)
    }
}

/// Store double that fails every operation with a fixed error.
pub(super) struct FailingStore {
    pub(super) error: StoreError,
}

impl FailingStore {
    pub(super) fn new(error: StoreError) -> Self {
        Self { error }
    }
}

impl ApplicationStore for FailingStore {
    fn find(&self, _filter: &ApplicationFilter) -> Result<Vec<ApplicationRecord>, StoreError> {
        Err(self.error.clone())
    }

    fn find_by_id(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, StoreError> {
        Err(self.error.clone())
    }

    fn find_by_id_and_update(
        &self,
        _id: &ApplicationId,
        _patch: StatusPatch,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        Err(self.error.clone())
    }

    fn save(&self, _application: NewApplication) -> Result<ApplicationRecord, StoreError> {
        Err(self.error.clone())
    }
}

pub(super) fn new_application(job: &str, name: &str, submitter: Option<&str>) -> NewApplication {
    NewApplication {
        job_id: JobId(job.to_string()),
        applicant_name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase().replace(' ', ".")),
        cover_letter: None,
        submitted_by: submitter.map(str::to_string),
        resume: None,
    }
}

pub(super) fn new_application_with_resume(
    job: &str,
    name: &str,
    filename: &str,
) -> NewApplication {
    NewApplication {
        resume: Some(attachment(filename)),
        ..new_application(job, name, None)
    }
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
