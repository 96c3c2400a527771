use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use applyflow::applications::{
    ApplicationFilter, ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationStore,
    NewApplication, StatusPatch, StoreError,
};
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Document store for the standalone deployment: records live in process
/// memory, ids come from a process-local sequence, and the schema checks
/// a real backend would enforce are applied on `save`.
#[derive(Default)]
pub(crate) struct InMemoryApplicationStore {
    records: Mutex<Vec<ApplicationRecord>>,
    sequence: AtomicU64,
}

impl InMemoryApplicationStore {
    fn schema_errors(application: &NewApplication) -> BTreeMap<String, String> {
        let mut errors = BTreeMap::new();
        if application.job_id.0.trim().is_empty() {
            errors.insert("jobId".to_string(), "required".to_string());
        }
        if application.applicant_name.trim().is_empty() {
            errors.insert("applicantName".to_string(), "required".to_string());
        }
        let email = application.email.trim();
        if email.is_empty() {
            errors.insert("email".to_string(), "required".to_string());
        } else if !email.contains('@') {
            errors.insert("email".to_string(), "must be an email address".to_string());
        }
        errors
    }
}

impl ApplicationStore for InMemoryApplicationStore {
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
        let errors = Self::schema_errors(&application);
        if !errors.is_empty() {
            return Err(StoreError::Validation { errors });
        }

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
