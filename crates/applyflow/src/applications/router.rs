use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::{ApplicationId, ApplicationStatus, CreateApplicationRequest, JobId};
use super::outcome::Outcome;
use super::service::ApplicationService;
use super::store::ApplicationStore;

/// Router builder exposing the application lifecycle over HTTP. The
/// handlers only translate: outcomes decide their own status codes, the
/// route layer serializes `data` on success and `error` on failure.
pub fn application_router<S>(service: Arc<ApplicationService<S>>) -> Router
where
    S: ApplicationStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/applications",
            get(list_all_handler::<S>).post(create_handler::<S>),
        )
        .route("/api/v1/applications/:id", get(get_by_id_handler::<S>))
        .route(
            "/api/v1/applications/:id/status",
            patch(update_status_handler::<S>),
        )
        .route(
            "/api/v1/applications/:id/resume",
            get(download_resume_handler::<S>),
        )
        .route(
            "/api/v1/jobs/:job_id/applications",
            get(list_by_job_handler::<S>),
        )
        .route(
            "/api/v1/applicants/:submitter/applications",
            get(list_by_submitter_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateStatusRequest {
    pub(crate) status: String,
}

pub(crate) async fn list_all_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    outcome_response(service.list_all())
}

pub(crate) async fn get_by_id_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    outcome_response(service.get_by_id(&ApplicationId(id)))
}

pub(crate) async fn list_by_job_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(job_id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    outcome_response(service.list_by_job(&JobId(job_id)))
}

pub(crate) async fn list_by_submitter_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(submitter): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    outcome_response(service.list_by_submitter(&submitter))
}

/// Label validation lives here: the service takes the typed status and
/// trusts it, so unknown labels never reach it.
pub(crate) async fn update_status_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(id): Path<String>,
    Json(request): Json<UpdateStatusRequest>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    let Some(status) = ApplicationStatus::from_label(&request.status) else {
        let payload = json!({
            "error": format!(
                "status must be one of pending, reviewed, accepted, rejected; got '{}'",
                request.status
            ),
        });
        return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
    };
    outcome_response(service.update_status(&ApplicationId(id), status))
}

pub(crate) async fn create_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Json(request): Json<CreateApplicationRequest>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    outcome_response(service.create(request))
}

/// Dedicated download path: the only route that surfaces resume bytes.
pub(crate) async fn download_resume_handler<S>(
    State(service): State<Arc<ApplicationService<S>>>,
    Path(id): Path<String>,
) -> Response
where
    S: ApplicationStore + 'static,
{
    match service.resume(&ApplicationId(id)) {
        Ok(Some(attachment)) => {
            let content_type = if attachment.content_type.is_empty() {
                mime::APPLICATION_OCTET_STREAM.as_ref().to_string()
            } else {
                attachment.content_type.clone()
            };
            let disposition = format!("attachment; filename=\"{}\"", attachment.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                attachment.data,
            )
                .into_response()
        }
        Ok(None) => {
            let payload = json!({ "error": "Resume not found." });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(err) => outcome_response(Outcome::from_error(&err)),
    }
}

fn outcome_response(outcome: Outcome) -> Response {
    let status =
        StatusCode::from_u16(outcome.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if outcome.success {
        return (status, Json(outcome.data.unwrap_or(Value::Null))).into_response();
    }

    let mut payload = json!({
        "error": outcome.error.unwrap_or_else(|| "operation failed".to_string()),
    });
    if let Some(details) = outcome.data {
        payload["details"] = details;
    }
    (status, Json(payload)).into_response()
}
