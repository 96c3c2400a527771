use std::path::PathBuf;
use std::sync::Arc;

use applyflow::applications::{
    ApplicationId, ApplicationService, ApplicationStatus, CreateApplicationRequest, Outcome,
    ResumeAttachment,
};
use applyflow::error::AppError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Args;

use crate::infra::InMemoryApplicationStore;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Job listing the demo application targets
    #[arg(long, default_value = "job-demo-1")]
    pub(crate) job: String,
    /// Applicant name used for the demo submission
    #[arg(long, default_value = "Dana Smith")]
    pub(crate) applicant: String,
    /// Attach this file as the resume instead of the built-in sample
    #[arg(long)]
    pub(crate) resume: Option<PathBuf>,
}

/// Runs every lifecycle operation against an in-memory store and prints
/// the normalized outcome of each, including the failure shapes.
pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = ApplicationService::new(Arc::new(InMemoryApplicationStore::default()));

    let mut request = CreateApplicationRequest {
        job_id: args.job.clone(),
        applicant_name: args.applicant.clone(),
        email: demo_email(&args.applicant),
        cover_letter: Some("Submitted via the applyflow demo.".to_string()),
        submitted_by: Some(args.applicant.to_ascii_lowercase().replace(' ', ".")),
        resume: None,
        resume_base64: None,
    };
    match args.resume {
        Some(path) => {
            let data = std::fs::read(&path)?;
            let content_type = mime_guess::from_path(&path)
                .first_or_octet_stream()
                .essence_str()
                .to_string();
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            request.resume = Some(ResumeAttachment {
                data,
                content_type,
                filename,
            });
        }
        None => {
            request.resume_base64 = Some(STANDARD.encode(b"%PDF-1.7 demo resume"));
        }
    }

    let created = service.create(request);
    print_outcome("create", &created);
    let id = created
        .data
        .as_ref()
        .and_then(|data| data.get("id"))
        .and_then(|id| id.as_str())
        .map(|id| ApplicationId(id.to_string()));

    let invalid = service.create(CreateApplicationRequest {
        job_id: args.job.clone(),
        applicant_name: String::new(),
        email: "not-an-email".to_string(),
        ..CreateApplicationRequest::default()
    });
    print_outcome("create (schema violation)", &invalid);

    print_outcome("list all", &service.list_all());
    print_outcome(
        "list by submitter",
        &service.list_by_submitter(&args.applicant.to_ascii_lowercase().replace(' ', ".")),
    );

    if let Some(id) = &id {
        print_outcome("get by id", &service.get_by_id(id));
        print_outcome(
            "update status -> reviewed",
            &service.update_status(id, ApplicationStatus::Reviewed),
        );
        print_outcome(
            "update status -> accepted",
            &service.update_status(id, ApplicationStatus::Accepted),
        );
        if let Ok(Some(attachment)) = service.resume(id) {
            println!(
                "resume download: {} byte(s), content type {}\n",
                attachment.data.len(),
                attachment.content_type
            );
        }
    }

    print_outcome(
        "get by id (missing)",
        &service.get_by_id(&ApplicationId("ghost".to_string())),
    );

    Ok(())
}

fn demo_email(applicant: &str) -> String {
    format!(
        "{}@example.com",
        applicant.to_ascii_lowercase().replace(' ', ".")
    )
}

fn print_outcome(label: &str, outcome: &Outcome) {
    let rendered = serde_json::to_string_pretty(outcome)
        .unwrap_or_else(|_| "<unserializable outcome>".to_string());
    println!("== {label}\n{rendered}\n");
}
