use std::sync::atomic::Ordering;
use std::sync::Arc;

use applyflow::applications::ApplicationService;
use applyflow::config::AppConfig;
use applyflow::error::AppError;
use applyflow::telemetry;
use axum::extract::DefaultBodyLimit;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationStore};
use crate::routes::with_application_routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryApplicationStore::default());
    let application_service = Arc::new(ApplicationService::new(store));

    // Base64-encoded resumes inflate by a third, so the body cap leaves
    // headroom above the configured attachment limit.
    let body_limit = config
        .limits
        .max_resume_bytes
        .saturating_mul(3)
        .saturating_div(2);

    let app = with_application_routes(application_service)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job application service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
