use crate::config::ConfigError;
use crate::telemetry::TelemetryError;

/// Bootstrap failures for the API binary. Lifecycle operations never
/// produce this: their failures are `Outcome` values, not errors.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
}
