use serde::Serialize;
use serde_json::Value;

use super::store::StoreError;

/// Normalized result of a lifecycle operation. Built once, never mutated,
/// and returned instead of thrown: failure is ordinary data here.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl Outcome {
    /// Successful outcome with the default 200 status.
    pub fn success(data: Value) -> Self {
        Self::success_with_status(data, 200)
    }

    /// Successful outcome with an explicit status, e.g. 201 on creation.
    /// This is the only place callers pick a status themselves; every
    /// failure shape decides its own.
    pub fn success_with_status(data: Value, status: u16) -> Self {
        Outcome {
            success: true,
            data: Some(data),
            error: None,
            status,
            metadata: None,
        }
    }

    /// Failure outcome with the default 500 status.
    pub fn error(message: impl Into<String>) -> Self {
        Self::error_with_status(message, 500)
    }

    pub fn error_with_status(message: impl Into<String>, status: u16) -> Self {
        Outcome {
            success: false,
            data: None,
            error: Some(message.into()),
            status,
            metadata: None,
        }
    }

    pub fn not_found() -> Self {
        Self::not_found_with_message("Resource not found")
    }

    pub fn not_found_with_message(message: impl Into<String>) -> Self {
        Self::error_with_status(message, 404)
    }

    /// Classifies a store failure into its outcome shape. Validation
    /// failures carry their field-level details in `data` even though
    /// `success` is false; everything else passes its message through,
    /// keeping a carried status code when the error has one.
    pub fn from_error(err: &StoreError) -> Self {
        match err {
            StoreError::Validation { errors } => Outcome {
                success: false,
                data: Some(serde_json::to_value(errors).unwrap_or(Value::Null)),
                error: Some("Validation failed".to_string()),
                status: 400,
                metadata: None,
            },
            other => Self::error_with_status(other.to_string(), other.status_code().unwrap_or(500)),
        }
    }
}
