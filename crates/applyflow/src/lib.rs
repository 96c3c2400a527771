//! Core library for the applyflow service: the job application lifecycle
//! contract plus the ambient configuration, telemetry, and bootstrap
//! error plumbing shared with the API binary.

pub mod applications;
pub mod config;
pub mod error;
pub mod telemetry;
