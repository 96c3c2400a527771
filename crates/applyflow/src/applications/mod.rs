//! Job application lifecycle: creation with optional resume attachments,
//! retrieval, and status updates, every operation reporting through one
//! normalized [`Outcome`] shape.
//!
//! The store behind the service is an opaque trait so any document store
//! can sit underneath; the HTTP router is a thin adapter that serializes
//! outcomes onto the wire.

pub mod domain;
pub mod outcome;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationStatus, ApplicationView,
    CreateApplicationRequest, JobId, NewApplication, ResumeAttachment, ResumeRef,
};
pub use outcome::Outcome;
pub use router::application_router;
pub use service::ApplicationService;
pub use store::{ApplicationFilter, ApplicationStore, StatusPatch, StoreError};
