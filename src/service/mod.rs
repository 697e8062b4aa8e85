//! Service layer: business logic orchestration.
//!
//! [`SubmissionService`] sits between the REST handlers and the
//! [`crate::persistence::SubmissionRepository`].

pub mod submission_service;

pub use submission_service::SubmissionService;
