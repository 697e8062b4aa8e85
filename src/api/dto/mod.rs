//! Data Transfer Objects for REST request/response serialization.
//!
//! Responses reuse [`crate::domain::Submission`] directly; only request
//! bodies need their own types.

pub mod submission_dto;

pub use submission_dto::*;
