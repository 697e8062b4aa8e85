//! # postbox
//!
//! A single-form submission service. Visitors leave one free-form line of
//! text (a mailing address); the service validates it, stores it with a
//! generated id and timestamp, and can list everything stored so far.
//!
//! ## Architecture
//!
//! ```text
//! Clients (browser form, postbox-submit CLI)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── SubmissionService (service/)
//!     │
//!     └── SubmissionRepository (persistence/)
//!           ├── PostgreSQL
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
