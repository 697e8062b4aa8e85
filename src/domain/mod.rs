//! Domain layer: the submission record and its validated inputs.

pub mod submission;

pub use submission::{MailingAddress, NewSubmission, Submission, SubmissionId};
