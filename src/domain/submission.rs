//! The submission record and its validated inputs.
//!
//! A [`Submission`] is created exactly once from a [`NewSubmission`] and is
//! immutable afterwards. The only caller-supplied field is the
//! [`MailingAddress`]; `id` and `created_at` are assigned by the store.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::PostboxError;

/// Store-assigned identifier of a [`Submission`].
///
/// Monotonically increasing and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubmissionId(i64);

impl SubmissionId {
    /// Wraps a raw store identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form text the user chose to leave behind.
///
/// Not parsed as a postal address. The only rule is that it is not the
/// empty string; whitespace is kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MailingAddress(String);

impl MailingAddress {
    /// Validates raw input into a `MailingAddress`.
    ///
    /// # Errors
    ///
    /// Returns [`PostboxError::Validation`] naming the `address` field when
    /// `raw` is empty.
    pub fn parse(raw: String) -> Result<Self, PostboxError> {
        if raw.is_empty() {
            return Err(PostboxError::validation(
                "address must not be empty",
                ["address"],
            ));
        }
        Ok(Self(raw))
    }

    /// Returns the address text exactly as submitted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the address, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MailingAddress {
    type Error = PostboxError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::parse(raw)
    }
}

impl From<MailingAddress> for String {
    fn from(address: MailingAddress) -> Self {
        address.0
    }
}

impl fmt::Display for MailingAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated input for the repository's create operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    /// The address to store.
    pub address: MailingAddress,
}

impl NewSubmission {
    /// Creates a new submission input.
    #[must_use]
    pub const fn new(address: MailingAddress) -> Self {
        Self { address }
    }
}

/// A stored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Store-assigned identifier.
    #[schema(value_type = i64, example = 1)]
    pub id: SubmissionId,
    /// Address text exactly as submitted.
    #[schema(value_type = String, example = "123 Main St")]
    pub address: MailingAddress,
    /// Insertion time, assigned by the store.
    pub created_at: DateTime<Utc>,
}
