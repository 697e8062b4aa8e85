//! HTTP client for the submission endpoint.
//!
//! [`SubmissionClient`] is what a form front end or the `postbox-submit`
//! binary uses to talk to the server. It refuses blank input locally,
//! sends the address untrimmed, and never retries: every failure is
//! surfaced once and the user resubmits by hand.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::Submission;

/// Message used when the server's error body carries none.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to send response";

/// Errors returned by [`SubmissionClient`].
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The address was empty or whitespace-only; nothing was sent.
    #[error("address must not be blank")]
    EmptyAddress,

    /// The server answered with a non-success status.
    #[error("{message} (HTTP {status})")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or [`DEFAULT_FAILURE_MESSAGE`].
        message: String,
    },

    /// The request never completed (connection refused, timeout, bad body).
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Returns `true` for failures caused by the caller's input rather
    /// than the server or the network.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::EmptyAddress => true,
            Self::Rejected { status, .. } => (400..500).contains(status),
            Self::Transport(_) => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct CreateBody<'a> {
    address: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Client for `POST /api/submissions` and `GET /api/submissions`.
#[derive(Debug, Clone)]
pub struct SubmissionClient {
    http: reqwest::Client,
    base_url: String,
}

impl SubmissionClient {
    /// Creates a client for the server at `base_url` (e.g.
    /// `http://localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the HTTP client cannot be
    /// built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    fn submissions_url(&self) -> String {
        format!("{}/api/submissions", self.base_url)
    }

    /// Submits an address and returns the stored record.
    ///
    /// # Errors
    ///
    /// - [`ClientError::EmptyAddress`] if `address` is blank after trimming.
    /// - [`ClientError::Rejected`] if the server answers with an error status.
    /// - [`ClientError::Transport`] on network failure.
    pub async fn submit(&self, address: &str) -> Result<Submission, ClientError> {
        if address.trim().is_empty() {
            return Err(ClientError::EmptyAddress);
        }

        let response = self
            .http
            .post(self.submissions_url())
            .json(&CreateBody { address })
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// Fetches every stored submission in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rejected`] or [`ClientError::Transport`].
    pub async fn list(&self) -> Result<Vec<Submission>, ClientError> {
        let response = self.http.get(self.submissions_url()).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());

    tracing::debug!(status = status.as_u16(), %message, "submission request rejected");
    Err(ClientError::Rejected {
        status: status.as_u16(),
        message,
    })
}
