//! Submission handlers: create and list.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::CreateSubmissionRequest;
use crate::app_state::AppState;
use crate::domain::Submission;
use crate::error::{ErrorResponse, PostboxError};

/// `POST /submissions` — Store a new submission.
///
/// # Errors
///
/// Returns [`PostboxError::Validation`] for a malformed body or empty
/// address, and [`PostboxError::StorageFailure`] if the write fails.
#[utoipa::path(
    post,
    path = "/api/submissions",
    tag = "Submissions",
    summary = "Store a submission",
    description = "Validates the body, stores the address verbatim and returns the stored record with its generated id and creation time.",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission stored", body = Submission),
        (status = 400, description = "Missing, mistyped or empty address", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn create_submission(
    State(state): State<AppState>,
    payload: Result<Json<CreateSubmissionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, PostboxError> {
    let Json(req) = payload.inspect_err(|rejection| {
        tracing::debug!(reason = %rejection.body_text(), "rejected submission body");
    })?;
    let new = req.into_new_submission()?;

    let submission = state.submission_service.create(new).await?;

    Ok((StatusCode::CREATED, Json(submission)))
}

/// `GET /submissions` — List all submissions.
///
/// # Errors
///
/// Returns [`PostboxError::StorageFailure`] if the store is unreachable.
#[utoipa::path(
    get,
    path = "/api/submissions",
    tag = "Submissions",
    summary = "List submissions",
    description = "Returns every stored submission ordered by creation time. No pagination.",
    responses(
        (status = 200, description = "All submissions", body = Vec<Submission>),
        (status = 500, description = "Storage failure", body = ErrorResponse),
    )
)]
pub async fn list_submissions(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PostboxError> {
    let submissions = state.submission_service.list().await?;
    Ok(Json(submissions))
}

/// Submission routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/submissions", post(create_submission).get(list_submissions))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::Utc;
    use tower::ServiceExt;

    use super::*;
    use crate::api::build_app;
    use crate::domain::NewSubmission;
    use crate::persistence::{InMemorySubmissionRepository, SubmissionRepository};

    /// Store whose writes always fail while reads go to an in-memory store.
    #[derive(Debug, Default)]
    struct RejectingWrites {
        inner: InMemorySubmissionRepository,
    }

    #[async_trait]
    impl SubmissionRepository for RejectingWrites {
        async fn create(&self, _new: NewSubmission) -> Result<Submission, PostboxError> {
            Err(PostboxError::StorageFailure("connection refused".to_string()))
        }

        async fn list(&self) -> Result<Vec<Submission>, PostboxError> {
            self.inner.list().await
        }

        async fn ping(&self) -> Result<(), PostboxError> {
            Err(PostboxError::Unavailable("connection refused".to_string()))
        }

        fn backend(&self) -> &'static str {
            "rejecting"
        }
    }

    fn app_with(repo: Arc<dyn SubmissionRepository>) -> Router {
        build_app(AppState::new(repo), Duration::from_secs(5))
    }

    fn post_json(body: &str) -> Request<Body> {
        let Ok(req) = Request::builder()
            .method("POST")
            .uri("/api/submissions")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("request build failed");
        };
        req
    }

    fn get_list() -> Request<Body> {
        let Ok(req) = Request::builder()
            .uri("/api/submissions")
            .body(Body::empty())
        else {
            panic!("request build failed");
        };
        req
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
        let Ok(resp) = app.clone().oneshot(req).await else {
            panic!("router failed");
        };
        let status = resp.status();
        let Ok(bytes) = axum::body::to_bytes(resp.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn create_returns_201_with_record() {
        let repo = Arc::new(InMemorySubmissionRepository::new());
        let app = app_with(repo);
        let before = Utc::now();

        let (status, body) = send(&app, post_json(r#"{"address":"123 Main St"}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.get("id"), Some(&serde_json::json!(1)));
        assert_eq!(body.get("address"), Some(&serde_json::json!("123 Main St")));

        let Ok(submission) = serde_json::from_value::<Submission>(body) else {
            panic!("response is not a submission");
        };
        assert!(submission.created_at >= before);
    }

    #[tokio::test]
    async fn created_record_matches_listed_record() {
        let app = app_with(Arc::new(InMemorySubmissionRepository::new()));

        let (_, created) = send(&app, post_json(r#"{"address":"first"}"#)).await;
        let _ = send(&app, post_json(r#"{"address":"second"}"#)).await;
        let (status, listed) = send(&app, get_list()).await;

        assert_eq!(status, StatusCode::OK);
        let Some(items) = listed.as_array() else {
            panic!("list is not an array");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items.first(), Some(&created));
    }

    #[tokio::test]
    async fn empty_address_is_rejected_before_storage() {
        let repo = Arc::new(InMemorySubmissionRepository::new());
        let app = app_with(Arc::clone(&repo) as Arc<dyn SubmissionRepository>);

        let (status, body) = send(&app, post_json(r#"{"address":""}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.get("code"), Some(&serde_json::json!(1001)));
        assert_eq!(body.get("fields"), Some(&serde_json::json!(["address"])));
        assert!(body.get("message").and_then(|m| m.as_str()).is_some());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn missing_or_mistyped_address_is_rejected() {
        let repo = Arc::new(InMemorySubmissionRepository::new());
        let app = app_with(Arc::clone(&repo) as Arc<dyn SubmissionRepository>);

        for body in [
            "{}",
            r#"{"address":7}"#,
            r#"{"address":null}"#,
            "not json",
            "[]",
            r#"["123 Main St"]"#,
        ] {
            let (status, resp) = send(&app, post_json(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert!(resp.get("message").is_some(), "body {body:?}");
        }
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn missing_content_type_is_a_client_error() {
        let app = app_with(Arc::new(InMemorySubmissionRepository::new()));
        let Ok(req) = Request::builder()
            .method("POST")
            .uri("/api/submissions")
            .body(Body::from(r#"{"address":"x"}"#))
        else {
            panic!("request build failed");
        };
        let (status, _) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn whitespace_only_address_is_stored_verbatim() {
        let app = app_with(Arc::new(InMemorySubmissionRepository::new()));
        let (status, body) = send(&app, post_json(r#"{"address":"   "}"#)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.get("address"), Some(&serde_json::json!("   ")));
    }

    #[tokio::test]
    async fn same_address_twice_creates_two_records() {
        let app = app_with(Arc::new(InMemorySubmissionRepository::new()));
        let (_, a) = send(&app, post_json(r#"{"address":"dup"}"#)).await;
        let (_, b) = send(&app, post_json(r#"{"address":"dup"}"#)).await;
        assert_ne!(a.get("id"), b.get("id"));
    }

    #[tokio::test]
    async fn storage_failure_returns_500_and_leaves_no_row() {
        let app = app_with(Arc::new(RejectingWrites::default()));

        let (status, body) = send(&app, post_json(r#"{"address":"123 Main St"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.get("code"), Some(&serde_json::json!(3001)));
        assert_eq!(body.get("message"), Some(&serde_json::json!("storage failure")));

        let (status, listed) = send(&app, get_list()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(listed, serde_json::json!([]));
    }
}
