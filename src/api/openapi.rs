//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use super::dto::CreateSubmissionRequest;
use super::handlers::{submission, system};
use crate::domain::Submission;
use crate::error::ErrorResponse;

/// Generated OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "postbox",
        description = "Stores free-form mailing addresses submitted through a single form."
    ),
    paths(
        submission::create_submission,
        submission::list_submissions,
        system::health_handler,
    ),
    components(schemas(
        Submission,
        CreateSubmissionRequest,
        ErrorResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "Submissions", description = "Create and list submissions"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;
