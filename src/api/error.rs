//! Error envelope returned at the handler boundary.

use crate::task::services::TaskServiceError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// Coarse error category exposed to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// The caller is not a member of the workspace.
    Unauthorized,
    /// The request is malformed or violates a batch rule.
    InvalidRequest,
    /// The addressed task does not exist.
    NotFound,
    /// A store failure; details are logged, not returned.
    InternalError,
}

impl ErrorKind {
    /// Returns the HTTP status for this kind.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response rendered as `{ "error": <kind>, "message": <text> }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    #[serde(rename = "error")]
    kind: ErrorKind,
    message: String,
}

impl ApiError {
    /// Creates an error with an explicit kind and message.
    #[must_use]
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an [`ErrorKind::InvalidRequest`] error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, message)
    }

    /// Converts a service error, using `internal_message` as the opaque text
    /// for store failures. Store failures are logged here.
    #[must_use]
    pub fn from_service(err: TaskServiceError, internal_message: &'static str) -> Self {
        match err {
            TaskServiceError::Unauthorized(_) => Self::new(
                ErrorKind::Unauthorized,
                "You are not a member of this workspace",
            ),
            TaskServiceError::MixedWorkspaces { .. } => {
                Self::invalid_request("Tasks must belong to the same workspace")
            }
            TaskServiceError::Domain(domain) => Self::invalid_request(domain.to_string()),
            TaskServiceError::NotFound(_) => Self::new(ErrorKind::NotFound, "Task not found"),
            TaskServiceError::Repository(_)
            | TaskServiceError::Membership(_)
            | TaskServiceError::Directory(_) => {
                tracing::error!(error = %err, "{internal_message}");
                Self::new(ErrorKind::InternalError, internal_message)
            }
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the caller-facing message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.kind.status(), Json(self)).into_response()
    }
}
