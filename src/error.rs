use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::store::StoreError;

/// Failures that stop the process before it serves traffic
#[derive(Debug, Error)]
pub enum StartupError {
    /// A required setting is absent
    #[error("{0} is required")]
    MissingConfig(&'static str),
    #[error("invalid {name}: {reason}")]
    InvalidConfig { name: &'static str, reason: String },
    /// The database could not be reached when opening the pool or pinging it
    #[error("cannot connect to database: {0}")]
    Connectivity(#[source] StoreError),
    #[error("failed to initialize schema: {0}")]
    Schema(#[from] StoreError),
}

/// Classification of a failed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Decode,
    UnknownAction,
    NotFound,
    Storage,
}

/// Per-request failure.
///
/// The wire contract has no structured errors: every variant is rendered as
/// a single plain-text line with status 200, and clients tell failures apart
/// from successes by the body shape. The variants exist so code and tests
/// can reason about the kind of failure without matching on strings.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The body is not a JSON request object
    #[error("{0}")]
    Decode(String),
    #[error("unknown action")]
    UnknownAction(String),
    #[error("key not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Storage(StoreError),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::UnknownAction(_) => ErrorKind::UnknownAction,
            ApiError::NotFound(_) => ErrorKind::NotFound,
            ApiError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(key) => ApiError::NotFound(key),
            other => ApiError::Storage(other),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Storage(err) => tracing::error!(error = %err, "request failed"),
            other => tracing::warn!(kind = ?other.kind(), error = %other, "request rejected"),
        }

        (StatusCode::OK, format!("{self}\n")).into_response()
    }
}
