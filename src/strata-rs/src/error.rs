use std::time::Duration;

use strata_core::ApiErrorBody;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Client errors, one variant per failure class.
///
/// A task that finishes with terminal status `failed` is not an `Error`;
/// its failure payload travels inside the returned
/// [`Task`](strata_core::Task).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Rejected locally before any request was sent.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Network-level failure (DNS, connection refused, request timeout).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the service.
    #[error("API error {status}: {} ({})", body.message, body.code)]
    Api { status: u16, body: ApiErrorBody },

    /// Payload (de)serialization failure.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV payload could not be parsed for batching.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while re-assembling a bulk payload.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Task polling exceeded its allotted duration without the task
    /// reaching a terminal status.
    #[error("task {task_uid} did not complete within {elapsed:?}")]
    TaskTimeout { task_uid: u32, elapsed: Duration },

    /// The operation requires a server feature or version that is not
    /// enabled on this instance.
    #[error("`{feature}` is not enabled on the server; enable the feature or upgrade: {source}")]
    FeatureNotEnabled {
        feature: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// HTTP status code, when the failure came from a service response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::FeatureNotEnabled { source, .. } => source.status_code(),
            _ => None,
        }
    }

    /// Machine-readable error code from the service, when present.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body.code.as_str()),
            Self::FeatureNotEnabled { source, .. } => source.error_code(),
            _ => None,
        }
    }

    /// Whether this is a task-wait or network timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::TaskTimeout { .. } => true,
            Self::Http(e) => e.is_timeout(),
            _ => false,
        }
    }
}
