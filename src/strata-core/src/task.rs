use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ApiErrorBody;

/// TaskStatus defines the lifecycle states of a server-side task.
///
/// Transitions are owned entirely by the remote service; a client only
/// observes them through `GET /tasks/{uid}`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Enqueued,
    Processing,
    Succeeded,
    Failed,
    Canceled,
}

impl TaskStatus {
    /// Whether the status is terminal. A terminal `Failed` is data, not an
    /// error: failure details live in the task record itself.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

/// TaskInfo represents the summary returned by every mutating operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    pub task_uid: u32,
    #[serde(default)]
    pub index_uid: Option<String>,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub kind: String,
    pub enqueued_at: DateTime<Utc>,
}

/// Task represents the full record behind `GET /tasks/{uid}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub uid: u32,
    #[serde(default)]
    pub index_uid: Option<String>,
    pub status: TaskStatus,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
    #[serde(default)]
    pub duration: Option<String>,
    pub enqueued_at: DateTime<Utc>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}

/// TasksQuery represents filters for the task listing endpoint.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u32>,
    /// Comma-joined on the wire.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::models::comma_joined"
    )]
    pub statuses: Option<Vec<String>>,
    /// Comma-joined on the wire.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "crate::models::comma_joined"
    )]
    pub index_uids: Option<Vec<String>>,
}

/// TasksResults represents one page of the task listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksResults {
    pub results: Vec<Task>,
    pub total: u64,
    pub limit: usize,
    pub from: Option<u32>,
    pub next: Option<u32>,
}
