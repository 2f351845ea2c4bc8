use std::time::{Duration, Instant};

use reqwest::Client as HttpClient;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::index::Index;
use crate::transport::Transport;
use strata_core::models::{Health, IndexesQuery, IndexesResults, ServiceStats, Version};
use strata_core::task::{Task, TaskInfo, TasksQuery, TasksResults};

/// Default sleep between two task polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Default overall task-wait deadline.
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(5);

/// Strata REST API client.
///
/// Holds only immutable configuration plus a cloneable HTTP client, so it
/// can be shared freely across tasks. Every method is one HTTP round trip.
#[derive(Debug, Clone)]
pub struct Client {
    transport: Transport,
}

/// Anything that identifies a task: a raw uid, a [`Task`] or a [`TaskInfo`].
pub trait AsTaskUid {
    fn as_task_uid(&self) -> u32;
}

impl AsTaskUid for u32 {
    fn as_task_uid(&self) -> u32 {
        *self
    }
}

impl AsTaskUid for TaskInfo {
    fn as_task_uid(&self) -> u32 {
        self.task_uid
    }
}

impl AsTaskUid for Task {
    fn as_task_uid(&self) -> u32 {
        self.uid
    }
}

impl<T: AsTaskUid + ?Sized> AsTaskUid for &T {
    fn as_task_uid(&self) -> u32 {
        (*self).as_task_uid()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexCreateRequest<'a> {
    uid: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_key: Option<&'a str>,
}

impl Client {
    /// Create a client for the given base URL, optionally authenticating
    /// every request with the API key.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            transport: Transport::new(base_url, api_key, HttpClient::new()),
        }
    }

    /// Start building a client with non-default HTTP options.
    pub fn builder(base_url: impl Into<String>) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    pub(crate) fn from_transport(transport: Transport) -> Self {
        Self { transport }
    }

    /// A handle on the index `uid` without contacting the server.
    pub fn index(&self, uid: impl Into<String>) -> Index {
        Index::new(self.transport.clone(), uid.into())
    }

    /// Fetch the index `uid`, failing if it does not exist.
    pub async fn get_index(&self, uid: &str) -> Result<Index> {
        let mut index = self.index(uid);
        index.fetch_info().await?;
        Ok(index)
    }

    /// Enqueue creation of a new index.
    pub async fn create_index(
        &self,
        uid: &str,
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        if uid.is_empty() {
            return Err(Error::InvalidRequest(
                "index uid must not be empty".to_string(),
            ));
        }
        let body = IndexCreateRequest { uid, primary_key };
        self.transport
            .execute(self.transport.post("/indexes").json(&body))
            .await
    }

    /// List indexes, paginated.
    pub async fn list_indexes(&self, query: &IndexesQuery) -> Result<IndexesResults> {
        self.transport
            .execute(self.transport.get("/indexes").query(query))
            .await
    }

    /// Enqueue deletion of the index `uid`.
    pub async fn delete_index(&self, uid: &str) -> Result<TaskInfo> {
        if uid.is_empty() {
            return Err(Error::InvalidRequest(
                "index uid must not be empty".to_string(),
            ));
        }
        self.transport
            .execute(self.transport.delete(&format!("/indexes/{uid}")))
            .await
    }

    /// Service liveness.
    pub async fn health(&self) -> Result<Health> {
        self.transport.execute(self.transport.get("/health")).await
    }

    /// Build information of the remote service.
    pub async fn version(&self) -> Result<Version> {
        self.transport.execute(self.transport.get("/version")).await
    }

    /// Instance-wide statistics.
    pub async fn stats(&self) -> Result<ServiceStats> {
        self.transport.execute(self.transport.get("/stats")).await
    }

    /// Fetch the full record of one task.
    pub async fn get_task(&self, task: impl AsTaskUid) -> Result<Task> {
        let uid = task.as_task_uid();
        self.transport
            .execute(self.transport.get(&format!("/tasks/{uid}")))
            .await
    }

    /// List tasks, filtered and paginated.
    pub async fn get_tasks(&self, query: &TasksQuery) -> Result<TasksResults> {
        self.transport
            .execute(self.transport.get("/tasks").query(query))
            .await
    }

    /// Poll a task at a fixed `interval` until it reaches a terminal
    /// status, or fail with [`Error::TaskTimeout`] once `timeout` elapses.
    ///
    /// A task that terminates as `failed` or `canceled` is returned
    /// normally; its failure payload is in [`Task::error`]. There is no
    /// cancellation handle, no backoff and no jitter: the loop sleeps the
    /// same `interval` between every two polls, as the service offers no
    /// push-based notification.
    pub async fn wait_for_task(
        &self,
        task: impl AsTaskUid,
        interval: Option<Duration>,
        timeout: Option<Duration>,
    ) -> Result<Task> {
        let task_uid = task.as_task_uid();
        let interval = interval.unwrap_or(DEFAULT_POLL_INTERVAL);
        let timeout = timeout.unwrap_or(DEFAULT_POLL_TIMEOUT);
        let started = Instant::now();

        loop {
            let task = self.get_task(task_uid).await?;
            if task.is_terminal() {
                return Ok(task);
            }
            let elapsed = started.elapsed();
            if elapsed >= timeout {
                debug!(task_uid, ?elapsed, "task wait timed out");
                return Err(Error::TaskTimeout { task_uid, elapsed });
            }
            tokio::time::sleep(interval).await;
        }
    }
}

/// Builder for [`Client`] with non-default HTTP options.
pub struct ClientBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    http_client: Option<HttpClient>,
}

impl ClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: None,
            http_client: None,
        }
    }

    /// API key attached as a bearer header on every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Per-request timeout on the underlying HTTP client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a pre-configured `reqwest::Client` instead of building one.
    /// Takes precedence over [`ClientBuilder::timeout`].
    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http_client = Some(http);
        self
    }

    pub fn build(self) -> Result<Client> {
        let http = match self.http_client {
            Some(http) => http,
            None => {
                let mut builder = HttpClient::builder();
                if let Some(timeout) = self.timeout {
                    builder = builder.timeout(timeout);
                }
                builder.build()?
            }
        };
        Ok(Client::from_transport(Transport::new(
            self.base_url,
            self.api_key,
            http,
        )))
    }
}
