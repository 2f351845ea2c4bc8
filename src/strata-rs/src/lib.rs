//! Strata Client Library
//!
//! HTTP client for the Strata search service REST API. Every method maps
//! onto one endpoint and one round trip; mutating calls return a
//! [`TaskInfo`](strata_core::TaskInfo) descriptor that must be polled
//! (see [`Client::wait_for_task`]) before the change is visible.

mod client;
mod error;
mod index;
mod settings;
mod transport;

pub use client::{AsTaskUid, Client, ClientBuilder, DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT};
pub use error::{Error, Result};
pub use index::Index;
pub use strata_core::models::{
    DocumentsQuery, DocumentsResults, Health, IndexMeta, IndexStats, IndexesQuery, IndexesResults,
    ServiceStats, Version,
};
pub use strata_core::search::{FacetSearchQuery, FacetSearchResults, SearchQuery, SearchResults};
pub use strata_core::settings::Settings;
pub use strata_core::task::{Task, TaskInfo, TaskStatus, TasksQuery, TasksResults};
pub use strata_core::ApiErrorBody;
