//! Strata Core Library
//!
//! This crate provides the wire-level data model shared by Strata clients:
//! - Index metadata and statistics
//! - Asynchronous task records and queries
//! - The per-index settings bundle
//! - Search queries, results and facet search types
//! - The structured API error body

pub mod error;
pub mod models;
pub mod search;
pub mod settings;
pub mod task;

// Re-export commonly used types
pub use error::ApiErrorBody;
pub use models::*;
pub use search::{FacetSearchQuery, FacetSearchResults, SearchQuery, SearchResults};
pub use settings::Settings;
pub use task::{Task, TaskInfo, TaskStatus, TasksQuery, TasksResults};
