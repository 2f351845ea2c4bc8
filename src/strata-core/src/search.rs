use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// MatchingStrategy defines how query terms must match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MatchingStrategy {
    Last,
    All,
    Frequency,
}

/// SearchQuery represents the body of `POST /indexes/{uid}/search`.
///
/// Unset fields are omitted from the request so server defaults apply.
/// Setting `page` or `hits_per_page` switches the server into exhaustive
/// pagination; the result then reports `total_hits` instead of
/// `estimated_total_hits`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits_per_page: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_crop: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_matches_position: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matching_strategy: Option<MatchingStrategy>,
}

impl SearchQuery {
    /// Shorthand for a plain text query.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: Some(q.into()),
            ..Default::default()
        }
    }
}

/// FacetStats represents min/max aggregates for a numeric facet.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FacetStats {
    pub min: f64,
    pub max: f64,
}

/// SearchResults represents the decoded search response.
///
/// The service reports the hit count under one of two names depending on
/// pagination mode; `hit_count()` unifies them.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults<T = serde_json::Value> {
    pub hits: Vec<T>,
    pub query: String,
    pub processing_time_ms: u64,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub estimated_total_hits: Option<u64>,
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub hits_per_page: Option<usize>,
    #[serde(default)]
    pub total_pages: Option<usize>,
    #[serde(default)]
    pub total_hits: Option<u64>,
    #[serde(default)]
    pub facet_distribution: Option<HashMap<String, HashMap<String, u64>>>,
    #[serde(default)]
    pub facet_stats: Option<HashMap<String, FacetStats>>,
}

impl<T> SearchResults<T> {
    /// Normalized hit count across both pagination modes: the exhaustive
    /// `totalHits` when present, otherwise `estimatedTotalHits`.
    pub fn hit_count(&self) -> Option<u64> {
        self.total_hits.or(self.estimated_total_hits)
    }
}

/// FacetSearchQuery represents the body of `POST /indexes/{uid}/facet-search`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSearchQuery {
    pub facet_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// FacetHit represents one matching facet value and its document count.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FacetHit {
    pub value: String,
    pub count: u64,
}

/// FacetSearchResults represents the decoded facet search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetSearchResults {
    pub facet_hits: Vec<FacetHit>,
    pub facet_query: Option<String>,
    pub processing_time_ms: u64,
}
