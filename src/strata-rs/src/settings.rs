use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::index::Index;
use strata_core::settings::{
    Embedder, FacetingSettings, PaginationSettings, Settings, TypoToleranceSettings,
};
use strata_core::task::TaskInfo;

/// Wrap an API error that signals a disabled server feature.
fn guard_feature(feature: &str, err: Error) -> Error {
    if err.error_code() == Some("feature_not_enabled") {
        Error::FeatureNotEnabled {
            feature: feature.to_string(),
            source: Box::new(err),
        }
    } else {
        err
    }
}

/// Settings accessors. Every setting is independently readable, writable
/// (full replace of that setting) and resettable to the server default via
/// a DELETE. List-like settings update with PUT, struct-like ones with
/// PATCH, matching the service's route table.
impl Index {
    /// Fetch the whole settings bundle.
    pub async fn get_settings(&self) -> Result<Settings> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings"))).await
    }

    /// Enqueue a partial settings update; only the bundle's `Some` fields
    /// are touched on the server.
    pub async fn update_settings(&self, settings: &Settings) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.patch(&self.path("/settings")).json(settings)).await
    }

    /// Enqueue a reset of every setting to its default.
    pub async fn reset_settings(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings"))).await
    }

    pub async fn get_ranking_rules(&self) -> Result<Vec<String>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/ranking-rules"))).await
    }

    pub async fn update_ranking_rules(&self, rules: &[&str]) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.put(&self.path("/settings/ranking-rules")).json(&rules))
            .await
    }

    pub async fn reset_ranking_rules(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/ranking-rules"))).await
    }

    pub async fn get_searchable_attributes(&self) -> Result<Vec<String>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/searchable-attributes")))
            .await
    }

    pub async fn update_searchable_attributes(&self, attributes: &[&str]) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(
            t.put(&self.path("/settings/searchable-attributes"))
                .json(&attributes),
        )
        .await
    }

    pub async fn reset_searchable_attributes(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/searchable-attributes")))
            .await
    }

    pub async fn get_displayed_attributes(&self) -> Result<Vec<String>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/displayed-attributes")))
            .await
    }

    pub async fn update_displayed_attributes(&self, attributes: &[&str]) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(
            t.put(&self.path("/settings/displayed-attributes"))
                .json(&attributes),
        )
        .await
    }

    pub async fn reset_displayed_attributes(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/displayed-attributes")))
            .await
    }

    pub async fn get_filterable_attributes(&self) -> Result<Vec<String>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/filterable-attributes")))
            .await
    }

    pub async fn update_filterable_attributes(&self, attributes: &[&str]) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(
            t.put(&self.path("/settings/filterable-attributes"))
                .json(&attributes),
        )
        .await
    }

    pub async fn reset_filterable_attributes(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/filterable-attributes")))
            .await
    }

    pub async fn get_sortable_attributes(&self) -> Result<Vec<String>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/sortable-attributes")))
            .await
    }

    pub async fn update_sortable_attributes(&self, attributes: &[&str]) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(
            t.put(&self.path("/settings/sortable-attributes"))
                .json(&attributes),
        )
        .await
    }

    pub async fn reset_sortable_attributes(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/sortable-attributes")))
            .await
    }

    pub async fn get_stop_words(&self) -> Result<Vec<String>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/stop-words"))).await
    }

    pub async fn update_stop_words(&self, words: &[&str]) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.put(&self.path("/settings/stop-words")).json(&words))
            .await
    }

    pub async fn reset_stop_words(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/stop-words"))).await
    }

    pub async fn get_distinct_attribute(&self) -> Result<Option<String>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/distinct-attribute")))
            .await
    }

    /// `None` clears the distinct attribute.
    pub async fn update_distinct_attribute(&self, attribute: Option<&str>) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(
            t.put(&self.path("/settings/distinct-attribute"))
                .json(&attribute),
        )
        .await
    }

    pub async fn reset_distinct_attribute(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/distinct-attribute")))
            .await
    }

    pub async fn get_synonyms(&self) -> Result<HashMap<String, Vec<String>>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/synonyms"))).await
    }

    pub async fn update_synonyms(
        &self,
        synonyms: &HashMap<String, Vec<String>>,
    ) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.put(&self.path("/settings/synonyms")).json(synonyms))
            .await
    }

    pub async fn reset_synonyms(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/synonyms"))).await
    }

    pub async fn get_pagination(&self) -> Result<PaginationSettings> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/pagination"))).await
    }

    pub async fn update_pagination(&self, pagination: &PaginationSettings) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.patch(&self.path("/settings/pagination")).json(pagination))
            .await
    }

    pub async fn reset_pagination(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/pagination"))).await
    }

    pub async fn get_faceting(&self) -> Result<FacetingSettings> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/faceting"))).await
    }

    pub async fn update_faceting(&self, faceting: &FacetingSettings) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.patch(&self.path("/settings/faceting")).json(faceting))
            .await
    }

    pub async fn reset_faceting(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/faceting"))).await
    }

    pub async fn get_typo_tolerance(&self) -> Result<TypoToleranceSettings> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/typo-tolerance"))).await
    }

    pub async fn update_typo_tolerance(
        &self,
        typo_tolerance: &TypoToleranceSettings,
    ) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(
            t.patch(&self.path("/settings/typo-tolerance"))
                .json(typo_tolerance),
        )
        .await
    }

    pub async fn reset_typo_tolerance(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/typo-tolerance"))).await
    }

    /// Fetch the embedder configurations. Fails with
    /// [`Error::FeatureNotEnabled`] when the server has vector search
    /// disabled.
    pub async fn get_embedders(&self) -> Result<HashMap<String, Embedder>> {
        let t = self.transport();
        t.execute(t.get(&self.path("/settings/embedders")))
            .await
            .map_err(|e| guard_feature("embedders", e))
    }

    pub async fn update_embedders(
        &self,
        embedders: &HashMap<String, Embedder>,
    ) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.patch(&self.path("/settings/embedders")).json(embedders))
            .await
            .map_err(|e| guard_feature("embedders", e))
    }

    pub async fn reset_embedders(&self) -> Result<TaskInfo> {
        let t = self.transport();
        t.execute(t.delete(&self.path("/settings/embedders")))
            .await
            .map_err(|e| guard_feature("embedders", e))
    }
}
