use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Settings represents the full per-index settings bundle.
///
/// Every field is optional so a partial bundle can be sent as a PATCH;
/// omitted settings stay untouched on the server. Snake case field names
/// are transformed to the service's camelCase once, at the serde boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_rules: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filterable_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
    /// Double-Option: `Some(None)` explicitly clears the distinct attribute,
    /// `None` leaves it untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_attribute: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<HashMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faceting: Option<FacetingSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub typo_tolerance: Option<TypoToleranceSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embedders: Option<HashMap<String, Embedder>>,
}

/// PaginationSettings bounds the exhaustive pagination window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationSettings {
    #[serde(default = "default_max_total_hits")]
    pub max_total_hits: u64,
}

fn default_max_total_hits() -> u64 {
    1000
}

impl Default for PaginationSettings {
    fn default() -> Self {
        Self {
            max_total_hits: default_max_total_hits(),
        }
    }
}

/// FacetSortOrder defines how facet values are ordered in distributions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacetSortOrder {
    #[default]
    Alpha,
    Count,
}

/// FacetingSettings controls facet distribution limits and ordering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FacetingSettings {
    #[serde(default = "default_max_values_per_facet")]
    pub max_values_per_facet: u64,
    /// Sort strategy per facet name; `*` applies to every facet.
    #[serde(default)]
    pub sort_facet_values_by: HashMap<String, FacetSortOrder>,
}

fn default_max_values_per_facet() -> u64 {
    100
}

impl Default for FacetingSettings {
    fn default() -> Self {
        Self {
            max_values_per_facet: default_max_values_per_facet(),
            sort_facet_values_by: HashMap::new(),
        }
    }
}

/// MinWordSizeForTypos sets the word lengths at which typos are tolerated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MinWordSizeForTypos {
    #[serde(default = "default_one_typo")]
    pub one_typo: u8,
    #[serde(default = "default_two_typos")]
    pub two_typos: u8,
}

fn default_one_typo() -> u8 {
    5
}

fn default_two_typos() -> u8 {
    9
}

impl Default for MinWordSizeForTypos {
    fn default() -> Self {
        Self {
            one_typo: default_one_typo(),
            two_typos: default_two_typos(),
        }
    }
}

/// TypoToleranceSettings controls typo matching behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TypoToleranceSettings {
    #[serde(default = "default_typo_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub min_word_size_for_typos: MinWordSizeForTypos,
    #[serde(default)]
    pub disable_on_words: Vec<String>,
    #[serde(default)]
    pub disable_on_attributes: Vec<String>,
}

fn default_typo_enabled() -> bool {
    true
}

impl Default for TypoToleranceSettings {
    fn default() -> Self {
        Self {
            enabled: default_typo_enabled(),
            min_word_size_for_typos: MinWordSizeForTypos::default(),
            disable_on_words: Vec::new(),
            disable_on_attributes: Vec::new(),
        }
    }
}

/// Embedder represents one provider-specific vectorizer configuration,
/// keyed by embedder name in the settings bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Embedder {
    /// Provider kind, e.g. `openAi`, `huggingFace`, `rest`, `userProvided`.
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bundle_serializes_to_empty_object() {
        let encoded = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(encoded, serde_json::json!({}));
    }

    #[test]
    fn test_bundle_uses_camel_case_keys() {
        let settings = Settings {
            ranking_rules: Some(vec!["words".to_string(), "typo".to_string()]),
            stop_words: Some(vec!["the".to_string()]),
            ..Default::default()
        };
        let encoded = serde_json::to_value(&settings).unwrap();
        assert_eq!(encoded["rankingRules"][1], "typo");
        assert_eq!(encoded["stopWords"][0], "the");
        assert!(encoded.get("stop_words").is_none());
    }

    #[test]
    fn test_distinct_attribute_explicit_clear() {
        let settings = Settings {
            distinct_attribute: Some(None),
            ..Default::default()
        };
        let encoded = serde_json::to_value(&settings).unwrap();
        assert_eq!(encoded["distinctAttribute"], serde_json::Value::Null);
    }

    #[test]
    fn test_faceting_defaults_fill_missing_fields() {
        let faceting: FacetingSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(faceting.max_values_per_facet, 100);
        assert!(faceting.sort_facet_values_by.is_empty());
    }

    #[test]
    fn test_typo_tolerance_roundtrip() {
        let raw = r#"{
            "enabled": true,
            "minWordSizeForTypos": {"oneTypo": 4, "twoTypos": 8},
            "disableOnWords": ["sku"],
            "disableOnAttributes": []
        }"#;
        let typo: TypoToleranceSettings = serde_json::from_str(raw).unwrap();
        assert_eq!(typo.min_word_size_for_typos.one_typo, 4);
        let back = serde_json::to_value(&typo).unwrap();
        assert_eq!(back["minWordSizeForTypos"]["twoTypos"], 8);
    }

    #[test]
    fn test_embedder_omits_unset_provider_fields() {
        let embedder = Embedder {
            source: "openAi".to_string(),
            model: Some("text-embedding-3-small".to_string()),
            ..Default::default()
        };
        let encoded = serde_json::to_value(&embedder).unwrap();
        assert_eq!(encoded["source"], "openAi");
        assert!(encoded.get("apiKey").is_none());
        assert!(encoded.get("dimensions").is_none());
    }
}
