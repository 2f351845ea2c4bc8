use serde::{Deserialize, Serialize};

/// ApiErrorBody represents the structured error payload the service attaches
/// to non-2xx responses and to failed tasks.
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
#[error("{message} ({code})")]
pub struct ApiErrorBody {
    pub message: String,
    pub code: String,
    #[serde(rename = "type")]
    pub error_type: String,
    #[serde(default)]
    pub link: String,
}

impl ApiErrorBody {
    /// Build an error body for a response that carried no decodable JSON error.
    pub fn from_raw(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: "unknown".to_string(),
            error_type: "unknown".to_string(),
            link: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_decodes_wire_shape() {
        let raw = r#"{
            "message": "Index `movies` not found.",
            "code": "index_not_found",
            "type": "invalid_request",
            "link": "https://docs.strata.dev/errors#index_not_found"
        }"#;
        let body: ApiErrorBody = serde_json::from_str(raw).unwrap();
        assert_eq!(body.code, "index_not_found");
        assert_eq!(body.error_type, "invalid_request");
        assert_eq!(body.to_string(), "Index `movies` not found. (index_not_found)");
    }

    #[test]
    fn test_error_body_tolerates_missing_link() {
        let body: ApiErrorBody =
            serde_json::from_str(r#"{"message":"m","code":"c","type":"t"}"#).unwrap();
        assert!(body.link.is_empty());
    }
}
