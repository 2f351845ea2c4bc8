use reqwest::{Client as HttpClient, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{Error, Result};
use strata_core::ApiErrorBody;

pub(crate) const CONTENT_TYPE_NDJSON: &str = "application/x-ndjson";
pub(crate) const CONTENT_TYPE_CSV: &str = "text/csv";

/// Transport issues authenticated requests against the configured base URL.
///
/// One request per call, no retries, no response caching. Non-2xx responses
/// become [`Error::Api`]; failures below HTTP (DNS, refused connection,
/// request timeout) surface as [`Error::Http`].
#[derive(Debug, Clone)]
pub(crate) struct Transport {
    base_url: String,
    api_key: Option<String>,
    http: HttpClient,
}

impl Transport {
    pub(crate) fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        http: HttpClient,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            api_key,
            http,
        }
    }

    /// Start a request against `{base_url}{path}` with the API key attached.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        builder
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub(crate) fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub(crate) fn patch(&self, path: &str) -> RequestBuilder {
        self.request(Method::PATCH, path)
    }

    pub(crate) fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    /// Send a built request and decode the JSON response.
    pub(crate) async fn execute<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R> {
        let request = builder.build()?;
        let method = request.method().clone();
        let url = request.url().clone();

        let response = self.http.execute(request).await?;
        let status = response.status();
        debug!(%method, %url, status = status.as_u16(), "request completed");

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let body = serde_json::from_str::<ApiErrorBody>(&text)
                .unwrap_or_else(|_| ApiErrorBody::from_raw(text));
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn transport(uri: &str, key: Option<&str>) -> Transport {
        Transport::new(uri, key.map(String::from), HttpClient::new())
    }

    #[tokio::test]
    async fn test_attaches_bearer_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .and(header("Authorization", "Bearer masterKey"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "available"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let t = transport(&server.uri(), Some("masterKey"));
        let health: strata_core::Health = t.execute(t.get("/health")).await.unwrap();
        assert_eq!(health.status, "available");
    }

    #[tokio::test]
    async fn test_no_auth_header_without_key() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "available"
            })))
            .mount(&server)
            .await;

        let t = transport(&server.uri(), None);
        let received: strata_core::Health = t.execute(t.get("/health")).await.unwrap();
        assert_eq!(received.status, "available");
        let requests = server.received_requests().await.unwrap();
        assert!(!requests[0].headers.contains_key("authorization"));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_base_url_is_normalized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "available"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let t = transport(&format!("{}/", server.uri()), None);
        let _: strata_core::Health = t.execute(t.get("/health")).await.unwrap();
    }

    #[tokio::test]
    async fn test_non_2xx_decodes_structured_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indexes/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "message": "Index `missing` not found.",
                "code": "index_not_found",
                "type": "invalid_request",
                "link": "https://docs.strata.dev/errors#index_not_found"
            })))
            .mount(&server)
            .await;

        let t = transport(&server.uri(), None);
        let err = t
            .execute::<strata_core::IndexMeta>(t.get("/indexes/missing"))
            .await
            .unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body.code, "index_not_found");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unstructured_error_body_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let t = transport(&server.uri(), None);
        let err = t
            .execute::<strata_core::Health>(t.get("/health"))
            .await
            .unwrap_err();
        match err {
            Error::Api { status, body } => {
                assert_eq!(status, 502);
                assert_eq!(body.message, "bad gateway");
                assert_eq!(body.code, "unknown");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // Nothing listens on this port.
        let t = transport("http://127.0.0.1:1", None);
        let err = t
            .execute::<strata_core::Health>(t.get("/health"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
