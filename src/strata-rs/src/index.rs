use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::transport::{Transport, CONTENT_TYPE_CSV, CONTENT_TYPE_NDJSON};
use strata_core::models::{DocumentsQuery, DocumentsResults, IndexMeta, IndexStats};
use strata_core::search::{FacetSearchQuery, FacetSearchResults, SearchQuery, SearchResults};
use strata_core::task::TaskInfo;

/// Handle on one index of the remote service.
///
/// The metadata fields are a snapshot: they refresh only on an explicit
/// [`Index::fetch_info`], never behind the caller's back. The transport is
/// handed over at construction; an `Index` owns no hidden sub-clients.
#[derive(Debug, Clone)]
pub struct Index {
    transport: Transport,
    pub uid: String,
    pub primary_key: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndexUpdateRequest<'a> {
    primary_key: Option<&'a str>,
}

impl Index {
    pub(crate) fn new(transport: Transport, uid: String) -> Self {
        Self {
            transport,
            uid,
            primary_key: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub(crate) fn transport(&self) -> &Transport {
        &self.transport
    }

    pub(crate) fn path(&self, suffix: &str) -> String {
        format!("/indexes/{}{}", self.uid, suffix)
    }

    /// Refresh the metadata snapshot from the server.
    pub async fn fetch_info(&mut self) -> Result<()> {
        let meta: IndexMeta = self.transport.execute(self.transport.get(&self.path(""))).await?;
        self.primary_key = meta.primary_key;
        self.created_at = meta.created_at;
        self.updated_at = meta.updated_at;
        Ok(())
    }

    /// Enqueue a primary key change.
    pub async fn update(&self, primary_key: Option<&str>) -> Result<TaskInfo> {
        let body = IndexUpdateRequest { primary_key };
        self.transport
            .execute(self.transport.patch(&self.path("")).json(&body))
            .await
    }

    /// Enqueue deletion of this index.
    pub async fn delete(&self) -> Result<TaskInfo> {
        self.transport.execute(self.transport.delete(&self.path(""))).await
    }

    /// Per-index statistics.
    pub async fn stats(&self) -> Result<IndexStats> {
        self.transport
            .execute(self.transport.get(&self.path("/stats")))
            .await
    }

    // ------------------------------------------------------------------
    // Documents
    // ------------------------------------------------------------------

    /// Fetch one document by primary key value, optionally restricted to
    /// the given fields.
    pub async fn get_document<T: DeserializeOwned>(
        &self,
        id: &str,
        fields: Option<&[&str]>,
    ) -> Result<T> {
        non_empty_id(id)?;
        let mut builder = self.transport.get(&self.path(&format!("/documents/{id}")));
        if let Some(fields) = fields {
            builder = builder.query(&[("fields", fields.join(","))]);
        }
        self.transport.execute(builder).await
    }

    /// List documents, paginated.
    pub async fn get_documents<T: DeserializeOwned>(
        &self,
        query: &DocumentsQuery,
    ) -> Result<DocumentsResults<T>> {
        self.transport
            .execute(self.transport.get(&self.path("/documents")).query(query))
            .await
    }

    /// Enqueue an add-or-replace of the given documents.
    pub async fn add_documents<T: Serialize>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        self.send_json_documents(Method::POST, documents, primary_key)
            .await
    }

    /// Enqueue an add-or-update: existing documents are merged field by
    /// field instead of replaced.
    pub async fn update_documents<T: Serialize>(
        &self,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        self.send_json_documents(Method::PUT, documents, primary_key)
            .await
    }

    /// Enqueue an add-or-replace of a newline-delimited JSON payload.
    pub async fn add_documents_ndjson(
        &self,
        payload: &str,
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        self.send_raw_documents(Method::POST, CONTENT_TYPE_NDJSON, payload, primary_key, None)
            .await
    }

    /// Enqueue an add-or-update of a newline-delimited JSON payload.
    pub async fn update_documents_ndjson(
        &self,
        payload: &str,
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        self.send_raw_documents(Method::PUT, CONTENT_TYPE_NDJSON, payload, primary_key, None)
            .await
    }

    /// Enqueue an add-or-replace of a CSV payload. The delimiter defaults
    /// to a comma and must be a single ASCII character.
    pub async fn add_documents_csv(
        &self,
        payload: &str,
        primary_key: Option<&str>,
        delimiter: Option<char>,
    ) -> Result<TaskInfo> {
        self.send_raw_documents(Method::POST, CONTENT_TYPE_CSV, payload, primary_key, delimiter)
            .await
    }

    /// Enqueue an add-or-update of a CSV payload.
    pub async fn update_documents_csv(
        &self,
        payload: &str,
        primary_key: Option<&str>,
        delimiter: Option<char>,
    ) -> Result<TaskInfo> {
        self.send_raw_documents(Method::PUT, CONTENT_TYPE_CSV, payload, primary_key, delimiter)
            .await
    }

    /// Enqueue deletion of one document. An empty id is rejected locally,
    /// before any request is sent.
    pub async fn delete_document(&self, id: &str) -> Result<TaskInfo> {
        non_empty_id(id)?;
        self.transport
            .execute(self.transport.delete(&self.path(&format!("/documents/{id}"))))
            .await
    }

    /// Enqueue deletion of the documents with the given primary key values.
    pub async fn delete_documents<T: Serialize>(&self, ids: &[T]) -> Result<TaskInfo> {
        self.transport
            .execute(
                self.transport
                    .post(&self.path("/documents/delete-batch"))
                    .json(&ids),
            )
            .await
    }

    /// Enqueue deletion of every document in the index.
    pub async fn delete_all_documents(&self) -> Result<TaskInfo> {
        self.transport
            .execute(self.transport.delete(&self.path("/documents")))
            .await
    }

    // ------------------------------------------------------------------
    // Batch ingestion
    // ------------------------------------------------------------------

    /// Add-or-replace documents in chunks of `batch_size`, one request per
    /// chunk, issued strictly in input order. Each chunk enqueues its own
    /// independent task; one chunk failing server-side does not affect the
    /// others.
    pub async fn add_documents_in_batches<T: Serialize>(
        &self,
        documents: &[T],
        batch_size: usize,
        primary_key: Option<&str>,
    ) -> Result<Vec<TaskInfo>> {
        self.json_documents_in_batches(Method::POST, documents, batch_size, primary_key)
            .await
    }

    /// Add-or-update documents in chunks of `batch_size`.
    pub async fn update_documents_in_batches<T: Serialize>(
        &self,
        documents: &[T],
        batch_size: usize,
        primary_key: Option<&str>,
    ) -> Result<Vec<TaskInfo>> {
        self.json_documents_in_batches(Method::PUT, documents, batch_size, primary_key)
            .await
    }

    /// Add-or-replace an NDJSON payload in chunks of `batch_size` records.
    pub async fn add_documents_ndjson_in_batches(
        &self,
        payload: &str,
        batch_size: usize,
        primary_key: Option<&str>,
    ) -> Result<Vec<TaskInfo>> {
        self.ndjson_documents_in_batches(Method::POST, payload, batch_size, primary_key)
            .await
    }

    /// Add-or-update an NDJSON payload in chunks of `batch_size` records.
    pub async fn update_documents_ndjson_in_batches(
        &self,
        payload: &str,
        batch_size: usize,
        primary_key: Option<&str>,
    ) -> Result<Vec<TaskInfo>> {
        self.ndjson_documents_in_batches(Method::PUT, payload, batch_size, primary_key)
            .await
    }

    /// Add-or-replace a CSV payload in chunks of `batch_size` data rows.
    /// Every chunk re-emits the header row, so each request is a complete
    /// CSV document.
    pub async fn add_documents_csv_in_batches(
        &self,
        payload: &str,
        batch_size: usize,
        primary_key: Option<&str>,
        delimiter: Option<char>,
    ) -> Result<Vec<TaskInfo>> {
        self.csv_documents_in_batches(Method::POST, payload, batch_size, primary_key, delimiter)
            .await
    }

    /// Add-or-update a CSV payload in chunks of `batch_size` data rows.
    pub async fn update_documents_csv_in_batches(
        &self,
        payload: &str,
        batch_size: usize,
        primary_key: Option<&str>,
        delimiter: Option<char>,
    ) -> Result<Vec<TaskInfo>> {
        self.csv_documents_in_batches(Method::PUT, payload, batch_size, primary_key, delimiter)
            .await
    }

    // ------------------------------------------------------------------
    // Search
    // ------------------------------------------------------------------

    /// Run a search. The decoded results expose a normalized hit count via
    /// [`SearchResults::hit_count`] regardless of pagination mode.
    pub async fn search<T: DeserializeOwned>(
        &self,
        query: &SearchQuery,
    ) -> Result<SearchResults<T>> {
        self.transport
            .execute(self.transport.post(&self.path("/search")).json(query))
            .await
    }

    /// Search the values of one facet.
    pub async fn facet_search(&self, query: &FacetSearchQuery) -> Result<FacetSearchResults> {
        if query.facet_name.is_empty() {
            return Err(Error::InvalidRequest(
                "facet name must not be empty".to_string(),
            ));
        }
        self.transport
            .execute(self.transport.post(&self.path("/facet-search")).json(query))
            .await
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn send_json_documents<T: Serialize>(
        &self,
        method: Method,
        documents: &[T],
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        let builder = self
            .transport
            .request(method, &self.path("/documents"))
            .query(&ingest_query(primary_key, None))
            .json(&documents);
        self.transport.execute(builder).await
    }

    async fn send_raw_documents(
        &self,
        method: Method,
        content_type: &'static str,
        payload: &str,
        primary_key: Option<&str>,
        delimiter: Option<char>,
    ) -> Result<TaskInfo> {
        if let Some(d) = delimiter {
            if !d.is_ascii() {
                return Err(Error::InvalidRequest(format!(
                    "CSV delimiter must be a single ASCII character, got `{d}`"
                )));
            }
        }
        let builder = self
            .transport
            .request(method, &self.path("/documents"))
            .query(&ingest_query(primary_key, delimiter))
            .header(CONTENT_TYPE, content_type)
            .body(payload.to_string());
        self.transport.execute(builder).await
    }

    async fn json_documents_in_batches<T: Serialize>(
        &self,
        method: Method,
        documents: &[T],
        batch_size: usize,
        primary_key: Option<&str>,
    ) -> Result<Vec<TaskInfo>> {
        non_zero_batch(batch_size)?;
        let mut tasks = Vec::with_capacity(documents.len().div_ceil(batch_size));
        for chunk in documents.chunks(batch_size) {
            let task = self
                .send_json_documents(method.clone(), chunk, primary_key)
                .await?;
            tasks.push(task);
        }
        debug!(index = %self.uid, batches = tasks.len(), "batched document ingestion enqueued");
        Ok(tasks)
    }

    async fn ndjson_documents_in_batches(
        &self,
        method: Method,
        payload: &str,
        batch_size: usize,
        primary_key: Option<&str>,
    ) -> Result<Vec<TaskInfo>> {
        non_zero_batch(batch_size)?;
        let lines: Vec<&str> = payload.lines().filter(|l| !l.trim().is_empty()).collect();
        let mut tasks = Vec::with_capacity(lines.len().div_ceil(batch_size));
        for chunk in lines.chunks(batch_size) {
            let body = chunk.join("\n");
            let task = self
                .send_raw_documents(
                    method.clone(),
                    CONTENT_TYPE_NDJSON,
                    &body,
                    primary_key,
                    None,
                )
                .await?;
            tasks.push(task);
        }
        Ok(tasks)
    }

    async fn csv_documents_in_batches(
        &self,
        method: Method,
        payload: &str,
        batch_size: usize,
        primary_key: Option<&str>,
        delimiter: Option<char>,
    ) -> Result<Vec<TaskInfo>> {
        non_zero_batch(batch_size)?;
        let chunks = split_csv(payload, batch_size, delimiter)?;
        let mut tasks = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let task = self
                .send_raw_documents(method.clone(), CONTENT_TYPE_CSV, &chunk, primary_key, delimiter)
                .await?;
            tasks.push(task);
        }
        Ok(tasks)
    }
}

fn non_empty_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(Error::InvalidRequest(
            "document id must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn non_zero_batch(batch_size: usize) -> Result<()> {
    if batch_size == 0 {
        return Err(Error::InvalidRequest(
            "batch size must be at least 1".to_string(),
        ));
    }
    Ok(())
}

fn ingest_query(primary_key: Option<&str>, delimiter: Option<char>) -> Vec<(&'static str, String)> {
    let mut query = Vec::new();
    if let Some(pk) = primary_key {
        query.push(("primaryKey", pk.to_string()));
    }
    if let Some(d) = delimiter {
        query.push(("csvDelimiter", d.to_string()));
    }
    query
}

/// Split a CSV payload into complete sub-documents of at most `batch_size`
/// data rows each, every one prefixed with the original header row. Records
/// are split on parsed record boundaries, so quoted fields containing
/// newlines stay intact.
fn split_csv(payload: &str, batch_size: usize, delimiter: Option<char>) -> Result<Vec<String>> {
    let delimiter = delimiter.unwrap_or(',') as u8;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(payload.as_bytes());
    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Ok(Vec::new());
    }
    let records = reader
        .records()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut chunks = Vec::with_capacity(records.len().div_ceil(batch_size));
    for batch in records.chunks(batch_size) {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(Vec::new());
        writer.write_record(&headers)?;
        for record in batch {
            writer.write_record(record)?;
        }
        let bytes = writer.into_inner().map_err(|e| Error::Io(e.into_error()))?;
        // The writer only ever emitted valid UTF-8.
        chunks.push(String::from_utf8_lossy(&bytes).into_owned());
    }
    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::Client;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task_info_json(uid: u32) -> serde_json::Value {
        serde_json::json!({
            "taskUid": uid,
            "indexUid": "movies",
            "status": "enqueued",
            "type": "documentAdditionOrUpdate",
            "enqueuedAt": "2024-05-01T12:00:00Z"
        })
    }

    async fn mount_sequential_tasks(server: &MockServer, m: &str, p: &str, uids: &[u32]) {
        for &uid in uids {
            Mock::given(method(m))
                .and(path(p))
                .respond_with(ResponseTemplate::new(202).set_body_json(task_info_json(uid)))
                .up_to_n_times(1)
                .mount(server)
                .await;
        }
    }

    #[tokio::test]
    async fn test_search_posts_query_and_normalizes_hit_count() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/movies/search"))
            .and(body_json(serde_json::json!({"q": "matrix", "limit": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "hits": [{"id": 1, "title": "The Matrix"}],
                "query": "matrix",
                "processingTimeMs": 3,
                "offset": 0,
                "limit": 5,
                "estimatedTotalHits": 12
            })))
            .mount(&server)
            .await;

        let index = Client::new(server.uri(), None).index("movies");
        let query = SearchQuery {
            q: Some("matrix".to_string()),
            limit: Some(5),
            ..Default::default()
        };
        let results: SearchResults = index.search(&query).await.unwrap();
        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.hit_count(), Some(12));
    }

    #[tokio::test]
    async fn test_add_documents_forwards_primary_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/movies/documents"))
            .and(query_param("primaryKey", "id"))
            .respond_with(ResponseTemplate::new(202).set_body_json(task_info_json(1)))
            .mount(&server)
            .await;

        let index = Client::new(server.uri(), None).index("movies");
        let docs = vec![serde_json::json!({"id": 1, "title": "Carol"})];
        let info = index.add_documents(&docs, Some("id")).await.unwrap();
        assert_eq!(info.task_uid, 1);
    }

    #[tokio::test]
    async fn test_add_documents_in_batches_chunks_in_order() {
        let server = MockServer::start().await;
        mount_sequential_tasks(&server, "POST", "/indexes/movies/documents", &[1, 2, 3]).await;

        let index = Client::new(server.uri(), None).index("movies");
        let docs: Vec<serde_json::Value> = (0..5)
            .map(|i| serde_json::json!({"id": i}))
            .collect();
        let tasks = index
            .add_documents_in_batches(&docs, 2, Some("id"))
            .await
            .unwrap();

        // ceil(5/2) requests, task uids in response order
        let uids: Vec<u32> = tasks.iter().map(|t| t.task_uid).collect();
        assert_eq!(uids, vec![1, 2, 3]);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
        let bodies: Vec<Vec<serde_json::Value>> = requests
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect();
        assert_eq!(bodies[0].len(), 2);
        assert_eq!(bodies[1].len(), 2);
        assert_eq!(bodies[2].len(), 1);
        assert_eq!(bodies[0][0]["id"], 0);
        assert_eq!(bodies[2][0]["id"], 4);
    }

    #[tokio::test]
    async fn test_batch_size_zero_is_rejected_locally() {
        let server = MockServer::start().await;
        let index = Client::new(server.uri(), None).index("movies");
        let docs = vec![serde_json::json!({"id": 1})];
        let err = index
            .add_documents_in_batches(&docs, 0, None)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_csv_batches_repeat_header_row() {
        let server = MockServer::start().await;
        mount_sequential_tasks(&server, "POST", "/indexes/movies/documents", &[1, 2, 3]).await;

        let csv_text = "id,title\n1,Carol\n2,Wonderland\n3,Life of Pi\n4,Mad Max\n5,Moana\n";
        let index = Client::new(server.uri(), None).index("movies");
        let tasks = index
            .add_documents_csv_in_batches(csv_text, 2, None, None)
            .await
            .unwrap();
        assert_eq!(tasks.len(), 3);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 3);
        let bodies: Vec<String> = requests
            .iter()
            .map(|r| String::from_utf8(r.body.clone()).unwrap())
            .collect();
        assert_eq!(bodies[0], "id,title\n1,Carol\n2,Wonderland\n");
        assert_eq!(bodies[1], "id,title\n3,Life of Pi\n4,Mad Max\n");
        assert_eq!(bodies[2], "id,title\n5,Moana\n");
        assert_eq!(
            requests[0].headers.get("content-type").unwrap().to_str().unwrap(),
            "text/csv"
        );
    }

    #[test]
    fn test_csv_batch_keeps_quoted_newline_in_one_chunk() {
        let chunks = split_csv("id,notes\n1,\"line one\nline two\"\n2,plain\n", 1, None).unwrap();
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "id,notes\n1,\"line one\nline two\"\n");
        assert_eq!(chunks[1], "id,notes\n2,plain\n");
    }

    #[tokio::test]
    async fn test_csv_custom_delimiter_forwarded_as_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/movies/documents"))
            .and(query_param("csvDelimiter", ";"))
            .respond_with(ResponseTemplate::new(202).set_body_json(task_info_json(1)))
            .mount(&server)
            .await;

        let index = Client::new(server.uri(), None).index("movies");
        let tasks = index
            .add_documents_csv_in_batches("id;title\n1;Carol\n", 10, None, Some(';'))
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_ndjson_batches_skip_blank_lines() {
        let server = MockServer::start().await;
        mount_sequential_tasks(&server, "PUT", "/indexes/movies/documents", &[1, 2]).await;

        let payload = "{\"id\":1}\n\n{\"id\":2}\n{\"id\":3}\n";
        let index = Client::new(server.uri(), None).index("movies");
        let tasks = index
            .update_documents_ndjson_in_batches(payload, 2, None)
            .await
            .unwrap();
        assert_eq!(tasks.len(), 2);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(
            String::from_utf8(requests[0].body.clone()).unwrap(),
            "{\"id\":1}\n{\"id\":2}"
        );
        assert_eq!(
            String::from_utf8(requests[1].body.clone()).unwrap(),
            "{\"id\":3}"
        );
        assert_eq!(
            requests[0].headers.get("content-type").unwrap().to_str().unwrap(),
            "application/x-ndjson"
        );
    }

    #[tokio::test]
    async fn test_delete_document_rejects_empty_id_locally() {
        let server = MockServer::start().await;
        let index = Client::new(server.uri(), None).index("movies");
        let err = index.delete_document("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        let err = index.delete_document("   ").await.unwrap_err();
        assert!(matches!(err, Error::InvalidRequest(_)));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_document_hits_document_path() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/indexes/movies/documents/25684"))
            .respond_with(ResponseTemplate::new(202).set_body_json(task_info_json(8)))
            .mount(&server)
            .await;

        let index = Client::new(server.uri(), None).index("movies");
        let info = index.delete_document("25684").await.unwrap();
        assert_eq!(info.task_uid, 8);
    }

    #[tokio::test]
    async fn test_delete_documents_posts_id_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/movies/documents/delete-batch"))
            .and(body_json(serde_json::json!([1, 5, 9])))
            .respond_with(ResponseTemplate::new(202).set_body_json(task_info_json(4)))
            .mount(&server)
            .await;

        let index = Client::new(server.uri(), None).index("movies");
        let info = index.delete_documents(&[1, 5, 9]).await.unwrap();
        assert_eq!(info.task_uid, 4);
    }

    #[tokio::test]
    async fn test_update_patches_primary_key() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/indexes/movies"))
            .and(body_json(serde_json::json!({"primaryKey": "ref"})))
            .respond_with(ResponseTemplate::new(202).set_body_json(task_info_json(2)))
            .mount(&server)
            .await;

        let index = Client::new(server.uri(), None).index("movies");
        let info = index.update(Some("ref")).await.unwrap();
        assert_eq!(info.task_uid, 2);
    }

    #[tokio::test]
    async fn test_facet_search_posts_facet_query() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/indexes/movies/facet-search"))
            .and(body_json(serde_json::json!({
                "facetName": "genre",
                "facetQuery": "dra"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "facetHits": [{"value": "drama", "count": 12}],
                "facetQuery": "dra",
                "processingTimeMs": 1
            })))
            .mount(&server)
            .await;

        let index = Client::new(server.uri(), None).index("movies");
        let results = index
            .facet_search(&FacetSearchQuery {
                facet_name: "genre".to_string(),
                facet_query: Some("dra".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(results.facet_hits[0].value, "drama");
        assert_eq!(results.facet_hits[0].count, 12);
    }

    #[tokio::test]
    async fn test_fetch_info_refreshes_snapshot() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/indexes/movies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "uid": "movies",
                "primaryKey": "id",
                "createdAt": "2024-05-01T12:00:00Z",
                "updatedAt": "2024-05-02T08:30:00Z"
            })))
            .mount(&server)
            .await;

        let mut index = Client::new(server.uri(), None).index("movies");
        assert!(index.primary_key.is_none());
        index.fetch_info().await.unwrap();
        assert_eq!(index.primary_key.as_deref(), Some("id"));
        assert!(index.created_at.is_some());
    }
}
