use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CatalogError;
use crate::traits::CatalogClient;
use crate::types::{
    DescriptionResult, KsqlRequest, KsqlServerInfo, ListKind, ServerInfoResponse,
    SourceDescription,
};

/// Versioned media type negotiated with the server.
pub const KSQL_MEDIA_TYPE: &str = "application/vnd.ksql.v1+json";
const KSQL_CONTENT_TYPE: &str = "application/vnd.ksql.v1+json; charset=utf-8";

/// HTTP client for a single KSQL server.
pub struct KsqlClient {
    http: reqwest::Client,
    base_url: String,
}

impl KsqlClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_http_client(base_url, reqwest::Client::new())
    }

    pub fn with_http_client(base_url: &str, http: reqwest::Client) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The statement endpoint every request is posted to.
    pub fn ksql_url(&self) -> String {
        format!("{}/ksql", self.base_url)
    }

    async fn post(&self, request: &KsqlRequest) -> Result<String, CatalogError> {
        let body = serde_json::to_vec(request).map_err(CatalogError::Encode)?;
        tracing::trace!(url = %self.ksql_url(), ksql = %request.ksql, "Posting statement");
        let resp = self
            .http
            .post(self.ksql_url())
            .header(CONTENT_TYPE, KSQL_CONTENT_TYPE)
            .header(ACCEPT, KSQL_MEDIA_TYPE)
            .body(body)
            .send()
            .await?;
        handle_response(resp).await
    }

    /// Fetches `GET /info`, used as a liveness probe.
    pub async fn info(&self) -> Result<KsqlServerInfo, CatalogError> {
        let resp = self
            .http
            .get(format!("{}/info", self.base_url))
            .header(ACCEPT, KSQL_MEDIA_TYPE)
            .send()
            .await?;
        let body = handle_response(resp).await?;
        let info: ServerInfoResponse = decode(body)?;
        Ok(info.ksql_server_info)
    }
}

#[async_trait]
impl CatalogClient for KsqlClient {
    async fn list(&self, kind: ListKind) -> Result<Vec<String>, CatalogError> {
        let body = self.post(&KsqlRequest::statement(kind.statement())).await?;
        let results: Vec<Value> = decode(body)?;
        item_names(&results)
    }

    async fn describe(&self, name: &str) -> Result<SourceDescription, CatalogError> {
        let body = self
            .post(&KsqlRequest::statement(format!("DESCRIBE {name};")))
            .await?;
        let mut descriptions: Vec<DescriptionResult> = decode(body)?;
        if descriptions.len() != 1 {
            return Err(CatalogError::UnexpectedResultCount {
                expected: 1,
                actual: descriptions.len(),
            });
        }
        Ok(descriptions.remove(0).source_description)
    }

    async fn execute(&self, statement: &str) -> Result<Vec<Value>, CatalogError> {
        let body = self.post(&KsqlRequest::execution(statement)).await?;
        let results: Vec<Value> = decode(body)?;
        if results.is_empty() {
            return Err(CatalogError::EmptyResponse);
        }
        tracing::info!(results = ?results, "Execute results");
        Ok(results)
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<String, CatalogError> {
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(CatalogError::status(status.as_u16(), body));
    }

    Ok(body)
}

fn decode<T: DeserializeOwned>(body: String) -> Result<T, CatalogError> {
    serde_json::from_str(&body).map_err(|source| CatalogError::Decode { source, body })
}

/// Extracts item names from a `LIST` response.
///
/// The first result's `@type` names the key holding the item array. Each item
/// contributes its `name`, or its `id` when `name` is absent.
pub(crate) fn item_names(results: &[Value]) -> Result<Vec<String>, CatalogError> {
    let result = results.first().ok_or(CatalogError::EmptyResponse)?;
    let item_type = result
        .get("@type")
        .and_then(Value::as_str)
        .ok_or(CatalogError::MissingType)?;
    let items = result
        .get(item_type)
        .and_then(Value::as_array)
        .ok_or_else(|| CatalogError::MissingItems {
            item_type: item_type.to_string(),
        })?;

    Ok(items
        .iter()
        .filter_map(|item| {
            item.get("name")
                .and_then(Value::as_str)
                .or_else(|| item.get("id").and_then(Value::as_str))
        })
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_names_falls_back_to_id() {
        let results = vec![json!({
            "@type": "streams",
            "streams": [{"name": "S1"}, {"id": "S2"}]
        })];
        assert_eq!(item_names(&results).unwrap(), vec!["S1", "S2"]);
    }

    #[test]
    fn test_item_names_skips_items_without_name_or_id() {
        let results = vec![json!({
            "@type": "tables",
            "tables": [{"name": "T1"}, {"format": "JSON"}, {"name": "T2"}]
        })];
        assert_eq!(item_names(&results).unwrap(), vec!["T1", "T2"]);
    }

    #[test]
    fn test_item_names_uses_first_result_only() {
        let results = vec![
            json!({"@type": "streams", "streams": [{"name": "A"}]}),
            json!({"@type": "streams", "streams": [{"name": "B"}]}),
        ];
        assert_eq!(item_names(&results).unwrap(), vec!["A"]);
    }

    #[test]
    fn test_item_names_empty_response() {
        assert!(matches!(item_names(&[]), Err(CatalogError::EmptyResponse)));
    }

    #[test]
    fn test_item_names_missing_type() {
        let results = vec![json!({"streams": []})];
        assert!(matches!(
            item_names(&results),
            Err(CatalogError::MissingType)
        ));

        let results = vec![json!({"@type": 7, "streams": []})];
        assert!(matches!(
            item_names(&results),
            Err(CatalogError::MissingType)
        ));
    }

    #[test]
    fn test_item_names_missing_items() {
        let results = vec![json!({"@type": "streams"})];
        match item_names(&results) {
            Err(CatalogError::MissingItems { item_type }) => assert_eq!(item_type, "streams"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = KsqlClient::new("http://ksql:8088/");
        assert_eq!(client.base_url(), "http://ksql:8088");
        assert_eq!(client.ksql_url(), "http://ksql:8088/ksql");
    }
}
