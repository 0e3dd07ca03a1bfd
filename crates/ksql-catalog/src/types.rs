//! Wire types for the KSQL REST API.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which catalog listing to request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Streams,
    Tables,
}

impl ListKind {
    /// The keyword used in `LIST <kind>;`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Streams => "STREAMS",
            Self::Tables => "TABLES",
        }
    }

    /// The statement that lists objects of this kind.
    pub fn statement(&self) -> String {
        format!("LIST {};", self.as_str())
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body posted to the `/ksql` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KsqlRequest {
    pub ksql: String,
    #[serde(rename = "streamsProperties", skip_serializing_if = "Option::is_none")]
    pub streams_properties: Option<StreamsProperties>,
}

impl KsqlRequest {
    /// A bare statement without streams properties (used for LIST and DESCRIBE).
    pub fn statement(ksql: impl Into<String>) -> Self {
        Self {
            ksql: ksql.into(),
            streams_properties: None,
        }
    }

    /// A statement executed with the default [`StreamsProperties`].
    pub fn execution(ksql: impl Into<String>) -> Self {
        Self {
            ksql: ksql.into(),
            streams_properties: Some(StreamsProperties::default()),
        }
    }
}

/// Properties sent with every executed statement: one sink partition and
/// consumption from the earliest offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StreamsProperties {
    #[serde(rename = "ksql.sink.partitions")]
    pub sink_partitions: String,
    #[serde(rename = "ksql.streams.auto.offset.reset")]
    pub auto_offset_reset: String,
}

impl Default for StreamsProperties {
    fn default() -> Self {
        Self {
            sink_partitions: "1".to_string(),
            auto_offset_reset: "earliest".to_string(),
        }
    }
}

/// One element of a `DESCRIBE` response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionResult {
    #[serde(default)]
    pub statement_text: String,
    pub source_description: SourceDescription,
}

/// Description of a stream or table as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceDescription {
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub replication: i64,
    pub partitions: i64,
    pub read_queries: Vec<QueryInfo>,
    pub write_queries: Vec<QueryInfo>,
    pub fields: Vec<Field>,
}

/// A persistent query reading from or writing to a source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryInfo {
    pub id: String,
    pub sinks: Vec<String>,
    pub query_string: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Field {
    pub name: String,
    pub schema: FieldSchema,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldSchema {
    #[serde(rename = "type")]
    pub field_type: String,
}

/// Response of `GET /info`.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerInfoResponse {
    #[serde(rename = "KsqlServerInfo")]
    pub ksql_server_info: KsqlServerInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KsqlServerInfo {
    pub version: String,
    pub kafka_cluster_id: String,
    pub ksql_service_id: String,
}
