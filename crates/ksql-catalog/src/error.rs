//! Error types for KSQL client operations.

/// Errors returned by [`CatalogClient`](crate::CatalogClient) operations.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The request could not be sent or the response body could not be read.
    #[error("Failed to connect to server: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("received status code {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// The request body could not be encoded.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The response body was not the expected JSON shape.
    #[error("Failed to parse response JSON: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        /// Raw response body.
        body: String,
    },

    /// The response held no result objects.
    #[error("missing result in response")]
    EmptyResponse,

    /// A list result had no string `@type` discriminator.
    #[error("missing @type in result")]
    MissingType,

    /// A list result did not carry an array under its `@type` key.
    #[error("result of type {item_type:?} has no {item_type:?} array")]
    MissingItems {
        /// The discriminator value.
        item_type: String,
    },

    /// A describe call returned the wrong number of results.
    #[error("expected {expected} description, got {actual}")]
    UnexpectedResultCount {
        /// Expected number of results.
        expected: usize,
        /// Number of results received.
        actual: usize,
    },
}

impl CatalogError {
    /// Creates a new `Status` error.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }

    /// HTTP status code, when the server produced one.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw response body, when one was received.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } | Self::Decode { body, .. } => Some(body),
            _ => None,
        }
    }
}
