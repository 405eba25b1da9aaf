//! Error types for catalog requests.

/// Errors from the catalog client.
///
/// Every variant carries the logical operation name ("search", "detail",
/// "screenshots", ...) so callers can surface "failed to load X" without
/// inspecting the underlying cause. An empty result set is not an error.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Transport failure or timeout before a response arrived.
    #[error("failed to load {operation}: {source}")]
    Fetch {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response from the upstream API.
    #[error("failed to load {operation}: HTTP {status}: {body}")]
    Api {
        operation: &'static str,
        status: u16,
        body: String,
    },

    /// Response body did not match the expected schema.
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// The logical operation this error occurred in.
    pub fn operation(&self) -> &'static str {
        match self {
            CatalogError::Fetch { operation, .. }
            | CatalogError::Api { operation, .. }
            | CatalogError::Decode { operation, .. } => operation,
        }
    }

    /// Whether a retry could plausibly succeed (transport and server-side
    /// failures). Schema mismatches never retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Fetch { .. } => true,
            CatalogError::Api { status, .. } => *status >= 500 || *status == 429,
            CatalogError::Decode { .. } => false,
        }
    }
}
