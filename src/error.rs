//! Node-level error type.

use thiserror::Error;

/// Errors returned while building or dispatching Fusion API requests.
///
/// Nothing is retried: the dispatcher aborts the batch on the first error
/// and hands it to the caller unchanged.
#[derive(Debug, Error)]
pub enum NodeError {
    #[error("unknown resource: '{0}'")]
    UnknownResource(String),

    #[error("unknown operation: '{0}'")]
    UnknownOperation(String),

    /// The operation exists but belongs to another resource.
    #[error("operation '{operation}' is not available on resource '{resource}'")]
    UnsupportedOperation {
        resource: String,
        operation: String,
    },

    /// A required parameter is absent or blank for the given item.
    #[error("item {item}: missing required parameter '{name}'")]
    MissingParameter {
        name: &'static str,
        item: usize,
    },

    #[error("item {item}: parameter '{name}' is not valid JSON: {source}")]
    InvalidJson {
        name: &'static str,
        item: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("item {item}: parameter '{name}' is invalid: {reason}")]
    InvalidParameter {
        name: &'static str,
        item: usize,
        reason: String,
    },

    /// A route template names a placeholder no parameter answers to.
    #[error("route template references unknown placeholder '{{{0}}}'")]
    RouteTemplate(String),

    #[error("no credentials configured for profile '{0}'")]
    MissingCredential(String),

    /// Non-2xx response from the remote service, body kept verbatim.
    #[error("request failed with status {status}: {body}")]
    Http {
        status: u16,
        body: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Failure reported by an injected requester that is not HTTP-backed.
    #[error("requester error: {0}")]
    Requester(String),
}

pub type Result<T> = std::result::Result<T, NodeError>;
