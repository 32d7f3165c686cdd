//! RPC error types.

use reqwest::StatusCode;
use thiserror::Error;

/// Error codes returned by zcashd in the JSON-RPC `error.code` field.
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;

    pub const MISC_ERROR: i64 = -1;
    pub const TYPE_ERROR: i64 = -3;
    pub const INVALID_ADDRESS_OR_KEY: i64 = -5;
    pub const WALLET_INSUFFICIENT_FUNDS: i64 = -6;
    pub const INVALID_PARAMETER: i64 = -8;
    pub const IN_WARMUP: i64 = -28;
}

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid RPC client parameters: {reason}")]
    InvalidConfig { reason: String },

    #[error("failed to encode request for {method}: {source}")]
    Encoding {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP error calling {method} at {url}: {source}")]
    Http {
        method: String,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("RPC server returned HTTP status {status} for {method} at {url}")]
    HttpStatus {
        method: String,
        url: String,
        status: StatusCode,
    },

    #[error("malformed response to {method}: {source}")]
    Decode {
        method: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("RPC error {code}: {message}")]
    Rpc {
        method: String,
        code: i64,
        message: String,
    },

    #[error("unexpected result for {method}: {source}")]
    Payload {
        method: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RpcError {
    /// Whether retrying the same call could plausibly succeed.
    ///
    /// Nothing in this crate retries; this is for callers that do.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } => true,
            Self::HttpStatus { status, .. } => status.is_server_error(),
            Self::Rpc { code, .. } => *code == codes::IN_WARMUP,
            _ => false,
        }
    }

    /// The node-reported error code, if this is a protocol-level error.
    pub fn rpc_code(&self) -> Option<i64> {
        match self {
            Self::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub(crate) fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}
