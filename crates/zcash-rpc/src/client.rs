//! Base JSON-RPC 1.0 HTTP client.
//!
//! Provides `call()` for zcashd-style JSON-RPC methods: one POST per call to
//! the configured URL, Basic auth, no retries. The response is classified into
//! a result payload, a node-reported error, or a transport failure.

use crate::defaults;
use crate::error::RpcError;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Protocol version sent in every request envelope.
pub const JSONRPC_VERSION: &str = "1.0";

/// Id sent with every request. Calls are independent round-trips, so
/// responses are never matched by id.
pub const REQUEST_ID: u64 = 1;

/// JSON-RPC 1.0 request envelope. Field order is the wire order.
#[derive(Debug, Serialize)]
pub(crate) struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Option<&'a [Value]>,
    id: u64,
}

impl<'a> JsonRpcRequest<'a> {
    pub(crate) fn new(method: &'a str, params: Option<&'a [Value]>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            method,
            params,
            id: REQUEST_ID,
        }
    }

    pub(crate) fn to_bytes(&self) -> Result<Vec<u8>, RpcError> {
        serde_json::to_vec(self).map_err(|source| RpcError::Encoding {
            method: self.method.to_string(),
            source,
        })
    }
}

/// JSON-RPC 1.0 response envelope.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<JsonRpcError>,
    #[serde(default)]
    id: Option<i64>,
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

/// Only an exact 200 counts as success; the body of anything else is ignored.
pub(crate) fn check_status(method: &str, url: &str, status: StatusCode) -> Result<(), RpcError> {
    if status != StatusCode::OK {
        return Err(RpcError::HttpStatus {
            method: method.to_string(),
            url: url.to_string(),
            status,
        });
    }
    Ok(())
}

/// Decode a response body. A non-null `error` wins over any `result`.
pub(crate) fn parse_response(method: &str, body: &[u8]) -> Result<Value, RpcError> {
    let resp: JsonRpcResponse =
        serde_json::from_slice(body).map_err(|source| RpcError::Decode {
            method: method.to_string(),
            source,
        })?;

    log::trace!("{} response id {:?}", method, resp.id);

    if let Some(err) = resp.error {
        return Err(RpcError::Rpc {
            method: method.to_string(),
            code: err.code,
            message: err.message,
        });
    }

    Ok(resp.result)
}

pub(crate) fn http_error(method: &str, url: &str, source: reqwest::Error) -> RpcError {
    RpcError::Http {
        method: method.to_string(),
        url: url.to_string(),
        source,
    }
}

/// Configuration for an RPC client.
#[derive(Clone)]
pub struct RpcConfig {
    /// Endpoint URL (e.g., `http://127.0.0.1:8232`). Requests are posted here as-is.
    pub url: String,
    /// Username for Basic auth.
    pub username: String,
    /// Password for Basic auth.
    pub password: String,
    /// Request timeout. `None` leaves the transport default (no timeout).
    pub timeout: Option<Duration>,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: defaults::RPC_URL.to_string(),
            username: defaults::RPC_USER.to_string(),
            password: defaults::RPC_PASSWORD.to_string(),
            timeout: None,
        }
    }
}

impl fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RpcConfig {
    /// Build a configuration from the three required connection parameters.
    pub fn new(url: &str, username: &str, password: &str) -> Self {
        Self {
            url: url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            timeout: None,
        }
    }

    /// Reject empty fields. The URL format is not checked here; a bad URL
    /// surfaces as a transport error on the first call.
    pub fn validate(&self) -> Result<(), RpcError> {
        let fields = [
            ("url", &self.url),
            ("username", &self.username),
            ("password", &self.password),
        ];
        for (name, value) in fields {
            if value.is_empty() {
                return Err(RpcError::invalid_config(format!("{} is empty", name)));
            }
        }
        Ok(())
    }

    /// Headers sent with every request.
    pub(crate) fn headers(&self) -> Result<HeaderMap, RpcError> {
        let creds = format!("{}:{}", self.username, self.password);
        let encoded = base64::engine::general_purpose::STANDARD.encode(creds);
        let mut auth = HeaderValue::from_str(&format!("Basic {}", encoded))
            .map_err(|e| RpcError::invalid_config(format!("bad credentials: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, auth);
        Ok(headers)
    }
}

/// Async RPC client for a zcashd-compatible JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    config: RpcConfig,
    headers: HeaderMap,
}

impl RpcClient {
    /// Create a client. Fails if any parameter is empty.
    pub fn new(url: &str, username: &str, password: &str) -> Result<Self, RpcError> {
        Self::with_config(RpcConfig::new(url, username, password))
    }

    /// Create a client with full configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        config.validate()?;
        let headers = config.headers()?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            RpcError::invalid_config(format!("failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            config,
            headers,
        })
    }

    /// Get the configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Get the configuration this client was built from.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Call a JSON-RPC method and return its raw `result`.
    ///
    /// `params` of `None` is sent as `null`. A missing or null `result` is
    /// returned as `Value::Null`; decoding it is up to the caller.
    pub async fn call(&self, method: &str, params: Option<&[Value]>) -> Result<Value, RpcError> {
        let body = JsonRpcRequest::new(method, params).to_bytes()?;
        let url = self.url();
        log::debug!("POST {} method={}", url, method);

        let resp = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .await
            .map_err(|e| http_error(method, url, e))?;

        let status = resp.status();
        log::debug!("{} returned HTTP {}", method, status);
        check_status(method, url, status)?;

        let bytes = resp.bytes().await.map_err(|e| http_error(method, url, e))?;
        parse_response(method, &bytes)
    }
}
