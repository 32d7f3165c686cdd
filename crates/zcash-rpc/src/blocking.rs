//! Blocking RPC clients.
//!
//! Same request framing and response classification as the async clients,
//! over `reqwest::blocking`. Each call blocks the current thread for one
//! round-trip. Do not use these from inside an async runtime.

use crate::client::{check_status, http_error, parse_response, JsonRpcRequest, RpcConfig};
use crate::error::RpcError;
use crate::node::{decode_payload, methods, send_params, BlockchainInfo};
use reqwest::blocking::Client;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Blocking RPC client for a zcashd-compatible JSON-RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: Client,
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

        // The blocking builder applies a 30s default; only an explicit
        // config timeout should bound a call.
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RpcError::invalid_config(format!("failed to create HTTP client: {}", e)))?;

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
    pub fn call(&self, method: &str, params: Option<&[Value]>) -> Result<Value, RpcError> {
        let body = JsonRpcRequest::new(method, params).to_bytes()?;
        let url = self.url();
        log::debug!("POST {} method={}", url, method);

        let resp = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .body(body)
            .send()
            .map_err(|e| http_error(method, url, e))?;

        let status = resp.status();
        log::debug!("{} returned HTTP {}", method, status);
        check_status(method, url, status)?;

        let bytes = resp.bytes().map_err(|e| http_error(method, url, e))?;
        parse_response(method, &bytes)
    }
}

/// Blocking counterpart of [`crate::NodeRpc`].
#[derive(Debug, Clone)]
pub struct NodeRpc {
    client: RpcClient,
}

impl NodeRpc {
    /// Create a node RPC client. Fails if any parameter is empty.
    pub fn new(url: &str, username: &str, password: &str) -> Result<Self, RpcError> {
        Ok(Self {
            client: RpcClient::new(url, username, password)?,
        })
    }

    /// Create with full configuration.
    pub fn with_config(config: RpcConfig) -> Result<Self, RpcError> {
        Ok(Self {
            client: RpcClient::with_config(config)?,
        })
    }

    /// Get the underlying RPC client for custom calls.
    pub fn client(&self) -> &RpcClient {
        &self.client
    }

    /// Get chain state as a plain map.
    pub fn get_blockchain_info(&self) -> Result<BlockchainInfo, RpcError> {
        let val = self.client.call(methods::GET_BLOCKCHAIN_INFO, None)?;
        decode_payload(methods::GET_BLOCKCHAIN_INFO, val)
    }

    /// Get the wallet's total transparent balance in ZEC.
    pub fn get_balance(&self) -> Result<f64, RpcError> {
        let val = self.client.call(methods::GET_BALANCE, None)?;
        decode_payload(methods::GET_BALANCE, val)
    }

    /// Send `amount` ZEC from `from` to `to`. Returns the transaction id.
    pub fn send_to_address(&self, from: &str, to: &str, amount: f64) -> Result<String, RpcError> {
        let params = send_params(from, to, amount)?;
        let val = self
            .client
            .call(methods::SEND_TO_ADDRESS, Some(&params[..]))?;
        decode_payload(methods::SEND_TO_ADDRESS, val)
    }
}
