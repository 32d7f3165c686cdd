//! Node RPC client.
//!
//! Typed async methods for the zcashd calls this crate supports: chain info,
//! wallet balance, and sending to an address.

use crate::client::{RpcClient, RpcConfig};
use crate::error::RpcError;
use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde_json::{Map, Number, Value};

/// JSON-RPC method names.
pub mod methods {
    pub const GET_BLOCKCHAIN_INFO: &str = "getblockchaininfo";
    pub const GET_BALANCE: &str = "getbalance";
    pub const SEND_TO_ADDRESS: &str = "sendtoaddress";
}

/// `getblockchaininfo` result. Kept as a plain map; zcashd adds fields
/// between releases.
pub type BlockchainInfo = Map<String, Value>;

/// Decode an opaque `result` into the shape a typed method expects.
pub(crate) fn decode_payload<T: DeserializeOwned>(
    method: &str,
    payload: Value,
) -> Result<T, RpcError> {
    serde_json::from_value(payload).map_err(|source| RpcError::Payload {
        method: method.to_string(),
        source,
    })
}

/// `sendtoaddress` params: `[from, {to: amount}]`.
///
/// NaN and infinite amounts have no JSON encoding and are rejected here,
/// before anything is sent.
pub(crate) fn send_params(from: &str, to: &str, amount: f64) -> Result<[Value; 2], RpcError> {
    let amount = Number::from_f64(amount).ok_or_else(|| RpcError::Encoding {
        method: methods::SEND_TO_ADDRESS.to_string(),
        source: serde_json::Error::custom(format!("amount {} is not a finite number", amount)),
    })?;
    let mut outputs = Map::new();
    outputs.insert(to.to_string(), Value::Number(amount));
    Ok([Value::from(from), Value::Object(outputs)])
}

// =============================================================================
// NodeRpc
// =============================================================================

/// Async RPC client for a zcashd node and its wallet.
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

    /// Get chain state (chain name, block count, best block hash, upgrades...).
    pub async fn get_blockchain_info(&self) -> Result<BlockchainInfo, RpcError> {
        let val = self.client.call(methods::GET_BLOCKCHAIN_INFO, None).await?;
        decode_payload(methods::GET_BLOCKCHAIN_INFO, val)
    }

    /// Get the wallet's total transparent balance in ZEC.
    pub async fn get_balance(&self) -> Result<f64, RpcError> {
        let val = self.client.call(methods::GET_BALANCE, None).await?;
        decode_payload(methods::GET_BALANCE, val)
    }

    /// Send `amount` ZEC from `from` to `to`. Returns the transaction id.
    ///
    /// Not idempotent: calling this twice sends twice.
    pub async fn send_to_address(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<String, RpcError> {
        let params = send_params(from, to, amount)?;
        let val = self
            .client
            .call(methods::SEND_TO_ADDRESS, Some(&params[..]))
            .await?;
        decode_payload(methods::SEND_TO_ADDRESS, val)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_node_rpc_creation() {
        let node = NodeRpc::new("http://127.0.0.1:8232", "rpcuser", "rpcpassword").unwrap();
        assert_eq!(node.client().url(), "http://127.0.0.1:8232");
    }

    #[test]
    fn test_send_params_shape() {
        let params = send_params("fromAddr", "toAddr", 0.1).unwrap();
        assert_eq!(serde_json::to_value(params).unwrap(), json!(["fromAddr", { "toAddr": 0.1 }]));
    }

    #[test]
    fn test_send_params_rejects_non_finite_amount() {
        for amount in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = send_params("fromAddr", "toAddr", amount).unwrap_err();
            assert!(
                matches!(err, RpcError::Encoding { ref method, .. } if method == "sendtoaddress"),
                "{:?}",
                err
            );
        }
    }

    #[test]
    fn test_decode_balance() {
        let balance: f64 = decode_payload(methods::GET_BALANCE, json!(12.5)).unwrap();
        assert_eq!(balance, 12.5);

        let whole: f64 = decode_payload(methods::GET_BALANCE, json!(3)).unwrap();
        assert_eq!(whole, 3.0);
    }

    #[test]
    fn test_decode_blockchain_info() {
        let info: BlockchainInfo = decode_payload(
            methods::GET_BLOCKCHAIN_INFO,
            json!({ "chain": "main", "blocks": 2500000, "pruned": false }),
        )
        .unwrap();
        assert_eq!(info["chain"], "main");
        assert_eq!(info["blocks"], 2500000);
    }

    #[test]
    fn test_decode_shape_mismatch_is_payload_error() {
        let err = decode_payload::<f64>(methods::GET_BALANCE, json!("12.5")).unwrap_err();
        assert!(matches!(err, RpcError::Payload { ref method, .. } if method == "getbalance"));

        let err = decode_payload::<String>(methods::SEND_TO_ADDRESS, Value::Null).unwrap_err();
        assert!(matches!(err, RpcError::Payload { .. }));

        let err = decode_payload::<BlockchainInfo>(methods::GET_BLOCKCHAIN_INFO, json!([1, 2])).unwrap_err();
        assert!(matches!(err, RpcError::Payload { .. }));
    }
}
