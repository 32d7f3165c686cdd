//! Zcash node RPC client library.
//!
//! Provides async and blocking HTTP clients for the zcashd JSON-RPC 1.0
//! interface: a generic `call()` returning the raw `result`, plus typed
//! wrappers for chain info, wallet balance, and `sendtoaddress`.
//!
//! # Example
//!
//! ```ignore
//! use zcash_rpc::NodeRpc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let node = NodeRpc::new("http://127.0.0.1:8232", "rpcuser", "rpcpassword").unwrap();
//!     let balance = node.get_balance().await.unwrap();
//!     println!("Balance: {:.8} ZEC", balance);
//! }
//! ```

pub mod error;
pub mod client;
pub mod node;
pub mod blocking;

pub use client::{RpcClient, RpcConfig};
pub use node::{BlockchainInfo, NodeRpc};
pub use error::RpcError;

/// Connection defaults for a local zcashd.
pub mod defaults {
    pub const RPC_URL: &str = "http://127.0.0.1:8232";
    pub const RPC_USER: &str = "rpcuser";
    pub const RPC_PASSWORD: &str = "rpcpassword";
}
