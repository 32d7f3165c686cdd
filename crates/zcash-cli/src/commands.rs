//! CLI command implementations.

use crate::AppContext;
use serde_json::Value;
use std::io::Write;
use zcash_rpc::blocking::NodeRpc;

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

fn connect(ctx: &AppContext) -> std::result::Result<NodeRpc, Box<dyn std::error::Error>> {
    let node = NodeRpc::with_config(ctx.config.clone())
        .map_err(|e| format!("failed to initialize RPC client: {}", e))?;
    log::debug!("using node at {}", node.client().url());
    Ok(node)
}

fn print_info(node: &NodeRpc, out: &mut dyn Write) -> Result {
    let info = node
        .get_blockchain_info()
        .map_err(|e| format!("failed to fetch blockchain info: {}", e))?;
    writeln!(out, "Blockchain Info: {}", Value::Object(info))?;
    Ok(())
}

fn print_balance(node: &NodeRpc, out: &mut dyn Write) -> Result {
    let balance = node
        .get_balance()
        .map_err(|e| format!("failed to fetch balance: {}", e))?;
    writeln!(out, "Balance: {:.8} ZEC", balance)?;
    Ok(())
}

fn send_and_print(node: &NodeRpc, from: &str, to: &str, amount: f64, out: &mut dyn Write) -> Result {
    let txid = node
        .send_to_address(from, to, amount)
        .map_err(|e| format!("failed to send transaction: {}", e))?;
    writeln!(out, "Transaction sent successfully. TxID: {}", txid)?;
    Ok(())
}

/// Info, balance, then send. Stops at the first failure.
fn run_to(ctx: &AppContext, from: &str, to: &str, amount: f64, out: &mut dyn Write) -> Result {
    let node = connect(ctx)?;
    print_info(&node, out)?;
    print_balance(&node, out)?;
    send_and_print(&node, from, to, amount, out)
}

// ─── Commands ───────────────────────────────────────────────────────────────

pub fn show_info(ctx: &AppContext) -> Result {
    print_info(&connect(ctx)?, &mut std::io::stdout().lock())
}

pub fn show_balance(ctx: &AppContext) -> Result {
    print_balance(&connect(ctx)?, &mut std::io::stdout().lock())
}

pub fn send(ctx: &AppContext, from: &str, to: &str, amount: f64) -> Result {
    send_and_print(&connect(ctx)?, from, to, amount, &mut std::io::stdout().lock())
}

pub fn run(ctx: &AppContext, from: &str, to: &str, amount: f64) -> Result {
    run_to(ctx, from, to, amount, &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use zcash_rpc::RpcConfig;

    // Field order matters: the server must drop before its runtime.
    struct MockNode {
        server: MockServer,
        rt: Runtime,
    }

    impl MockNode {
        fn start() -> Self {
            let rt = Runtime::new().expect("tokio runtime");
            let server = rt.block_on(MockServer::start());
            Self { server, rt }
        }

        fn mount(&self, rpc_method: &str, response: ResponseTemplate, times: u64) {
            self.rt.block_on(
                Mock::given(method("POST"))
                    .and(body_partial_json(json!({ "method": rpc_method })))
                    .respond_with(response)
                    .expect(times)
                    .mount(&self.server),
            );
        }

        fn ctx(&self) -> AppContext {
            AppContext {
                config: RpcConfig::new(&self.server.uri(), "rpcuser", "rpcpassword"),
            }
        }
    }

    fn ok(result: Value) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({ "result": result, "error": null, "id": 1 }))
    }

    #[test]
    fn test_run_prints_all_three_results() {
        let node = MockNode::start();
        node.mount("getblockchaininfo", ok(json!({ "chain": "main" })), 1);
        node.mount("getbalance", ok(json!(12.5)), 1);
        node.mount("sendtoaddress", ok(json!("abcd1234")), 1);

        let mut out = Vec::new();
        run_to(&node.ctx(), "fromAddr", "toAddr", 0.1, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Blockchain Info: {\"chain\":\"main\"}\n\
             Balance: 12.50000000 ZEC\n\
             Transaction sent successfully. TxID: abcd1234\n"
        );
    }

    #[test]
    fn test_run_stops_when_info_fails() {
        let node = MockNode::start();
        node.mount("getblockchaininfo", ResponseTemplate::new(500), 1);
        node.mount("getbalance", ok(json!(12.5)), 0);
        node.mount("sendtoaddress", ok(json!("abcd1234")), 0);

        let mut out = Vec::new();
        let err = run_to(&node.ctx(), "fromAddr", "toAddr", 0.1, &mut out).unwrap_err();
        assert!(err.to_string().contains("failed to fetch blockchain info"), "{}", err);
        assert!(out.is_empty());

        let received = node.rt.block_on(node.server.received_requests()).unwrap_or_default();
        assert_eq!(received.len(), 1);
    }

    #[test]
    fn test_run_never_sends_after_balance_fails() {
        let node = MockNode::start();
        node.mount("getblockchaininfo", ok(json!({ "chain": "main" })), 1);
        node.mount(
            "getbalance",
            ResponseTemplate::new(200).set_body_json(json!({
                "result": null,
                "error": { "code": -28, "message": "Loading wallet..." },
                "id": 1
            })),
            1,
        );
        node.mount("sendtoaddress", ok(json!("abcd1234")), 0);

        let mut out = Vec::new();
        let err = run_to(&node.ctx(), "fromAddr", "toAddr", 0.1, &mut out).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to fetch balance: RPC error -28: Loading wallet..."
        );
        assert!(String::from_utf8(out).unwrap().starts_with("Blockchain Info: "));
    }

    #[test]
    fn test_run_rejects_empty_credentials() {
        let ctx = AppContext {
            config: RpcConfig::new("http://127.0.0.1:8232", "", "rpcpassword"),
        };
        let err = run_to(&ctx, "fromAddr", "toAddr", 0.1, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().starts_with("failed to initialize RPC client"), "{}", err);
    }
}
