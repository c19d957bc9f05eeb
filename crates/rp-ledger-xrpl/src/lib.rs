use async_trait::async_trait;
use rp_api_types::{NetworkDescriptor, NetworkKind};
use rp_ledger_client::{AccountSummary, LedgerConnection, LedgerConnector, LedgerError, ServerSummary, TransactionOutcome};
use serde::Deserialize;
use serde_json::{Value, json};
use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, warn};

pub const TXN_NOT_FOUND: &str = "txnNotFound";

/// Opens JSON-RPC connections to an XRPL node.
///
/// Endpoints come from, in order: an explicit override, the
/// `RIPPLET_<NETWORK>_RPC_URL` environment variable, the registry default.
#[derive(Default)]
pub struct XrplRpcConnector {
    http: reqwest::Client,
    overrides: HashMap<NetworkKind, String>,
}

impl XrplRpcConnector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, network: NetworkKind, endpoint: impl Into<String>) -> Self {
        self.overrides.insert(network, endpoint.into());
        self
    }

    pub fn endpoint_for(&self, descriptor: &NetworkDescriptor) -> String {
        self.overrides
            .get(&descriptor.kind)
            .cloned()
            .or_else(|| std::env::var(env_var_for(descriptor.kind)).ok())
            .unwrap_or_else(|| descriptor.query_endpoint_http.to_owned())
    }
}

pub fn env_var_for(network: NetworkKind) -> String {
    format!("RIPPLET_{}_RPC_URL", network.as_str().to_ascii_uppercase())
}

#[async_trait(?Send)]
impl LedgerConnector for XrplRpcConnector {
    async fn connect(&self, network: &'static NetworkDescriptor) -> Result<Rc<dyn LedgerConnection>, LedgerError> {
        let connection = XrplRpcConnection {
            network: network.kind,
            endpoint: self.endpoint_for(network),
            http: self.http.clone(),
            connected: Cell::new(true),
        };
        let info = connection.server_info().await?;
        debug!(network = %network.kind, version = %info.build_version, "xrpl handshake complete");
        Ok(Rc::new(connection))
    }
}

pub struct XrplRpcConnection {
    network: NetworkKind,
    endpoint: String,
    http: reqwest::Client,
    connected: Cell<bool>,
}

impl XrplRpcConnection {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        if !self.connected.get() {
            return Err(LedgerError::NotConnected);
        }

        let body = json!({ "method": method, "params": [params] });
        let response = self
            .http
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|err| LedgerError::ConnectionLost(format!("{method} transport: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(method, %status, "xrpl node returned HTTP error");
            return Err(LedgerError::Transport(format!("{method} HTTP {status}: {text}")));
        }

        let envelope: Value = response
            .json()
            .await
            .map_err(|err| LedgerError::Decode(format!("{method} parse: {err}")))?;
        unwrap_result(envelope)
    }
}

#[async_trait(?Send)]
impl LedgerConnection for XrplRpcConnection {
    fn network(&self) -> NetworkKind {
        self.network
    }

    fn is_connected(&self) -> bool {
        self.connected.get()
    }

    async fn disconnect(&self) -> Result<(), LedgerError> {
        self.connected.set(false);
        Ok(())
    }

    async fn transaction(&self, hash: &str) -> Result<TransactionOutcome, LedgerError> {
        match self.call("tx", json!({ "transaction": hash, "binary": false })).await {
            Ok(result) => parse_transaction(hash, result),
            Err(LedgerError::Rpc { code, .. }) if code == TXN_NOT_FOUND => Ok(TransactionOutcome {
                hash: hash.to_owned(),
                result_code: TXN_NOT_FOUND.to_owned(),
                validated: false,
                ledger_index: None,
            }),
            Err(err) => Err(err),
        }
    }

    async fn account_info(&self, address: &str) -> Result<AccountSummary, LedgerError> {
        let result = self
            .call("account_info", json!({ "account": address, "ledger_index": "validated" }))
            .await?;
        parse_account_info(result)
    }

    async fn server_info(&self) -> Result<ServerSummary, LedgerError> {
        let result = self.call("server_info", json!({})).await?;
        parse_server_info(result)
    }
}

// ── response shapes ──────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct TxResult {
    hash: Option<String>,
    #[serde(default)]
    validated: bool,
    ledger_index: Option<u32>,
    meta: Option<TxMeta>,
    engine_result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TxMeta {
    #[serde(rename = "TransactionResult")]
    transaction_result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountInfoResult {
    account_data: AccountData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AccountData {
    account: String,
    balance: String,
    sequence: u32,
    #[serde(default)]
    owner_count: u32,
}

#[derive(Debug, Deserialize)]
struct ServerInfoResult {
    info: ServerInfo,
}

#[derive(Debug, Deserialize)]
struct ServerInfo {
    #[serde(default)]
    build_version: String,
    #[serde(default)]
    complete_ledgers: String,
    validated_ledger: Option<ValidatedLedger>,
    network_id: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ValidatedLedger {
    seq: u32,
}

/// Extracts `result`, turning `status: "error"` into `LedgerError::Rpc`.
fn unwrap_result(envelope: Value) -> Result<Value, LedgerError> {
    let Some(result) = envelope.get("result") else {
        return Err(LedgerError::Decode("response has no result".into()));
    };
    if result.get("status").and_then(Value::as_str) == Some("error") {
        let code = result
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknownError")
            .to_owned();
        let message = result
            .get("error_message")
            .and_then(Value::as_str)
            .unwrap_or(&code)
            .to_owned();
        return Err(LedgerError::Rpc { code, message });
    }
    Ok(result.clone())
}

fn decode<T: for<'de> Deserialize<'de>>(what: &str, value: Value) -> Result<T, LedgerError> {
    serde_json::from_value(value).map_err(|err| LedgerError::Decode(format!("{what}: {err}")))
}

fn parse_transaction(hash: &str, result: Value) -> Result<TransactionOutcome, LedgerError> {
    let tx: TxResult = decode("tx", result)?;
    let result_code = tx
        .meta
        .and_then(|meta| meta.transaction_result)
        .or(tx.engine_result)
        .ok_or_else(|| LedgerError::Decode("tx result carries no result code".into()))?;

    Ok(TransactionOutcome {
        hash: tx.hash.unwrap_or_else(|| hash.to_owned()),
        result_code,
        validated: tx.validated,
        ledger_index: tx.ledger_index,
    })
}

fn parse_account_info(result: Value) -> Result<AccountSummary, LedgerError> {
    let info: AccountInfoResult = decode("account_info", result)?;
    Ok(AccountSummary {
        address: info.account_data.account,
        balance_drops: info.account_data.balance,
        sequence: info.account_data.sequence,
        owner_count: info.account_data.owner_count,
    })
}

fn parse_server_info(result: Value) -> Result<ServerSummary, LedgerError> {
    let info: ServerInfoResult = decode("server_info", result)?;
    Ok(ServerSummary {
        build_version: info.info.build_version,
        complete_ledgers: info.info.complete_ledgers,
        validated_ledger_index: info.info.validated_ledger.map(|ledger| ledger.seq),
        network_id: info.info.network_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "E08D6E9754025BA2534A78707605E0601F03ACE063687A0CA1BDDACFCD1698C7";

    #[test]
    fn rpc_error_status_becomes_rpc_error() {
        let envelope = json!({
            "result": {
                "status": "error",
                "error": "txnNotFound",
                "error_message": "Transaction not found."
            }
        });
        assert_eq!(
            unwrap_result(envelope),
            Err(LedgerError::Rpc {
                code: "txnNotFound".into(),
                message: "Transaction not found.".into()
            })
        );
    }

    #[test]
    fn missing_result_is_decode_error() {
        assert!(matches!(unwrap_result(json!({ "id": 1 })), Err(LedgerError::Decode(_))));
    }

    #[test]
    fn transaction_reads_meta_result() {
        let result = json!({
            "hash": HASH,
            "ledger_index": 5_123_456,
            "validated": true,
            "meta": { "TransactionResult": "tesSUCCESS", "TransactionIndex": 3 },
            "status": "success"
        });
        let outcome = parse_transaction(HASH, result).unwrap();
        assert_eq!(outcome.result_code, "tesSUCCESS");
        assert!(outcome.validated);
        assert_eq!(outcome.ledger_index, Some(5_123_456));
    }

    #[test]
    fn transaction_falls_back_to_engine_result() {
        let result = json!({ "engine_result": "tecNO_DST", "status": "success" });
        let outcome = parse_transaction(HASH, result).unwrap();
        assert_eq!(outcome.hash, HASH);
        assert_eq!(outcome.result_code, "tecNO_DST");
        assert!(!outcome.validated);
    }

    #[test]
    fn account_info_reads_balance_and_sequence() {
        let result = json!({
            "account_data": {
                "Account": "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh",
                "Balance": "999999988",
                "Sequence": 7,
                "OwnerCount": 2,
                "Flags": 0
            },
            "validated": true
        });
        let summary = parse_account_info(result).unwrap();
        assert_eq!(summary.balance_drops, "999999988");
        assert_eq!(summary.sequence, 7);
        assert_eq!(summary.owner_count, 2);
    }

    #[test]
    fn server_info_reads_validated_ledger() {
        let result = json!({
            "info": {
                "build_version": "2.3.0",
                "complete_ledgers": "100-200",
                "validated_ledger": { "seq": 200, "hash": "AB" },
                "network_id": 1
            }
        });
        let summary = parse_server_info(result).unwrap();
        assert_eq!(summary.validated_ledger_index, Some(200));
        assert_eq!(summary.network_id, Some(1));
    }

    #[test]
    fn explicit_endpoint_wins() {
        let connector = XrplRpcConnector::new().with_endpoint(NetworkKind::Devnet, "http://localhost:5005");
        assert_eq!(connector.endpoint_for(NetworkKind::Devnet.descriptor()), "http://localhost:5005");
        assert_eq!(env_var_for(NetworkKind::Testnet), "RIPPLET_TESTNET_RPC_URL");
    }

    #[tokio::test]
    async fn disconnected_connection_refuses_calls() {
        let connection = XrplRpcConnection {
            network: NetworkKind::Testnet,
            endpoint: "http://127.0.0.1:9".into(),
            http: reqwest::Client::new(),
            connected: Cell::new(true),
        };
        connection.disconnect().await.unwrap();
        assert_eq!(connection.server_info().await, Err(LedgerError::NotConnected));
    }
}
