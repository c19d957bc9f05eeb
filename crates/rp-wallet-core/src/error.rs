use rp_api_types::{NetworkKind, WalletKind};
use serde_json::Value;
use thiserror::Error;

/// Marker a wallet returns when the user closes the signing prompt.
pub const CANCELLED_SENTINEL: &str = "USER_CANCELLED";

/// Whole messages wallets use for a prompt the user dismissed.
///
/// Matched exactly, ignoring case, surrounding whitespace and a trailing
/// period. Ledger codes such as `tecKILLED` or messages that merely mention
/// a cancel transaction must stay failures.
const CANCEL_MESSAGES: &[&str] = &[
    "user_cancelled",
    "user cancelled",
    "user canceled",
    "user refused",
    "user rejected",
    "user rejected the request",
    "rejected by user",
    "request rejected",
    "request declined",
    "signing cancelled",
    "transaction cancelled by user",
];

/// Keys a wallet uses to report the network it is on.
const NETWORK_KEYS: &[&str] = &["network", "actualNetwork", "walletNetwork", "networkKey"];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    #[error("signing request was cancelled")]
    Cancelled,
    #[error("wallet is connected to {actual} but Ripplet expects {expected}")]
    NetworkMismatch { expected: NetworkKind, actual: String },
    #[error("{0} wallet is not available")]
    Unavailable(WalletKind),
    #[error("wallet rejected the request: {0}")]
    Rejected(String),
}

impl WalletError {
    /// Maps a raw wallet failure message onto the error taxonomy.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        if is_cancel_message(&message) {
            WalletError::Cancelled
        } else {
            WalletError::Rejected(message)
        }
    }

    /// Classifies a rejected signing call from its message and the payload
    /// the wallet rejected with.
    ///
    /// A mismatch needs a network the wallet names in a structured field;
    /// free text that happens to mention a network is a plain failure.
    pub fn classify_rejection(payload: &Value, message: impl Into<String>, expected: NetworkKind) -> Self {
        if is_cancel_reply(payload) {
            return WalletError::Cancelled;
        }
        if let Some(label) = reported_network(payload) {
            if NetworkKind::from_label(&label).is_some_and(|actual| actual != expected) {
                return WalletError::NetworkMismatch { expected, actual: label };
            }
        }
        Self::classify(message)
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, WalletError::Cancelled)
    }
}

fn is_cancel_message(message: &str) -> bool {
    let trimmed = message.trim().trim_end_matches('.');
    CANCEL_MESSAGES.iter().any(|known| trimmed.eq_ignore_ascii_case(known))
}

/// True for replies that mark a dismissed prompt instead of throwing:
/// `{"type": "reject"}`, `{"meta": {"isRejected": true}}` or a bare sentinel.
pub fn is_cancel_reply(payload: &Value) -> bool {
    match payload {
        Value::String(text) => is_cancel_message(text),
        Value::Object(map) => {
            map.get("type").and_then(Value::as_str) == Some("reject")
                || map
                    .get("meta")
                    .and_then(|meta| meta.get("isRejected"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
                || ["code", "error"]
                    .iter()
                    .filter_map(|key| map.get(*key).and_then(Value::as_str))
                    .any(is_cancel_message)
        }
        _ => false,
    }
}

fn reported_network(payload: &Value) -> Option<String> {
    let Value::Object(map) = payload else {
        return None;
    };
    let direct = NETWORK_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map(str::to_owned);
    direct.or_else(|| {
        ["data", "error", "result"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(reported_network)
    })
}
