use serde::{Deserialize, Serialize};
use std::fmt;

pub mod network;

pub use network::{NetworkDescriptor, NetworkKind};

/// Storage key holding the persisted wallet session blob.
pub const SESSION_STORAGE_KEY: &str = "ripplet-wallet";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    GemWallet,
    Crossmark,
    Xaman,
}

impl WalletKind {
    pub const ALL: [WalletKind; 3] = [WalletKind::GemWallet, WalletKind::Crossmark, WalletKind::Xaman];

    pub fn as_str(&self) -> &'static str {
        match self {
            WalletKind::GemWallet => "gemwallet",
            WalletKind::Crossmark => "crossmark",
            WalletKind::Xaman => "xaman",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WalletKind::GemWallet => "GemWallet",
            WalletKind::Crossmark => "Crossmark",
            WalletKind::Xaman => "Xaman",
        }
    }

    /// Parses a persisted or user-supplied wallet identifier. Unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-memory wallet session snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletSession {
    pub address: Option<String>,
    pub connected: bool,
    pub wallet_kind: Option<WalletKind>,
    pub network: NetworkKind,
}

impl WalletSession {
    pub fn persisted(&self) -> PersistedSession {
        PersistedSession {
            address: self.address.clone(),
            wallet_type: self.wallet_kind.map(|kind| kind.as_str().to_owned()),
            network: Some(self.network.as_str().to_owned()),
        }
    }

    pub fn from_persisted(record: PersistedSession) -> Self {
        let wallet_kind = record.wallet_type.as_deref().and_then(WalletKind::parse);
        let network = record
            .network
            .as_deref()
            .and_then(NetworkKind::parse)
            .unwrap_or_default();
        let address = record.address.filter(|value| !value.trim().is_empty());
        let connected = address.is_some() && wallet_kind.is_some();

        Self {
            address,
            connected,
            wallet_kind,
            network,
        }
    }
}

/// The subset of the session written to persistent storage.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PersistedSession {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, rename = "walletType")]
    pub wallet_type: Option<String>,
    #[serde(default)]
    pub network: Option<String>,
}

pub const SUCCESS_RESULT_CODE: &str = "tesSUCCESS";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmissionResult {
    pub transaction_hash: String,
    pub success: bool,
    pub result_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SubmissionResult {
    pub fn from_result_code(transaction_hash: impl Into<String>, result_code: impl Into<String>) -> Self {
        let result_code = result_code.into();
        Self {
            transaction_hash: transaction_hash.into(),
            success: result_code == SUCCESS_RESULT_CODE,
            result_code,
            message: None,
        }
    }

    pub fn failure(transaction_hash: impl Into<String>, result_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            transaction_hash: transaction_hash.into(),
            success: false,
            result_code: result_code.into(),
            message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_session_uses_wallet_type_key() {
        let session = WalletSession {
            address: Some("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".to_owned()),
            connected: true,
            wallet_kind: Some(WalletKind::Crossmark),
            network: NetworkKind::Testnet,
        };

        let json = serde_json::to_value(session.persisted()).unwrap();
        assert_eq!(json["walletType"], "crossmark");
        assert_eq!(json["network"], "testnet");
        assert_eq!(json["address"], "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh");
    }

    #[test]
    fn unknown_wallet_type_restores_as_disconnected() {
        let record: PersistedSession = serde_json::from_str(
            r#"{"address":"rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh","walletType":"metamask","network":"devnet"}"#,
        )
        .unwrap();

        let session = WalletSession::from_persisted(record);
        assert_eq!(session.wallet_kind, None);
        assert!(!session.connected);
        assert_eq!(session.network, NetworkKind::Devnet);
    }

    #[test]
    fn success_follows_result_code() {
        assert!(SubmissionResult::from_result_code("ABC", "tesSUCCESS").success);
        assert!(!SubmissionResult::from_result_code("ABC", "tecNO_DST").success);
    }
}
