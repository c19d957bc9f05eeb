//! Static registry of the ledger networks Ripplet can target.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NetworkKind {
    #[default]
    Mainnet,
    Testnet,
    Devnet,
}

impl NetworkKind {
    pub const ALL: [NetworkKind; 3] = [NetworkKind::Mainnet, NetworkKind::Testnet, NetworkKind::Devnet];

    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKind::Mainnet => "mainnet",
            NetworkKind::Testnet => "testnet",
            NetworkKind::Devnet => "devnet",
        }
    }

    /// Short label shown in the network badge.
    pub fn badge(&self) -> &'static str {
        match self {
            NetworkKind::Mainnet => "Main",
            NetworkKind::Testnet => "Test",
            NetworkKind::Devnet => "Dev",
        }
    }

    /// Parses a canonical network name (`mainnet`, `main`, ...), ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "mainnet" | "main" => Some(NetworkKind::Mainnet),
            "testnet" | "test" => Some(NetworkKind::Testnet),
            "devnet" | "dev" => Some(NetworkKind::Devnet),
            _ => None,
        }
    }

    /// Normalizes a free-form network label reported by a wallet extension.
    ///
    /// Matches the substrings `main`, `test` and `dev` case-insensitively, so
    /// `"MAINNET"`, `"xrpl:testnet"` and `"Devnet"` are all recognized.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.to_ascii_lowercase();
        if label.contains("main") || label.contains("livenet") {
            Some(NetworkKind::Mainnet)
        } else if label.contains("test") {
            Some(NetworkKind::Testnet)
        } else if label.contains("dev") {
            Some(NetworkKind::Devnet)
        } else {
            None
        }
    }

    pub fn descriptor(&self) -> &'static NetworkDescriptor {
        descriptor(*self)
    }
}

impl fmt::Display for NetworkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    pub display_name: &'static str,
    pub kind: NetworkKind,
    pub query_endpoint_ws: &'static str,
    pub query_endpoint_http: &'static str,
    pub explorer_base_url: &'static str,
}

impl NetworkDescriptor {
    pub fn explorer_tx_url(&self, hash: &str) -> String {
        format!("{}/transactions/{}", self.explorer_base_url, hash)
    }

    pub fn explorer_account_url(&self, address: &str) -> String {
        format!("{}/accounts/{}", self.explorer_base_url, address)
    }
}

static NETWORKS: [NetworkDescriptor; 3] = [
    NetworkDescriptor {
        display_name: "Mainnet",
        kind: NetworkKind::Mainnet,
        query_endpoint_ws: "wss://xrplcluster.com/",
        query_endpoint_http: "https://xrplcluster.com/",
        explorer_base_url: "https://livenet.xrpl.org",
    },
    NetworkDescriptor {
        display_name: "Testnet",
        kind: NetworkKind::Testnet,
        query_endpoint_ws: "wss://s.altnet.rippletest.net:51233/",
        query_endpoint_http: "https://s.altnet.rippletest.net:51234/",
        explorer_base_url: "https://testnet.xrpl.org",
    },
    NetworkDescriptor {
        display_name: "Devnet",
        kind: NetworkKind::Devnet,
        query_endpoint_ws: "wss://s.devnet.rippletest.net:51233/",
        query_endpoint_http: "https://s.devnet.rippletest.net:51234/",
        explorer_base_url: "https://devnet.xrpl.org",
    },
];

pub fn descriptor(kind: NetworkKind) -> &'static NetworkDescriptor {
    match kind {
        NetworkKind::Mainnet => &NETWORKS[0],
        NetworkKind::Testnet => &NETWORKS[1],
        NetworkKind::Devnet => &NETWORKS[2],
    }
}

pub fn all() -> &'static [NetworkDescriptor] {
    &NETWORKS
}
