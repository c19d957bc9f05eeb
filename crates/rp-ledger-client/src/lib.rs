use async_trait::async_trait;
use rp_api_types::{NetworkDescriptor, NetworkKind, SubmissionResult};
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("ledger client is not connected")]
    NotConnected,
    #[error("ledger connection lost: {0}")]
    ConnectionLost(String),
    #[error("ledger transport error: {0}")]
    Transport(String),
    #[error("ledger returned {code}: {message}")]
    Rpc { code: String, message: String },
    #[error("unexpected ledger response: {0}")]
    Decode(String),
}

impl LedgerError {
    /// Errors a fresh connection can plausibly fix.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, LedgerError::NotConnected | LedgerError::ConnectionLost(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutcome {
    pub hash: String,
    pub result_code: String,
    pub validated: bool,
    pub ledger_index: Option<u32>,
}

impl TransactionOutcome {
    /// True once polling can stop: validated, or a code that never reaches a ledger.
    pub fn is_settled(&self) -> bool {
        self.validated || ["tec", "tef", "tem"].iter().any(|prefix| self.result_code.starts_with(*prefix))
    }

    /// Only a validated `tesSUCCESS` counts as success.
    pub fn into_submission_result(self) -> SubmissionResult {
        if self.validated {
            return SubmissionResult::from_result_code(self.hash, self.result_code);
        }
        SubmissionResult::failure(
            self.hash,
            self.result_code,
            "transaction is not yet in a validated ledger",
        )
    }
}

/// How long `await_outcome` keeps asking for a validated result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub attempts: u32,
    pub interval: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            attempts: 20,
            interval: Duration::from_secs(1),
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn sleep(interval: Duration) {
    gloo_timers::future::sleep(interval).await;
}

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(interval: Duration) {
    tokio::time::sleep(interval).await;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub address: String,
    pub balance_drops: String,
    pub sequence: u32,
    pub owner_count: u32,
}

impl AccountSummary {
    /// Balance formatted in XRP with trailing zeros trimmed.
    pub fn balance_xrp(&self) -> String {
        let drops: u64 = self.balance_drops.parse().unwrap_or_default();
        let whole = drops / 1_000_000;
        let fraction = drops % 1_000_000;
        if fraction == 0 {
            whole.to_string()
        } else {
            let fraction = format!("{fraction:06}");
            format!("{whole}.{}", fraction.trim_end_matches('0'))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSummary {
    pub build_version: String,
    pub complete_ledgers: String,
    pub validated_ledger_index: Option<u32>,
    pub network_id: Option<u32>,
}

/// An open connection to one network's query endpoint.
#[async_trait(?Send)]
pub trait LedgerConnection {
    fn network(&self) -> NetworkKind;
    fn is_connected(&self) -> bool;
    async fn disconnect(&self) -> Result<(), LedgerError>;
    async fn transaction(&self, hash: &str) -> Result<TransactionOutcome, LedgerError>;
    async fn account_info(&self, address: &str) -> Result<AccountSummary, LedgerError>;
    async fn server_info(&self) -> Result<ServerSummary, LedgerError>;
}

#[async_trait(?Send)]
pub trait LedgerConnector {
    async fn connect(&self, network: &'static NetworkDescriptor) -> Result<Rc<dyn LedgerConnection>, LedgerError>;
}

/// Owns the single live connection for the selected network.
pub struct LedgerClient {
    connector: Rc<dyn LedgerConnector>,
    selected: Cell<Option<NetworkKind>>,
    generation: Cell<u64>,
    live: RefCell<Option<Rc<dyn LedgerConnection>>>,
    poll: PollPolicy,
}

impl LedgerClient {
    pub fn new(connector: Rc<dyn LedgerConnector>) -> Self {
        Self {
            connector,
            selected: Cell::new(None),
            generation: Cell::new(0),
            live: RefCell::new(None),
            poll: PollPolicy::default(),
        }
    }

    pub fn with_poll_policy(mut self, poll: PollPolicy) -> Self {
        self.poll = poll;
        self
    }

    pub fn selected_network(&self) -> Option<NetworkKind> {
        self.selected.get()
    }

    /// Tears down the current connection and opens one to `network`.
    pub async fn connect_to(&self, network: NetworkKind) -> Result<Rc<dyn LedgerConnection>, LedgerError> {
        self.selected.set(Some(network));
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        let previous = self.live.borrow_mut().take();
        if let Some(previous) = previous {
            if let Err(err) = previous.disconnect().await {
                debug!(network = %previous.network(), error = %err, "ignoring disconnect failure");
            }
        }

        let descriptor = network.descriptor();
        let connection = self.connector.connect(descriptor).await?;

        if self.generation.get() != generation {
            // a newer selection started while this one was connecting
            if let Err(err) = connection.disconnect().await {
                debug!(network = %network, error = %err, "ignoring disconnect failure");
            }
            return Err(LedgerError::ConnectionLost(format!(
                "connection to {} superseded by a newer network selection",
                descriptor.display_name
            )));
        }

        info!(network = %network, endpoint = descriptor.query_endpoint_http, "ledger connected");
        *self.live.borrow_mut() = Some(connection.clone());
        Ok(connection)
    }

    /// Connects only when `network` differs from the live connection.
    pub async fn sync_network(&self, network: NetworkKind) -> Result<Rc<dyn LedgerConnection>, LedgerError> {
        if let Ok(connection) = self.get_client() {
            if connection.network() == network {
                return Ok(connection);
            }
        }
        self.connect_to(network).await
    }

    pub fn get_client(&self) -> Result<Rc<dyn LedgerConnection>, LedgerError> {
        match self.live.borrow().as_ref() {
            Some(connection) if connection.is_connected() => Ok(connection.clone()),
            _ => Err(LedgerError::NotConnected),
        }
    }

    pub async fn reconnect(&self) -> Result<Rc<dyn LedgerConnection>, LedgerError> {
        let network = self.selected.get().ok_or(LedgerError::NotConnected)?;
        self.connect_to(network).await
    }

    pub async fn disconnect(&self) {
        let previous = self.live.borrow_mut().take();
        if let Some(previous) = previous {
            if let Err(err) = previous.disconnect().await {
                debug!(error = %err, "ignoring disconnect failure");
            }
        }
    }

    /// Looks up a submitted transaction, reconnecting once if the link dropped.
    pub async fn fetch_outcome(&self, hash: &str) -> Result<TransactionOutcome, LedgerError> {
        let first = match self.get_client() {
            Ok(connection) => connection.transaction(hash).await,
            Err(err) => Err(err),
        };

        match first {
            Err(err) if err.is_connection_error() => {
                warn!(hash, error = %err, "ledger query failed, reconnecting once");
                let connection = self.reconnect().await?;
                connection.transaction(hash).await
            }
            other => other,
        }
    }

    /// Polls `fetch_outcome` until the transaction settles or the attempt
    /// budget runs out, returning the last outcome seen.
    ///
    /// Each poll gets its own single reconnect; a poll that still fails ends
    /// the wait with that error.
    pub async fn await_outcome(&self, hash: &str) -> Result<TransactionOutcome, LedgerError> {
        let attempts = self.poll.attempts.max(1);
        let mut attempt = 1;
        loop {
            let outcome = self.fetch_outcome(hash).await?;
            if outcome.is_settled() || attempt >= attempts {
                return Ok(outcome);
            }
            debug!(hash, attempt, code = %outcome.result_code, "transaction not settled yet");
            attempt += 1;
            sleep(self.poll.interval).await;
        }
    }

    pub async fn account_info(&self, address: &str) -> Result<AccountSummary, LedgerError> {
        self.get_client()?.account_info(address).await
    }
}
