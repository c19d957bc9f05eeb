#![allow(dead_code)]

use async_trait::async_trait;
use rp_api_types::{NetworkDescriptor, NetworkKind, WalletKind};
use rp_ledger_client::{AccountSummary, LedgerConnection, LedgerConnector, LedgerError, ServerSummary, TransactionOutcome};
use rp_wallet_core::{Capabilities, EventListener, ListenerId, SignedSubmission, WalletError, WalletEvent, WalletExtension};
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

pub const ALICE: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
pub const BOB: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";
pub const HASH: &str = "E08D6E9754025BA2534A78707605E0601F03ACE063687A0CA1BDDACFCD1698C7";

pub struct MockExtension {
    pub kind: WalletKind,
    pub capabilities: Capabilities,
    pub network: RefCell<String>,
    pub sign_reply: RefCell<Option<Result<SignedSubmission, WalletError>>>,
    pub signed: RefCell<Vec<Value>>,
    pub park_on_sign: Cell<bool>,
    listeners: RefCell<HashMap<ListenerId, (WalletEvent, EventListener)>>,
}

impl MockExtension {
    pub fn new(kind: WalletKind, network: &str) -> Rc<Self> {
        Self::with_capabilities(kind, network, Capabilities::full())
    }

    pub fn with_capabilities(kind: WalletKind, network: &str, capabilities: Capabilities) -> Rc<Self> {
        Rc::new(Self {
            kind,
            capabilities,
            network: RefCell::new(network.to_owned()),
            sign_reply: RefCell::new(None),
            signed: RefCell::default(),
            park_on_sign: Cell::new(false),
            listeners: RefCell::default(),
        })
    }

    pub fn reply_with(&self, reply: Result<SignedSubmission, WalletError>) {
        *self.sign_reply.borrow_mut() = Some(reply);
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn emit(&self, event: WalletEvent, payload: Value) {
        let listeners: Vec<EventListener> = self
            .listeners
            .borrow()
            .values()
            .filter(|(registered, _)| *registered == event)
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(payload.clone());
        }
    }
}

#[async_trait(?Send)]
impl WalletExtension for MockExtension {
    fn kind(&self) -> WalletKind {
        self.kind
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn on(&self, event: WalletEvent, listener: EventListener) -> Option<ListenerId> {
        if !self.capabilities.on {
            return None;
        }
        let id = ListenerId::new();
        self.listeners.borrow_mut().insert(id, (event, listener));
        Some(id)
    }

    fn off(&self, _event: WalletEvent, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id);
    }

    async fn get_address(&self) -> Result<String, WalletError> {
        Ok(ALICE.to_owned())
    }

    async fn get_network(&self) -> Result<String, WalletError> {
        Ok(self.network.borrow().clone())
    }

    async fn sign_and_submit(&self, tx_json: &Value, _expected_network: NetworkKind) -> Result<SignedSubmission, WalletError> {
        self.signed.borrow_mut().push(tx_json.clone());
        if self.park_on_sign.get() {
            tokio::task::yield_now().await;
        }
        self.sign_reply.borrow_mut().take().unwrap_or_else(|| {
            Ok(SignedSubmission {
                hash: HASH.to_owned(),
                engine_result: Some("tesSUCCESS".to_owned()),
            })
        })
    }
}

pub struct MockConnection {
    pub network: NetworkKind,
    pub endpoint: &'static str,
    pub connected: Cell<bool>,
    replies: RefCell<VecDeque<Result<TransactionOutcome, LedgerError>>>,
}

#[async_trait(?Send)]
impl LedgerConnection for MockConnection {
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
        self.replies.borrow_mut().pop_front().unwrap_or_else(|| {
            Ok(TransactionOutcome {
                hash: hash.to_owned(),
                result_code: "tesSUCCESS".to_owned(),
                validated: true,
                ledger_index: Some(1_000),
            })
        })
    }

    async fn account_info(&self, address: &str) -> Result<AccountSummary, LedgerError> {
        Ok(AccountSummary {
            address: address.to_owned(),
            balance_drops: "100000000".to_owned(),
            sequence: 1,
            owner_count: 0,
        })
    }

    async fn server_info(&self) -> Result<ServerSummary, LedgerError> {
        Ok(ServerSummary {
            build_version: "mock".to_owned(),
            complete_ledgers: "1-1000".to_owned(),
            validated_ledger_index: Some(1_000),
            network_id: None,
        })
    }
}

/// Opens mock connections; each connect consumes the next scripted reply batch.
#[derive(Default)]
pub struct MockConnector {
    scripts: RefCell<VecDeque<Vec<Result<TransactionOutcome, LedgerError>>>>,
    pub opened: RefCell<Vec<Rc<MockConnection>>>,
}

impl MockConnector {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn scripted(scripts: Vec<Vec<Result<TransactionOutcome, LedgerError>>>) -> Rc<Self> {
        Rc::new(Self {
            scripts: RefCell::new(scripts.into()),
            opened: RefCell::default(),
        })
    }

    pub fn live(&self) -> Vec<Rc<MockConnection>> {
        self.opened
            .borrow()
            .iter()
            .filter(|connection| connection.connected.get())
            .cloned()
            .collect()
    }
}

#[async_trait(?Send)]
impl LedgerConnector for MockConnector {
    async fn connect(&self, network: &'static NetworkDescriptor) -> Result<Rc<dyn LedgerConnection>, LedgerError> {
        let replies = self.scripts.borrow_mut().pop_front().unwrap_or_default();
        let connection = Rc::new(MockConnection {
            network: network.kind,
            endpoint: network.query_endpoint_ws,
            connected: Cell::new(true),
            replies: RefCell::new(replies.into()),
        });
        self.opened.borrow_mut().push(connection.clone());
        Ok(connection)
    }
}
