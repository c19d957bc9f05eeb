//! Wallet extension seam and the event bridge feeding the store.
//!
//! Every supported extension is published on the page under its own global
//! with runtime-optional methods. `WalletExtension` models that as a
//! capability-checked interface; the bridge only subscribes when `on` and
//! `off` are both present.

use crate::error::WalletError;
use crate::store::SessionChange;
use async_trait::async_trait;
use rp_api_types::{NetworkKind, WalletKind, WalletSession};
use rp_tx_builders::validate::is_valid_address;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalletEvent {
    NetworkChanged,
    AccountChanged,
}

impl WalletEvent {
    /// Event name as the extensions spell it.
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletEvent::NetworkChanged => "networkChanged",
            WalletEvent::AccountChanged => "accountChanged",
        }
    }
}

impl fmt::Display for WalletEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub Uuid);

impl ListenerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

pub type EventListener = Rc<dyn Fn(Value)>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub on: bool,
    pub off: bool,
    pub get_address: bool,
    pub get_network: bool,
    pub sign_and_submit: bool,
}

impl Capabilities {
    pub fn full() -> Self {
        Self {
            on: true,
            off: true,
            get_address: true,
            get_network: true,
            sign_and_submit: true,
        }
    }

    pub fn can_subscribe(&self) -> bool {
        self.on && self.off
    }
}

/// What the wallet reports after signing and submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedSubmission {
    pub hash: String,
    /// Preliminary engine result, when the wallet reports one.
    #[serde(default)]
    pub engine_result: Option<String>,
}

#[async_trait(?Send)]
pub trait WalletExtension {
    fn kind(&self) -> WalletKind;
    fn capabilities(&self) -> Capabilities;

    /// Returns `None` when the extension does not support subscriptions.
    fn on(&self, event: WalletEvent, listener: EventListener) -> Option<ListenerId>;
    fn off(&self, event: WalletEvent, id: ListenerId);

    async fn get_address(&self) -> Result<String, WalletError>;
    async fn get_network(&self) -> Result<String, WalletError>;
    async fn sign_and_submit(&self, tx_json: &Value, expected_network: NetworkKind) -> Result<SignedSubmission, WalletError>;
}

/// Extensions installed on the page, by kind.
#[derive(Default, Clone)]
pub struct ExtensionRegistry {
    extensions: HashMap<WalletKind, Rc<dyn WalletExtension>>,
}

impl ExtensionRegistry {
    pub fn register(&mut self, extension: Rc<dyn WalletExtension>) {
        self.extensions.insert(extension.kind(), extension);
    }

    pub fn get(&self, kind: WalletKind) -> Option<Rc<dyn WalletExtension>> {
        self.extensions.get(&kind).cloned()
    }

    pub fn installed(&self) -> Vec<WalletKind> {
        WalletKind::ALL
            .into_iter()
            .filter(|kind| self.extensions.contains_key(kind))
            .collect()
    }
}

/// Asks the chosen extension for its account. The caller records it in the store.
pub async fn request_account(registry: &ExtensionRegistry, kind: WalletKind) -> Result<String, WalletError> {
    let extension = registry.get(kind).ok_or(WalletError::Unavailable(kind))?;
    if !extension.capabilities().get_address {
        return Err(WalletError::Unavailable(kind));
    }
    let address = extension.get_address().await?;
    if !is_valid_address(&address) {
        return Err(WalletError::Rejected(format!("{kind} returned an invalid address")));
    }
    Ok(address)
}

/// Normalizes a network-changed payload.
///
/// Accepts bare strings, objects carrying `network`, `name`, `networkKey` or
/// `chain` (possibly nested), and arrays of either.
pub fn network_from_payload(payload: &Value) -> Option<NetworkKind> {
    match payload {
        Value::String(label) => NetworkKind::from_label(label),
        Value::Object(map) => ["network", "name", "networkKey", "chain"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(network_from_payload),
        Value::Array(items) => items.iter().find_map(network_from_payload),
        _ => None,
    }
}

/// Normalizes an account-changed payload into an address.
pub fn address_from_payload(payload: &Value) -> Option<String> {
    match payload {
        Value::String(address) if is_valid_address(address) => Some(address.clone()),
        Value::Object(map) => ["address", "account", "wallet"]
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(address_from_payload),
        Value::Array(items) => items.iter().find_map(address_from_payload),
        _ => None,
    }
}

type SyncInputs = (bool, Option<WalletKind>);

struct Subscription {
    extension: Rc<dyn WalletExtension>,
    listeners: Vec<(WalletEvent, ListenerId)>,
}

/// Keeps wallet event listeners in step with the session.
///
/// Subscribes on session start, unsubscribes on session end, on a wallet
/// kind change and on drop.
#[derive(Default)]
pub struct WalletEventBridge {
    inputs: Option<SyncInputs>,
    active: Option<Subscription>,
}

impl WalletEventBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self) -> bool {
        self.active.is_some()
    }

    pub fn sync(&mut self, session: &WalletSession, registry: &ExtensionRegistry, sink: Rc<dyn Fn(SessionChange)>) {
        let inputs = (session.connected, session.wallet_kind);
        if self.inputs == Some(inputs) {
            return;
        }
        self.detach();
        self.inputs = Some(inputs);

        let (true, Some(kind)) = inputs else {
            return;
        };
        let Some(extension) = registry.get(kind) else {
            debug!(wallet = %kind, "wallet extension not installed, skipping event bridge");
            return;
        };
        if !extension.capabilities().can_subscribe() {
            debug!(wallet = %kind, "wallet extension has no event api, skipping event bridge");
            return;
        }

        let mut listeners = Vec::with_capacity(2);

        let network_sink = sink.clone();
        let on_network: EventListener = Rc::new(move |payload: Value| match network_from_payload(&payload) {
            Some(network) => network_sink(SessionChange::Network(network)),
            None => debug!(%payload, "ignoring unrecognized network payload"),
        });
        if let Some(id) = extension.on(WalletEvent::NetworkChanged, on_network) {
            listeners.push((WalletEvent::NetworkChanged, id));
        }

        let on_account: EventListener = Rc::new(move |payload: Value| match address_from_payload(&payload) {
            Some(address) => sink(SessionChange::Address(address)),
            None => debug!(%payload, "ignoring unrecognized account payload"),
        });
        if let Some(id) = extension.on(WalletEvent::AccountChanged, on_account) {
            listeners.push((WalletEvent::AccountChanged, id));
        }

        info!(wallet = %kind, listeners = listeners.len(), "wallet event bridge attached");
        self.active = Some(Subscription { extension, listeners });
    }

    /// Removes every listener this bridge registered.
    pub fn detach(&mut self) {
        self.inputs = None;
        if let Some(subscription) = self.active.take() {
            for (event, id) in subscription.listeners {
                subscription.extension.off(event, id);
            }
            debug!(wallet = %subscription.extension.kind(), "wallet event bridge detached");
        }
    }
}

impl Drop for WalletEventBridge {
    fn drop(&mut self) {
        self.detach();
    }
}
