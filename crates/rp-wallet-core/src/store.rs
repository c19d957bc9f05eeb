//! Wallet session state shared by every page.
//!
//! The store is an explicit context value. Each setter updates memory,
//! writes the persisted subset, notifies observers and hands back the new
//! snapshot. Storage failures never fail a setter: memory stays
//! authoritative and the failure is logged.

use rp_api_types::{NetworkKind, PersistedSession, SESSION_STORAGE_KEY, WalletKind, WalletSession};
use rp_storage::{SessionStorage, load_json, save_json};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

/// A normalized change reported by a wallet extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Network(NetworkKind),
    Address(String),
}

type Observer = Rc<dyn Fn(&WalletSession)>;

pub struct WalletStore<S: SessionStorage> {
    storage: S,
    session: RefCell<WalletSession>,
    observers: RefCell<Vec<Observer>>,
}

impl<S: SessionStorage> WalletStore<S> {
    /// Restores the persisted session; any failure yields the default session.
    pub fn load(storage: S) -> Self {
        let session = match load_json::<PersistedSession>(&storage, SESSION_STORAGE_KEY) {
            Ok(Some(record)) => WalletSession::from_persisted(record),
            Ok(None) => WalletSession::default(),
            Err(err) => {
                warn!(error = %err, "discarding unreadable wallet session");
                WalletSession::default()
            }
        };
        debug!(connected = session.connected, network = %session.network, "wallet session loaded");

        Self {
            storage,
            session: RefCell::new(session),
            observers: RefCell::default(),
        }
    }

    pub fn session(&self) -> WalletSession {
        self.session.borrow().clone()
    }

    pub fn address(&self) -> Option<String> {
        self.session.borrow().address.clone()
    }

    pub fn connected(&self) -> bool {
        self.session.borrow().connected
    }

    pub fn wallet_kind(&self) -> Option<WalletKind> {
        self.session.borrow().wallet_kind
    }

    pub fn network(&self) -> NetworkKind {
        self.session.borrow().network
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Registers a callback run after every change.
    pub fn observe(&self, observer: impl Fn(&WalletSession) + 'static) {
        self.observers.borrow_mut().push(Rc::new(observer));
    }

    pub fn set_address(&self, address: Option<String>) -> WalletSession {
        self.update(|session| session.address = address)
    }

    pub fn set_connected(&self, connected: bool) -> WalletSession {
        self.update(|session| session.connected = connected)
    }

    pub fn set_wallet_kind(&self, wallet_kind: Option<WalletKind>) -> WalletSession {
        self.update(|session| session.wallet_kind = wallet_kind)
    }

    pub fn set_network(&self, network: NetworkKind) -> WalletSession {
        self.update(|session| session.network = network)
    }

    pub fn connect(&self, wallet_kind: WalletKind, address: impl Into<String>) -> WalletSession {
        let address = address.into();
        self.update(|session| {
            session.wallet_kind = Some(wallet_kind);
            session.address = Some(address);
            session.connected = true;
        })
    }

    /// Forgets the wallet and its persisted record. The network selection stays.
    pub fn disconnect(&self) -> WalletSession {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            session.address = None;
            session.connected = false;
            session.wallet_kind = None;
            session.clone()
        };
        if let Err(err) = self.storage.remove(SESSION_STORAGE_KEY) {
            warn!(error = %err, "failed to clear persisted wallet session");
        }
        self.notify(&snapshot);
        snapshot
    }

    pub fn apply(&self, change: SessionChange) -> WalletSession {
        match change {
            SessionChange::Network(network) => self.set_network(network),
            SessionChange::Address(address) => self.set_address(Some(address)),
        }
    }

    fn update(&self, mutate: impl FnOnce(&mut WalletSession)) -> WalletSession {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            mutate(&mut session);
            session.clone()
        };
        if let Err(err) = save_json(&self.storage, SESSION_STORAGE_KEY, &snapshot.persisted()) {
            warn!(error = %err, "failed to persist wallet session");
        }
        self.notify(&snapshot);
        snapshot
    }

    fn notify(&self, snapshot: &WalletSession) {
        let observers = self.observers.borrow().clone();
        for observer in observers {
            observer(snapshot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rp_storage::InMemorySessionStorage;
    use std::cell::Cell;

    const ALICE: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    /// Storage whose every operation fails.
    struct FailingStorage;

    impl SessionStorage for FailingStorage {
        fn get(&self, _key: &str) -> anyhow::Result<Option<String>> {
            Err(anyhow::anyhow!("storage unavailable"))
        }

        fn set(&self, _key: &str, _value: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("quota exceeded"))
        }

        fn remove(&self, _key: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("storage unavailable"))
        }
    }

    fn persisted(storage: &InMemorySessionStorage) -> serde_json::Value {
        let raw = storage.get(SESSION_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn missing_record_loads_default_session() {
        let store = WalletStore::load(InMemorySessionStorage::default());
        assert_eq!(store.session(), WalletSession::default());
        assert_eq!(store.network(), NetworkKind::Mainnet);
    }

    #[test]
    fn malformed_record_loads_default_session() {
        let storage = InMemorySessionStorage::with_entry(SESSION_STORAGE_KEY, "{\"address\":");
        let store = WalletStore::load(storage);
        assert_eq!(store.session(), WalletSession::default());
    }

    #[test]
    fn storage_failures_never_propagate() {
        let store = WalletStore::load(FailingStorage);
        let snapshot = store.set_network(NetworkKind::Devnet);
        assert_eq!(snapshot.network, NetworkKind::Devnet);
        assert!(!store.disconnect().connected);
    }

    #[test]
    fn connect_persists_wallet_type() {
        let store = WalletStore::load(InMemorySessionStorage::default());
        let snapshot = store.connect(WalletKind::GemWallet, ALICE);
        assert!(snapshot.connected);

        let json = persisted(store.storage());
        assert_eq!(json["walletType"], "gemwallet");
        assert_eq!(json["address"], ALICE);

        let reloaded = WalletStore::load(InMemorySessionStorage::with_entry(
            SESSION_STORAGE_KEY,
            &json.to_string(),
        ));
        assert_eq!(reloaded.session(), snapshot);
    }

    #[test]
    fn disconnect_keeps_network_and_removes_record() {
        let store = WalletStore::load(InMemorySessionStorage::default());
        store.connect(WalletKind::Xaman, ALICE);
        store.set_network(NetworkKind::Testnet);

        let snapshot = store.disconnect();
        assert_eq!(snapshot.address, None);
        assert_eq!(snapshot.wallet_kind, None);
        assert!(!snapshot.connected);
        assert_eq!(snapshot.network, NetworkKind::Testnet);
        assert!(store.storage().is_empty());
    }

    #[test]
    fn snapshots_are_detached_from_later_changes() {
        let store = WalletStore::load(InMemorySessionStorage::default());
        let before = store.set_network(NetworkKind::Testnet);
        store.set_network(NetworkKind::Devnet);
        assert_eq!(before.network, NetworkKind::Testnet);
    }

    #[test]
    fn apply_routes_changes_through_setters() {
        let store = WalletStore::load(InMemorySessionStorage::default());
        let seen = Rc::new(Cell::new(0));
        let counter = seen.clone();
        store.observe(move |_| counter.set(counter.get() + 1));

        store.apply(SessionChange::Network(NetworkKind::Devnet));
        store.apply(SessionChange::Address(ALICE.to_owned()));

        assert_eq!(seen.get(), 2);
        assert_eq!(persisted(store.storage())["network"], "devnet");
        assert_eq!(store.address().as_deref(), Some(ALICE));
    }
}
