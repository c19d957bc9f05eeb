mod common;

use common::{ALICE, BOB, MockConnector, MockExtension};
use rp_api_types::{NetworkKind, SESSION_STORAGE_KEY, WalletKind};
use rp_ledger_client::LedgerClient;
use rp_storage::{InMemorySessionStorage, SessionStorage};
use rp_wallet_core::bridge::request_account;
use rp_wallet_core::{Capabilities, ExtensionRegistry, SessionChange, WalletError, WalletEvent, WalletEventBridge, WalletStore};
use serde_json::json;
use std::rc::Rc;

fn persisted_network(store: &WalletStore<InMemorySessionStorage>) -> String {
    let raw = store.storage().get(SESSION_STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    json["network"].as_str().unwrap().to_owned()
}

fn sink_into(store: &Rc<WalletStore<InMemorySessionStorage>>) -> Rc<dyn Fn(SessionChange)> {
    let store = store.clone();
    Rc::new(move |change: SessionChange| {
        store.apply(change);
    })
}

#[tokio::test]
async fn selecting_testnet_updates_badge_persists_and_reconnects() {
    let store = WalletStore::load(InMemorySessionStorage::default());
    let connector = MockConnector::new();
    let ledger = LedgerClient::new(connector.clone());
    ledger.sync_network(store.network()).await.unwrap();
    assert_eq!(store.network().badge(), "Main");

    let snapshot = store.set_network(NetworkKind::Testnet);
    ledger.sync_network(snapshot.network).await.unwrap();

    assert_eq!(snapshot.network.badge(), "Test");
    assert_eq!(persisted_network(&store), "testnet");

    let opened = connector.opened.borrow();
    assert_eq!(opened.len(), 2);
    assert!(!opened[0].connected.get());
    assert_eq!(opened[1].endpoint, "wss://s.altnet.rippletest.net:51233/");
    assert_eq!(connector.live().len(), 1);
}

#[tokio::test]
async fn every_network_switch_leaves_one_live_connection() {
    let connector = MockConnector::new();
    let ledger = LedgerClient::new(connector.clone());

    for network in [NetworkKind::Devnet, NetworkKind::Mainnet, NetworkKind::Testnet, NetworkKind::Devnet] {
        ledger.connect_to(network).await.unwrap();
        let live = connector.live();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].network, network);
    }
}

#[test]
fn bridge_translates_wallet_events_into_store_changes() {
    let wallet = MockExtension::new(WalletKind::Crossmark, "mainnet");
    let mut registry = ExtensionRegistry::default();
    registry.register(wallet.clone());

    let store = Rc::new(WalletStore::load(InMemorySessionStorage::default()));
    let session = store.connect(WalletKind::Crossmark, ALICE);

    let mut bridge = WalletEventBridge::new();
    bridge.sync(&session, &registry, sink_into(&store));
    assert!(bridge.is_attached());
    assert_eq!(wallet.listener_count(), 2);

    wallet.emit(WalletEvent::NetworkChanged, json!({ "network": { "name": "Testnet" } }));
    assert_eq!(store.network(), NetworkKind::Testnet);
    assert_eq!(persisted_network(&store), "testnet");

    wallet.emit(WalletEvent::AccountChanged, json!([BOB]));
    assert_eq!(store.address().as_deref(), Some(BOB));

    wallet.emit(WalletEvent::NetworkChanged, json!("sidechain"));
    assert_eq!(store.network(), NetworkKind::Testnet);
}

#[test]
fn bridge_resubscribes_only_when_inputs_change() {
    let wallet = MockExtension::new(WalletKind::GemWallet, "mainnet");
    let mut registry = ExtensionRegistry::default();
    registry.register(wallet.clone());
    let store = Rc::new(WalletStore::load(InMemorySessionStorage::default()));

    let mut bridge = WalletEventBridge::new();
    let session = store.connect(WalletKind::GemWallet, ALICE);
    bridge.sync(&session, &registry, sink_into(&store));
    bridge.sync(&store.set_network(NetworkKind::Devnet), &registry, sink_into(&store));
    assert_eq!(wallet.listener_count(), 2);

    bridge.sync(&store.disconnect(), &registry, sink_into(&store));
    assert!(!bridge.is_attached());
    assert_eq!(wallet.listener_count(), 0);

    bridge.sync(&store.connect(WalletKind::GemWallet, ALICE), &registry, sink_into(&store));
    assert_eq!(wallet.listener_count(), 2);
    drop(bridge);
    assert_eq!(wallet.listener_count(), 0);
}

#[test]
fn bridge_skips_missing_or_limited_wallets() {
    let limited = MockExtension::with_capabilities(
        WalletKind::Xaman,
        "mainnet",
        Capabilities {
            on: true,
            off: false,
            ..Capabilities::full()
        },
    );
    let mut registry = ExtensionRegistry::default();
    registry.register(limited.clone());
    let store = Rc::new(WalletStore::load(InMemorySessionStorage::default()));

    let mut bridge = WalletEventBridge::new();
    bridge.sync(&store.connect(WalletKind::Xaman, ALICE), &registry, sink_into(&store));
    assert!(!bridge.is_attached());
    assert_eq!(limited.listener_count(), 0);

    bridge.sync(&store.connect(WalletKind::GemWallet, ALICE), &registry, sink_into(&store));
    assert!(!bridge.is_attached());
}

#[tokio::test]
async fn request_account_needs_an_installed_wallet() {
    let mut registry = ExtensionRegistry::default();
    assert_eq!(
        request_account(&registry, WalletKind::GemWallet).await,
        Err(WalletError::Unavailable(WalletKind::GemWallet))
    );

    registry.register(MockExtension::new(WalletKind::GemWallet, "mainnet"));
    assert_eq!(registry.installed(), vec![WalletKind::GemWallet]);
    assert_eq!(request_account(&registry, WalletKind::GemWallet).await.as_deref(), Ok(ALICE));
}
