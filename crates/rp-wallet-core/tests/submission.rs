mod common;

use common::{ALICE, BOB, HASH, MockConnector, MockExtension};
use rp_api_types::{NetworkKind, WalletKind};
use rp_ledger_client::{LedgerClient, LedgerError, PollPolicy, TransactionOutcome};
use rp_storage::InMemorySessionStorage;
use rp_tx_builders::forms::{PaymentForm, TrustSetForm};
use rp_tx_builders::TransactionKind;
use rp_wallet_core::{
    ExtensionRegistry, MismatchDialog, PageState, SubmitContext, SubmitOutcome, TransactionPage, WalletError, WalletStore,
};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use std::task::Poll;
use std::time::Duration;

struct Harness {
    store: WalletStore<InMemorySessionStorage>,
    registry: ExtensionRegistry,
    ledger: LedgerClient,
    connector: Rc<MockConnector>,
    wallet: Rc<MockExtension>,
}

impl Harness {
    async fn connected_on(network: NetworkKind, connector: Rc<MockConnector>) -> Self {
        let wallet = MockExtension::new(WalletKind::GemWallet, network.as_str());
        let mut registry = ExtensionRegistry::default();
        registry.register(wallet.clone());

        let store = WalletStore::load(InMemorySessionStorage::default());
        store.set_network(network);
        store.connect(WalletKind::GemWallet, ALICE);

        let ledger = LedgerClient::new(connector.clone()).with_poll_policy(PollPolicy {
            attempts: 5,
            interval: Duration::ZERO,
        });
        ledger.connect_to(network).await.unwrap();

        Self {
            store,
            registry,
            ledger,
            connector,
            wallet,
        }
    }

    fn ctx(&self) -> SubmitContext<'_, InMemorySessionStorage> {
        SubmitContext {
            store: &self.store,
            registry: &self.registry,
            ledger: &self.ledger,
        }
    }
}

fn payment() -> PaymentForm {
    PaymentForm {
        account: ALICE.to_owned(),
        destination: BOB.to_owned(),
        amount: "12.5".to_owned(),
        ..Default::default()
    }
}

fn recording_page(kind: TransactionKind) -> (TransactionPage, Rc<RefCell<Vec<PageState>>>) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    let page = TransactionPage::new(kind).with_observer(move |state| sink.borrow_mut().push(state.clone()));
    (page, seen)
}

#[tokio::test]
async fn successful_payment_shows_hash_and_explorer_link() {
    let harness = Harness::connected_on(NetworkKind::Testnet, MockConnector::new()).await;
    let (page, seen) = recording_page(TransactionKind::Payment);

    let outcome = page.submit(&payment(), &harness.ctx()).await;

    let SubmitOutcome::Completed(result) = outcome else {
        panic!("expected a completed submission");
    };
    assert!(result.success);
    assert_eq!(result.transaction_hash, HASH);
    assert_eq!(seen.borrow().len(), 2);
    assert_eq!(seen.borrow()[0], PageState::Submitting);
    assert!(matches!(seen.borrow()[1], PageState::Result(_)));
    assert_eq!(
        page.explorer_link(harness.store.network()).as_deref(),
        Some(format!("https://testnet.xrpl.org/transactions/{HASH}").as_str())
    );

    let signed = harness.wallet.signed.borrow();
    assert_eq!(signed[0]["TransactionType"], "Payment");
    assert_eq!(signed[0]["Amount"], "12500000");
}

#[tokio::test]
async fn invalid_issuer_stays_on_form_without_signing() {
    let harness = Harness::connected_on(NetworkKind::Mainnet, MockConnector::new()).await;
    let (page, seen) = recording_page(TransactionKind::TrustSet);
    let form = TrustSetForm {
        account: ALICE.to_owned(),
        currency: "usd".to_owned(),
        issuer: "rInvalidAddr".to_owned(),
        limit: "1000".to_owned(),
        ..Default::default()
    };

    assert_eq!(page.submit(&form, &harness.ctx()).await, SubmitOutcome::Invalid);
    assert_eq!(page.state(), PageState::Form);
    assert!(page.field_errors().get("issuer").is_some());
    assert!(harness.wallet.signed.borrow().is_empty());
    assert!(seen.borrow().is_empty());
}

#[tokio::test]
async fn wallet_mismatch_returns_to_form_with_dialog() {
    let harness = Harness::connected_on(NetworkKind::Testnet, MockConnector::new()).await;
    harness.wallet.reply_with(Err(WalletError::NetworkMismatch {
        expected: NetworkKind::Testnet,
        actual: "Mainnet".to_owned(),
    }));
    let page = TransactionPage::new(TransactionKind::Payment);

    assert_eq!(page.submit(&payment(), &harness.ctx()).await, SubmitOutcome::Mismatch);
    assert_eq!(page.state(), PageState::Form);
    assert_eq!(
        page.mismatch(),
        Some(MismatchDialog {
            expected: NetworkKind::Testnet,
            actual: "Mainnet".to_owned()
        })
    );
    assert_eq!(page.result(), None);
}

#[tokio::test]
async fn network_precheck_blocks_signing() {
    let harness = Harness::connected_on(NetworkKind::Testnet, MockConnector::new()).await;
    *harness.wallet.network.borrow_mut() = "MAINNET".to_owned();
    let page = TransactionPage::new(TransactionKind::Payment);

    assert_eq!(page.submit(&payment(), &harness.ctx()).await, SubmitOutcome::Mismatch);
    assert_eq!(page.mismatch().unwrap().actual, "MAINNET");
    assert!(harness.wallet.signed.borrow().is_empty());
}

#[tokio::test]
async fn cancelled_signing_is_silent() {
    let harness = Harness::connected_on(NetworkKind::Mainnet, MockConnector::new()).await;
    harness.wallet.reply_with(Err(WalletError::classify("USER_CANCELLED")));
    let (page, seen) = recording_page(TransactionKind::Payment);

    assert_eq!(page.submit(&payment(), &harness.ctx()).await, SubmitOutcome::Cancelled);
    assert_eq!(page.state(), PageState::Form);
    assert_eq!(page.result(), None);
    assert_eq!(page.mismatch(), None);
    assert_eq!(page.build_error(), None);
    assert!(page.field_errors().is_empty());
    assert_eq!(*seen.borrow(), vec![PageState::Submitting, PageState::Form]);
}

#[tokio::test]
async fn other_wallet_failure_is_a_failed_result() {
    let harness = Harness::connected_on(NetworkKind::Mainnet, MockConnector::new()).await;
    harness.wallet.reply_with(Err(WalletError::Rejected("tefPAST_SEQ".to_owned())));
    let page = TransactionPage::new(TransactionKind::Payment);

    page.submit(&payment(), &harness.ctx()).await;
    let result = page.result().unwrap();
    assert!(!result.success);
    assert!(result.message.unwrap().contains("tefPAST_SEQ"));

    assert!(page.retry());
    assert_eq!(page.state(), PageState::Form);
    assert_eq!(page.result(), None);
}

#[tokio::test]
async fn disconnected_wallet_opens_selection_modal() {
    let harness = Harness::connected_on(NetworkKind::Mainnet, MockConnector::new()).await;
    harness.store.disconnect();
    let page = TransactionPage::new(TransactionKind::Payment);

    assert_eq!(page.submit(&payment(), &harness.ctx()).await, SubmitOutcome::WalletRequired);
    assert!(page.wallet_modal_open());
    assert_eq!(page.state(), PageState::Form);
}

#[tokio::test]
async fn dropped_connection_is_recovered_once() {
    let connector = MockConnector::scripted(vec![vec![Err(LedgerError::ConnectionLost("socket closed".into()))]]);
    let harness = Harness::connected_on(NetworkKind::Testnet, connector).await;
    let page = TransactionPage::new(TransactionKind::Payment);

    let SubmitOutcome::Completed(result) = page.submit(&payment(), &harness.ctx()).await else {
        panic!("expected a completed submission");
    };
    assert!(result.success);
    assert_eq!(harness.connector.opened.borrow().len(), 2);
    assert_eq!(harness.connector.live().len(), 1);
}

#[tokio::test]
async fn second_ledger_failure_keeps_hash_with_unknown_code() {
    let connector = MockConnector::scripted(vec![
        vec![Err(LedgerError::ConnectionLost("first".into()))],
        vec![Err(LedgerError::ConnectionLost("second".into()))],
    ]);
    let harness = Harness::connected_on(NetworkKind::Testnet, connector).await;
    let page = TransactionPage::new(TransactionKind::Payment);

    page.submit(&payment(), &harness.ctx()).await;
    let result = page.result().unwrap();
    assert!(!result.success);
    assert_eq!(result.result_code, "unknown");
    assert_eq!(result.transaction_hash, HASH);
    assert_eq!(harness.connector.opened.borrow().len(), 2);
}

fn not_found() -> TransactionOutcome {
    TransactionOutcome {
        hash: HASH.to_owned(),
        result_code: "txnNotFound".to_owned(),
        validated: false,
        ledger_index: None,
    }
}

#[tokio::test]
async fn pending_transaction_is_polled_until_validated() {
    // the default reply after the script is a validated tesSUCCESS
    let connector = MockConnector::scripted(vec![vec![Ok(not_found())]]);
    let harness = Harness::connected_on(NetworkKind::Testnet, connector).await;
    let page = TransactionPage::new(TransactionKind::Payment);

    let SubmitOutcome::Completed(result) = page.submit(&payment(), &harness.ctx()).await else {
        panic!("expected a completed submission");
    };
    assert!(result.success);
    assert_eq!(result.result_code, "tesSUCCESS");
    assert_eq!(result.transaction_hash, HASH);
    assert_eq!(harness.connector.opened.borrow().len(), 1);
}

#[tokio::test]
async fn result_view_ignores_submit_until_back() {
    let harness = Harness::connected_on(NetworkKind::Mainnet, MockConnector::new()).await;
    let page = TransactionPage::new(TransactionKind::Payment);

    assert!(matches!(page.submit(&payment(), &harness.ctx()).await, SubmitOutcome::Completed(_)));
    let shown = page.result().unwrap();

    assert_eq!(page.submit(&payment(), &harness.ctx()).await, SubmitOutcome::Ignored);
    assert_eq!(page.state(), PageState::Result(shown));
    assert_eq!(harness.wallet.signed.borrow().len(), 1);

    assert!(page.back());
    assert!(matches!(page.submit(&payment(), &harness.ctx()).await, SubmitOutcome::Completed(_)));
    assert_eq!(harness.wallet.signed.borrow().len(), 2);
}

#[tokio::test]
async fn resubmitting_while_in_flight_is_ignored() {
    let harness = Harness::connected_on(NetworkKind::Mainnet, MockConnector::new()).await;
    harness.wallet.park_on_sign.set(true);
    let page = TransactionPage::new(TransactionKind::Payment);
    let form = payment();
    let ctx = harness.ctx();

    let mut first = std::pin::pin!(page.submit(&form, &ctx));
    let parked = std::future::poll_fn(|cx| Poll::Ready(first.as_mut().poll(cx).is_pending())).await;
    assert!(parked);
    assert_eq!(page.state(), PageState::Submitting);

    assert_eq!(page.submit(&form, &ctx).await, SubmitOutcome::Ignored);
    assert!(matches!(first.await, SubmitOutcome::Completed(_)));
    assert_eq!(harness.wallet.signed.borrow().len(), 1);
}

#[tokio::test]
async fn builder_failure_shows_generic_message() {
    let harness = Harness::connected_on(NetworkKind::Mainnet, MockConnector::new()).await;
    let page = TransactionPage::new(TransactionKind::Payment);
    let form = PaymentForm {
        destination: ALICE.to_owned(),
        ..payment()
    };

    assert_eq!(page.submit(&form, &harness.ctx()).await, SubmitOutcome::BuildFailed);
    assert!(page.build_error().unwrap().starts_with("Could not build the transaction"));
    assert_eq!(page.state(), PageState::Form);
    assert!(harness.wallet.signed.borrow().is_empty());
}
