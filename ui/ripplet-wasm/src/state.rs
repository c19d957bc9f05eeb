//! Application context.
//!
//! Built once at startup and kept in a `thread_local!` (WASM is
//! single-threaded). Handlers clone the `App` handle instead of holding a
//! borrow across awaits.

use crate::extensions;
use crate::storage::LocalSessionStorage;
use gloo_console as console;
use rp_ledger_client::LedgerClient;
use rp_ledger_xrpl::XrplRpcConnector;
use rp_tx_builders::TransactionKind;
use rp_wallet_core::{
    ExtensionRegistry, Scheme, SchemeWizard, SessionChange, SubmitContext, TransactionPage, WalletEventBridge,
    WalletStore,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type Store = WalletStore<LocalSessionStorage>;

#[derive(Clone)]
pub struct App {
    pub store: Rc<Store>,
    pub registry: Rc<ExtensionRegistry>,
    pub ledger: Rc<LedgerClient>,
    pub bridge: Rc<RefCell<WalletEventBridge>>,
    page: Rc<RefCell<Rc<TransactionPage>>>,
    scheme: Rc<Cell<Option<&'static Scheme>>>,
    wizard: Rc<RefCell<Option<SchemeWizard>>>,
    scheme_finished: Rc<Cell<bool>>,
}

impl App {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            store: Rc::new(WalletStore::load(LocalSessionStorage)),
            registry: Rc::new(extensions::discover()),
            ledger: Rc::new(LedgerClient::new(Rc::new(XrplRpcConnector::new()))),
            bridge: Rc::new(RefCell::new(WalletEventBridge::new())),
            page: Rc::new(RefCell::new(Rc::new(TransactionPage::new(kind)))),
            scheme: Rc::default(),
            wizard: Rc::default(),
            scheme_finished: Rc::default(),
        }
    }

    /// Starts a guided flow; the last step's `next` marks it finished.
    pub fn start_scheme(&self, scheme: &'static Scheme) {
        let finished = self.scheme_finished.clone();
        let name = scheme.name;
        let wizard = SchemeWizard::for_scheme(scheme).on_complete(move || {
            console::log!(format!("scheme {name} finished"));
            finished.set(true);
        });
        self.scheme.set(Some(scheme));
        self.scheme_finished.set(false);
        *self.wizard.borrow_mut() = Some(wizard);
    }

    pub fn end_scheme(&self) {
        self.scheme.set(None);
        self.wizard.borrow_mut().take();
    }

    pub fn scheme(&self) -> Option<&'static Scheme> {
        self.scheme.get()
    }

    pub fn scheme_finished(&self) -> bool {
        self.scheme_finished.get()
    }

    /// Runs `f` against the active wizard, if any.
    pub fn with_wizard<R>(&self, f: impl FnOnce(&mut SchemeWizard) -> R) -> Option<R> {
        self.wizard.borrow_mut().as_mut().map(f)
    }

    pub fn page(&self) -> Rc<TransactionPage> {
        self.page.borrow().clone()
    }

    /// Replaces the transaction page, dropping any feedback shown on the old one.
    pub fn set_page(&self, page: TransactionPage) -> Rc<TransactionPage> {
        let page = Rc::new(page);
        *self.page.borrow_mut() = page.clone();
        page
    }

    pub fn submit_context(&self) -> SubmitContext<'_, LocalSessionStorage> {
        SubmitContext {
            store: &self.store,
            registry: &self.registry,
            ledger: &self.ledger,
        }
    }

    /// Sink handed to the wallet event bridge.
    pub fn session_sink(&self) -> Rc<dyn Fn(SessionChange)> {
        let store = self.store.clone();
        Rc::new(move |change: SessionChange| {
            store.apply(change);
        })
    }

    /// Re-syncs the event bridge with the current session.
    ///
    /// A wallet may fire its listener while `on` is still running; the
    /// nested call is skipped since only network or address changed.
    pub fn sync_bridge(&self) {
        let session = self.store.session();
        if let Ok(mut bridge) = self.bridge.try_borrow_mut() {
            bridge.sync(&session, &self.registry, self.session_sink());
        }
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

pub fn install(app: App) {
    APP.with(|slot| *slot.borrow_mut() = Some(app));
}

/// The installed application, if startup has completed.
pub fn app() -> Option<App> {
    APP.with(|slot| slot.borrow().clone())
}
