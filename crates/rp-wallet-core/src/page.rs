//! Form → submitting → result lifecycle shared by every transaction page.

use crate::bridge::ExtensionRegistry;
use crate::error::WalletError;
use crate::store::WalletStore;
use rp_api_types::{NetworkKind, SubmissionResult};
use rp_ledger_client::LedgerClient;
use rp_storage::SessionStorage;
use rp_tx_builders::{FieldErrors, PrepareError, TransactionForm, TransactionKind};
use std::cell::RefCell;
use tracing::{debug, info, warn};

/// Result code shown when the outcome could not be read back from the ledger.
pub const UNKNOWN_RESULT_CODE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageState {
    Form,
    Submitting,
    Result(SubmissionResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MismatchDialog {
    pub expected: NetworkKind,
    pub actual: String,
}

/// What a call to `submit` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The page was not showing its form: a submission was in flight or a
    /// result is on screen.
    Ignored,
    Invalid,
    BuildFailed,
    WalletRequired,
    Mismatch,
    Cancelled,
    Completed(SubmissionResult),
}

/// Everything `submit` needs from the application context.
pub struct SubmitContext<'a, S: SessionStorage> {
    pub store: &'a WalletStore<S>,
    pub registry: &'a ExtensionRegistry,
    pub ledger: &'a LedgerClient,
}

pub struct TransactionPage {
    kind: TransactionKind,
    state: RefCell<PageState>,
    field_errors: RefCell<FieldErrors>,
    build_error: RefCell<Option<String>>,
    wallet_modal_open: RefCell<bool>,
    mismatch: RefCell<Option<MismatchDialog>>,
    observer: Option<Box<dyn Fn(&PageState)>>,
}

impl TransactionPage {
    pub fn new(kind: TransactionKind) -> Self {
        Self {
            kind,
            state: RefCell::new(PageState::Form),
            field_errors: RefCell::default(),
            build_error: RefCell::default(),
            wallet_modal_open: RefCell::new(false),
            mismatch: RefCell::default(),
            observer: None,
        }
    }

    /// Reports every state transition.
    pub fn with_observer(mut self, observer: impl Fn(&PageState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn state(&self) -> PageState {
        self.state.borrow().clone()
    }

    pub fn result(&self) -> Option<SubmissionResult> {
        match &*self.state.borrow() {
            PageState::Result(result) => Some(result.clone()),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> FieldErrors {
        self.field_errors.borrow().clone()
    }

    pub fn build_error(&self) -> Option<String> {
        self.build_error.borrow().clone()
    }

    pub fn wallet_modal_open(&self) -> bool {
        *self.wallet_modal_open.borrow()
    }

    pub fn close_wallet_modal(&self) {
        *self.wallet_modal_open.borrow_mut() = false;
    }

    pub fn mismatch(&self) -> Option<MismatchDialog> {
        self.mismatch.borrow().clone()
    }

    pub fn dismiss_mismatch(&self) {
        self.mismatch.borrow_mut().take();
    }

    /// Explorer link for the shown result on `network`.
    pub fn explorer_link(&self, network: NetworkKind) -> Option<String> {
        self.result()
            .filter(|result| !result.transaction_hash.is_empty())
            .map(|result| network.descriptor().explorer_tx_url(&result.transaction_hash))
    }

    /// Leaves the result view and clears the result.
    pub fn back(&self) -> bool {
        if matches!(*self.state.borrow(), PageState::Result(_)) {
            self.transition(PageState::Form);
            true
        } else {
            false
        }
    }

    pub fn retry(&self) -> bool {
        self.back()
    }

    pub async fn submit<S: SessionStorage>(&self, form: &dyn TransactionForm, ctx: &SubmitContext<'_, S>) -> SubmitOutcome {
        if *self.state.borrow() != PageState::Form {
            debug!(kind = %self.kind, "submit ignored outside the form state");
            return SubmitOutcome::Ignored;
        }
        self.clear_feedback();

        let transaction = match form.prepare() {
            Ok(transaction) => transaction,
            Err(PrepareError::Form(errors)) => {
                *self.field_errors.borrow_mut() = errors;
                return SubmitOutcome::Invalid;
            }
            Err(err) => {
                warn!(kind = %self.kind, error = %err, "transaction build failed");
                *self.build_error.borrow_mut() = Some(format!("Could not build the transaction: {err}"));
                return SubmitOutcome::BuildFailed;
            }
        };

        let session = ctx.store.session();
        let extension = match session.wallet_kind {
            Some(kind) if session.connected => ctx.registry.get(kind),
            _ => None,
        };
        let Some(extension) = extension.filter(|extension| extension.capabilities().sign_and_submit) else {
            *self.wallet_modal_open.borrow_mut() = true;
            return SubmitOutcome::WalletRequired;
        };

        self.transition(PageState::Submitting);
        let expected = session.network;

        if extension.capabilities().get_network {
            match extension.get_network().await {
                Ok(label) => {
                    if NetworkKind::from_label(&label).is_some_and(|actual| actual != expected) {
                        return self.show_mismatch(expected, label);
                    }
                }
                Err(err) => debug!(error = %err, "wallet network pre-check unavailable"),
            }
        }

        let signed = match extension.sign_and_submit(&transaction.to_json(), expected).await {
            Ok(signed) => signed,
            Err(WalletError::Cancelled) => {
                debug!(kind = %self.kind, "signing cancelled by user");
                self.transition(PageState::Form);
                return SubmitOutcome::Cancelled;
            }
            Err(WalletError::NetworkMismatch { expected, actual }) => return self.show_mismatch(expected, actual),
            Err(err) => {
                let result = SubmissionResult::failure("", UNKNOWN_RESULT_CODE, err.to_string());
                self.transition(PageState::Result(result.clone()));
                return SubmitOutcome::Completed(result);
            }
        };

        let result = match ctx.ledger.await_outcome(&signed.hash).await {
            Ok(outcome) => outcome.into_submission_result(),
            Err(err) => {
                warn!(hash = %signed.hash, error = %err, "could not read transaction outcome");
                SubmissionResult::failure(signed.hash.clone(), UNKNOWN_RESULT_CODE, err.to_string())
            }
        };
        info!(kind = %self.kind, hash = %result.transaction_hash, code = %result.result_code, "submission finished");
        self.transition(PageState::Result(result.clone()));
        SubmitOutcome::Completed(result)
    }

    fn show_mismatch(&self, expected: NetworkKind, actual: String) -> SubmitOutcome {
        warn!(%expected, %actual, "wallet network does not match");
        *self.mismatch.borrow_mut() = Some(MismatchDialog { expected, actual });
        self.transition(PageState::Form);
        SubmitOutcome::Mismatch
    }

    fn clear_feedback(&self) {
        *self.field_errors.borrow_mut() = FieldErrors::default();
        self.build_error.borrow_mut().take();
        self.mismatch.borrow_mut().take();
    }

    fn transition(&self, next: PageState) {
        *self.state.borrow_mut() = next.clone();
        if let Some(observer) = &self.observer {
            observer(&next);
        }
    }
}
