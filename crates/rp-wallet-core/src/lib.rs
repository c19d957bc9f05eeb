pub mod bridge;
pub mod error;
pub mod page;
pub mod routes;
pub mod store;
pub mod wizard;

pub use bridge::{
    Capabilities, EventListener, ExtensionRegistry, ListenerId, SignedSubmission, WalletEvent, WalletEventBridge,
    WalletExtension,
};
pub use error::{CANCELLED_SENTINEL, WalletError};
pub use page::{MismatchDialog, PageState, SubmitContext, SubmitOutcome, TransactionPage};
pub use routes::Route;
pub use store::{SessionChange, WalletStore};
pub use wizard::{Scheme, SchemeStep, SchemeWizard};
