//! XRPL transaction construction: raw form validation, typed builders and
//! the JSON records handed to a browser wallet for signing.

pub mod builders;
pub mod error;
pub mod forms;
pub mod kind;
pub mod transaction;
pub mod validate;

pub use error::{BuildError, FieldErrors, PrepareError};
pub use forms::{DynamicForm, FormSpec, TransactionForm};
pub use kind::TransactionKind;
pub use transaction::{Amount, IssuedAmount, MptAmount, Transaction};
