//! Raw form records and their field-level validation.
//!
//! Every field arrives as text (inputs, selects and checkboxes alike).
//! `validate` reports inline errors per field and only hands typed params
//! to the builder when the whole form is clean.

use crate::builders::*;
use crate::error::{BuildError, FieldErrors, PrepareError};
use crate::kind::TransactionKind;
use crate::transaction::{Amount, IssuedAmount, MptAmount, Transaction};
use crate::validate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

const REQUIRED: &str = "This field is required";
const INVALID_ADDRESS: &str = "Invalid XRPL address";
const INVALID_CURRENCY: &str = "Invalid currency code";
const INVALID_INTEGER: &str = "Must be a non-negative integer";
const INVALID_AMOUNT: &str = "Invalid amount";
const INVALID_HASH: &str = "Expected 64 hex characters";

/// Anything the page wrapper can turn into a transaction.
pub trait TransactionForm {
    fn kind(&self) -> TransactionKind;
    fn prepare(&self) -> Result<Transaction, PrepareError>;
}

/// A typed form: validation produces params, the builder maps them.
pub trait FormSpec {
    type Params;
    const KIND: TransactionKind;

    fn validate(&self) -> Result<Self::Params, FieldErrors>;
    fn build(params: &Self::Params) -> Result<Transaction, BuildError>;
}

impl<F: FormSpec> TransactionForm for F {
    fn kind(&self) -> TransactionKind {
        F::KIND
    }

    fn prepare(&self) -> Result<Transaction, PrepareError> {
        let params = self.validate().map_err(PrepareError::Form)?;
        Ok(F::build(&params)?)
    }
}

/// Form data collected as a loose field map (browser inputs, CLI flags).
#[derive(Debug, Clone)]
pub struct DynamicForm {
    pub kind: TransactionKind,
    pub fields: Map<String, Value>,
}

impl DynamicForm {
    pub fn new(kind: TransactionKind, fields: Map<String, Value>) -> Self {
        Self { kind, fields }
    }

    /// Builds a form from `name=value` pairs.
    pub fn from_pairs<'a>(kind: TransactionKind, pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let fields = pairs
            .into_iter()
            .map(|(name, value)| (name.to_owned(), Value::String(value.to_owned())))
            .collect();
        Self { kind, fields }
    }

    fn typed<F: FormSpec + for<'de> Deserialize<'de>>(&self) -> Result<Transaction, PrepareError> {
        let normalized: Map<String, Value> = self
            .fields
            .iter()
            .filter_map(|(name, value)| as_text(value).map(|text| (name.clone(), Value::String(text))))
            .collect();
        let form: F = serde_json::from_value(Value::Object(normalized))?;
        form.prepare()
    }
}

impl TransactionForm for DynamicForm {
    fn kind(&self) -> TransactionKind {
        self.kind
    }

    fn prepare(&self) -> Result<Transaction, PrepareError> {
        match self.kind {
            TransactionKind::Payment => self.typed::<PaymentForm>(),
            TransactionKind::TrustSet => self.typed::<TrustSetForm>(),
            TransactionKind::AccountSet => self.typed::<AccountSetForm>(),
            TransactionKind::EscrowCreate => self.typed::<EscrowCreateForm>(),
            TransactionKind::EscrowFinish => self.typed::<EscrowFinishForm>(),
            TransactionKind::EscrowCancel => self.typed::<EscrowCancelForm>(),
            TransactionKind::MptIssuanceCreate => self.typed::<MptIssuanceCreateForm>(),
            TransactionKind::MptIssuanceDestroy => self.typed::<MptIssuanceDestroyForm>(),
            TransactionKind::MptIssuanceSet => self.typed::<MptIssuanceSetForm>(),
            TransactionKind::MptAuthorize => self.typed::<MptAuthorizeForm>(),
            TransactionKind::NftMint => self.typed::<NftMintForm>(),
            TransactionKind::NftBurn => self.typed::<NftBurnForm>(),
            TransactionKind::NftCreateOffer => self.typed::<NftCreateOfferForm>(),
            TransactionKind::NftAcceptOffer => self.typed::<NftAcceptOfferForm>(),
            TransactionKind::NftCancelOffer => self.typed::<NftCancelOfferForm>(),
            TransactionKind::OfferCreate => self.typed::<OfferCreateForm>(),
            TransactionKind::OfferCancel => self.typed::<OfferCancelForm>(),
            TransactionKind::CredentialCreate => self.typed::<CredentialCreateForm>(),
            TransactionKind::CredentialAccept => self.typed::<CredentialAcceptForm>(),
            TransactionKind::CredentialDelete => self.typed::<CredentialDeleteForm>(),
        }
    }
}

impl TransactionKind {
    /// Deserializes, validates and builds in one step.
    pub fn prepare(self, fields: Map<String, Value>) -> Result<Transaction, PrepareError> {
        DynamicForm::new(self, fields).prepare()
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Checkbox semantics for text fields.
pub fn checked(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1" | "yes")
}

struct AmountFields {
    value: &'static str,
    currency: &'static str,
    issuer: &'static str,
}

#[derive(Default)]
struct Checker {
    errors: FieldErrors,
}

impl Checker {
    fn present<'a>(&mut self, field: &'static str, value: &'a str) -> Option<&'a str> {
        let value = value.trim();
        if value.is_empty() {
            self.errors.insert(field, REQUIRED);
            None
        } else {
            Some(value)
        }
    }

    fn text(&mut self, field: &'static str, value: &str) -> String {
        self.present(field, value).unwrap_or_default().to_owned()
    }

    fn optional_text(&mut self, value: &str) -> Option<String> {
        let value = value.trim();
        (!value.is_empty()).then(|| value.to_owned())
    }

    fn address(&mut self, field: &'static str, value: &str) -> String {
        match self.present(field, value) {
            Some(value) if validate::is_valid_address(value) => value.to_owned(),
            Some(_) => {
                self.errors.insert(field, INVALID_ADDRESS);
                String::new()
            }
            None => String::new(),
        }
    }

    fn optional_address(&mut self, field: &'static str, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if !validate::is_valid_address(value) {
            self.errors.insert(field, INVALID_ADDRESS);
            return None;
        }
        Some(value.to_owned())
    }

    fn currency(&mut self, field: &'static str, value: &str) -> String {
        match self.present(field, value) {
            Some(value) if validate::is_valid_currency_code(value) => value.to_owned(),
            Some(_) => {
                self.errors.insert(field, INVALID_CURRENCY);
                String::new()
            }
            None => String::new(),
        }
    }

    fn decimal(&mut self, field: &'static str, value: &str) -> String {
        match self.present(field, value) {
            Some(value) if validate::is_decimal_value(value) => value.to_owned(),
            Some(_) => {
                self.errors.insert(field, INVALID_AMOUNT);
                String::new()
            }
            None => String::new(),
        }
    }

    fn number<T: FromStr + Default>(&mut self, field: &'static str, value: &str) -> T {
        match self.present(field, value) {
            Some(value) => self.parse_integer(field, value).unwrap_or_default(),
            None => T::default(),
        }
    }

    fn optional_number<T: FromStr>(&mut self, field: &'static str, value: &str) -> Option<T> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        self.parse_integer(field, value)
    }

    fn parse_integer<T: FromStr>(&mut self, field: &'static str, value: &str) -> Option<T> {
        if !validate::is_non_negative_integer(value) {
            self.errors.insert(field, INVALID_INTEGER);
            return None;
        }
        match value.parse::<T>() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                self.errors.insert(field, "Value is out of range");
                None
            }
        }
    }

    fn hash(&mut self, field: &'static str, value: &str) -> String {
        match self.present(field, value) {
            Some(value) if validate::is_hash256(value) => value.to_owned(),
            Some(_) => {
                self.errors.insert(field, INVALID_HASH);
                String::new()
            }
            None => String::new(),
        }
    }

    fn optional_hash(&mut self, field: &'static str, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if !validate::is_hash256(value) {
            self.errors.insert(field, INVALID_HASH);
            return None;
        }
        Some(value.to_owned())
    }

    fn issuance_id(&mut self, field: &'static str, value: &str) -> String {
        match self.present(field, value) {
            Some(value) if validate::is_mpt_issuance_id(value) => value.to_owned(),
            Some(_) => {
                self.errors.insert(field, "Expected 48 hex characters");
                String::new()
            }
            None => String::new(),
        }
    }

    fn optional_hex(&mut self, field: &'static str, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if !validate::is_hex(value) || value.len() % 2 != 0 {
            self.errors.insert(field, "Expected an even-length hex string");
            return None;
        }
        Some(value.to_owned())
    }

    fn drops(&mut self, field: &'static str, xrp: &str) -> String {
        match self.present(field, xrp) {
            Some(value) => match validate::xrp_to_drops(value) {
                Some(drops) => drops,
                None => {
                    self.errors.insert(field, "Invalid XRP amount (max 6 decimals)");
                    String::new()
                }
            },
            None => String::new(),
        }
    }

    /// XRP when the currency is empty or `XRP`, otherwise an issued amount.
    fn amount(&mut self, names: &AmountFields, value: &str, currency: &str, issuer: &str) -> Option<Amount> {
        let currency = currency.trim();
        if currency.is_empty() || currency.eq_ignore_ascii_case("XRP") {
            let drops = self.drops(names.value, value);
            return (!drops.is_empty()).then_some(Amount::Drops(drops));
        }

        let value = self.decimal(names.value, value);
        let currency = self.currency(names.currency, currency);
        let issuer = self.address(names.issuer, issuer);
        if value.is_empty() || currency.is_empty() || issuer.is_empty() {
            return None;
        }
        Some(Amount::Issued(IssuedAmount { currency, issuer, value }))
    }

    fn mpt_amount(&mut self, value_field: &'static str, id_field: &'static str, value: &str, id: &str) -> Option<Amount> {
        let issuance_id = self.issuance_id(id_field, id);
        let value = match self.present(value_field, value) {
            Some(value) if validate::is_non_negative_integer(value) => value.to_owned(),
            Some(_) => {
                self.errors.insert(value_field, INVALID_INTEGER);
                return None;
            }
            None => return None,
        };
        (!issuance_id.is_empty()).then_some(Amount::Mpt(MptAmount {
            mpt_issuance_id: issuance_id,
            value,
        }))
    }

    fn finish<T>(self, params: T) -> Result<T, FieldErrors> {
        if self.errors.is_empty() {
            Ok(params)
        } else {
            Err(self.errors)
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentForm {
    pub account: String,
    pub destination: String,
    pub amount: String,
    pub currency: String,
    pub issuer: String,
    pub mpt_issuance_id: String,
    pub destination_tag: String,
    pub invoice_id: String,
    pub send_max: String,
    pub send_max_currency: String,
    pub send_max_issuer: String,
    pub deliver_min: String,
    pub partial_payment: String,
}

impl FormSpec for PaymentForm {
    type Params = PaymentParams;
    const KIND: TransactionKind = TransactionKind::Payment;

    fn validate(&self) -> Result<PaymentParams, FieldErrors> {
        let mut check = Checker::default();
        let account = check.address("account", &self.account);
        let destination = check.address("destination", &self.destination);
        let amount = if self.mpt_issuance_id.trim().is_empty() {
            check.amount(
                &AmountFields {
                    value: "amount",
                    currency: "currency",
                    issuer: "issuer",
                },
                &self.amount,
                &self.currency,
                &self.issuer,
            )
        } else {
            check.mpt_amount("amount", "mpt_issuance_id", &self.amount, &self.mpt_issuance_id)
        };
        let send_max = if self.send_max.trim().is_empty() {
            None
        } else {
            check.amount(
                &AmountFields {
                    value: "send_max",
                    currency: "send_max_currency",
                    issuer: "send_max_issuer",
                },
                &self.send_max,
                &self.send_max_currency,
                &self.send_max_issuer,
            )
        };
        let deliver_min = if self.deliver_min.trim().is_empty() {
            None
        } else {
            check.amount(
                &AmountFields {
                    value: "deliver_min",
                    currency: "currency",
                    issuer: "issuer",
                },
                &self.deliver_min,
                &self.currency,
                &self.issuer,
            )
        };

        let params = PaymentParams {
            account,
            destination,
            amount,
            destination_tag: check.optional_number("destination_tag", &self.destination_tag),
            invoice_id: check.optional_hash("invoice_id", &self.invoice_id),
            send_max,
            deliver_min,
            partial_payment: checked(&self.partial_payment),
        };
        check.finish(params)
    }

    fn build(params: &PaymentParams) -> Result<Transaction, BuildError> {
        build_payment(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustSetForm {
    pub account: String,
    pub currency: String,
    pub issuer: String,
    pub limit: String,
    pub quality_in: String,
    pub quality_out: String,
    pub no_ripple: String,
    pub clear_no_ripple: String,
    pub freeze: String,
    pub clear_freeze: String,
    pub authorize: String,
}

impl FormSpec for TrustSetForm {
    type Params = TrustSetParams;
    const KIND: TransactionKind = TransactionKind::TrustSet;

    fn validate(&self) -> Result<TrustSetParams, FieldErrors> {
        let mut check = Checker::default();
        let params = TrustSetParams {
            account: check.address("account", &self.account),
            currency: check.currency("currency", &self.currency),
            issuer: check.address("issuer", &self.issuer),
            limit: check.decimal("limit", &self.limit),
            quality_in: check.optional_number("quality_in", &self.quality_in),
            quality_out: check.optional_number("quality_out", &self.quality_out),
            set_no_ripple: checked(&self.no_ripple),
            clear_no_ripple: checked(&self.clear_no_ripple),
            set_freeze: checked(&self.freeze),
            clear_freeze: checked(&self.clear_freeze),
            set_auth: checked(&self.authorize),
        };
        check.finish(params)
    }

    fn build(params: &TrustSetParams) -> Result<Transaction, BuildError> {
        build_trust_set(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountSetForm {
    pub account: String,
    pub set_flag: String,
    pub clear_flag: String,
    pub domain: String,
    pub email_hash: String,
    pub transfer_rate: String,
    pub tick_size: String,
}

impl FormSpec for AccountSetForm {
    type Params = AccountSetParams;
    const KIND: TransactionKind = TransactionKind::AccountSet;

    fn validate(&self) -> Result<AccountSetParams, FieldErrors> {
        let mut check = Checker::default();
        let params = AccountSetParams {
            account: check.address("account", &self.account),
            set_flag: check.optional_number("set_flag", &self.set_flag),
            clear_flag: check.optional_number("clear_flag", &self.clear_flag),
            domain: check.optional_text(&self.domain),
            email_hash: check.optional_hex("email_hash", &self.email_hash),
            transfer_rate: check.optional_number("transfer_rate", &self.transfer_rate),
            tick_size: check.optional_number("tick_size", &self.tick_size),
        };
        if let Some(rate) = params.transfer_rate {
            if !validate::is_transfer_rate(rate) {
                check.errors.insert("transfer_rate", "Must be 0 or between 1000000000 and 2000000000");
            }
        }
        if let Some(tick_size) = params.tick_size {
            if !validate::is_tick_size(tick_size) {
                check.errors.insert("tick_size", "Must be 0 or between 3 and 15");
            }
        }
        check.finish(params)
    }

    fn build(params: &AccountSetParams) -> Result<Transaction, BuildError> {
        build_account_set(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowCreateForm {
    pub account: String,
    pub destination: String,
    /// XRP amount, converted to drops.
    pub amount: String,
    pub finish_after: String,
    pub cancel_after: String,
    pub condition: String,
    pub destination_tag: String,
}

impl FormSpec for EscrowCreateForm {
    type Params = EscrowCreateParams;
    const KIND: TransactionKind = TransactionKind::EscrowCreate;

    fn validate(&self) -> Result<EscrowCreateParams, FieldErrors> {
        let mut check = Checker::default();
        let params = EscrowCreateParams {
            account: check.address("account", &self.account),
            destination: check.address("destination", &self.destination),
            amount_drops: check.drops("amount", &self.amount),
            finish_after: check.optional_number("finish_after", &self.finish_after),
            cancel_after: check.optional_number("cancel_after", &self.cancel_after),
            condition: check.optional_hex("condition", &self.condition),
            destination_tag: check.optional_number("destination_tag", &self.destination_tag),
        };
        if self.finish_after.trim().is_empty() && self.cancel_after.trim().is_empty() {
            check.errors.insert("finish_after", "Set a finish time or a cancel time");
        }
        check.finish(params)
    }

    fn build(params: &EscrowCreateParams) -> Result<Transaction, BuildError> {
        build_escrow_create(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowFinishForm {
    pub account: String,
    pub owner: String,
    pub offer_sequence: String,
    pub condition: String,
    pub fulfillment: String,
}

impl FormSpec for EscrowFinishForm {
    type Params = EscrowFinishParams;
    const KIND: TransactionKind = TransactionKind::EscrowFinish;

    fn validate(&self) -> Result<EscrowFinishParams, FieldErrors> {
        let mut check = Checker::default();
        let params = EscrowFinishParams {
            account: check.address("account", &self.account),
            owner: check.address("owner", &self.owner),
            offer_sequence: check.number("offer_sequence", &self.offer_sequence),
            condition: check.optional_hex("condition", &self.condition),
            fulfillment: check.optional_hex("fulfillment", &self.fulfillment),
        };
        check.finish(params)
    }

    fn build(params: &EscrowFinishParams) -> Result<Transaction, BuildError> {
        build_escrow_finish(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowCancelForm {
    pub account: String,
    pub owner: String,
    pub offer_sequence: String,
}

impl FormSpec for EscrowCancelForm {
    type Params = EscrowCancelParams;
    const KIND: TransactionKind = TransactionKind::EscrowCancel;

    fn validate(&self) -> Result<EscrowCancelParams, FieldErrors> {
        let mut check = Checker::default();
        let params = EscrowCancelParams {
            account: check.address("account", &self.account),
            owner: check.address("owner", &self.owner),
            offer_sequence: check.number("offer_sequence", &self.offer_sequence),
        };
        check.finish(params)
    }

    fn build(params: &EscrowCancelParams) -> Result<Transaction, BuildError> {
        build_escrow_cancel(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MptIssuanceCreateForm {
    pub account: String,
    pub asset_scale: String,
    pub maximum_amount: String,
    pub transfer_fee: String,
    pub metadata: String,
    pub can_lock: String,
    pub require_auth: String,
    pub can_escrow: String,
    pub can_trade: String,
    pub can_transfer: String,
    pub can_clawback: String,
}

impl FormSpec for MptIssuanceCreateForm {
    type Params = MptIssuanceCreateParams;
    const KIND: TransactionKind = TransactionKind::MptIssuanceCreate;

    fn validate(&self) -> Result<MptIssuanceCreateParams, FieldErrors> {
        let mut check = Checker::default();
        let maximum_amount = check.optional_text(&self.maximum_amount);
        if let Some(maximum) = &maximum_amount {
            if !validate::is_non_negative_integer(maximum) {
                check.errors.insert("maximum_amount", INVALID_INTEGER);
            }
        }
        let params = MptIssuanceCreateParams {
            account: check.address("account", &self.account),
            asset_scale: check.optional_number("asset_scale", &self.asset_scale),
            maximum_amount,
            transfer_fee: check.optional_number("transfer_fee", &self.transfer_fee),
            metadata: check.optional_hex("metadata", &self.metadata),
            can_lock: checked(&self.can_lock),
            require_auth: checked(&self.require_auth),
            can_escrow: checked(&self.can_escrow),
            can_trade: checked(&self.can_trade),
            can_transfer: checked(&self.can_transfer),
            can_clawback: checked(&self.can_clawback),
        };
        if params.transfer_fee.is_some_and(|fee| !validate::is_transfer_fee(fee)) {
            check.errors.insert("transfer_fee", "Must not exceed 50000");
        }
        check.finish(params)
    }

    fn build(params: &MptIssuanceCreateParams) -> Result<Transaction, BuildError> {
        build_mpt_issuance_create(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MptIssuanceDestroyForm {
    pub account: String,
    pub issuance_id: String,
}

impl FormSpec for MptIssuanceDestroyForm {
    type Params = MptIssuanceDestroyParams;
    const KIND: TransactionKind = TransactionKind::MptIssuanceDestroy;

    fn validate(&self) -> Result<MptIssuanceDestroyParams, FieldErrors> {
        let mut check = Checker::default();
        let params = MptIssuanceDestroyParams {
            account: check.address("account", &self.account),
            issuance_id: check.issuance_id("issuance_id", &self.issuance_id),
        };
        check.finish(params)
    }

    fn build(params: &MptIssuanceDestroyParams) -> Result<Transaction, BuildError> {
        build_mpt_issuance_destroy(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MptIssuanceSetForm {
    pub account: String,
    pub issuance_id: String,
    pub holder: String,
    /// `lock` or `unlock`.
    pub action: String,
}

impl FormSpec for MptIssuanceSetForm {
    type Params = MptIssuanceSetParams;
    const KIND: TransactionKind = TransactionKind::MptIssuanceSet;

    fn validate(&self) -> Result<MptIssuanceSetParams, FieldErrors> {
        let mut check = Checker::default();
        let action = match self.action.trim().to_ascii_lowercase().as_str() {
            "lock" => MptLockAction::Lock,
            "unlock" => MptLockAction::Unlock,
            _ => {
                check.errors.insert("action", "Choose lock or unlock");
                MptLockAction::Lock
            }
        };
        let params = MptIssuanceSetParams {
            account: check.address("account", &self.account),
            issuance_id: check.issuance_id("issuance_id", &self.issuance_id),
            holder: check.optional_address("holder", &self.holder),
            action,
        };
        check.finish(params)
    }

    fn build(params: &MptIssuanceSetParams) -> Result<Transaction, BuildError> {
        build_mpt_issuance_set(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MptAuthorizeForm {
    pub account: String,
    pub issuance_id: String,
    pub holder: String,
    pub unauthorize: String,
}

impl FormSpec for MptAuthorizeForm {
    type Params = MptAuthorizeParams;
    const KIND: TransactionKind = TransactionKind::MptAuthorize;

    fn validate(&self) -> Result<MptAuthorizeParams, FieldErrors> {
        let mut check = Checker::default();
        let params = MptAuthorizeParams {
            account: check.address("account", &self.account),
            issuance_id: check.issuance_id("issuance_id", &self.issuance_id),
            holder: check.optional_address("holder", &self.holder),
            unauthorize: checked(&self.unauthorize),
        };
        check.finish(params)
    }

    fn build(params: &MptAuthorizeParams) -> Result<Transaction, BuildError> {
        build_mpt_authorize(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NftMintForm {
    pub account: String,
    pub taxon: String,
    pub issuer: String,
    pub transfer_fee: String,
    pub uri: String,
    pub burnable: String,
    pub only_xrp: String,
    pub transferable: String,
    pub mutable: String,
}

impl FormSpec for NftMintForm {
    type Params = NftMintParams;
    const KIND: TransactionKind = TransactionKind::NftMint;

    fn validate(&self) -> Result<NftMintParams, FieldErrors> {
        let mut check = Checker::default();
        let params = NftMintParams {
            account: check.address("account", &self.account),
            taxon: check.number("taxon", &self.taxon),
            issuer: check.optional_address("issuer", &self.issuer),
            transfer_fee: check.optional_number("transfer_fee", &self.transfer_fee),
            uri: check.optional_text(&self.uri),
            burnable: checked(&self.burnable),
            only_xrp: checked(&self.only_xrp),
            transferable: checked(&self.transferable),
            mutable: checked(&self.mutable),
        };
        if params.transfer_fee.is_some_and(|fee| !validate::is_transfer_fee(fee)) {
            check.errors.insert("transfer_fee", "Must not exceed 50000");
        }
        check.finish(params)
    }

    fn build(params: &NftMintParams) -> Result<Transaction, BuildError> {
        build_nft_mint(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NftBurnForm {
    pub account: String,
    pub nftoken_id: String,
    pub owner: String,
}

impl FormSpec for NftBurnForm {
    type Params = NftBurnParams;
    const KIND: TransactionKind = TransactionKind::NftBurn;

    fn validate(&self) -> Result<NftBurnParams, FieldErrors> {
        let mut check = Checker::default();
        let params = NftBurnParams {
            account: check.address("account", &self.account),
            nftoken_id: check.hash("nftoken_id", &self.nftoken_id),
            owner: check.optional_address("owner", &self.owner),
        };
        check.finish(params)
    }

    fn build(params: &NftBurnParams) -> Result<Transaction, BuildError> {
        build_nft_burn(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NftCreateOfferForm {
    pub account: String,
    pub nftoken_id: String,
    pub amount: String,
    pub currency: String,
    pub issuer: String,
    pub owner: String,
    pub destination: String,
    pub expiration: String,
    pub sell: String,
}

impl FormSpec for NftCreateOfferForm {
    type Params = NftCreateOfferParams;
    const KIND: TransactionKind = TransactionKind::NftCreateOffer;

    fn validate(&self) -> Result<NftCreateOfferParams, FieldErrors> {
        let mut check = Checker::default();
        let sell = checked(&self.sell);
        let owner = check.optional_address("owner", &self.owner);
        if !sell && self.owner.trim().is_empty() {
            check.errors.insert("owner", "A buy offer needs the token owner");
        }
        let params = NftCreateOfferParams {
            account: check.address("account", &self.account),
            nftoken_id: check.hash("nftoken_id", &self.nftoken_id),
            amount: check.amount(
                &AmountFields {
                    value: "amount",
                    currency: "currency",
                    issuer: "issuer",
                },
                &self.amount,
                &self.currency,
                &self.issuer,
            ),
            owner,
            destination: check.optional_address("destination", &self.destination),
            expiration: check.optional_number("expiration", &self.expiration),
            sell,
        };
        check.finish(params)
    }

    fn build(params: &NftCreateOfferParams) -> Result<Transaction, BuildError> {
        build_nft_create_offer(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NftAcceptOfferForm {
    pub account: String,
    pub sell_offer: String,
    pub buy_offer: String,
    /// Broker fee in XRP.
    pub broker_fee: String,
}

impl FormSpec for NftAcceptOfferForm {
    type Params = NftAcceptOfferParams;
    const KIND: TransactionKind = TransactionKind::NftAcceptOffer;

    fn validate(&self) -> Result<NftAcceptOfferParams, FieldErrors> {
        let mut check = Checker::default();
        let sell_offer = check.optional_hash("sell_offer", &self.sell_offer);
        let buy_offer = check.optional_hash("buy_offer", &self.buy_offer);
        if self.sell_offer.trim().is_empty() && self.buy_offer.trim().is_empty() {
            check.errors.insert("sell_offer", "Provide a sell offer or a buy offer");
        }
        let broker_fee = if self.broker_fee.trim().is_empty() {
            None
        } else {
            let drops = check.drops("broker_fee", &self.broker_fee);
            (!drops.is_empty()).then_some(Amount::Drops(drops))
        };
        let params = NftAcceptOfferParams {
            account: check.address("account", &self.account),
            sell_offer,
            buy_offer,
            broker_fee,
        };
        check.finish(params)
    }

    fn build(params: &NftAcceptOfferParams) -> Result<Transaction, BuildError> {
        build_nft_accept_offer(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NftCancelOfferForm {
    pub account: String,
    /// Offer ids separated by commas, spaces or newlines.
    pub offer_ids: String,
}

impl FormSpec for NftCancelOfferForm {
    type Params = NftCancelOfferParams;
    const KIND: TransactionKind = TransactionKind::NftCancelOffer;

    fn validate(&self) -> Result<NftCancelOfferParams, FieldErrors> {
        let mut check = Checker::default();
        let offer_ids: Vec<String> = self
            .offer_ids
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|id| !id.is_empty())
            .map(str::to_owned)
            .collect();
        if offer_ids.is_empty() {
            check.errors.insert("offer_ids", REQUIRED);
        } else if !offer_ids.iter().all(|id| validate::is_hash256(id)) {
            check.errors.insert("offer_ids", INVALID_HASH);
        }
        let params = NftCancelOfferParams {
            account: check.address("account", &self.account),
            offer_ids,
        };
        check.finish(params)
    }

    fn build(params: &NftCancelOfferParams) -> Result<Transaction, BuildError> {
        build_nft_cancel_offer(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferCreateForm {
    pub account: String,
    pub taker_gets: String,
    pub taker_gets_currency: String,
    pub taker_gets_issuer: String,
    pub taker_pays: String,
    pub taker_pays_currency: String,
    pub taker_pays_issuer: String,
    pub expiration: String,
    pub offer_sequence: String,
    pub passive: String,
    pub immediate_or_cancel: String,
    pub fill_or_kill: String,
    pub sell: String,
}

impl FormSpec for OfferCreateForm {
    type Params = OfferCreateParams;
    const KIND: TransactionKind = TransactionKind::OfferCreate;

    fn validate(&self) -> Result<OfferCreateParams, FieldErrors> {
        let mut check = Checker::default();
        let params = OfferCreateParams {
            account: check.address("account", &self.account),
            taker_gets: check.amount(
                &AmountFields {
                    value: "taker_gets",
                    currency: "taker_gets_currency",
                    issuer: "taker_gets_issuer",
                },
                &self.taker_gets,
                &self.taker_gets_currency,
                &self.taker_gets_issuer,
            ),
            taker_pays: check.amount(
                &AmountFields {
                    value: "taker_pays",
                    currency: "taker_pays_currency",
                    issuer: "taker_pays_issuer",
                },
                &self.taker_pays,
                &self.taker_pays_currency,
                &self.taker_pays_issuer,
            ),
            expiration: check.optional_number("expiration", &self.expiration),
            offer_sequence: check.optional_number("offer_sequence", &self.offer_sequence),
            passive: checked(&self.passive),
            immediate_or_cancel: checked(&self.immediate_or_cancel),
            fill_or_kill: checked(&self.fill_or_kill),
            sell: checked(&self.sell),
        };
        if params.immediate_or_cancel && params.fill_or_kill {
            check.errors.insert("fill_or_kill", "Cannot combine with immediate-or-cancel");
        }
        check.finish(params)
    }

    fn build(params: &OfferCreateParams) -> Result<Transaction, BuildError> {
        build_offer_create(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OfferCancelForm {
    pub account: String,
    pub offer_sequence: String,
}

impl FormSpec for OfferCancelForm {
    type Params = OfferCancelParams;
    const KIND: TransactionKind = TransactionKind::OfferCancel;

    fn validate(&self) -> Result<OfferCancelParams, FieldErrors> {
        let mut check = Checker::default();
        let params = OfferCancelParams {
            account: check.address("account", &self.account),
            offer_sequence: check.number("offer_sequence", &self.offer_sequence),
        };
        check.finish(params)
    }

    fn build(params: &OfferCancelParams) -> Result<Transaction, BuildError> {
        build_offer_cancel(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialCreateForm {
    pub account: String,
    pub subject: String,
    pub credential_type: String,
    pub expiration: String,
    pub uri: String,
}

impl FormSpec for CredentialCreateForm {
    type Params = CredentialCreateParams;
    const KIND: TransactionKind = TransactionKind::CredentialCreate;

    fn validate(&self) -> Result<CredentialCreateParams, FieldErrors> {
        let mut check = Checker::default();
        let params = CredentialCreateParams {
            account: check.address("account", &self.account),
            subject: check.address("subject", &self.subject),
            credential_type: check.text("credential_type", &self.credential_type),
            expiration: check.optional_number("expiration", &self.expiration),
            uri: check.optional_text(&self.uri),
        };
        if params.credential_type.len() > validate::MAX_CREDENTIAL_TYPE_BYTES {
            check.errors.insert("credential_type", "At most 64 bytes");
        }
        check.finish(params)
    }

    fn build(params: &CredentialCreateParams) -> Result<Transaction, BuildError> {
        build_credential_create(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialAcceptForm {
    pub account: String,
    pub issuer: String,
    pub credential_type: String,
}

impl FormSpec for CredentialAcceptForm {
    type Params = CredentialAcceptParams;
    const KIND: TransactionKind = TransactionKind::CredentialAccept;

    fn validate(&self) -> Result<CredentialAcceptParams, FieldErrors> {
        let mut check = Checker::default();
        let params = CredentialAcceptParams {
            account: check.address("account", &self.account),
            issuer: check.address("issuer", &self.issuer),
            credential_type: check.text("credential_type", &self.credential_type),
        };
        check.finish(params)
    }

    fn build(params: &CredentialAcceptParams) -> Result<Transaction, BuildError> {
        build_credential_accept(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialDeleteForm {
    pub account: String,
    pub subject: String,
    pub issuer: String,
    pub credential_type: String,
}

impl FormSpec for CredentialDeleteForm {
    type Params = CredentialDeleteParams;
    const KIND: TransactionKind = TransactionKind::CredentialDelete;

    fn validate(&self) -> Result<CredentialDeleteParams, FieldErrors> {
        let mut check = Checker::default();
        let params = CredentialDeleteParams {
            account: check.address("account", &self.account),
            subject: check.optional_address("subject", &self.subject),
            issuer: check.optional_address("issuer", &self.issuer),
            credential_type: check.text("credential_type", &self.credential_type),
        };
        check.finish(params)
    }

    fn build(params: &CredentialDeleteParams) -> Result<Transaction, BuildError> {
        build_credential_delete(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const ALICE: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const BOB: &str = "rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe";

    thread_local! {
        static BUILDS: Cell<usize> = const { Cell::new(0) };
    }

    /// Trust-line form whose builder counts its invocations.
    struct CountingTrustSet(TrustSetForm);

    impl FormSpec for CountingTrustSet {
        type Params = TrustSetParams;
        const KIND: TransactionKind = TransactionKind::TrustSet;

        fn validate(&self) -> Result<TrustSetParams, FieldErrors> {
            self.0.validate()
        }

        fn build(params: &TrustSetParams) -> Result<Transaction, BuildError> {
            BUILDS.with(|count| count.set(count.get() + 1));
            build_trust_set(params)
        }
    }

    #[test]
    fn invalid_issuer_is_reported_inline_and_skips_builder() {
        let form = CountingTrustSet(TrustSetForm {
            account: ALICE.to_owned(),
            currency: "usd".to_owned(),
            issuer: "rInvalidAddr".to_owned(),
            limit: "100".to_owned(),
            ..Default::default()
        });

        let err = form.prepare().unwrap_err();
        let PrepareError::Form(errors) = &err else {
            panic!("expected field errors, got {err:?}");
        };
        assert_eq!(errors.get("issuer"), Some(INVALID_ADDRESS));
        assert_eq!(errors.get("currency"), None);
        assert_eq!(BUILDS.with(Cell::get), 0);
    }

    #[test]
    fn valid_trust_line_reaches_builder() {
        let form = CountingTrustSet(TrustSetForm {
            account: ALICE.to_owned(),
            currency: "usd".to_owned(),
            issuer: BOB.to_owned(),
            limit: "100".to_owned(),
            ..Default::default()
        });

        let tx = form.prepare().unwrap();
        assert_eq!(tx.account(), ALICE);
        assert_eq!(BUILDS.with(Cell::get), 1);
    }

    #[test]
    fn payment_form_converts_xrp_to_drops() {
        let tx = PaymentForm {
            account: ALICE.to_owned(),
            destination: BOB.to_owned(),
            amount: "1.5".to_owned(),
            ..Default::default()
        }
        .prepare()
        .unwrap();
        assert_eq!(tx.to_json()["Amount"], "1500000");
    }

    #[test]
    fn payment_form_collects_every_error() {
        let errors = PaymentForm {
            account: String::new(),
            destination: "bogus".to_owned(),
            amount: "10".to_owned(),
            currency: "XRP".to_owned(),
            destination_tag: "-1".to_owned(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();

        assert_eq!(errors.get("account"), Some(REQUIRED));
        assert_eq!(errors.get("destination"), Some(INVALID_ADDRESS));
        assert_eq!(errors.get("destination_tag"), Some(INVALID_INTEGER));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn dynamic_form_accepts_loose_values() {
        let mut fields = Map::new();
        fields.insert("account".into(), Value::String(ALICE.into()));
        fields.insert("offer_sequence".into(), Value::from(12));
        let tx = DynamicForm::new(TransactionKind::OfferCancel, fields).prepare().unwrap();

        assert_eq!(tx.to_json()["OfferSequence"], 12);
        assert_eq!(tx.to_json()["TransactionType"], "OfferCancel");
    }

    #[test]
    fn dynamic_form_from_pairs_handles_checkboxes() {
        let form = DynamicForm::from_pairs(
            TransactionKind::NftMint,
            [("account", ALICE), ("taxon", "7"), ("transferable", "on"), ("transfer_fee", "250")],
        );
        let json = form.prepare().unwrap().to_json();
        assert_eq!(json["NFTokenTaxon"], 7);
        assert_eq!(json["Flags"], crate::transaction::flags::TF_TRANSFERABLE);
    }

    #[test]
    fn cancel_offer_splits_ids() {
        let id = "A".repeat(64);
        let params = NftCancelOfferForm {
            account: ALICE.to_owned(),
            offer_ids: format!("{id}, {id}\n{id}"),
        }
        .validate()
        .unwrap();
        assert_eq!(params.offer_ids.len(), 3);
    }

    #[test]
    fn mpt_payment_requires_whole_numbers() {
        let errors = PaymentForm {
            account: ALICE.to_owned(),
            destination: BOB.to_owned(),
            amount: "1.5".to_owned(),
            mpt_issuance_id: "00000001A407AF5856CCF3C42619DAA925813FC955C72983".to_owned(),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(errors.get("amount"), Some(INVALID_INTEGER));
    }
}
