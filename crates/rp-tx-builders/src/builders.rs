//! One pure builder per transaction type.
//!
//! Builders copy required fields verbatim, omit unset optionals, fold
//! boolean options into `Flags`, and repeat the format checks the forms
//! already perform so a caller that skips the form layer still gets a
//! `BuildError` instead of a malformed record.

use crate::error::BuildError;
use crate::transaction::*;
use crate::validate;

type BuildResult = Result<Transaction, BuildError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentParams {
    pub account: String,
    pub destination: String,
    pub amount: Option<Amount>,
    pub destination_tag: Option<u32>,
    pub invoice_id: Option<String>,
    pub send_max: Option<Amount>,
    pub deliver_min: Option<Amount>,
    pub partial_payment: bool,
}

pub fn build_payment(params: &PaymentParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_address("destination", &params.destination)?;
    let amount = required_amount("amount", &params.amount)?;
    if let Some(send_max) = &params.send_max {
        check_amount("send_max", send_max)?;
        if amount.is_xrp() && send_max.is_xrp() {
            return Err(BuildError::Inconsistent("SendMax cannot be used for XRP-to-XRP payments".into()));
        }
    }
    if let Some(deliver_min) = &params.deliver_min {
        check_amount("deliver_min", deliver_min)?;
        if !params.partial_payment {
            return Err(BuildError::Inconsistent("DeliverMin requires a partial payment".into()));
        }
    }
    if let Some(invoice_id) = &params.invoice_id {
        check_hash("invoice_id", invoice_id)?;
    }
    if amount.is_xrp() && params.account == params.destination {
        return Err(BuildError::Inconsistent("cannot send XRP to the sending account".into()));
    }

    Ok(Transaction::Payment(Payment {
        account: params.account.clone(),
        destination: params.destination.clone(),
        amount: amount.clone(),
        destination_tag: params.destination_tag,
        invoice_id: params.invoice_id.clone(),
        send_max: params.send_max.clone(),
        deliver_min: params.deliver_min.clone(),
        flags: flag_bits(&[(params.partial_payment, flags::TF_PARTIAL_PAYMENT)]),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustSetParams {
    pub account: String,
    pub currency: String,
    pub issuer: String,
    pub limit: String,
    pub quality_in: Option<u32>,
    pub quality_out: Option<u32>,
    pub set_no_ripple: bool,
    pub clear_no_ripple: bool,
    pub set_freeze: bool,
    pub clear_freeze: bool,
    pub set_auth: bool,
}

pub fn build_trust_set(params: &TrustSetParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_address("issuer", &params.issuer)?;
    check_currency("currency", &params.currency)?;
    check_decimal("limit", &params.limit)?;
    if params.issuer == params.account {
        return Err(BuildError::Inconsistent("a trust line cannot point at its own account".into()));
    }
    if params.set_no_ripple && params.clear_no_ripple {
        return Err(BuildError::Inconsistent("cannot set and clear NoRipple together".into()));
    }
    if params.set_freeze && params.clear_freeze {
        return Err(BuildError::Inconsistent("cannot set and clear Freeze together".into()));
    }

    Ok(Transaction::TrustSet(TrustSet {
        account: params.account.clone(),
        limit_amount: IssuedAmount {
            currency: params.currency.clone(),
            issuer: params.issuer.clone(),
            value: params.limit.clone(),
        },
        quality_in: params.quality_in,
        quality_out: params.quality_out,
        flags: flag_bits(&[
            (params.set_auth, flags::TF_SETF_AUTH),
            (params.set_no_ripple, flags::TF_SET_NO_RIPPLE),
            (params.clear_no_ripple, flags::TF_CLEAR_NO_RIPPLE),
            (params.set_freeze, flags::TF_SET_FREEZE),
            (params.clear_freeze, flags::TF_CLEAR_FREEZE),
        ]),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSetParams {
    pub account: String,
    pub set_flag: Option<u32>,
    pub clear_flag: Option<u32>,
    /// Plain-text domain; hex-encoded into the record.
    pub domain: Option<String>,
    pub email_hash: Option<String>,
    pub transfer_rate: Option<u32>,
    pub tick_size: Option<u8>,
}

pub fn build_account_set(params: &AccountSetParams) -> BuildResult {
    check_address("account", &params.account)?;
    for (field, flag) in [("set_flag", params.set_flag), ("clear_flag", params.clear_flag)] {
        if let Some(flag) = flag {
            if flag == 0 || flag > flags::MAX_ACCOUNT_SET_FLAG {
                return Err(BuildError::field(field, format!("unknown account flag {flag}")));
            }
        }
    }
    if params.set_flag.is_some() && params.set_flag == params.clear_flag {
        return Err(BuildError::Inconsistent("cannot set and clear the same flag".into()));
    }
    if let Some(email_hash) = &params.email_hash {
        if email_hash.len() != 32 || !validate::is_hex(email_hash) {
            return Err(BuildError::field("email_hash", "expected 32 hex characters"));
        }
    }
    if let Some(rate) = params.transfer_rate {
        if !validate::is_transfer_rate(rate) {
            return Err(BuildError::field("transfer_rate", "must be 0 or between 1000000000 and 2000000000"));
        }
    }
    if let Some(tick_size) = params.tick_size {
        if !validate::is_tick_size(tick_size) {
            return Err(BuildError::field("tick_size", "must be 0 or between 3 and 15"));
        }
    }
    let domain = match &params.domain {
        Some(domain) if domain.len() > validate::MAX_URI_BYTES => {
            return Err(BuildError::field("domain", "longer than 256 bytes"));
        }
        Some(domain) => Some(validate::to_hex_upper(domain.as_bytes())),
        None => None,
    };

    Ok(Transaction::AccountSet(AccountSet {
        account: params.account.clone(),
        set_flag: params.set_flag,
        clear_flag: params.clear_flag,
        domain,
        email_hash: params.email_hash.clone(),
        transfer_rate: params.transfer_rate,
        tick_size: params.tick_size,
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscrowCreateParams {
    pub account: String,
    pub destination: String,
    pub amount_drops: String,
    pub finish_after: Option<u32>,
    pub cancel_after: Option<u32>,
    pub condition: Option<String>,
    pub destination_tag: Option<u32>,
}

pub fn build_escrow_create(params: &EscrowCreateParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_address("destination", &params.destination)?;
    if !validate::is_drops_amount(&params.amount_drops) {
        return Err(BuildError::field("amount", "expected an amount in drops"));
    }
    if params.finish_after.is_none() && params.cancel_after.is_none() {
        return Err(BuildError::Inconsistent("an escrow needs FinishAfter or CancelAfter".into()));
    }
    if let (Some(finish), Some(cancel)) = (params.finish_after, params.cancel_after) {
        if cancel <= finish {
            return Err(BuildError::Inconsistent("CancelAfter must be later than FinishAfter".into()));
        }
    }
    if let Some(condition) = &params.condition {
        check_hex("condition", condition)?;
    }

    Ok(Transaction::EscrowCreate(EscrowCreate {
        account: params.account.clone(),
        destination: params.destination.clone(),
        amount: Amount::Drops(params.amount_drops.clone()),
        finish_after: params.finish_after,
        cancel_after: params.cancel_after,
        condition: params.condition.clone(),
        destination_tag: params.destination_tag,
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscrowFinishParams {
    pub account: String,
    pub owner: String,
    pub offer_sequence: u32,
    pub condition: Option<String>,
    pub fulfillment: Option<String>,
}

pub fn build_escrow_finish(params: &EscrowFinishParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_address("owner", &params.owner)?;
    if params.condition.is_some() != params.fulfillment.is_some() {
        return Err(BuildError::Inconsistent("Condition and Fulfillment must be provided together".into()));
    }
    if let Some(condition) = &params.condition {
        check_hex("condition", condition)?;
    }
    if let Some(fulfillment) = &params.fulfillment {
        check_hex("fulfillment", fulfillment)?;
    }

    Ok(Transaction::EscrowFinish(EscrowFinish {
        account: params.account.clone(),
        owner: params.owner.clone(),
        offer_sequence: params.offer_sequence,
        condition: params.condition.clone(),
        fulfillment: params.fulfillment.clone(),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EscrowCancelParams {
    pub account: String,
    pub owner: String,
    pub offer_sequence: u32,
}

pub fn build_escrow_cancel(params: &EscrowCancelParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_address("owner", &params.owner)?;

    Ok(Transaction::EscrowCancel(EscrowCancel {
        account: params.account.clone(),
        owner: params.owner.clone(),
        offer_sequence: params.offer_sequence,
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MptIssuanceCreateParams {
    pub account: String,
    pub asset_scale: Option<u8>,
    pub maximum_amount: Option<String>,
    pub transfer_fee: Option<u16>,
    /// Hex-encoded metadata blob.
    pub metadata: Option<String>,
    pub can_lock: bool,
    pub require_auth: bool,
    pub can_escrow: bool,
    pub can_trade: bool,
    pub can_transfer: bool,
    pub can_clawback: bool,
}

pub fn build_mpt_issuance_create(params: &MptIssuanceCreateParams) -> BuildResult {
    check_address("account", &params.account)?;
    if let Some(maximum) = &params.maximum_amount {
        if !validate::is_non_negative_integer(maximum) {
            return Err(BuildError::field("maximum_amount", "expected a non-negative integer"));
        }
    }
    if let Some(fee) = params.transfer_fee {
        if !validate::is_transfer_fee(fee) {
            return Err(BuildError::field("transfer_fee", "must not exceed 50000"));
        }
        if fee > 0 && !params.can_transfer {
            return Err(BuildError::Inconsistent("a transfer fee requires the CanTransfer flag".into()));
        }
    }
    if let Some(metadata) = &params.metadata {
        if !validate::is_hex_bytes(metadata, 1024) {
            return Err(BuildError::field("metadata", "expected at most 1024 hex-encoded bytes"));
        }
    }

    Ok(Transaction::MpTokenIssuanceCreate(MpTokenIssuanceCreate {
        account: params.account.clone(),
        asset_scale: params.asset_scale,
        maximum_amount: params.maximum_amount.clone(),
        transfer_fee: params.transfer_fee,
        metadata: params.metadata.clone(),
        flags: flag_bits(&[
            (params.can_lock, flags::TF_MPT_CAN_LOCK),
            (params.require_auth, flags::TF_MPT_REQUIRE_AUTH),
            (params.can_escrow, flags::TF_MPT_CAN_ESCROW),
            (params.can_trade, flags::TF_MPT_CAN_TRADE),
            (params.can_transfer, flags::TF_MPT_CAN_TRANSFER),
            (params.can_clawback, flags::TF_MPT_CAN_CLAWBACK),
        ]),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MptIssuanceDestroyParams {
    pub account: String,
    pub issuance_id: String,
}

pub fn build_mpt_issuance_destroy(params: &MptIssuanceDestroyParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_issuance_id(&params.issuance_id)?;

    Ok(Transaction::MpTokenIssuanceDestroy(MpTokenIssuanceDestroy {
        account: params.account.clone(),
        issuance_id: params.issuance_id.clone(),
    }))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MptLockAction {
    #[default]
    Lock,
    Unlock,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MptIssuanceSetParams {
    pub account: String,
    pub issuance_id: String,
    pub holder: Option<String>,
    pub action: MptLockAction,
}

pub fn build_mpt_issuance_set(params: &MptIssuanceSetParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_issuance_id(&params.issuance_id)?;
    check_optional_address("holder", &params.holder)?;

    Ok(Transaction::MpTokenIssuanceSet(MpTokenIssuanceSet {
        account: params.account.clone(),
        issuance_id: params.issuance_id.clone(),
        holder: params.holder.clone(),
        flags: match params.action {
            MptLockAction::Lock => flags::TF_MPT_LOCK,
            MptLockAction::Unlock => flags::TF_MPT_UNLOCK,
        },
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MptAuthorizeParams {
    pub account: String,
    pub issuance_id: String,
    pub holder: Option<String>,
    pub unauthorize: bool,
}

pub fn build_mpt_authorize(params: &MptAuthorizeParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_issuance_id(&params.issuance_id)?;
    check_optional_address("holder", &params.holder)?;

    Ok(Transaction::MpTokenAuthorize(MpTokenAuthorize {
        account: params.account.clone(),
        issuance_id: params.issuance_id.clone(),
        holder: params.holder.clone(),
        flags: flag_bits(&[(params.unauthorize, flags::TF_MPT_UNAUTHORIZE)]),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftMintParams {
    pub account: String,
    pub taxon: u32,
    pub issuer: Option<String>,
    pub transfer_fee: Option<u16>,
    /// Plain-text URI; hex-encoded into the record.
    pub uri: Option<String>,
    pub burnable: bool,
    pub only_xrp: bool,
    pub transferable: bool,
    pub mutable: bool,
}

pub fn build_nft_mint(params: &NftMintParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_optional_address("issuer", &params.issuer)?;
    if let Some(fee) = params.transfer_fee {
        if !validate::is_transfer_fee(fee) {
            return Err(BuildError::field("transfer_fee", "must not exceed 50000"));
        }
        if !params.transferable {
            return Err(BuildError::Inconsistent("a transfer fee requires the Transferable flag".into()));
        }
    }
    let uri = encode_uri("uri", &params.uri)?;

    Ok(Transaction::NfTokenMint(NfTokenMint {
        account: params.account.clone(),
        taxon: params.taxon,
        issuer: params.issuer.clone(),
        transfer_fee: params.transfer_fee,
        uri,
        flags: flag_bits(&[
            (params.burnable, flags::TF_BURNABLE),
            (params.only_xrp, flags::TF_ONLY_XRP),
            (params.transferable, flags::TF_TRANSFERABLE),
            (params.mutable, flags::TF_MUTABLE),
        ]),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftBurnParams {
    pub account: String,
    pub nftoken_id: String,
    pub owner: Option<String>,
}

pub fn build_nft_burn(params: &NftBurnParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_hash("nftoken_id", &params.nftoken_id)?;
    check_optional_address("owner", &params.owner)?;

    Ok(Transaction::NfTokenBurn(NfTokenBurn {
        account: params.account.clone(),
        nftoken_id: params.nftoken_id.clone(),
        owner: params.owner.clone(),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftCreateOfferParams {
    pub account: String,
    pub nftoken_id: String,
    pub amount: Option<Amount>,
    pub owner: Option<String>,
    pub destination: Option<String>,
    pub expiration: Option<u32>,
    pub sell: bool,
}

pub fn build_nft_create_offer(params: &NftCreateOfferParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_hash("nftoken_id", &params.nftoken_id)?;
    let amount = required_amount("amount", &params.amount)?;
    check_optional_address("owner", &params.owner)?;
    check_optional_address("destination", &params.destination)?;
    match (params.sell, &params.owner) {
        (true, Some(_)) => {
            return Err(BuildError::Inconsistent("a sell offer must not name an owner".into()));
        }
        (false, None) => {
            return Err(BuildError::Inconsistent("a buy offer must name the token owner".into()));
        }
        _ => {}
    }

    Ok(Transaction::NfTokenCreateOffer(NfTokenCreateOffer {
        account: params.account.clone(),
        nftoken_id: params.nftoken_id.clone(),
        amount: amount.clone(),
        owner: params.owner.clone(),
        destination: params.destination.clone(),
        expiration: params.expiration,
        flags: flag_bits(&[(params.sell, flags::TF_SELL_NFTOKEN)]),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftAcceptOfferParams {
    pub account: String,
    pub sell_offer: Option<String>,
    pub buy_offer: Option<String>,
    pub broker_fee: Option<Amount>,
}

pub fn build_nft_accept_offer(params: &NftAcceptOfferParams) -> BuildResult {
    check_address("account", &params.account)?;
    if params.sell_offer.is_none() && params.buy_offer.is_none() {
        return Err(BuildError::Inconsistent("a sell offer or a buy offer is required".into()));
    }
    if let Some(offer) = &params.sell_offer {
        check_hash("sell_offer", offer)?;
    }
    if let Some(offer) = &params.buy_offer {
        check_hash("buy_offer", offer)?;
    }
    if let Some(fee) = &params.broker_fee {
        check_amount("broker_fee", fee)?;
        if params.sell_offer.is_none() || params.buy_offer.is_none() {
            return Err(BuildError::Inconsistent("a broker fee needs both a sell and a buy offer".into()));
        }
    }

    Ok(Transaction::NfTokenAcceptOffer(NfTokenAcceptOffer {
        account: params.account.clone(),
        sell_offer: params.sell_offer.clone(),
        buy_offer: params.buy_offer.clone(),
        broker_fee: params.broker_fee.clone(),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NftCancelOfferParams {
    pub account: String,
    pub offer_ids: Vec<String>,
}

pub fn build_nft_cancel_offer(params: &NftCancelOfferParams) -> BuildResult {
    check_address("account", &params.account)?;
    if params.offer_ids.is_empty() {
        return Err(BuildError::field("offer_ids", "at least one offer is required"));
    }
    for offer in &params.offer_ids {
        check_hash("offer_ids", offer)?;
    }

    Ok(Transaction::NfTokenCancelOffer(NfTokenCancelOffer {
        account: params.account.clone(),
        offers: params.offer_ids.clone(),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferCreateParams {
    pub account: String,
    pub taker_gets: Option<Amount>,
    pub taker_pays: Option<Amount>,
    pub expiration: Option<u32>,
    pub offer_sequence: Option<u32>,
    pub passive: bool,
    pub immediate_or_cancel: bool,
    pub fill_or_kill: bool,
    pub sell: bool,
}

pub fn build_offer_create(params: &OfferCreateParams) -> BuildResult {
    check_address("account", &params.account)?;
    let taker_gets = required_amount("taker_gets", &params.taker_gets)?;
    let taker_pays = required_amount("taker_pays", &params.taker_pays)?;
    if taker_gets.asset_key() == taker_pays.asset_key() {
        return Err(BuildError::Inconsistent("TakerGets and TakerPays must be different assets".into()));
    }
    if params.immediate_or_cancel && params.fill_or_kill {
        return Err(BuildError::Inconsistent("ImmediateOrCancel and FillOrKill are exclusive".into()));
    }

    Ok(Transaction::OfferCreate(OfferCreate {
        account: params.account.clone(),
        taker_gets: taker_gets.clone(),
        taker_pays: taker_pays.clone(),
        expiration: params.expiration,
        offer_sequence: params.offer_sequence,
        flags: flag_bits(&[
            (params.passive, flags::TF_PASSIVE),
            (params.immediate_or_cancel, flags::TF_IMMEDIATE_OR_CANCEL),
            (params.fill_or_kill, flags::TF_FILL_OR_KILL),
            (params.sell, flags::TF_SELL),
        ]),
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfferCancelParams {
    pub account: String,
    pub offer_sequence: u32,
}

pub fn build_offer_cancel(params: &OfferCancelParams) -> BuildResult {
    check_address("account", &params.account)?;

    Ok(Transaction::OfferCancel(OfferCancel {
        account: params.account.clone(),
        offer_sequence: params.offer_sequence,
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialCreateParams {
    pub account: String,
    pub subject: String,
    /// Plain-text credential type; hex-encoded into the record.
    pub credential_type: String,
    pub expiration: Option<u32>,
    pub uri: Option<String>,
}

pub fn build_credential_create(params: &CredentialCreateParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_address("subject", &params.subject)?;
    let credential_type = encode_credential_type(&params.credential_type)?;
    let uri = encode_uri("uri", &params.uri)?;

    Ok(Transaction::CredentialCreate(CredentialCreate {
        account: params.account.clone(),
        subject: params.subject.clone(),
        credential_type,
        expiration: params.expiration,
        uri,
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialAcceptParams {
    pub account: String,
    pub issuer: String,
    pub credential_type: String,
}

pub fn build_credential_accept(params: &CredentialAcceptParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_address("issuer", &params.issuer)?;

    Ok(Transaction::CredentialAccept(CredentialAccept {
        account: params.account.clone(),
        issuer: params.issuer.clone(),
        credential_type: encode_credential_type(&params.credential_type)?,
    }))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialDeleteParams {
    pub account: String,
    pub subject: Option<String>,
    pub issuer: Option<String>,
    pub credential_type: String,
}

pub fn build_credential_delete(params: &CredentialDeleteParams) -> BuildResult {
    check_address("account", &params.account)?;
    check_optional_address("subject", &params.subject)?;
    check_optional_address("issuer", &params.issuer)?;

    Ok(Transaction::CredentialDelete(CredentialDelete {
        account: params.account.clone(),
        credential_type: encode_credential_type(&params.credential_type)?,
        subject: params.subject.clone(),
        issuer: params.issuer.clone(),
    }))
}

fn flag_bits(pairs: &[(bool, u32)]) -> Option<u32> {
    let bits = pairs
        .iter()
        .filter(|(enabled, _)| *enabled)
        .fold(0u32, |acc, (_, bit)| acc | bit);
    (bits != 0).then_some(bits)
}

fn check_address(field: &'static str, value: &str) -> Result<(), BuildError> {
    if validate::is_valid_address(value) {
        Ok(())
    } else {
        Err(BuildError::field(field, format!("'{value}' is not a valid address")))
    }
}

fn check_optional_address(field: &'static str, value: &Option<String>) -> Result<(), BuildError> {
    match value {
        Some(value) => check_address(field, value),
        None => Ok(()),
    }
}

fn check_currency(field: &'static str, value: &str) -> Result<(), BuildError> {
    if validate::is_valid_currency_code(value) {
        Ok(())
    } else {
        Err(BuildError::field(field, format!("'{value}' is not a valid currency code")))
    }
}

fn check_decimal(field: &'static str, value: &str) -> Result<(), BuildError> {
    if validate::is_decimal_value(value) {
        Ok(())
    } else {
        Err(BuildError::field(field, format!("'{value}' is not a non-negative number")))
    }
}

fn check_hash(field: &'static str, value: &str) -> Result<(), BuildError> {
    if validate::is_hash256(value) {
        Ok(())
    } else {
        Err(BuildError::field(field, "expected 64 hex characters"))
    }
}

fn check_hex(field: &'static str, value: &str) -> Result<(), BuildError> {
    if validate::is_hex(value) && value.len() % 2 == 0 {
        Ok(())
    } else {
        Err(BuildError::field(field, "expected an even-length hex string"))
    }
}

fn check_issuance_id(value: &str) -> Result<(), BuildError> {
    if validate::is_mpt_issuance_id(value) {
        Ok(())
    } else {
        Err(BuildError::field("issuance_id", "expected 48 hex characters"))
    }
}

fn check_amount(field: &'static str, amount: &Amount) -> Result<(), BuildError> {
    match amount {
        Amount::Drops(drops) if validate::is_drops_amount(drops) => Ok(()),
        Amount::Drops(_) => Err(BuildError::field(field, "expected an amount in drops")),
        Amount::Issued(issued) => {
            check_currency(field, &issued.currency)?;
            check_address(field, &issued.issuer)?;
            check_decimal(field, &issued.value)
        }
        Amount::Mpt(mpt) => {
            if !validate::is_mpt_issuance_id(&mpt.mpt_issuance_id) {
                return Err(BuildError::field(field, "expected a 48 hex character issuance id"));
            }
            if !validate::is_non_negative_integer(&mpt.value) {
                return Err(BuildError::field(field, "MPT amounts are whole numbers"));
            }
            Ok(())
        }
    }
}

fn required_amount<'a>(field: &'static str, amount: &'a Option<Amount>) -> Result<&'a Amount, BuildError> {
    let amount = amount
        .as_ref()
        .ok_or_else(|| BuildError::field(field, "an amount is required"))?;
    check_amount(field, amount)?;
    Ok(amount)
}

fn encode_uri(field: &'static str, value: &Option<String>) -> Result<Option<String>, BuildError> {
    match value {
        Some(uri) if uri.is_empty() || uri.len() > validate::MAX_URI_BYTES => {
            Err(BuildError::field(field, "must be between 1 and 256 bytes"))
        }
        Some(uri) => Ok(Some(validate::to_hex_upper(uri.as_bytes()))),
        None => Ok(None),
    }
}

fn encode_credential_type(value: &str) -> Result<String, BuildError> {
    if value.is_empty() || value.len() > validate::MAX_CREDENTIAL_TYPE_BYTES {
        return Err(BuildError::field("credential_type", "must be between 1 and 64 bytes"));
    }
    Ok(validate::to_hex_upper(value.as_bytes()))
}
