//! Ledger transaction records in their JSON shape.
//!
//! Field names follow the ledger schema; optional fields are skipped
//! entirely when unset so wallets never see explicit `null`s.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    /// XRP expressed in drops.
    Drops(String),
    Issued(IssuedAmount),
    Mpt(MptAmount),
}

impl Amount {
    pub fn is_xrp(&self) -> bool {
        matches!(self, Amount::Drops(_))
    }

    /// Asset identity, ignoring the quantity.
    pub fn asset_key(&self) -> String {
        match self {
            Amount::Drops(_) => "XRP".to_owned(),
            Amount::Issued(issued) => format!("{}/{}", issued.currency.to_ascii_uppercase(), issued.issuer),
            Amount::Mpt(mpt) => format!("MPT/{}", mpt.mpt_issuance_id.to_ascii_uppercase()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedAmount {
    pub currency: String,
    pub issuer: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MptAmount {
    pub mpt_issuance_id: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "TransactionType")]
pub enum Transaction {
    Payment(Payment),
    TrustSet(TrustSet),
    AccountSet(AccountSet),
    EscrowCreate(EscrowCreate),
    EscrowFinish(EscrowFinish),
    EscrowCancel(EscrowCancel),
    #[serde(rename = "MPTokenIssuanceCreate")]
    MpTokenIssuanceCreate(MpTokenIssuanceCreate),
    #[serde(rename = "MPTokenIssuanceDestroy")]
    MpTokenIssuanceDestroy(MpTokenIssuanceDestroy),
    #[serde(rename = "MPTokenIssuanceSet")]
    MpTokenIssuanceSet(MpTokenIssuanceSet),
    #[serde(rename = "MPTokenAuthorize")]
    MpTokenAuthorize(MpTokenAuthorize),
    #[serde(rename = "NFTokenMint")]
    NfTokenMint(NfTokenMint),
    #[serde(rename = "NFTokenBurn")]
    NfTokenBurn(NfTokenBurn),
    #[serde(rename = "NFTokenCreateOffer")]
    NfTokenCreateOffer(NfTokenCreateOffer),
    #[serde(rename = "NFTokenAcceptOffer")]
    NfTokenAcceptOffer(NfTokenAcceptOffer),
    #[serde(rename = "NFTokenCancelOffer")]
    NfTokenCancelOffer(NfTokenCancelOffer),
    OfferCreate(OfferCreate),
    OfferCancel(OfferCancel),
    CredentialCreate(CredentialCreate),
    CredentialAccept(CredentialAccept),
    CredentialDelete(CredentialDelete),
}

impl Transaction {
    pub fn account(&self) -> &str {
        match self {
            Transaction::Payment(tx) => &tx.account,
            Transaction::TrustSet(tx) => &tx.account,
            Transaction::AccountSet(tx) => &tx.account,
            Transaction::EscrowCreate(tx) => &tx.account,
            Transaction::EscrowFinish(tx) => &tx.account,
            Transaction::EscrowCancel(tx) => &tx.account,
            Transaction::MpTokenIssuanceCreate(tx) => &tx.account,
            Transaction::MpTokenIssuanceDestroy(tx) => &tx.account,
            Transaction::MpTokenIssuanceSet(tx) => &tx.account,
            Transaction::MpTokenAuthorize(tx) => &tx.account,
            Transaction::NfTokenMint(tx) => &tx.account,
            Transaction::NfTokenBurn(tx) => &tx.account,
            Transaction::NfTokenCreateOffer(tx) => &tx.account,
            Transaction::NfTokenAcceptOffer(tx) => &tx.account,
            Transaction::NfTokenCancelOffer(tx) => &tx.account,
            Transaction::OfferCreate(tx) => &tx.account,
            Transaction::OfferCancel(tx) => &tx.account,
            Transaction::CredentialCreate(tx) => &tx.account,
            Transaction::CredentialAccept(tx) => &tx.account,
            Transaction::CredentialDelete(tx) => &tx.account,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Payment {
    pub account: String,
    pub destination: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
    #[serde(default, rename = "InvoiceID", skip_serializing_if = "Option::is_none")]
    pub invoice_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub send_max: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deliver_min: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TrustSet {
    pub account: String,
    pub limit_amount: IssuedAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_in: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_out: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AccountSet {
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_flag: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clear_flag: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_rate: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_size: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowCreate {
    pub account: String,
    pub destination: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_after: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_after: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_tag: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowFinish {
    pub account: String,
    pub owner: String,
    pub offer_sequence: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EscrowCancel {
    pub account: String,
    pub owner: String,
    pub offer_sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpTokenIssuanceCreate {
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_scale: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_amount: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_fee: Option<u16>,
    #[serde(default, rename = "MPTokenMetadata", skip_serializing_if = "Option::is_none")]
    pub metadata: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpTokenIssuanceDestroy {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "MPTokenIssuanceID")]
    pub issuance_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpTokenIssuanceSet {
    pub account: String,
    #[serde(rename = "MPTokenIssuanceID")]
    pub issuance_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    pub flags: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MpTokenAuthorize {
    pub account: String,
    #[serde(rename = "MPTokenIssuanceID")]
    pub issuance_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub holder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenMint {
    pub account: String,
    #[serde(rename = "NFTokenTaxon")]
    pub taxon: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_fee: Option<u16>,
    #[serde(default, rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenBurn {
    pub account: String,
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NfTokenCreateOffer {
    pub account: String,
    #[serde(rename = "NFTokenID")]
    pub nftoken_id: String,
    pub amount: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfTokenAcceptOffer {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(default, rename = "NFTokenSellOffer", skip_serializing_if = "Option::is_none")]
    pub sell_offer: Option<String>,
    #[serde(default, rename = "NFTokenBuyOffer", skip_serializing_if = "Option::is_none")]
    pub buy_offer: Option<String>,
    #[serde(default, rename = "NFTokenBrokerFee", skip_serializing_if = "Option::is_none")]
    pub broker_fee: Option<Amount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfTokenCancelOffer {
    #[serde(rename = "Account")]
    pub account: String,
    #[serde(rename = "NFTokenOffers")]
    pub offers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCreate {
    pub account: String,
    pub taker_gets: Amount,
    pub taker_pays: Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offer_sequence: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OfferCancel {
    pub account: String,
    pub offer_sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialCreate {
    pub account: String,
    pub subject: String,
    pub credential_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<u32>,
    #[serde(default, rename = "URI", skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialAccept {
    pub account: String,
    pub issuer: String,
    pub credential_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CredentialDelete {
    pub account: String,
    pub credential_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

/// Flag bits understood by the builders.
pub mod flags {
    pub const TF_PARTIAL_PAYMENT: u32 = 0x0002_0000;

    pub const TF_SETF_AUTH: u32 = 0x0001_0000;
    pub const TF_SET_NO_RIPPLE: u32 = 0x0002_0000;
    pub const TF_CLEAR_NO_RIPPLE: u32 = 0x0004_0000;
    pub const TF_SET_FREEZE: u32 = 0x0010_0000;
    pub const TF_CLEAR_FREEZE: u32 = 0x0020_0000;

    pub const TF_MPT_CAN_LOCK: u32 = 0x0002;
    pub const TF_MPT_REQUIRE_AUTH: u32 = 0x0004;
    pub const TF_MPT_CAN_ESCROW: u32 = 0x0008;
    pub const TF_MPT_CAN_TRADE: u32 = 0x0010;
    pub const TF_MPT_CAN_TRANSFER: u32 = 0x0020;
    pub const TF_MPT_CAN_CLAWBACK: u32 = 0x0040;
    pub const TF_MPT_LOCK: u32 = 0x0001;
    pub const TF_MPT_UNLOCK: u32 = 0x0002;
    pub const TF_MPT_UNAUTHORIZE: u32 = 0x0001;

    pub const TF_BURNABLE: u32 = 0x0001;
    pub const TF_ONLY_XRP: u32 = 0x0002;
    pub const TF_TRANSFERABLE: u32 = 0x0008;
    pub const TF_MUTABLE: u32 = 0x0010;
    pub const TF_SELL_NFTOKEN: u32 = 0x0001;

    pub const TF_PASSIVE: u32 = 0x0001_0000;
    pub const TF_IMMEDIATE_OR_CANCEL: u32 = 0x0002_0000;
    pub const TF_FILL_OR_KILL: u32 = 0x0004_0000;
    pub const TF_SELL: u32 = 0x0008_0000;

    /// Highest `asf*` account flag accepted by AccountSet.
    pub const MAX_ACCOUNT_SET_FLAG: u32 = 17;
}
