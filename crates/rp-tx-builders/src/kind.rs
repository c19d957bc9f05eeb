use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionKind {
    Payment,
    TrustSet,
    AccountSet,
    EscrowCreate,
    EscrowFinish,
    EscrowCancel,
    MptIssuanceCreate,
    MptIssuanceDestroy,
    MptIssuanceSet,
    MptAuthorize,
    NftMint,
    NftBurn,
    NftCreateOffer,
    NftAcceptOffer,
    NftCancelOffer,
    OfferCreate,
    OfferCancel,
    CredentialCreate,
    CredentialAccept,
    CredentialDelete,
}

impl TransactionKind {
    pub const ALL: [TransactionKind; 20] = [
        TransactionKind::Payment,
        TransactionKind::TrustSet,
        TransactionKind::AccountSet,
        TransactionKind::EscrowCreate,
        TransactionKind::EscrowFinish,
        TransactionKind::EscrowCancel,
        TransactionKind::MptIssuanceCreate,
        TransactionKind::MptIssuanceDestroy,
        TransactionKind::MptIssuanceSet,
        TransactionKind::MptAuthorize,
        TransactionKind::NftMint,
        TransactionKind::NftBurn,
        TransactionKind::NftCreateOffer,
        TransactionKind::NftAcceptOffer,
        TransactionKind::NftCancelOffer,
        TransactionKind::OfferCreate,
        TransactionKind::OfferCancel,
        TransactionKind::CredentialCreate,
        TransactionKind::CredentialAccept,
        TransactionKind::CredentialDelete,
    ];

    /// `TransactionType` value on the ledger.
    pub fn ledger_name(&self) -> &'static str {
        match self {
            TransactionKind::Payment => "Payment",
            TransactionKind::TrustSet => "TrustSet",
            TransactionKind::AccountSet => "AccountSet",
            TransactionKind::EscrowCreate => "EscrowCreate",
            TransactionKind::EscrowFinish => "EscrowFinish",
            TransactionKind::EscrowCancel => "EscrowCancel",
            TransactionKind::MptIssuanceCreate => "MPTokenIssuanceCreate",
            TransactionKind::MptIssuanceDestroy => "MPTokenIssuanceDestroy",
            TransactionKind::MptIssuanceSet => "MPTokenIssuanceSet",
            TransactionKind::MptAuthorize => "MPTokenAuthorize",
            TransactionKind::NftMint => "NFTokenMint",
            TransactionKind::NftBurn => "NFTokenBurn",
            TransactionKind::NftCreateOffer => "NFTokenCreateOffer",
            TransactionKind::NftAcceptOffer => "NFTokenAcceptOffer",
            TransactionKind::NftCancelOffer => "NFTokenCancelOffer",
            TransactionKind::OfferCreate => "OfferCreate",
            TransactionKind::OfferCancel => "OfferCancel",
            TransactionKind::CredentialCreate => "CredentialCreate",
            TransactionKind::CredentialAccept => "CredentialAccept",
            TransactionKind::CredentialDelete => "CredentialDelete",
        }
    }

    /// Route segment, e.g. `trust-set`.
    pub fn slug(&self) -> &'static str {
        match self {
            TransactionKind::Payment => "payment",
            TransactionKind::TrustSet => "trust-set",
            TransactionKind::AccountSet => "account-set",
            TransactionKind::EscrowCreate => "escrow-create",
            TransactionKind::EscrowFinish => "escrow-finish",
            TransactionKind::EscrowCancel => "escrow-cancel",
            TransactionKind::MptIssuanceCreate => "mpt-issuance-create",
            TransactionKind::MptIssuanceDestroy => "mpt-issuance-destroy",
            TransactionKind::MptIssuanceSet => "mpt-issuance-set",
            TransactionKind::MptAuthorize => "mpt-authorize",
            TransactionKind::NftMint => "nft-mint",
            TransactionKind::NftBurn => "nft-burn",
            TransactionKind::NftCreateOffer => "nft-create-offer",
            TransactionKind::NftAcceptOffer => "nft-accept-offer",
            TransactionKind::NftCancelOffer => "nft-cancel-offer",
            TransactionKind::OfferCreate => "offer-create",
            TransactionKind::OfferCancel => "offer-cancel",
            TransactionKind::CredentialCreate => "credential-create",
            TransactionKind::CredentialAccept => "credential-accept",
            TransactionKind::CredentialDelete => "credential-delete",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Payment => "Send payment",
            TransactionKind::TrustSet => "Set trust line",
            TransactionKind::AccountSet => "Account settings",
            TransactionKind::EscrowCreate => "Create escrow",
            TransactionKind::EscrowFinish => "Finish escrow",
            TransactionKind::EscrowCancel => "Cancel escrow",
            TransactionKind::MptIssuanceCreate => "Create MPT issuance",
            TransactionKind::MptIssuanceDestroy => "Destroy MPT issuance",
            TransactionKind::MptIssuanceSet => "Lock / unlock MPT",
            TransactionKind::MptAuthorize => "Authorize MPT holder",
            TransactionKind::NftMint => "Mint NFT",
            TransactionKind::NftBurn => "Burn NFT",
            TransactionKind::NftCreateOffer => "Create NFT offer",
            TransactionKind::NftAcceptOffer => "Accept NFT offer",
            TransactionKind::NftCancelOffer => "Cancel NFT offers",
            TransactionKind::OfferCreate => "Create DEX offer",
            TransactionKind::OfferCancel => "Cancel DEX offer",
            TransactionKind::CredentialCreate => "Issue credential",
            TransactionKind::CredentialAccept => "Accept credential",
            TransactionKind::CredentialDelete => "Delete credential",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Accepts either a route slug or a ledger transaction type name.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::from_slug(&value.to_ascii_lowercase())
            .or_else(|| Self::ALL.into_iter().find(|kind| kind.ledger_name().eq_ignore_ascii_case(value)))
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ledger_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugs_round_trip_and_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for kind in TransactionKind::ALL {
            assert!(seen.insert(kind.slug()));
            assert_eq!(TransactionKind::from_slug(kind.slug()), Some(kind));
        }
    }

    #[test]
    fn parse_accepts_ledger_names() {
        assert_eq!(TransactionKind::parse("NFTokenMint"), Some(TransactionKind::NftMint));
        assert_eq!(TransactionKind::parse("trustset"), Some(TransactionKind::TrustSet));
        assert_eq!(TransactionKind::parse("Trust-Set"), Some(TransactionKind::TrustSet));
        assert_eq!(TransactionKind::parse("Clawback"), None);
    }
}
