//! Format-level validators shared by forms and builders.
//!
//! None of these consult ledger state: an address that passes here may
//! still be unfunded, and a currency may have no trust line.

use regex::Regex;
use std::sync::LazyLock;

static ADDRESS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^r[1-9A-HJ-NP-Za-km-z]{24,34}$").expect("address pattern"));

static STANDARD_CURRENCY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9?!@#$%^&*<>(){}\[\]|]{3}$").expect("currency pattern")
});

static DECIMAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+(\.\d+)?([eE][+-]?\d+)?$").expect("decimal pattern"));

/// Upper bound on XRP in drops (100 billion XRP).
pub const MAX_DROPS: u64 = 100_000_000_000_000_000;
pub const DROPS_PER_XRP: u64 = 1_000_000;
pub const MAX_TRANSFER_FEE: u16 = 50_000;
pub const MIN_TRANSFER_RATE: u32 = 1_000_000_000;
pub const MAX_TRANSFER_RATE: u32 = 2_000_000_000;
pub const MAX_CREDENTIAL_TYPE_BYTES: usize = 64;
pub const MAX_URI_BYTES: usize = 256;

pub fn is_valid_address(value: &str) -> bool {
    ADDRESS_RE.is_match(value)
}

/// Three-character standard code (anything but `XRP`) or a 160-bit hex code.
pub fn is_valid_currency_code(value: &str) -> bool {
    if value.len() == 3 {
        return STANDARD_CURRENCY_RE.is_match(value) && !value.eq_ignore_ascii_case("XRP");
    }
    value.len() == 40 && is_hex(value) && !value.starts_with("00")
}

pub fn is_non_negative_integer(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_drops_amount(value: &str) -> bool {
    is_non_negative_integer(value) && value.parse::<u64>().is_ok_and(|drops| drops <= MAX_DROPS)
}

/// Non-negative decimal string as accepted for issued-currency values.
pub fn is_decimal_value(value: &str) -> bool {
    DECIMAL_RE.is_match(value)
}

pub fn is_hex(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn is_hash256(value: &str) -> bool {
    value.len() == 64 && is_hex(value)
}

pub fn is_mpt_issuance_id(value: &str) -> bool {
    value.len() == 48 && is_hex(value)
}

pub fn is_hex_bytes(value: &str, max_bytes: usize) -> bool {
    is_hex(value) && value.len() % 2 == 0 && value.len() / 2 <= max_bytes
}

pub fn is_transfer_fee(value: u16) -> bool {
    value <= MAX_TRANSFER_FEE
}

pub fn is_tick_size(value: u8) -> bool {
    value == 0 || (3..=15).contains(&value)
}

pub fn is_transfer_rate(value: u32) -> bool {
    value == 0 || (MIN_TRANSFER_RATE..=MAX_TRANSFER_RATE).contains(&value)
}

/// Converts a decimal XRP string (at most six fractional digits) to drops.
pub fn xrp_to_drops(value: &str) -> Option<String> {
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };
    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if fraction.len() > 6 {
        return None;
    }

    let whole: u64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
    let fraction: u64 = format!("{fraction:0<6}").parse().ok()?;
    let drops = whole.checked_mul(DROPS_PER_XRP)?.checked_add(fraction)?;
    (drops <= MAX_DROPS).then(|| drops.to_string())
}

pub fn to_hex_upper(input: &[u8]) -> String {
    let mut output = String::with_capacity(input.len() * 2);
    for byte in input {
        output.push_str(&format!("{byte:02X}"));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_alphabet_excludes_ambiguous_characters() {
        assert!(is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
        assert!(is_valid_address("rPT1Sjq2YGrBMTttX4GZHjKu9dyfzbpAYe"));
        assert!(!is_valid_address("rInvalidAddr"));
        // `0`, `O`, `I` and `l` are not part of the alphabet.
        assert!(!is_valid_address("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyT0"));
        assert!(!is_valid_address("xHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh"));
    }

    #[test]
    fn currency_codes() {
        assert!(is_valid_currency_code("USD"));
        assert!(is_valid_currency_code("usd"));
        assert!(!is_valid_currency_code("XRP"));
        assert!(!is_valid_currency_code("xrp"));
        assert!(!is_valid_currency_code("US"));
        assert!(is_valid_currency_code("524C555344000000000000000000000000000000"));
        assert!(!is_valid_currency_code("0000000000000000000000005852500000000000"));
    }

    #[test]
    fn drops_bounds() {
        assert!(is_drops_amount("0"));
        assert!(is_drops_amount("100000000000000000"));
        assert!(!is_drops_amount("100000000000000001"));
        assert!(!is_drops_amount("-5"));
        assert!(!is_drops_amount("1.5"));
    }

    #[test]
    fn xrp_conversion() {
        assert_eq!(xrp_to_drops("1").as_deref(), Some("1000000"));
        assert_eq!(xrp_to_drops("0.000001").as_deref(), Some("1"));
        assert_eq!(xrp_to_drops("12.5").as_deref(), Some("12500000"));
        assert_eq!(xrp_to_drops("0.0000001"), None);
        assert_eq!(xrp_to_drops("abc"), None);
        assert_eq!(xrp_to_drops("."), None);
    }

    #[test]
    fn ranges() {
        assert!(is_tick_size(0));
        assert!(!is_tick_size(2));
        assert!(is_tick_size(15));
        assert!(is_transfer_rate(0));
        assert!(!is_transfer_rate(999_999_999));
        assert!(is_transfer_rate(2_000_000_000));
        assert!(!is_transfer_fee(50_001));
    }
}
