//! # Wallet Read Models
//!
//! Wire types for the balance, transaction history, receive, and send
//! endpoints, plus the small display helpers the dashboard needs. Amounts and
//! fees stay as the backend's strings; the client never recomputes them.

use serde::{Deserialize, Serialize};

/// Balance in one currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyBalance {
    /// Currency code (e.g. BRL1, USDC, POL)
    pub currency_code: String,
    /// Raw on-chain balance in base units
    pub balance: String,
    /// Decimal places of the currency
    pub decimals: u32,
    /// Backend-formatted display balance
    pub formatted_balance: String,
}

/// Response of `GET /balance`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceResponse {
    /// The user's wallet address
    pub address: String,
    /// Blockchain network code
    pub blockchain: String,
    /// Per-currency balances
    pub balances: Vec<CurrencyBalance>,
}

/// Direction of a transaction relative to the user's own address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Funds received by the user
    Incoming,
    /// Funds sent by the user
    Outgoing,
}

/// One on-chain transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction hash
    pub hash: String,
    /// Block number the transaction was mined in
    pub block_number: u64,
    /// Unix timestamp (seconds)
    pub timestamp: u64,
    /// Sender address
    pub from: String,
    /// Recipient address
    pub to: String,
    /// Raw value in base units
    pub value: String,
    /// Backend-formatted display value
    pub formatted_value: String,
    /// Currency code
    pub currency_code: String,
    /// Decimal places of the currency
    pub decimals: u32,
    /// Status string (confirmed, pending, failed)
    pub status: String,
}

impl Transaction {
    /// Classify the transaction relative to the user's address. Address
    /// comparison is case-insensitive (addresses appear in mixed checksum
    /// casing on the wire).
    #[must_use]
    pub fn direction(&self, own_address: &str) -> Direction {
        if self.from.eq_ignore_ascii_case(own_address) {
            Direction::Outgoing
        } else {
            Direction::Incoming
        }
    }
}

/// Response of `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionsResponse {
    /// The user's wallet address
    pub address: String,
    /// Blockchain network code
    pub blockchain: String,
    /// Currency filter the query was made with, if any
    pub currency_code: Option<String>,
    /// Transactions, newest first
    pub transactions: Vec<Transaction>,
}

/// Response of `GET /receive`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiveAddress {
    /// Blockchain network code
    pub blockchain: String,
    /// The user's deposit address
    pub address: String,
}

/// Request body of `POST /send` and `POST /send/estimate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendRequest {
    /// Destination address
    pub to_address: String,
    /// Amount in display units
    pub amount: String,
    /// Currency code
    pub currency_code: String,
}

/// Request body of `POST /send/estimate` (same shape as a send).
pub type EstimateRequest = SendRequest;

/// Response of `POST /send/estimate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateResponse {
    /// Estimated gas units
    pub estimated_gas: String,
    /// Gas price used for the estimate
    pub gas_price: String,
    /// Estimated fee in base units
    pub estimated_fee: String,
    /// Backend-formatted display fee
    pub estimated_fee_formatted: String,
    /// Maximum sendable amount in base units
    pub max_amount: String,
    /// Backend-formatted maximum sendable amount
    pub max_amount_formatted: String,
}

/// Response of `POST /send`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResponse {
    /// Whether the transaction was accepted
    pub success: bool,
    /// Hash of the submitted transaction
    pub transaction_hash: String,
    /// Informational message from the backend
    pub message: String,
}

/// Whether a string is a plausible EVM address: `0x` plus 40 hex digits.
#[must_use]
pub fn is_valid_evm_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Shorten an address for display: first 10 characters, ellipsis, last 8.
/// Addresses too short to truncate come back unchanged. Counts characters,
/// not bytes, so arbitrary display text is safe to pass through.
#[must_use]
pub fn truncate_address(address: &str) -> String {
    let count = address.chars().count();
    if count <= 18 {
        return address.to_string();
    }
    let head: String = address.chars().take(10).collect();
    let tail: String = address.chars().skip(count - 8).collect();
    format!("{head}...{tail}")
}

/// Parse a display amount, tolerating thousands separators ("1,234.56").
/// Returns `None` for anything that is not a plain positive decimal.
#[must_use]
pub fn parse_amount(amount: &str) -> Option<f64> {
    let cleaned: String = amount.chars().filter(|&c| c != ',').collect();
    cleaned.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWN: &str = "0x52908400098527886E0F7030069857D2E4169EE7";

    fn tx(from: &str, to: &str) -> Transaction {
        Transaction {
            hash: "0xabc".into(),
            block_number: 1,
            timestamp: 1_700_000_000,
            from: from.into(),
            to: to.into(),
            value: "1000000".into(),
            formatted_value: "1.00".into(),
            currency_code: "USDC".into(),
            decimals: 6,
            status: "confirmed".into(),
        }
    }

    #[test]
    fn direction_is_case_insensitive() {
        let out = tx(&OWN.to_lowercase(), "0x1");
        assert_eq!(out.direction(OWN), Direction::Outgoing);
        let incoming = tx("0x1", OWN);
        assert_eq!(incoming.direction(OWN), Direction::Incoming);
    }

    #[test]
    fn evm_address_validation() {
        assert!(is_valid_evm_address(OWN));
        assert!(!is_valid_evm_address("0x123"));
        assert!(!is_valid_evm_address(
            "0x52908400098527886E0F7030069857D2E4169EZZ"
        ));
        assert!(!is_valid_evm_address(
            "52908400098527886E0F7030069857D2E4169EE712"
        ));
    }

    #[test]
    fn address_truncation() {
        assert_eq!(truncate_address(OWN), "0x52908400...E4169EE7");
        assert_eq!(truncate_address("0xshort"), "0xshort");
        assert_eq!(truncate_address(""), "");
    }

    #[test]
    fn address_truncation_handles_multibyte_text() {
        // Display helper may receive arbitrary labels, not just hex.
        let label = "conta-pagamentos-São-Paulo-número-um";
        let truncated = truncate_address(label);
        assert_eq!(truncated, "conta-paga...úmero-um");
        // At the 18-character boundary a multi-byte string stays whole.
        assert_eq!(truncate_address("éééééééééééééééééé"), "éééééééééééééééééé");
    }

    #[test]
    fn amount_parsing_strips_separators() {
        assert_eq!(parse_amount("1,234.56"), Some(1234.56));
        assert_eq!(parse_amount(" 10 "), Some(10.0));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
    }
}
