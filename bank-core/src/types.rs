//! Core types for the account ledger
//!
//! All types are designed for:
//! - Fixed on-disk representation (CSV rows, see [`crate::log`])
//! - Exact arithmetic (Decimal for money)

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag on a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    /// Opening deposit synthesized at account creation
    #[serde(rename = "INITIAL_DEPOSIT")]
    InitialDeposit,
    /// Funds added to the account
    #[serde(rename = "DEPOSIT")]
    Deposit,
    /// Funds removed from the account
    #[serde(rename = "WITHDRAWAL")]
    Withdrawal,
}

impl TransactionKind {
    /// Wire name as written to the transaction log
    pub fn code(&self) -> &'static str {
        match self {
            TransactionKind::InitialDeposit => "INITIAL_DEPOSIT",
            TransactionKind::Deposit => "DEPOSIT",
            TransactionKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One monetary event in an account's history
///
/// Immutable once created. `amount` is the signed balance delta (positive
/// for deposits, negative for withdrawals); `balance_after` is the account
/// balance immediately following this event. Ordering is strictly by append
/// sequence: timestamps are second-granular, ties are broken by row order
/// in the log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Event time, truncated to whole seconds (the log format carries none)
    #[serde(rename = "Timestamp", with = "timestamp")]
    pub timestamp: DateTime<Utc>,

    /// Event category
    #[serde(rename = "Type")]
    pub kind: TransactionKind,

    /// Signed balance delta
    #[serde(rename = "Amount")]
    pub amount: Decimal,

    /// Balance immediately after this event
    #[serde(rename = "Balance")]
    pub balance_after: Decimal,
}

impl TransactionRecord {
    /// Create a record stamped with the current time
    pub fn new(kind: TransactionKind, amount: Decimal, balance_after: Decimal) -> Self {
        Self {
            timestamp: Utc::now().trunc_subsecs(0),
            kind,
            amount,
            balance_after,
        }
    }
}

/// Wire format for transaction timestamps: `YYYY-MM-DD HH:MM:SS`
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&ts.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, FORMAT)
            .map(|dt| dt.and_utc())
            .map_err(serde::de::Error::custom)
    }
}

/// Structured contact details for an account holder
///
/// The phone number is validated at account creation (exactly 10 digits);
/// the email address is stored opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Email address (not format-checked)
    pub email: String,
    /// Phone number, 10 ASCII digits
    pub phone: String,
}

impl Contact {
    /// Create contact details
    pub fn new(email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            phone: phone.into(),
        }
    }
}

/// Read-only statement view of one account
///
/// Returned by [`crate::Account::statement`] for the collaborator layer to
/// render; the core never formats display strings itself.
#[derive(Debug, Clone, Copy)]
pub struct Statement<'a> {
    /// Account number
    pub account_number: &'a str,
    /// Account holder name
    pub name: &'a str,
    /// Contact phone number
    pub phone: &'a str,
    /// Full transaction history in append order
    pub history: &'a [TransactionRecord],
    /// Current balance
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_codes() {
        assert_eq!(TransactionKind::InitialDeposit.code(), "INITIAL_DEPOSIT");
        assert_eq!(TransactionKind::Deposit.code(), "DEPOSIT");
        assert_eq!(TransactionKind::Withdrawal.code(), "WITHDRAWAL");
        assert_eq!(TransactionKind::Withdrawal.to_string(), "WITHDRAWAL");
    }

    #[test]
    fn test_record_timestamp_is_second_granular() {
        let record = TransactionRecord::new(
            TransactionKind::Deposit,
            Decimal::new(5000, 2),
            Decimal::new(15000, 2),
        );
        assert_eq!(record.timestamp.timestamp_subsec_nanos(), 0);
    }

    #[test]
    fn test_timestamp_wire_format_round_trip() {
        use chrono::NaiveDateTime;

        let parsed = NaiveDateTime::parse_from_str("2024-03-01 09:15:42", timestamp::FORMAT)
            .unwrap()
            .and_utc();
        assert_eq!(
            parsed.format(timestamp::FORMAT).to_string(),
            "2024-03-01 09:15:42"
        );
    }
}
