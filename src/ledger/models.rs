//! Ledger model types
//!
//! A `CoinTransaction` is the immutable record of one successful fund
//! movement; each one is mirrored by exactly two `LedgerEntry` rows of
//! equal amount, a debit at the sender and a credit at the receiver.
//! The ledger is append-only: no row is ever updated or deleted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::wallet::models::WalletId;

/// Ledger entry side
///
/// IDs are stored in PostgreSQL as SMALLINT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    Debit = 1,
    Credit = 2,
}

impl EntryType {
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(EntryType::Debit),
            2 => Some(EntryType::Credit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::Debit => "debit",
            EntryType::Credit => "credit",
        }
    }

    /// Sign applied to the amount when summing a wallet's entries
    #[inline]
    pub fn sign(&self) -> i64 {
        match self {
            EntryType::Debit => -1,
            EntryType::Credit => 1,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Immutable record of one successful fund movement
#[derive(Debug, Clone, Serialize)]
pub struct CoinTransaction {
    pub id: i64,
    pub sender_wallet_id: WalletId,
    pub receiver_wallet_id: WalletId,
    /// Amount in integer minor units, always positive
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

/// One side of a transaction's double-entry record
#[derive(Debug, Clone, Serialize)]
pub struct LedgerEntry {
    pub id: i64,
    /// None for anonymous-only annotation entries
    pub transaction_id: Option<i64>,
    pub wallet_id: WalletId,
    pub entry_type: EntryType,
    /// Amount in integer minor units, always positive
    pub amount: i64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_type_id_roundtrip() {
        assert_eq!(EntryType::from_id(1), Some(EntryType::Debit));
        assert_eq!(EntryType::from_id(2), Some(EntryType::Credit));
        assert_eq!(EntryType::from_id(0), None);
        assert_eq!(EntryType::from_id(3), None);
    }

    #[test]
    fn test_entry_type_sign() {
        assert_eq!(EntryType::Debit.sign(), -1);
        assert_eq!(EntryType::Credit.sign(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(EntryType::Debit.to_string(), "debit");
        assert_eq!(EntryType::Credit.to_string(), "credit");
    }
}
