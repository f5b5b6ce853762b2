//! Wallet model
//!
//! A wallet holds a balance in one currency, in integer minor units.
//! The balance is owned exclusively by the wallet store: it only ever
//! changes through the transaction recorder's atomic debit/credit path.

use chrono::{DateTime, Utc};
use serde::Serialize;

pub type WalletId = i64;
pub type UserId = i64;

#[derive(Debug, Clone, Serialize)]
pub struct Wallet {
    pub id: WalletId,
    pub user_id: UserId,
    /// ISO currency code, e.g. "USD"
    pub currency: String,
    /// Balance in integer minor units, never negative
    pub balance: i64,
    pub is_active: bool,
    pub can_transfer: bool,
    pub created_at: DateTime<Utc>,
    /// Soft tombstone; a wallet referenced by ledger entries is never
    /// physically removed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Wallet {
    /// Whether this wallet may participate in a transfer
    #[inline]
    pub fn is_transferable(&self) -> bool {
        self.is_active && self.can_transfer && self.deleted_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wallet() -> Wallet {
        Wallet {
            id: 1,
            user_id: 1,
            currency: "USD".to_string(),
            balance: 1000,
            is_active: true,
            can_transfer: true,
            created_at: Utc::now(),
            deleted_at: None,
        }
    }

    #[test]
    fn test_transferable() {
        assert!(wallet().is_transferable());
    }

    #[test]
    fn test_not_transferable_when_inactive() {
        let mut w = wallet();
        w.is_active = false;
        assert!(!w.is_transferable());
    }

    #[test]
    fn test_not_transferable_when_tombstoned() {
        let mut w = wallet();
        w.deleted_at = Some(Utc::now());
        assert!(!w.is_transferable());
    }
}
