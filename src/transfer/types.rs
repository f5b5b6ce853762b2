//! Transfer Core Types
//!
//! The Transfer is the request layer above the ledger Transaction: it may
//! fail validation before any funds move, and it progresses through its
//! state machine exactly once.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::wallet::models::{UserId, WalletId};

/// Transfer ID - ULID-based unique identifier
///
/// ULIDs are monotonic, sortable and need no coordination between nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransferId(ulid::Ulid);

impl TransferId {
    /// Generate a new unique TransferId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransferId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

impl Serialize for TransferId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

/// Transfer lifecycle states
///
/// State IDs are stored in PostgreSQL as SMALLINT.
/// Terminal states: COMPLETED (1), FAILED (-1). Terminal is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(i16)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    /// Created, funds not yet moved
    Pending = 0,
    /// Terminal: funds moved, double-entry recorded
    Completed = 1,
    /// Terminal: validation or execution failed, no funds moved
    Failed = -1,
}

impl TransferStatus {
    /// Check if this is a terminal state (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferStatus::Completed | TransferStatus::Failed)
    }

    /// Get the numeric state ID for PostgreSQL storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from PostgreSQL state ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            0 => Some(TransferStatus::Pending),
            1 => Some(TransferStatus::Completed),
            -1 => Some(TransferStatus::Failed),
            _ => None,
        }
    }

    /// Get human-readable state name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Pending => "pending",
            TransferStatus::Completed => "completed",
            TransferStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transfer request from the request layer
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// Resolved user initiating the transfer (must own the sender wallet)
    pub user_id: UserId,
    pub sender_wallet_id: WalletId,
    pub receiver_wallet_id: WalletId,
    /// Amount in integer minor units
    pub amount: i64,
    /// Record an append-only anonymous annotation after completion
    pub is_anonymous: bool,
    /// PIN, required when the user profile demands one for transfers
    pub pin: Option<String>,
    /// Opaque proof blob for anonymous transfers (extension point)
    pub proof: Option<Vec<u8>>,
    /// Client-provided idempotency key (optional)
    pub cid: Option<String>,
}

impl TransferRequest {
    /// Create a plain (non-anonymous) transfer request
    pub fn new(
        user_id: UserId,
        sender_wallet_id: WalletId,
        receiver_wallet_id: WalletId,
        amount: i64,
    ) -> Self {
        Self {
            user_id,
            sender_wallet_id,
            receiver_wallet_id,
            amount,
            is_anonymous: false,
            pin: None,
            proof: None,
            cid: None,
        }
    }

    pub fn with_pin(mut self, pin: impl Into<String>) -> Self {
        self.pin = Some(pin.into());
        self
    }

    pub fn anonymous(mut self, proof: Option<Vec<u8>>) -> Self {
        self.is_anonymous = true;
        self.proof = proof;
        self
    }

    pub fn with_cid(mut self, cid: impl Into<String>) -> Self {
        self.cid = Some(cid.into());
        self
    }
}

/// Transfer record as persisted in the transfers table
#[derive(Debug, Clone, Serialize)]
pub struct TransferRecord {
    pub id: TransferId,
    pub sender_wallet_id: WalletId,
    pub receiver_wallet_id: WalletId,
    /// Amount in integer minor units
    pub amount: i64,
    pub status: TransferStatus,
    pub is_anonymous: bool,
    /// Client idempotency key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cid: Option<String>,
    /// Failure reason for terminal FAILED transfers
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Created timestamp (millis)
    pub created_at: i64,
    /// Last updated timestamp (millis)
    pub updated_at: i64,
}

impl TransferRecord {
    /// Create a new transfer record in PENDING state
    pub fn new(id: TransferId, req: &TransferRequest) -> Self {
        let now = chrono::Utc::now().timestamp_millis();
        Self {
            id,
            sender_wallet_id: req.sender_wallet_id,
            receiver_wallet_id: req.receiver_wallet_id,
            amount: req.amount,
            status: TransferStatus::Pending,
            is_anonymous: req.is_anonymous,
            cid: req.cid.clone(),
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}

impl fmt::Display for TransferRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Transfer[{}] wallet {} -> wallet {} amount={} status={}",
            self.id, self.sender_wallet_id, self.receiver_wallet_id, self.amount, self.status
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_id_unique() {
        let id1 = TransferId::new();
        let id2 = TransferId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_transfer_id_roundtrip() {
        let id = TransferId::new();
        let parsed: TransferId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_terminal_states() {
        assert!(TransferStatus::Completed.is_terminal());
        assert!(TransferStatus::Failed.is_terminal());
        assert!(!TransferStatus::Pending.is_terminal());
    }

    #[test]
    fn test_status_id_roundtrip() {
        for status in [
            TransferStatus::Pending,
            TransferStatus::Completed,
            TransferStatus::Failed,
        ] {
            assert_eq!(TransferStatus::from_id(status.id()), Some(status));
        }
        assert!(TransferStatus::from_id(99).is_none());
    }

    #[test]
    fn test_record_starts_pending() {
        let req = TransferRequest::new(1, 10, 20, 500).with_cid("client-1");
        let record = TransferRecord::new(TransferId::new(), &req);

        assert_eq!(record.status, TransferStatus::Pending);
        assert_eq!(record.amount, 500);
        assert_eq!(record.cid, Some("client-1".to_string()));
        assert!(record.error.is_none());
        assert!(!record.is_anonymous);
    }

    #[test]
    fn test_request_builders() {
        let req = TransferRequest::new(1, 10, 20, 500)
            .with_pin("1234")
            .anonymous(Some(vec![0xAB]));

        assert_eq!(req.pin.as_deref(), Some("1234"));
        assert!(req.is_anonymous);
        assert_eq!(req.proof, Some(vec![0xAB]));
    }
}
