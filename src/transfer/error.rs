//! Transfer Error Types
//!
//! One taxonomy shared by the orchestrator, the recorder and the stores.

use thiserror::Error;

/// Transfer error types
///
/// Error codes are stable strings used in API responses and logs.
#[derive(Error, Debug, Clone)]
pub enum TransferError {
    // === Validation Errors ===
    #[error("Amount must be greater than zero")]
    InvalidAmount,

    #[error("Invalid PIN")]
    InvalidPin,

    #[error("Invalid transfer: {0}")]
    InvalidTransfer(String),

    // === Execution Errors ===
    #[error("Insufficient funds")]
    InsufficientFunds,

    /// Lock-wait timeout or serialization conflict. Safe to retry with
    /// identical inputs: the unit of work has no side effect until commit.
    #[error("Wallet row contended, try again")]
    Busy,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::InvalidPin => "INVALID_PIN",
            TransferError::InvalidTransfer(_) => "INVALID_TRANSFER",
            TransferError::InsufficientFunds => "INSUFFICIENT_FUNDS",
            TransferError::Busy => "BUSY",
            TransferError::NotFound(_) => "NOT_FOUND",
            TransferError::StorageFailure(_) => "STORAGE_FAILURE",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidAmount | TransferError::InvalidTransfer(_) => 400,
            TransferError::InvalidPin => 403,
            TransferError::InsufficientFunds => 422,
            TransferError::NotFound(_) => 404,
            TransferError::Busy => 429,
            TransferError::StorageFailure(_) => 500,
        }
    }

    /// Whether the caller may retry with identical inputs
    #[inline]
    pub fn is_retryable(&self) -> bool {
        matches!(self, TransferError::Busy)
    }
}

/// PostgreSQL error code for `lock_not_available` (raised on lock_timeout)
const PG_LOCK_NOT_AVAILABLE: &str = "55P03";
/// PostgreSQL error code for `serialization_failure`
const PG_SERIALIZATION_FAILURE: &str = "40001";
/// PostgreSQL error code for `deadlock_detected`
const PG_DEADLOCK_DETECTED: &str = "40P01";

impl From<sqlx::Error> for TransferError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if let Some(code) = db_err.code() {
                if code == PG_LOCK_NOT_AVAILABLE
                    || code == PG_SERIALIZATION_FAILURE
                    || code == PG_DEADLOCK_DETECTED
                {
                    return TransferError::Busy;
                }
            }
        }
        TransferError::StorageFailure(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(TransferError::InvalidAmount.code(), "INVALID_AMOUNT");
        assert_eq!(
            TransferError::InsufficientFunds.code(),
            "INSUFFICIENT_FUNDS"
        );
        assert_eq!(TransferError::Busy.code(), "BUSY");
        assert_eq!(
            TransferError::InvalidTransfer("self transfer".into()).code(),
            "INVALID_TRANSFER"
        );
    }

    #[test]
    fn test_http_status() {
        assert_eq!(TransferError::InvalidAmount.http_status(), 400);
        assert_eq!(TransferError::InvalidPin.http_status(), 403);
        assert_eq!(TransferError::InsufficientFunds.http_status(), 422);
        assert_eq!(TransferError::NotFound("x".into()).http_status(), 404);
        assert_eq!(TransferError::Busy.http_status(), 429);
        assert_eq!(
            TransferError::StorageFailure("down".into()).http_status(),
            500
        );
    }

    #[test]
    fn test_retryable() {
        assert!(TransferError::Busy.is_retryable());
        assert!(!TransferError::InsufficientFunds.is_retryable());
        assert!(!TransferError::InvalidPin.is_retryable());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            TransferError::InsufficientFunds.to_string(),
            "Insufficient funds"
        );
    }
}
