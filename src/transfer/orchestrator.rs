//! Transfer Orchestrator
//!
//! Validates a transfer request, stages a PENDING transfer record, drives
//! it through the transaction recorder and settles it into exactly one
//! terminal state. All validation resolves before any row lock is taken;
//! funds only ever move through the recorder's atomic path.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use super::db::TransferStore;
use super::error::TransferError;
use super::types::{TransferId, TransferRecord, TransferRequest, TransferStatus};
use crate::account::pin;
use crate::ledger::anonymity::AnonymityLog;
use crate::ledger::recorder::Recorder;
use crate::wallet::models::Wallet;
use crate::wallet::store::Directory;

/// Retry policy for the retryable `Busy` outcome only; validation and
/// funds failures are caller-visible and never retried.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_busy_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_busy_retries: 3,
            backoff: Duration::from_millis(50),
        }
    }
}

pub struct TransferOrchestrator {
    transfers: Arc<dyn TransferStore>,
    directory: Arc<dyn Directory>,
    recorder: Arc<dyn Recorder>,
    anonymity: Arc<dyn AnonymityLog>,
    retry: RetryPolicy,
}

impl TransferOrchestrator {
    pub fn new(
        transfers: Arc<dyn TransferStore>,
        directory: Arc<dyn Directory>,
        recorder: Arc<dyn Recorder>,
        anonymity: Arc<dyn AnonymityLog>,
    ) -> Self {
        Self {
            transfers,
            directory,
            recorder,
            anonymity,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Validate and execute a transfer
    ///
    /// The returned record is terminal: COMPLETED on success. On failure
    /// the staged record is marked FAILED and the error is returned; a
    /// transfer is never left PENDING after this call returns.
    pub async fn initiate_transfer(
        &self,
        req: TransferRequest,
    ) -> Result<TransferRecord, TransferError> {
        self.validate(&req).await?;

        // Duplicate client key: hand back the earlier transfer instead of
        // moving funds twice.
        if let Some(cid) = &req.cid
            && let Some(existing) = self.transfers.find_by_cid(cid).await?
        {
            info!(transfer_id = %existing.id, cid = %cid, "Duplicate cid, returning existing transfer");
            return Ok(existing);
        }

        let mut record = TransferRecord::new(TransferId::new(), &req);
        if let Some(existing) = self.transfers.create(&record).await? {
            // Lost a create race against a request with the same cid;
            // the winner's transfer is the one this key names, so the
            // recorder must not run again.
            info!(transfer_id = %existing.id, "Duplicate cid, returning existing transfer");
            return Ok(existing);
        }
        debug!(transfer_id = %record.id, "Transfer staged as pending");

        match self.record_with_retry(&req).await {
            Ok(_) => {
                if !self
                    .transfers
                    .update_status_if(record.id, TransferStatus::Pending, TransferStatus::Completed)
                    .await?
                {
                    // CAS can only miss if the record is already terminal.
                    warn!(transfer_id = %record.id, "Transfer already settled, skipping update");
                }
                record.status = TransferStatus::Completed;
                record.updated_at = chrono::Utc::now().timestamp_millis();
                info!(transfer_id = %record.id, amount = record.amount, "Transfer completed");

                if req.is_anonymous {
                    self.annotate_anonymous(&record, req.proof.as_deref()).await;
                }

                // Hand back the stored view so this record and later
                // reads agree on status and timestamps.
                match self.transfers.find(record.id).await? {
                    Some(stored) => Ok(stored),
                    None => Ok(record),
                }
            }
            Err(e) => {
                // Settle the record before surfacing the error; a failure
                // to settle is logged, never masked over the real cause.
                if let Err(db_err) = self
                    .transfers
                    .update_status_with_error(
                        record.id,
                        TransferStatus::Pending,
                        TransferStatus::Failed,
                        &e.to_string(),
                    )
                    .await
                {
                    error!(
                        transfer_id = %record.id,
                        error = %db_err,
                        "Failed to mark transfer as failed"
                    );
                }
                info!(transfer_id = %record.id, reason = %e, "Transfer failed");
                Err(e)
            }
        }
    }

    /// Pure read of a transfer's current state
    pub async fn get_transfer_status(
        &self,
        id: TransferId,
    ) -> Result<TransferRecord, TransferError> {
        self.transfers
            .find(id)
            .await?
            .ok_or_else(|| TransferError::NotFound(format!("transfer {}", id)))
    }

    /// All validation, resolved before any lock is taken
    async fn validate(&self, req: &TransferRequest) -> Result<(), TransferError> {
        if req.amount <= 0 {
            return Err(TransferError::InvalidAmount);
        }
        if req.sender_wallet_id == req.receiver_wallet_id {
            return Err(TransferError::InvalidTransfer(
                "sender and receiver wallet must differ".to_string(),
            ));
        }

        let user = self
            .directory
            .find_user(req.user_id)
            .await?
            .ok_or_else(|| TransferError::NotFound(format!("user {}", req.user_id)))?;

        if user.pin_required_for_transfer {
            let supplied = req.pin.as_deref().ok_or(TransferError::InvalidPin)?;
            let stored = user.pin_hash.as_deref().ok_or(TransferError::InvalidPin)?;
            if !pin::verify_pin(supplied, stored) {
                return Err(TransferError::InvalidPin);
            }
        }

        let sender = self.resolve_wallet(req.sender_wallet_id).await?;
        if sender.user_id != req.user_id {
            return Err(TransferError::InvalidTransfer(format!(
                "wallet {} is not owned by user {}",
                sender.id, req.user_id
            )));
        }
        if !sender.is_transferable() {
            return Err(TransferError::InvalidTransfer(format!(
                "wallet {} cannot send transfers",
                sender.id
            )));
        }

        let receiver = self.resolve_wallet(req.receiver_wallet_id).await?;
        if !receiver.is_active || receiver.deleted_at.is_some() {
            return Err(TransferError::InvalidTransfer(format!(
                "wallet {} cannot receive transfers",
                receiver.id
            )));
        }
        if sender.currency != receiver.currency {
            return Err(TransferError::InvalidTransfer(format!(
                "currency mismatch: {} -> {}",
                sender.currency, receiver.currency
            )));
        }

        Ok(())
    }

    async fn resolve_wallet(&self, id: i64) -> Result<Wallet, TransferError> {
        self.directory
            .find_wallet(id)
            .await?
            .ok_or_else(|| TransferError::InvalidTransfer(format!("unknown wallet {}", id)))
    }

    /// Drive the recorder, retrying only on lock contention
    ///
    /// Busy attempts have no observable side effect until commit, so
    /// re-running with identical inputs is safe.
    async fn record_with_retry(&self, req: &TransferRequest) -> Result<(), TransferError> {
        let mut attempt = 0;
        loop {
            match self
                .recorder
                .transfer_coins(req.sender_wallet_id, req.receiver_wallet_id, req.amount)
                .await
            {
                Err(TransferError::Busy) if attempt < self.retry.max_busy_retries => {
                    attempt += 1;
                    warn!(
                        sender_wallet_id = req.sender_wallet_id,
                        attempt, "Wallet row contended, retrying"
                    );
                    tokio::time::sleep(self.retry.backoff).await;
                }
                Err(e) => return Err(e),
                Ok(_) => return Ok(()),
            }
        }
    }

    /// Best-effort annotation; failure is reported to operators, never to
    /// the caller of an already-completed transfer.
    async fn annotate_anonymous(&self, record: &TransferRecord, proof: Option<&[u8]>) {
        if let Err(e) = self
            .anonymity
            .log_anonymous_transfer(
                record.sender_wallet_id,
                record.receiver_wallet_id,
                record.amount,
                proof,
            )
            .await
        {
            error!(
                transfer_id = %record.id,
                error = %e,
                "Anonymous ledger annotation failed (transfer stays completed)"
            );
        }
    }
}
