//! Transfer execution core
//!
//! The orchestrator validates a request, stages a PENDING transfer and
//! drives it through the transaction recorder to exactly one terminal
//! state. See [`orchestrator::TransferOrchestrator`] for the entry point.

pub mod db;
pub mod error;
pub mod orchestrator;
pub mod types;


pub use db::{TransferDb, TransferStore};
pub use error::TransferError;
pub use orchestrator::{RetryPolicy, TransferOrchestrator};
pub use types::{TransferId, TransferRecord, TransferRequest, TransferStatus};
