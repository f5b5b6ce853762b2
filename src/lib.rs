//! coinvault - Custodial Wallet Ledger
//!
//! A custodial ledger for internal digital wallets: users hold balances in
//! one or more currencies and move value between wallets via transfers.
//!
//! # Modules
//!
//! - [`wallet`] - Wallet model and the wallet ledger store
//! - [`ledger`] - Transaction recorder, double-entry models, anonymity log
//! - [`transfer`] - Transfer orchestrator, records and error taxonomy
//! - [`account`] - User profiles and PIN verification
//! - [`api`] - HTTP surface (axum)
//! - [`db`] - PostgreSQL pool and schema bootstrap
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing setup

pub mod account;
pub mod api;
pub mod config;
pub mod db;
pub mod ledger;
pub mod logging;
pub mod transfer;
pub mod wallet;

// Convenient re-exports at crate root
pub use ledger::{AnonymityLogger, CoinTransaction, EntryType, LedgerEntry, TransactionRecorder};
pub use transfer::{
    TransferDb, TransferError, TransferId, TransferOrchestrator, TransferRecord, TransferRequest,
    TransferStatus,
};
pub use wallet::{Wallet, WalletStore};
