//! Double-entry ledger: the recorder and its append-only trail

pub mod anonymity;
pub mod models;
pub mod recorder;

pub use anonymity::{AnonymityLog, AnonymityLogger};
pub use models::{CoinTransaction, EntryType, LedgerEntry};
pub use recorder::{Recorder, TransactionRecorder};
