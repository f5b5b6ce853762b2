//! Wallets and the wallet ledger store

pub mod models;
pub mod store;

pub use models::{UserId, Wallet, WalletId};
pub use store::{Directory, PgDirectory, WalletStore};
