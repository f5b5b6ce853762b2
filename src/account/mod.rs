//! User accounts: profile lookup and PIN verification

pub mod models;
pub mod pin;
pub mod repository;

pub use models::User;
pub use repository::UserRepository;
