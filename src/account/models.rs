//! User account model

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::wallet::models::UserId;

/// User profile, as far as the transfer core needs it
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: Option<String>,
    /// Argon2 PHC string; never exposed in API responses
    #[serde(skip_serializing)]
    pub pin_hash: Option<String>,
    /// When set, transfers from this user's wallets require a matching PIN
    pub pin_required_for_transfer: bool,
    pub created_at: DateTime<Utc>,
}
