//! Domain Entities

use account::models::UserName;
use chrono::{DateTime, Utc};

use crate::domain::value_objects::{DrawnReference, PonId};

/// One row of the append-only inventory ledger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub user_name: UserName,
    pub pon_id: PonId,
    pub reference: DrawnReference,
    /// Monotonic insertion order across the whole ledger
    pub sequence: i64,
    pub created_at: DateTime<Utc>,
}

/// Everything the settle unit needs: debit `cost` from `user_name` and append `reference`
#[derive(Debug, Clone)]
pub struct PullSettlement {
    pub user_name: UserName,
    pub pon_id: PonId,
    pub reference: DrawnReference,
    pub cost: i64,
}

/// Result of a settle attempt. Only `Settled` has written anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettleOutcome {
    Settled {
        remaining_coins: i64,
        entry: InventoryEntry,
    },
    /// Conditional debit failed; nothing was written
    InsufficientCoins,
    UserNotFound,
}
