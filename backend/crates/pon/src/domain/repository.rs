//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use account::models::UserName;

use crate::domain::entities::{InventoryEntry, PullSettlement, SettleOutcome};
use crate::domain::value_objects::PonId;
use crate::error::PonResult;

/// Read side of the coin balance
#[trait_variant::make(BalanceRepository: Send)]
pub trait LocalBalanceRepository {
    /// `None` when the user does not exist
    async fn coins(&self, user_name: &UserName) -> PonResult<Option<i64>>;
}

/// Settle unit of a pull
#[trait_variant::make(PullRepository: Send)]
pub trait LocalPullRepository {
    /// Debit `cost` only if `coins >= cost`, append the ledger entry, all or nothing
    async fn settle_pull(&self, settlement: &PullSettlement) -> PonResult<SettleOutcome>;
}

/// Inventory ledger reads
#[trait_variant::make(InventoryRepository: Send)]
pub trait LocalInventoryRepository {
    /// Entries in sequence order, optionally for one pon only
    async fn history(
        &self,
        user_name: &UserName,
        pon_id: Option<&PonId>,
    ) -> PonResult<Vec<InventoryEntry>>;
}
