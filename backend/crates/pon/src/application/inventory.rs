//! Inventory Use Case

use std::sync::Arc;

use account::models::UserName;

use crate::domain::entities::InventoryEntry;
use crate::domain::repository::InventoryRepository;
use crate::domain::value_objects::PonId;
use crate::error::PonResult;

pub struct InventoryUseCase<R>
where
    R: InventoryRepository,
{
    repo: Arc<R>,
}

impl<R> InventoryUseCase<R>
where
    R: InventoryRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Ledger entries of `user_name`. Pons no longer in the catalog are still listed.
    pub async fn execute(
        &self,
        user_name: &UserName,
        pon_id: Option<&str>,
    ) -> PonResult<Vec<InventoryEntry>> {
        let pon_id = pon_id.filter(|p| !p.is_empty()).map(PonId::new);
        self.repo.history(user_name, pon_id.as_ref()).await
    }
}
