//! Pull Use Case
//!
//! Draw a card from a pon, debit its cost and record it in the inventory ledger.

use std::sync::Arc;

use account::models::UserName;

use crate::domain::catalog::Catalog;
use crate::domain::entities::{PullSettlement, SettleOutcome};
use crate::domain::repository::{BalanceRepository, PullRepository};
use crate::domain::services::draw;
use crate::domain::value_objects::DrawnReference;
use crate::error::{PonError, PonResult};

/// Output DTO for a pull
#[derive(Debug, Clone)]
pub struct PullOutput {
    pub reference: DrawnReference,
    pub remaining_coins: i64,
}

/// Pull Use Case
pub struct PullUseCase<R>
where
    R: BalanceRepository + PullRepository,
{
    repo: Arc<R>,
}

impl<R> PullUseCase<R>
where
    R: BalanceRepository + PullRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        user_name: &UserName,
        pon_id: &str,
        catalog: &Catalog,
    ) -> PonResult<PullOutput> {
        let pon = catalog.lookup(pon_id).ok_or(PonError::PonNotFound)?;
        let cost = i64::from(pon.cost());

        // Fast path: no draw and no writes when the balance is already short
        let coins = self
            .repo
            .coins(user_name)
            .await?
            .ok_or(PonError::UserNotFound)?;
        if coins < cost {
            return Err(PonError::InsufficientCoins);
        }

        let reference = draw(pon, &mut rand::rng())
            .ok_or_else(|| PonError::Internal(format!("pon {pon_id} has no cards")))?;

        let settlement = PullSettlement {
            user_name: user_name.clone(),
            pon_id: pon.id.clone(),
            reference,
            cost,
        };

        match self.repo.settle_pull(&settlement).await? {
            SettleOutcome::Settled {
                remaining_coins,
                entry,
            } => {
                tracing::info!(
                    user_name = %entry.user_name,
                    pon_id = %entry.pon_id,
                    card = %entry.reference,
                    sequence = entry.sequence,
                    remaining_coins,
                    "Pull settled"
                );
                Ok(PullOutput {
                    reference: entry.reference,
                    remaining_coins,
                })
            }
            SettleOutcome::InsufficientCoins => {
                // Another pull spent the coins between the read and the debit
                tracing::info!(
                    user_name = %user_name,
                    pon_id = %pon.id,
                    "Pull lost the balance race"
                );
                Err(PonError::InsufficientCoins)
            }
            SettleOutcome::UserNotFound => Err(PonError::UserNotFound),
        }
    }
}
