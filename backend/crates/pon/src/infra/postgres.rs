//! PostgreSQL Repository Implementation

use account::models::UserName;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{InventoryEntry, PullSettlement, SettleOutcome};
use crate::domain::repository::{BalanceRepository, InventoryRepository, PullRepository};
use crate::domain::value_objects::{DrawnReference, PonId};
use crate::error::PonResult;

/// PostgreSQL-backed ledger and balance store
#[derive(Clone)]
pub struct PgPonRepository {
    pool: PgPool,
}

impl PgPonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BalanceRepository for PgPonRepository {
    async fn coins(&self, user_name: &UserName) -> PonResult<Option<i64>> {
        let coins = sqlx::query_scalar::<_, i64>("SELECT coins FROM users WHERE user_name = $1")
            .bind(user_name.as_str())
            .fetch_optional(&self.pool)
            .await?;

        Ok(coins)
    }
}

impl PullRepository for PgPonRepository {
    async fn settle_pull(&self, settlement: &PullSettlement) -> PonResult<SettleOutcome> {
        // Dropping `tx` without commit rolls everything back
        let mut tx = self.pool.begin().await?;

        // Row lock + predicate re-check under read committed: concurrent pulls serialize here
        let remaining = sqlx::query_scalar::<_, i64>(
            r#"
            UPDATE users SET coins = coins - $2
            WHERE user_name = $1 AND coins >= $2
            RETURNING coins
            "#,
        )
        .bind(settlement.user_name.as_str())
        .bind(settlement.cost)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(remaining_coins) = remaining else {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM users WHERE user_name = $1)",
            )
            .bind(settlement.user_name.as_str())
            .fetch_one(&mut *tx)
            .await?;
            tx.rollback().await?;

            return Ok(if exists {
                SettleOutcome::InsufficientCoins
            } else {
                SettleOutcome::UserNotFound
            });
        };

        let row = sqlx::query_as::<_, InventoryRow>(
            r#"
            INSERT INTO inventory_entries (user_name, pon_id, drawn_reference)
            VALUES ($1, $2, $3)
            RETURNING entry_id, user_name, pon_id, drawn_reference, created_at
            "#,
        )
        .bind(settlement.user_name.as_str())
        .bind(settlement.pon_id.as_str())
        .bind(settlement.reference.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(SettleOutcome::Settled {
            remaining_coins,
            entry: row.into_entry(),
        })
    }
}

impl InventoryRepository for PgPonRepository {
    async fn history(
        &self,
        user_name: &UserName,
        pon_id: Option<&PonId>,
    ) -> PonResult<Vec<InventoryEntry>> {
        let rows = sqlx::query_as::<_, InventoryRow>(
            r#"
            SELECT entry_id, user_name, pon_id, drawn_reference, created_at
            FROM inventory_entries
            WHERE user_name = $1 AND ($2::TEXT IS NULL OR pon_id = $2)
            ORDER BY entry_id
            "#,
        )
        .bind(user_name.as_str())
        .bind(pon_id.map(PonId::as_str))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(InventoryRow::into_entry).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct InventoryRow {
    entry_id: i64,
    user_name: String,
    pon_id: String,
    drawn_reference: String,
    created_at: DateTime<Utc>,
}

impl InventoryRow {
    fn into_entry(self) -> InventoryEntry {
        InventoryEntry {
            user_name: UserName::from_db(self.user_name),
            pon_id: PonId::new(self.pon_id),
            reference: DrawnReference::from_db(self.drawn_reference),
            sequence: self.entry_id,
            created_at: self.created_at,
        }
    }
}
