//! In-Memory Store
//!
//! Implements the credential store and every pon repository over one mutex, so the
//! check-debit-append of a pull is atomic exactly like the Postgres transaction.
//! Backs tests and database-less local runs; nothing survives a restart.

use std::collections::HashMap;
use std::sync::Arc;

use account::AccountError;
use account::domain::repository::UserRepository;
use account::models::{TokenDigest, User, UserName};
use chrono::Utc;
use tokio::sync::Mutex;

use crate::domain::entities::{InventoryEntry, PullSettlement, SettleOutcome};
use crate::domain::repository::{BalanceRepository, InventoryRepository, PullRepository};
use crate::domain::value_objects::PonId;
use crate::error::PonResult;

#[derive(Default)]
struct MemoryState {
    users: HashMap<String, User>,
    /// Token digest -> user name, the in-memory counterpart of the unique index
    tokens: HashMap<TokenDigest, String>,
    entries: Vec<InventoryEntry>,
    next_sequence: i64,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a user's balance. Returns `false` for an unknown user.
    pub async fn set_coins(&self, user_name: &UserName, coins: i64) -> bool {
        let mut state = self.state.lock().await;
        match state.users.get_mut(user_name.as_str()) {
            Some(user) => {
                user.coins = coins;
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Credential store
// ============================================================================

impl UserRepository for MemoryStore {
    async fn create(&self, user: &User) -> Result<(), AccountError> {
        let mut state = self.state.lock().await;
        if state.users.contains_key(user.user_name.as_str()) {
            return Err(AccountError::UsernameTaken);
        }
        let name = user.user_name.as_str().to_string();
        state.tokens.insert(user.token_digest, name.clone());
        state.users.insert(name, user.clone());
        Ok(())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> Result<bool, AccountError> {
        Ok(self.state.lock().await.users.contains_key(user_name.as_str()))
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> Result<Option<User>, AccountError> {
        Ok(self.state.lock().await.users.get(user_name.as_str()).cloned())
    }

    async fn find_by_token_digest(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<User>, AccountError> {
        let state = self.state.lock().await;
        Ok(state
            .tokens
            .get(digest)
            .and_then(|name| state.users.get(name))
            .cloned())
    }

    async fn update_token_digest(
        &self,
        user_name: &UserName,
        digest: &TokenDigest,
    ) -> Result<(), AccountError> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let user = state
            .users
            .get_mut(user_name.as_str())
            .ok_or(AccountError::UserNotFound)?;
        state.tokens.remove(&user.token_digest);
        user.rotate_token(*digest);
        state
            .tokens
            .insert(*digest, user_name.as_str().to_string());
        Ok(())
    }
}

// ============================================================================
// Pon repositories
// ============================================================================

impl BalanceRepository for MemoryStore {
    async fn coins(&self, user_name: &UserName) -> PonResult<Option<i64>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .get(user_name.as_str())
            .map(|u| u.coins))
    }
}

impl PullRepository for MemoryStore {
    async fn settle_pull(&self, settlement: &PullSettlement) -> PonResult<SettleOutcome> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let Some(user) = state.users.get_mut(settlement.user_name.as_str()) else {
            return Ok(SettleOutcome::UserNotFound);
        };
        if user.coins < settlement.cost {
            return Ok(SettleOutcome::InsufficientCoins);
        }
        user.coins -= settlement.cost;
        let remaining_coins = user.coins;

        state.next_sequence += 1;
        let entry = InventoryEntry {
            user_name: settlement.user_name.clone(),
            pon_id: settlement.pon_id.clone(),
            reference: settlement.reference.clone(),
            sequence: state.next_sequence,
            created_at: Utc::now(),
        };
        state.entries.push(entry.clone());

        Ok(SettleOutcome::Settled {
            remaining_coins,
            entry,
        })
    }
}

impl InventoryRepository for MemoryStore {
    async fn history(
        &self,
        user_name: &UserName,
        pon_id: Option<&PonId>,
    ) -> PonResult<Vec<InventoryEntry>> {
        let state = self.state.lock().await;
        Ok(state
            .entries
            .iter()
            .filter(|e| &e.user_name == user_name)
            .filter(|e| pon_id.is_none_or(|p| &e.pon_id == p))
            .cloned()
            .collect())
    }
}
