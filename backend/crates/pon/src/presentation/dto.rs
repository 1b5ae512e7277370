//! API DTOs (Data Transfer Objects)
//!
//! Request fields are optional so that an absent field is a `400` naming the field,
//! checked before the token.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::catalog::CardDefinition;
use crate::domain::entities::InventoryEntry;
use crate::domain::value_objects::PonId;
use crate::error::{PonError, PonResult};

/// Request body shared by every pon endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PonRequest {
    pub token: Option<String>,
    pub pon_id: Option<String>,
    pub card_id: Option<String>,
    pub variety_id: Option<String>,
}

impl PonRequest {
    pub fn token(&self) -> PonResult<&str> {
        required(&self.token, "token")
    }

    pub fn pon_id(&self) -> PonResult<&str> {
        required(&self.pon_id, "pon_id")
    }

    pub fn card_id(&self) -> PonResult<&str> {
        required(&self.card_id, "card_id")
    }
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> PonResult<&'a str> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or(PonError::MissingField(field))
}

#[derive(Debug, Clone, Serialize)]
pub struct PonListResponse {
    pub pons: Vec<PonId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PonDetailsResponse {
    pub meta: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardsResponse {
    pub cards: Vec<CardDefinition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardResponse {
    pub card: CardDefinition,
}

#[derive(Debug, Clone, Serialize)]
pub struct PullResponse {
    /// `card_id` or `card_id/variety_id`
    pub card: String,
    /// Balance after the debit
    pub coins: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryEntryResponse {
    pub pon_id: PonId,
    pub card: String,
    pub sequence: i64,
    pub pulled_at_ms: i64,
}

impl From<InventoryEntry> for InventoryEntryResponse {
    fn from(entry: InventoryEntry) -> Self {
        Self {
            pon_id: entry.pon_id,
            card: entry.reference.as_str().to_string(),
            sequence: entry.sequence,
            pulled_at_ms: entry.created_at.timestamp_millis(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InventoryResponse {
    pub entries: Vec<InventoryEntryResponse>,
}
