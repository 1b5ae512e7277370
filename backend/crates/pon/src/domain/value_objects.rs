//! Domain Value Objects

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Pon identifier, the `id` field of a pon's metadata
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct PonId(String);

impl PonId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Result of a draw: `card_id` or `card_id/variety_id`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Display)]
#[serde(transparent)]
pub struct DrawnReference(String);

impl DrawnReference {
    pub fn card(card_id: &str) -> Self {
        Self(card_id.to_string())
    }

    pub fn variety(card_id: &str, variety_id: &str) -> Self {
        Self(format!("{card_id}/{variety_id}"))
    }

    /// Rebuild from a stored ledger value
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn card_id(&self) -> &str {
        self.0.split_once('/').map_or(self.0.as_str(), |(card, _)| card)
    }

    pub fn variety_id(&self) -> Option<&str> {
        self.0.split_once('/').map(|(_, variety)| variety)
    }
}
