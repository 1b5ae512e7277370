//! Browse Use Case
//!
//! Read-only catalog views over one snapshot.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::domain::catalog::{Catalog, CardDefinition};
use crate::domain::value_objects::PonId;
use crate::error::{PonError, PonResult};

pub struct BrowseUseCase {
    catalog: Arc<Catalog>,
}

impl BrowseUseCase {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn list(&self) -> Vec<PonId> {
        self.catalog.list_pon_ids()
    }

    pub fn details(&self, pon_id: &str) -> PonResult<Value> {
        self.catalog
            .lookup(pon_id)
            .map(|pon| pon.metadata_without_cards())
            .ok_or(PonError::PonNotFound)
    }

    pub fn cards(&self, pon_id: &str) -> PonResult<Vec<CardDefinition>> {
        self.catalog
            .lookup(pon_id)
            .map(|pon| pon.cards.clone())
            .ok_or(PonError::PonNotFound)
    }

    pub fn card(&self, pon_id: &str, card_id: &str) -> PonResult<CardDefinition> {
        self.catalog.find_card(pon_id, card_id).cloned()
    }

    /// Image file behind a card (or one of its varieties)
    pub fn image_path(
        &self,
        pon_id: &str,
        card_id: &str,
        variety_id: Option<&str>,
    ) -> PonResult<PathBuf> {
        self.catalog.image_path(pon_id, card_id, variety_id)
    }
}
