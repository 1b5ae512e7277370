//! Catalog Model
//!
//! Pon definitions as read from `meta.json`. Fields the backend does not interpret
//! are kept verbatim in `extra` and returned to clients unchanged.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::value_objects::PonId;
use crate::error::{PonError, PonResult};

/// Cost of a pull when the metadata does not name one
pub const DEFAULT_COST: u32 = 1;

// ============================================================================
// Definitions
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarietyDefinition {
    pub id: String,
    /// Image file, relative to `<pon folder>/<card name or id>/`
    pub file: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardDefinition {
    pub id: String,
    /// Image file, relative to the pon folder. Unused when varieties exist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub varieties: Option<Vec<VarietyDefinition>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CardDefinition {
    pub fn has_varieties(&self) -> bool {
        self.varieties.as_ref().is_some_and(|v| !v.is_empty())
    }

    /// Directory under the pon folder holding this card's variety images.
    /// Named after the display `name` when there is one, else the `id`.
    pub fn variety_folder(&self) -> &str {
        name_of(&self.extra).unwrap_or(&self.id)
    }

    /// Match by `id`, falling back to the display `name`
    pub fn find_variety(&self, variety_id: &str) -> Option<&VarietyDefinition> {
        let varieties = self.varieties.as_deref()?;
        varieties
            .iter()
            .find(|v| v.id == variety_id)
            .or_else(|| varieties.iter().find(|v| name_of(&v.extra) == Some(variety_id)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PonDefinition {
    pub id: PonId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u32>,
    pub cards: Vec<CardDefinition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
    /// Folder the definition was loaded from; image paths resolve against it
    #[serde(skip)]
    pub folder: PathBuf,
}

impl PonDefinition {
    /// Parse a `meta.json` document and check it can be served and pulled
    pub fn from_json(json: &str, folder: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let mut pon: PonDefinition = serde_json::from_str(json)?;
        pon.folder = folder.into();
        pon.validate()?;
        Ok(pon)
    }

    pub fn cost(&self) -> u32 {
        self.cost.unwrap_or(DEFAULT_COST)
    }

    /// Match by `id`, falling back to the display `name`
    pub fn find_card(&self, card_id: &str) -> Option<&CardDefinition> {
        self.cards
            .iter()
            .find(|c| c.id == card_id)
            .or_else(|| self.cards.iter().find(|c| name_of(&c.extra) == Some(card_id)))
    }

    /// Metadata as published, minus the card list
    pub fn metadata_without_cards(&self) -> Value {
        let mut meta = self.extra.clone();
        meta.insert("id".to_string(), Value::String(self.id.to_string()));
        if let Some(cost) = self.cost {
            meta.insert("cost".to_string(), Value::from(cost));
        }
        Value::Object(meta)
    }

    /// Resolve the image file of a card (or one of its varieties)
    pub fn image_path(&self, card_id: &str, variety_id: Option<&str>) -> PonResult<PathBuf> {
        let card = self.find_card(card_id).ok_or(PonError::CardNotFound)?;

        if !card.has_varieties() {
            let file = card.file.as_deref().ok_or(PonError::ImageNotFound)?;
            return Ok(self.folder.join(file));
        }

        let variety_id = variety_id
            .filter(|v| !v.is_empty())
            .ok_or(PonError::VarietyRequired)?;
        let variety = card
            .find_variety(variety_id)
            .ok_or(PonError::VarietyNotFound)?;

        Ok(self.folder.join(card.variety_folder()).join(&variety.file))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.id.as_str().is_empty() {
            return Err(CatalogError::EmptyId);
        }
        if self.cards.is_empty() {
            return Err(CatalogError::NoCards);
        }

        for card in &self.cards {
            if !is_plain_segment(&card.id) {
                return Err(CatalogError::InvalidId(card.id.clone()));
            }
            match &card.varieties {
                Some(varieties) if varieties.is_empty() => {
                    return Err(CatalogError::EmptyVarieties(card.id.clone()));
                }
                Some(varieties) => {
                    if !is_plain_segment(card.variety_folder()) {
                        return Err(CatalogError::InvalidId(card.variety_folder().to_string()));
                    }
                    for variety in varieties {
                        if !is_plain_segment(&variety.id) {
                            return Err(CatalogError::InvalidId(variety.id.clone()));
                        }
                        if !is_relative_file(&variety.file) {
                            return Err(CatalogError::UnsafePath(variety.file.clone()));
                        }
                    }
                }
                None => match card.file.as_deref() {
                    Some(file) if is_relative_file(file) => {}
                    Some(file) => return Err(CatalogError::UnsafePath(file.to_string())),
                    None => return Err(CatalogError::MissingFile(card.id.clone())),
                },
            }
        }

        Ok(())
    }
}

fn name_of(extra: &Map<String, Value>) -> Option<&str> {
    extra.get("name").and_then(Value::as_str)
}

/// Non-empty, no separators, not `.` or `..`
fn is_plain_segment(s: &str) -> bool {
    !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\'])
}

/// Relative path made only of normal components
fn is_relative_file(s: &str) -> bool {
    let path = Path::new(s);
    !s.is_empty()
        && !s.contains('\\')
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Reasons a pon folder is skipped at load time
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("malformed metadata: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("pon id is empty")]
    EmptyId,

    #[error("pon has no cards")]
    NoCards,

    #[error("id or name {0:?} is not a plain path segment")]
    InvalidId(String),

    #[error("card {0:?} has an empty variety list")]
    EmptyVarieties(String),

    #[error("card {0:?} has neither a file nor varieties")]
    MissingFile(String),

    #[error("file reference {0:?} escapes the pon folder")]
    UnsafePath(String),
}

// ============================================================================
// Catalog
// ============================================================================

/// Immutable pon-id to definition mapping
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pons: BTreeMap<PonId, PonDefinition>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a definition. An id already present is kept and the newcomer returned.
    pub fn insert(&mut self, pon: PonDefinition) -> Result<(), PonDefinition> {
        if self.pons.contains_key(&pon.id) {
            return Err(pon);
        }
        self.pons.insert(pon.id.clone(), pon);
        Ok(())
    }

    pub fn lookup(&self, pon_id: &str) -> Option<&PonDefinition> {
        self.pons.get(&PonId::new(pon_id))
    }

    /// Ids in ascending order
    pub fn list_pon_ids(&self) -> Vec<PonId> {
        self.pons.keys().cloned().collect()
    }

    pub fn find_card(&self, pon_id: &str, card_id: &str) -> PonResult<&CardDefinition> {
        self.lookup(pon_id)
            .ok_or(PonError::PonNotFound)?
            .find_card(card_id)
            .ok_or(PonError::CardNotFound)
    }

    pub fn image_path(
        &self,
        pon_id: &str,
        card_id: &str,
        variety_id: Option<&str>,
    ) -> PonResult<PathBuf> {
        self.lookup(pon_id)
            .ok_or(PonError::PonNotFound)?
            .image_path(card_id, variety_id)
    }

    pub fn len(&self) -> usize {
        self.pons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn starter() -> PonDefinition {
        PonDefinition::from_json(
            &json!({
                "id": "starter_pack",
                "name": "Starter Pack",
                "cards": [
                    {"id": "c1", "name": "Slime", "file": "c1.png", "rarity": "common"},
                    {"id": "c2", "name": "Dragon", "varieties": [
                        {"id": "red", "file": "red.png"},
                        {"id": "blue", "name": "Azure", "file": "blue.png"}
                    ]}
                ]
            })
            .to_string(),
            "/srv/pons/starter",
        )
        .unwrap()
    }

    mod parsing {
        use super::*;

        #[test]
        fn test_cost_defaults_to_one() {
            let pon = starter();
            assert_eq!(pon.cost, None);
            assert_eq!(pon.cost(), 1);
        }

        #[test]
        fn test_extra_fields_kept() {
            let pon = starter();
            assert_eq!(pon.extra["name"], "Starter Pack");
            assert_eq!(pon.cards[0].extra["rarity"], "common");
        }

        #[test]
        fn test_metadata_without_cards() {
            let meta = starter().metadata_without_cards();
            assert_eq!(meta, json!({"id": "starter_pack", "name": "Starter Pack"}));
        }

        #[test]
        fn test_card_serializes_verbatim() {
            let card = serde_json::to_value(&starter().cards[0]).unwrap();
            assert_eq!(
                card,
                json!({"id": "c1", "name": "Slime", "file": "c1.png", "rarity": "common"})
            );
        }
    }

    mod validation {
        use super::*;

        fn parse(value: Value) -> Result<PonDefinition, CatalogError> {
            PonDefinition::from_json(&value.to_string(), "/srv/pons/x")
        }

        #[test]
        fn test_missing_id_is_malformed() {
            assert!(matches!(
                parse(json!({"cards": [{"id": "c", "file": "c.png"}]})),
                Err(CatalogError::Malformed(_))
            ));
        }

        #[test]
        fn test_negative_cost_is_malformed() {
            assert!(matches!(
                parse(json!({"id": "p", "cost": -1, "cards": [{"id": "c", "file": "c.png"}]})),
                Err(CatalogError::Malformed(_))
            ));
        }

        #[test]
        fn test_empty_cards() {
            assert!(matches!(
                parse(json!({"id": "p", "cards": []})),
                Err(CatalogError::NoCards)
            ));
        }

        #[test]
        fn test_path_traversal_rejected() {
            assert!(matches!(
                parse(json!({"id": "p", "cards": [{"id": "c", "file": "../secret"}]})),
                Err(CatalogError::UnsafePath(_))
            ));
            assert!(matches!(
                parse(json!({"id": "p", "cards": [{"id": "c", "file": "/etc/passwd"}]})),
                Err(CatalogError::UnsafePath(_))
            ));
            assert!(matches!(
                parse(json!({"id": "p", "cards": [{"id": "..", "varieties": [
                    {"id": "v", "file": "v.png"}
                ]}]})),
                Err(CatalogError::InvalidId(_))
            ));
        }

        #[test]
        fn test_variety_folder_must_be_plain() {
            assert!(matches!(
                parse(json!({"id": "p", "cards": [{"id": "c", "name": "a/b", "varieties": [
                    {"id": "v", "file": "v.png"}
                ]}]})),
                Err(CatalogError::InvalidId(_))
            ));
            // Names of cards without varieties never become paths
            assert!(parse(json!({"id": "p", "cards": [{"id": "c", "name": "a/b", "file": "c.png"}]})).is_ok());
        }

        #[test]
        fn test_nested_relative_file_ok() {
            assert!(parse(json!({"id": "p", "cards": [{"id": "c", "file": "img/c.png"}]})).is_ok());
        }

        #[test]
        fn test_card_without_image() {
            assert!(matches!(
                parse(json!({"id": "p", "cards": [{"id": "c"}]})),
                Err(CatalogError::MissingFile(_))
            ));
        }
    }

    mod lookup {
        use super::*;

        #[test]
        fn test_find_card_by_id_or_name() {
            let pon = starter();
            assert_eq!(pon.find_card("c1").unwrap().id, "c1");
            assert_eq!(pon.find_card("Dragon").unwrap().id, "c2");
            assert!(pon.find_card("c9").is_none());
        }

        #[test]
        fn test_find_variety() {
            let pon = starter();
            let card = pon.find_card("c2").unwrap();
            assert_eq!(card.find_variety("red").unwrap().file, "red.png");
            assert_eq!(card.find_variety("Azure").unwrap().id, "blue");
            assert!(card.find_variety("green").is_none());
            assert!(pon.find_card("c1").unwrap().find_variety("red").is_none());
        }

        #[test]
        fn test_image_paths() {
            let pon = starter();
            assert_eq!(
                pon.image_path("c1", None).unwrap(),
                PathBuf::from("/srv/pons/starter/c1.png")
            );
            assert_eq!(
                pon.image_path("c2", Some("blue")).unwrap(),
                PathBuf::from("/srv/pons/starter/Dragon/blue.png")
            );
            assert_eq!(
                pon.image_path("Dragon", Some("Azure")).unwrap(),
                PathBuf::from("/srv/pons/starter/Dragon/blue.png")
            );
            assert!(matches!(
                pon.image_path("c2", None),
                Err(PonError::VarietyRequired)
            ));
            assert!(matches!(
                pon.image_path("c2", Some("green")),
                Err(PonError::VarietyNotFound)
            ));
            assert!(matches!(
                pon.image_path("c9", None),
                Err(PonError::CardNotFound)
            ));
        }

        #[test]
        fn test_variety_folder_falls_back_to_id() {
            let pon = PonDefinition::from_json(
                &json!({"id": "p", "cards": [{"id": "knight", "varieties": [
                    {"id": "gold", "file": "gold.png"}
                ]}]})
                .to_string(),
                "/srv/pons/p",
            )
            .unwrap();

            assert_eq!(pon.cards[0].variety_folder(), "knight");
            assert_eq!(
                pon.image_path("knight", Some("gold")).unwrap(),
                PathBuf::from("/srv/pons/p/knight/gold.png")
            );
        }

        #[test]
        fn test_catalog_first_wins_and_sorted() {
            let mut catalog = Catalog::empty();
            let mut other = starter();
            other.id = PonId::new("alpha");
            catalog.insert(starter()).unwrap();
            catalog.insert(other).unwrap();

            let mut duplicate = starter();
            duplicate.folder = PathBuf::from("/elsewhere");
            assert!(catalog.insert(duplicate).is_err());

            assert_eq!(
                catalog.list_pon_ids(),
                vec![PonId::new("alpha"), PonId::new("starter_pack")]
            );
            assert_eq!(
                catalog.lookup("starter_pack").unwrap().folder,
                PathBuf::from("/srv/pons/starter")
            );
            assert!(matches!(
                catalog.image_path("nope", "c1", None),
                Err(PonError::PonNotFound)
            ));
        }
    }
}
