//! Domain Services
//!
//! Pure draw logic. The caller supplies the RNG.

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::domain::catalog::PonDefinition;
use crate::domain::value_objects::DrawnReference;

/// Uniformly pick one card, then uniformly one of its varieties if it has any.
///
/// `None` only for a pon without cards, which the loader never admits.
pub fn draw<R: Rng + ?Sized>(pon: &PonDefinition, rng: &mut R) -> Option<DrawnReference> {
    let card = pon.cards.choose(rng)?;

    match card.varieties.as_deref() {
        Some(varieties) if !varieties.is_empty() => {
            let variety = varieties.choose(rng)?;
            Some(DrawnReference::variety(&card.id, &variety.id))
        }
        _ => Some(DrawnReference::card(&card.id)),
    }
}
