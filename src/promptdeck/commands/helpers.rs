use crate::commands::DisplayCard;
use crate::controller::{CardSelector, GalleryController};
use crate::error::Result;
use crate::favorites::Favorites;
use crate::store::kv::KeyValueStore;

/// Resolves selectors against the controller, failing on the first miss.
pub fn cards_by_selectors<K: KeyValueStore>(
    controller: &GalleryController,
    favorites: &Favorites<K>,
    selectors: &[CardSelector],
) -> Result<Vec<DisplayCard>> {
    selectors
        .iter()
        .map(|selector| {
            let card = controller.find(selector)?;
            Ok(display_card(controller, favorites, card.id.as_str()).unwrap_or_else(|| {
                DisplayCard {
                    position: None,
                    card: card.clone(),
                    favorite: favorites.is_favorite(&card.id),
                }
            }))
        })
        .collect()
}

/// A store card by id, with its current position and favorite flag.
pub fn display_card<K: KeyValueStore>(
    controller: &GalleryController,
    favorites: &Favorites<K>,
    id: &str,
) -> Option<DisplayCard> {
    let card = controller.store().get(id)?;
    Some(DisplayCard {
        position: controller.position_of(id),
        card: card.clone(),
        favorite: favorites.is_favorite(id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerOptions;
    use crate::error::DeckError;
    use crate::store::kv::MemoryKvStore;
    use crate::store::memory::fixtures::StoreFixture;
    use std::num::NonZeroUsize;

    fn setup() -> (GalleryController, Favorites<MemoryKvStore>) {
        let controller = GalleryController::new(
            StoreFixture::alpha_beta().store(),
            NonZeroUsize::new(9).unwrap(),
            ControllerOptions::default(),
        );
        (controller, Favorites::load(MemoryKvStore::new()))
    }

    #[test]
    fn resolves_positions_and_ids() {
        let (mut controller, favorites) = setup();
        controller.set_category("Code");
        let cards = cards_by_selectors(
            &controller,
            &favorites,
            &[CardSelector::Position(1), CardSelector::Id("a".into())],
        )
        .unwrap();
        assert_eq!(cards[0].card.title, "Beta");
        assert_eq!(cards[0].position, Some(1));
        assert_eq!(cards[1].card.title, "Alpha");
        assert_eq!(cards[1].position, None);
    }

    #[test]
    fn missing_selector_is_an_error() {
        let (controller, favorites) = setup();
        let err = cards_by_selectors(&controller, &favorites, &[CardSelector::Position(7)])
            .unwrap_err();
        assert!(matches!(err, DeckError::CardNotFound(_)));
    }
}
