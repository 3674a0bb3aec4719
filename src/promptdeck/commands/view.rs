use crate::commands::CmdResult;
use crate::controller::{CardSelector, GalleryController};
use crate::error::Result;
use crate::favorites::Favorites;
use crate::store::kv::KeyValueStore;

use super::helpers::cards_by_selectors;

/// The expanded view of one or more cards, content included.
pub fn run<K: KeyValueStore>(
    controller: &GalleryController,
    favorites: &Favorites<K>,
    selectors: &[CardSelector],
) -> Result<CmdResult> {
    let cards = cards_by_selectors(controller, favorites, selectors)?;
    Ok(CmdResult::default().with_listed_cards(cards))
}
