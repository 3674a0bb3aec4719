use crate::commands::{CmdMessage, CmdResult, DisplayCard};
use crate::controller::{CardSelector, GalleryController};
use crate::error::Result;
use crate::favorites::Favorites;
use crate::store::kv::KeyValueStore;
use std::collections::HashSet;

use super::helpers::{cards_by_selectors, display_card};

/// Flips the favorite flag of each selected card and persists it. A card
/// named twice is flipped once.
pub fn toggle<K: KeyValueStore>(
    controller: &GalleryController,
    favorites: &mut Favorites<K>,
    selectors: &[CardSelector],
) -> Result<CmdResult> {
    let mut cards = cards_by_selectors(controller, favorites, selectors)?;
    let mut seen = HashSet::new();
    cards.retain(|dc| seen.insert(dc.card.id.clone()));
    let mut result = CmdResult::default();
    let mut affected = Vec::with_capacity(cards.len());

    for mut dc in cards {
        let now = favorites.toggle(&dc.card.id)?;
        dc.favorite = now;
        result.add_message(if now {
            CmdMessage::success(format!("Added \"{}\" to favorites", dc.card.title))
        } else {
            CmdMessage::success(format!("Removed \"{}\" from favorites", dc.card.title))
        });
        affected.push(dc);
    }

    Ok(result.with_listed_cards(affected))
}

/// Favorite cards in store order. Flags for ids no longer in the store are
/// ignored.
pub fn list<K: KeyValueStore>(
    controller: &GalleryController,
    favorites: &Favorites<K>,
) -> Result<CmdResult> {
    let cards: Vec<DisplayCard> = controller
        .store()
        .cards()
        .iter()
        .filter(|card| favorites.is_favorite(&card.id))
        .filter_map(|card| display_card(controller, favorites, &card.id))
        .collect();

    let mut result = CmdResult::default();
    if cards.is_empty() {
        result.add_message(CmdMessage::info("No favorites yet."));
    }
    Ok(result.with_listed_cards(cards))
}
