use crate::commands::{CmdMessage, CmdResult};
use crate::controller::{CardSelector, GalleryController};
use crate::error::Result;
use crate::favorites::Favorites;
use crate::store::kv::KeyValueStore;

use super::helpers::cards_by_selectors;

/// Hands back the card's prompt text for the clipboard. Writing it is up to
/// the UI; nothing about the card changes.
pub fn run<K: KeyValueStore>(
    controller: &GalleryController,
    favorites: &Favorites<K>,
    selector: &CardSelector,
) -> Result<CmdResult> {
    let cards = cards_by_selectors(controller, favorites, std::slice::from_ref(selector))?;
    let text = cards
        .first()
        .map(|dc| dc.card.content.clone())
        .unwrap_or_default();

    let mut result = CmdResult::default();
    if text.trim().is_empty() {
        if let Some(dc) = cards.first() {
            result.add_message(CmdMessage::warning(format!(
                "\"{}\" has no prompt text",
                dc.card.title
            )));
        }
    }
    Ok(result.with_listed_cards(cards).with_clipboard(text))
}
