use crate::config::DeckConfig;
use crate::controller::GalleryController;
use crate::favorites::Favorites;
use crate::model::Card;
use crate::pagination::PageWindow;
use crate::predicate::FilterState;
use crate::sort::SortKey;
use crate::store::kv::KeyValueStore;

pub mod config;
pub mod copy;
pub mod facets;
pub mod favorite;
pub mod helpers;
pub mod list;
pub mod validate;
pub mod view;

pub use facets::{FacetCount, Facets};
pub use validate::{CardValidation, ValidationReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A card as shown to the user.
#[derive(Debug, Clone)]
pub struct DisplayCard {
    /// 1-based position in the visible set. `None` when the card is
    /// currently filtered out (e.g. addressed by id).
    pub position: Option<usize>,
    pub card: Card,
    pub favorite: bool,
}

/// Where the listed cards sit in the gallery.
#[derive(Debug, Clone)]
pub struct PageInfo {
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
    /// Cards passing the filter.
    pub visible: usize,
    /// Cards in the store.
    pub total: usize,
    pub sort: SortKey,
    pub filter: FilterState,
}

impl PageInfo {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listed_cards: Vec<DisplayCard>,
    pub page: Option<PageInfo>,
    /// Text the UI should place on the clipboard.
    pub clipboard: Option<String>,
    pub facets: Option<Facets>,
    pub validation: Option<ValidationReport>,
    pub config: Option<DeckConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_cards(mut self, cards: Vec<DisplayCard>) -> Self {
        self.listed_cards = cards;
        self
    }

    pub fn with_page(mut self, page: PageInfo) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_clipboard(mut self, text: String) -> Self {
        self.clipboard = Some(text);
        self
    }

    pub fn with_facets(mut self, facets: Facets) -> Self {
        self.facets = Some(facets);
        self
    }

    pub fn with_validation(mut self, report: ValidationReport) -> Self {
        self.validation = Some(report);
        self
    }

    pub fn with_config(mut self, config: DeckConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Current window of the gallery as a command result.
pub fn window_result<K: KeyValueStore>(
    controller: &GalleryController,
    favorites: &Favorites<K>,
) -> CmdResult {
    let window: PageWindow<&Card> = controller.window();
    let cards = window
        .items
        .iter()
        .enumerate()
        .map(|(i, card)| DisplayCard {
            position: Some(window.offset + i + 1),
            card: (*card).clone(),
            favorite: favorites.is_favorite(&card.id),
        })
        .collect();

    let pagination = controller.pagination();
    let page = PageInfo {
        page: window.page,
        total_pages: window.total_pages,
        page_size: pagination.page_size().get(),
        visible: window.total_items,
        total: controller.store().len(),
        sort: controller.sort_key(),
        filter: controller.filter().clone(),
    };

    let mut result = CmdResult::default()
        .with_listed_cards(cards)
        .with_page(page);
    if controller.store().is_empty() {
        result.add_message(CmdMessage::info("No prompts loaded."));
    } else if window.total_items == 0 {
        result.add_message(CmdMessage::info("No prompts match the current filters."));
    }
    result
}
