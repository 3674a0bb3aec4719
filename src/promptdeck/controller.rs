//! # Render/Filter Controller
//!
//! The controller owns the session state of the gallery: the read-only
//! [`CardStore`], the [`FilterState`], the active [`SortKey`] and the
//! [`Pagination`] state. Every input event is a plain method call; the
//! controller recomputes the visible set synchronously before returning.
//!
//! ## Event Handling
//!
//! On every qualifying event:
//!
//! 1. the filter state is updated,
//! 2. matching cards are recomputed by the predicate engine,
//! 3. for filter, search and sort events the current page resets to 1,
//! 4. the active sort key is applied (stable, so ties keep store order),
//! 5. the pager total is recomputed and the page clamped into range.
//!
//! Page navigation (`next_page`, `prev_page`, `goto_page`) only moves the
//! window; it never recomputes the visible set.
//!
//! Search input can also be fed keystroke by keystroke through
//! [`GalleryController::queue_search`]; the text is applied once the
//! configured quiet period has passed without further input.

use crate::debounce::Debouncer;
use crate::error::{DeckError, Result};
use crate::model::Card;
use crate::pagination::{page, PageWindow, Pagination};
use crate::predicate::{FilterState, MatchOptions, Matcher};
use crate::sort::{compare, SortKey};
use crate::store::CardStore;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;
use std::time::{Duration, Instant};

pub const DEFAULT_PAGE_SIZE: usize = 9;
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Include card content in text search.
    pub search_content: bool,
    pub debounce: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            search_content: true,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// A user input to pick a card: its 1-based position in the visible set, or
/// its identifier.
///
/// Plain numbers parse as positions. Card ids can be numeric too, so a
/// position with no card behind it is retried as an id by
/// [`GalleryController::find`]. Numbers that do not round-trip (`0`, `007`)
/// can only be ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSelector {
    Position(usize),
    Id(String),
}

impl FromStr for CardSelector {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DeckError::InvalidInput("Empty card selector".to_string()));
        }
        match s.parse::<usize>() {
            Ok(n) if n > 0 && n.to_string() == s => Ok(CardSelector::Position(n)),
            _ => Ok(CardSelector::Id(s.to_string())),
        }
    }
}

impl fmt::Display for CardSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardSelector::Position(n) => write!(f, "{}", n),
            CardSelector::Id(id) => write!(f, "\"{}\"", id),
        }
    }
}

pub struct GalleryController {
    store: CardStore,
    filter: FilterState,
    sort_key: SortKey,
    pagination: Pagination,
    options: ControllerOptions,
    /// Indexes into `store.cards()`, in display order.
    visible: Vec<usize>,
    pending_search: Debouncer<String>,
}

impl GalleryController {
    pub fn new(store: CardStore, page_size: NonZeroUsize, options: ControllerOptions) -> Self {
        let mut controller = Self {
            store,
            filter: FilterState::default(),
            sort_key: SortKey::None,
            pagination: Pagination::new(page_size),
            options,
            visible: Vec::new(),
            pending_search: Debouncer::new(options.debounce),
        };
        controller.recompute();
        controller
    }

    // --- filter events (reset to page 1) ---

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.search = text.into();
        self.recompute();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.filter.category = category.into();
        self.recompute();
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.filter.model = model.into();
        self.recompute();
    }

    /// Adds `tag` to the active tag set, or removes it if already there.
    /// Returns whether the tag is now active.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        let active = if self.filter.tags.remove(tag) {
            false
        } else {
            self.filter.tags.insert(tag.to_string());
            true
        };
        self.recompute();
        active
    }

    pub fn set_tags<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.filter.tags = tags.into_iter().map(Into::into).collect();
        self.recompute();
    }

    pub fn clear_filters(&mut self) {
        self.filter = FilterState::default();
        self.pending_search.flush();
        self.recompute();
    }

    /// Replaces the whole filter state at once.
    pub fn apply_filters(&mut self, filter: FilterState) {
        self.filter = filter;
        self.recompute();
    }

    pub fn set_sort(&mut self, key: SortKey) {
        self.sort_key = key;
        self.recompute();
    }

    // --- debounced search ---

    /// Records search input without recomputing yet.
    pub fn queue_search(&mut self, text: impl Into<String>, now: Instant) {
        self.pending_search.submit(text.into(), now);
    }

    /// Applies queued search text once the quiet period has elapsed.
    /// Returns whether a recompute happened.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        match self.pending_search.take_ready(now) {
            Some(text) => {
                self.set_search(text);
                true
            }
            None => false,
        }
    }

    /// Applies queued search text immediately, if any.
    pub fn flush_search(&mut self) -> bool {
        match self.pending_search.flush() {
            Some(text) => {
                self.set_search(text);
                true
            }
            None => false,
        }
    }

    // --- navigation (keeps the visible set) ---

    pub fn next_page(&mut self) -> bool {
        self.pagination.next()
    }

    pub fn prev_page(&mut self) -> bool {
        self.pagination.prev()
    }

    pub fn goto_page(&mut self, page: usize) {
        self.pagination.goto(page);
    }

    // --- read side ---

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// The full visible set, in display order.
    pub fn visible(&self) -> Vec<&Card> {
        let cards = self.store.cards();
        self.visible.iter().map(|&i| &cards[i]).collect()
    }

    /// The current page of the visible set.
    pub fn window(&self) -> PageWindow<&Card> {
        page(
            &self.visible(),
            self.pagination.current_page(),
            self.pagination.page_size(),
        )
    }

    /// 1-based position of a card in the visible set.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        let cards = self.store.cards();
        self.visible
            .iter()
            .position(|&i| cards[i].id == id)
            .map(|p| p + 1)
    }

    /// Positions count within the visible set; ids search the whole store.
    /// A position past the visible set falls back to a card with that
    /// number as its id.
    pub fn find(&self, selector: &CardSelector) -> Result<&Card> {
        match selector {
            CardSelector::Position(n) => n
                .checked_sub(1)
                .and_then(|i| self.visible.get(i))
                .map(|&i| &self.store.cards()[i])
                .or_else(|| self.store.get(&n.to_string()))
                .ok_or_else(|| {
                    DeckError::CardNotFound(format!("no card at position {}", n))
                }),
            CardSelector::Id(id) => self
                .store
                .get(id)
                .ok_or_else(|| DeckError::CardNotFound(id.clone())),
        }
    }

    /// Rebuilds the visible set and resets the pager to page 1.
    fn recompute(&mut self) {
        let options = MatchOptions {
            search_content: self.options.search_content,
        };
        let matcher = Matcher::new(&self.filter, options);
        let cards = self.store.cards();

        let mut visible: Vec<usize> = cards
            .iter()
            .enumerate()
            .filter(|(_, card)| matcher.matches(card))
            .map(|(i, _)| i)
            .collect();
        if self.sort_key != SortKey::None {
            let key = self.sort_key;
            visible.sort_by(|&a, &b| compare(&cards[a], &cards[b], key));
        }
        self.visible = visible;

        self.pagination.reset();
        self.pagination.set_total(self.visible.len());

        tracing::debug!(
            search = %self.filter.search,
            category = %self.filter.category,
            model = %self.filter.model,
            tags = self.filter.tags.len(),
            sort = %self.sort_key,
            visible = self.visible.len(),
            total = cards.len(),
            pages = self.pagination.total_pages(),
            "visible set recomputed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    fn size(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn controller(store: CardStore, page_size: usize) -> GalleryController {
        GalleryController::new(store, size(page_size), ControllerOptions::default())
    }

    fn titles(cards: &[&Card]) -> Vec<String> {
        cards.iter().map(|c| c.title.clone()).collect()
    }

    #[test]
    fn unconstrained_filter_shows_whole_store() {
        let ctl = controller(StoreFixture::new().with_cards(5).store(), 9);
        assert_eq!(ctl.visible_count(), 5);
        assert_eq!(ctl.visible().len(), ctl.store().len());
    }

    #[test]
    fn category_scenario() {
        let mut ctl = controller(StoreFixture::alpha_beta().store(), 9);
        ctl.set_search("");
        ctl.set_category("Code");
        assert_eq!(titles(&ctl.visible()), vec!["Beta"]);
    }

    #[test]
    fn page_size_one_windows() {
        let mut ctl = controller(StoreFixture::new().with_cards(3).store(), 1);
        assert_eq!(ctl.pagination().total_pages(), 3);
        assert!(ctl.next_page());
        let window = ctl.window();
        assert_eq!(titles(&window.items), vec!["Card 2"]);
    }

    #[test]
    fn sort_by_name() {
        let store = StoreFixture::new()
            .with_card(Card::new("b", "Beta"))
            .with_card(Card::new("a", "Alpha"))
            .store();
        let mut ctl = controller(store, 9);
        assert_eq!(titles(&ctl.visible()), vec!["Beta", "Alpha"]);
        ctl.set_sort(SortKey::Name);
        assert_eq!(titles(&ctl.visible()), vec!["Alpha", "Beta"]);
        ctl.set_sort(SortKey::None);
        assert_eq!(titles(&ctl.visible()), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn every_filter_change_resets_to_first_page() {
        let mut ctl = controller(StoreFixture::new().with_cards(20).store(), 2);

        let events: Vec<Box<dyn Fn(&mut GalleryController)>> = vec![
            Box::new(|c| c.set_search("card")),
            Box::new(|c| c.set_category("all")),
            Box::new(|c| c.set_model("all")),
            Box::new(|c| {
                c.toggle_tag("x");
                c.toggle_tag("x");
            }),
            Box::new(|c| c.set_tags(Vec::<String>::new())),
            Box::new(|c| c.clear_filters()),
            Box::new(|c| c.apply_filters(FilterState::default())),
            Box::new(|c| c.set_sort(SortKey::Name)),
        ];

        for event in events {
            ctl.goto_page(4);
            assert_eq!(ctl.pagination().current_page(), 4);
            event(&mut ctl);
            assert_eq!(ctl.pagination().current_page(), 1);
        }
    }

    #[test]
    fn navigation_is_noop_at_bounds() {
        let mut ctl = controller(StoreFixture::new().with_cards(3).store(), 2);
        assert!(!ctl.prev_page());
        assert!(ctl.next_page());
        assert!(!ctl.next_page());
        assert_eq!(ctl.pagination().current_page(), 2);
        assert_eq!(titles(&ctl.window().items), vec!["Card 3"]);
    }

    #[test]
    fn empty_result_is_page_one_of_one() {
        let mut ctl = controller(StoreFixture::new().with_cards(3).store(), 2);
        ctl.set_search("nothing matches this");
        let window = ctl.window();
        assert!(window.items.is_empty());
        assert_eq!(window.page, 1);
        assert_eq!(window.total_pages, 1);
    }

    #[test]
    fn toggle_tag_reports_state() {
        let store = StoreFixture::alpha_beta().store();
        let mut ctl = controller(store, 9);
        assert!(ctl.toggle_tag("rust"));
        assert_eq!(titles(&ctl.visible()), vec!["Beta"]);
        assert!(ctl.toggle_tag("seo"));
        assert_eq!(ctl.visible_count(), 2);
        assert!(!ctl.toggle_tag("rust"));
        assert_eq!(titles(&ctl.visible()), vec!["Alpha"]);
    }

    #[test]
    fn debounced_search_applies_after_quiet_period() {
        let mut ctl = controller(StoreFixture::alpha_beta().store(), 9);
        let t0 = Instant::now();
        ctl.queue_search("al", t0);
        ctl.queue_search("alp", t0 + Duration::from_millis(100));
        assert!(!ctl.poll_search(t0 + Duration::from_millis(200)));
        assert_eq!(ctl.visible_count(), 2);

        assert!(ctl.poll_search(t0 + Duration::from_millis(400)));
        assert_eq!(ctl.filter().search, "alp");
        assert_eq!(titles(&ctl.visible()), vec!["Alpha"]);
    }

    #[test]
    fn flush_search_applies_immediately() {
        let mut ctl = controller(StoreFixture::alpha_beta().store(), 9);
        ctl.queue_search("beta", Instant::now());
        assert!(ctl.flush_search());
        assert_eq!(titles(&ctl.visible()), vec!["Beta"]);
        assert!(!ctl.flush_search());
    }

    #[test]
    fn find_by_position_and_id() {
        let mut ctl = controller(StoreFixture::alpha_beta().store(), 9);
        ctl.set_category("Code");

        let by_pos = ctl.find(&CardSelector::Position(1)).unwrap();
        assert_eq!(by_pos.title, "Beta");
        assert!(ctl.find(&CardSelector::Position(2)).is_err());

        // ids resolve even when filtered out
        let by_id = ctl.find(&CardSelector::Id("a".into())).unwrap();
        assert_eq!(by_id.title, "Alpha");
        assert!(matches!(
            ctl.find(&CardSelector::Id("zzz".into())),
            Err(DeckError::CardNotFound(_))
        ));
    }

    #[test]
    fn numeric_ids_resolve_when_no_such_position() {
        let doc: crate::model::CardDocument = serde_json::from_str(
            r#"{"prompts": [{"id": 42, "title": "Answer"}, {"id": 1, "title": "One"}, {"id": "x", "title": "Ex"}]}"#,
        )
        .unwrap();
        let ctl = controller(CardStore::from_document(doc), 9);

        let selector: CardSelector = "42".parse().unwrap();
        assert_eq!(ctl.find(&selector).unwrap().title, "Answer");
        // a real position wins over an id
        assert_eq!(ctl.find(&CardSelector::Position(1)).unwrap().title, "Answer");
        assert!(matches!(
            ctl.find(&CardSelector::Position(7)),
            Err(DeckError::CardNotFound(_))
        ));
    }

    #[test]
    fn position_of_tracks_display_order() {
        let mut ctl = controller(StoreFixture::alpha_beta().store(), 9);
        assert_eq!(ctl.position_of("b"), Some(2));
        ctl.set_sort(SortKey::Date);
        assert_eq!(ctl.position_of("b"), Some(1));
        ctl.set_category("Writing");
        assert_eq!(ctl.position_of("b"), None);
    }

    #[test]
    fn parses_selectors() {
        assert_eq!(
            "3".parse::<CardSelector>().unwrap(),
            CardSelector::Position(3)
        );
        assert_eq!(
            "writing/alpha".parse::<CardSelector>().unwrap(),
            CardSelector::Id("writing/alpha".into())
        );
        assert_eq!(
            "0".parse::<CardSelector>().unwrap(),
            CardSelector::Id("0".into())
        );
        assert_eq!(
            "007".parse::<CardSelector>().unwrap(),
            CardSelector::Id("007".into())
        );
        assert!("  ".parse::<CardSelector>().is_err());
    }
}
