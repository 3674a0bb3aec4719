//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every gallery operation, whatever the UI.
//!
//! The facade:
//! - **Owns** the session state (controller, favorites, config)
//! - **Normalizes inputs** (selector strings into [`CardSelector`]s)
//! - **Dispatches** to the matching `commands::*` function
//! - **Returns** structured [`CmdResult`](commands::CmdResult)s, never text
//!
//! It does no I/O of its own: no stdout, no clipboard, no terminal. The CLI
//! does the printing and the clipboard write.
//!
//! ## Generic Over KeyValueStore
//!
//! `DeckApi<K: KeyValueStore>` is generic over where favorites persist:
//! - Production: `DeckApi<FileKvStore>`
//! - Testing: `DeckApi<MemoryKvStore>`

use crate::commands;
use crate::commands::list::{GalleryEvent, ListRequest};
use crate::config::DeckConfig;
use crate::controller::{CardSelector, ControllerOptions, GalleryController};
use crate::error::{DeckError, Result};
use crate::favorites::Favorites;
use crate::sort::SortKey;
use crate::store::kv::KeyValueStore;
use crate::store::CardStore;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, DisplayCard, MessageLevel, PageInfo};

pub struct DeckApi<K: KeyValueStore> {
    controller: GalleryController,
    favorites: Favorites<K>,
    config: DeckConfig,
    config_dir: PathBuf,
}

impl<K: KeyValueStore> DeckApi<K> {
    pub fn new(
        store: CardStore,
        favorites: Favorites<K>,
        config: DeckConfig,
        config_dir: PathBuf,
    ) -> Result<Self> {
        let page_size = NonZeroUsize::new(config.page_size)
            .ok_or_else(|| DeckError::InvalidInput("page size must be at least 1".to_string()))?;
        let options = ControllerOptions {
            search_content: config.search_content,
            debounce: Duration::from_millis(config.debounce_ms),
        };
        Ok(Self {
            controller: GalleryController::new(store, page_size, options),
            favorites,
            config,
            config_dir,
        })
    }

    pub fn list(&mut self, request: ListRequest) -> Result<CmdResult> {
        commands::list::run(&mut self.controller, &self.favorites, request)
    }

    /// The current window, unchanged.
    pub fn window(&self) -> CmdResult {
        commands::window_result(&self.controller, &self.favorites)
    }

    pub fn apply(&mut self, event: GalleryEvent) -> Result<CmdResult> {
        commands::list::apply(&mut self.controller, &self.favorites, event)
    }

    pub fn search(&mut self, text: &str) -> Result<CmdResult> {
        self.apply(GalleryEvent::Search(text.to_string()))
    }

    pub fn category(&mut self, category: &str) -> Result<CmdResult> {
        self.apply(GalleryEvent::Category(category.to_string()))
    }

    pub fn model(&mut self, model: &str) -> Result<CmdResult> {
        self.apply(GalleryEvent::Model(model.to_string()))
    }

    pub fn tag(&mut self, tag: &str) -> Result<CmdResult> {
        self.apply(GalleryEvent::ToggleTag(tag.to_string()))
    }

    pub fn clear(&mut self) -> Result<CmdResult> {
        self.apply(GalleryEvent::Clear)
    }

    pub fn sort(&mut self, key: SortKey) -> Result<CmdResult> {
        self.apply(GalleryEvent::Sort(key))
    }

    pub fn next_page(&mut self) -> Result<CmdResult> {
        self.apply(GalleryEvent::NextPage)
    }

    pub fn prev_page(&mut self) -> Result<CmdResult> {
        self.apply(GalleryEvent::PrevPage)
    }

    pub fn goto_page(&mut self, page: usize) -> Result<CmdResult> {
        self.apply(GalleryEvent::GotoPage(page))
    }

    pub fn view<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::view::run(&self.controller, &self.favorites, &selectors)
    }

    pub fn copy_text(&self, selector: &str) -> Result<CmdResult> {
        let selector: CardSelector = selector.parse()?;
        commands::copy::run(&self.controller, &self.favorites, &selector)
    }

    pub fn toggle_favorite<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = parse_selectors(selectors)?;
        commands::favorite::toggle(&self.controller, &mut self.favorites, &selectors)
    }

    pub fn favorites(&self) -> Result<CmdResult> {
        commands::favorite::list(&self.controller, &self.favorites)
    }

    pub fn facets(&self) -> Result<CmdResult> {
        commands::facets::run(self.controller.store())
    }

    pub fn validate(&self) -> Result<CmdResult> {
        commands::validate::run(self.controller.store())
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(updated) = &result.config {
            self.config = updated.clone();
        }
        Ok(result)
    }

    pub fn settings(&self) -> &DeckConfig {
        &self.config
    }

    pub fn controller(&self) -> &GalleryController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut GalleryController {
        &mut self.controller
    }
}

fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<CardSelector>> {
    if inputs.is_empty() {
        return Err(DeckError::InvalidInput(
            "Expected at least one card position or id".to_string(),
        ));
    }
    inputs.iter().map(|s| s.as_ref().parse()).collect()
}
