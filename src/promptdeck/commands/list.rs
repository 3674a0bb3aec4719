use crate::commands::{window_result, CmdMessage, CmdResult};
use crate::controller::GalleryController;
use crate::error::Result;
use crate::favorites::Favorites;
use crate::predicate::FilterState;
use crate::sort::SortKey;
use crate::store::kv::KeyValueStore;

/// A one-shot view of the gallery: filters, sort and page applied together.
#[derive(Debug, Clone)]
pub struct ListRequest {
    pub filter: FilterState,
    pub sort: SortKey,
    /// 1-based; clamped into range.
    pub page: usize,
}

impl Default for ListRequest {
    fn default() -> Self {
        Self {
            filter: FilterState::default(),
            sort: SortKey::None,
            page: 1,
        }
    }
}

/// A single user interaction with the gallery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryEvent {
    Search(String),
    Category(String),
    Model(String),
    ToggleTag(String),
    Clear,
    Sort(SortKey),
    NextPage,
    PrevPage,
    GotoPage(usize),
}

pub fn run<K: KeyValueStore>(
    controller: &mut GalleryController,
    favorites: &Favorites<K>,
    request: ListRequest,
) -> Result<CmdResult> {
    controller.apply_filters(request.filter);
    controller.set_sort(request.sort);
    let wanted = request.page.max(1);
    controller.goto_page(wanted);

    let mut result = window_result(controller, favorites);
    let total_pages = controller.pagination().total_pages();
    if wanted > total_pages {
        result.add_message(CmdMessage::warning(format!(
            "Page {} is out of range, showing page {} of {}",
            wanted, total_pages, total_pages
        )));
    }
    Ok(result)
}

/// Applies one event and returns the refreshed window.
pub fn apply<K: KeyValueStore>(
    controller: &mut GalleryController,
    favorites: &Favorites<K>,
    event: GalleryEvent,
) -> Result<CmdResult> {
    let mut moved = true;
    match event {
        GalleryEvent::Search(text) => controller.set_search(text),
        GalleryEvent::Category(category) => controller.set_category(category),
        GalleryEvent::Model(model) => controller.set_model(model),
        GalleryEvent::ToggleTag(tag) => {
            controller.toggle_tag(&tag);
        }
        GalleryEvent::Clear => controller.clear_filters(),
        GalleryEvent::Sort(key) => controller.set_sort(key),
        GalleryEvent::NextPage => moved = controller.next_page(),
        GalleryEvent::PrevPage => moved = controller.prev_page(),
        GalleryEvent::GotoPage(page) => controller.goto_page(page),
    }

    let mut result = window_result(controller, favorites);
    if !moved {
        result.add_message(CmdMessage::info("Already at the edge of the gallery."));
    }
    Ok(result)
}
