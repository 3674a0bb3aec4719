//! # Rendering
//!
//! Turns command results into terminal text through the templates in
//! `templates/`.
//!
//! Layout (widths, truncation, padding, relative dates) is computed here
//! because it needs Unicode-aware measuring. Templates receive ready strings
//! plus semantic flags (`favorite`, `empty`) and only decide styling and line
//! arrangement.

use super::output::Renderer;
use super::styles::names;
use super::templates::{BROWSE_HELP, CARD_LIST, CONFIG, FACETS, FULL_CARD, MESSAGES, VALIDATION};
use chrono::Utc;
use promptdeck::api::{CmdMessage, CmdResult, DisplayCard, MessageLevel, PageInfo};
use promptdeck::commands::{FacetCount, Facets, ValidationReport};
use promptdeck::config::DeckConfig;
use promptdeck::error::Result;
use promptdeck::model::Card;
use promptdeck::predicate::{is_all, FilterState};
use promptdeck::sort::SortKey;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const FAVORITE_MARKER: &str = "★";
const INDEX_WIDTH: usize = 6;
const CATEGORY_WIDTH: usize = 18;
const MODEL_WIDTH: usize = 12;
const META_WIDTH: usize = CATEGORY_WIDTH + MODEL_WIDTH + 1;

#[derive(Serialize)]
struct CardLine {
    index: String,
    title: String,
    padding: String,
    favorite: bool,
    category: String,
    model: String,
    description: String,
    indent: String,
}

#[derive(Serialize)]
struct ListData {
    cards: Vec<CardLine>,
    empty: bool,
    empty_message: String,
    footer: String,
    favorite_marker: &'static str,
}

#[derive(Serialize)]
struct FullCard {
    index: String,
    title: String,
    favorite: bool,
    category: String,
    model: String,
    version: String,
    date: String,
    tags: Vec<String>,
    description: String,
    content: String,
}

#[derive(Serialize)]
struct FullCardData {
    cards: Vec<FullCard>,
    favorite_marker: &'static str,
    separator: String,
    rule: String,
}

#[derive(Serialize)]
struct FacetEntry {
    value: String,
    padding: String,
    count: usize,
}

#[derive(Serialize)]
struct FacetSection {
    name: &'static str,
    entries: Vec<FacetEntry>,
}

#[derive(Serialize)]
struct FacetsData {
    sections: Vec<FacetSection>,
}

#[derive(Serialize)]
struct ValidationLine {
    label: String,
    errors: Vec<String>,
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct ValidationData {
    checked: usize,
    valid: usize,
    invalid: usize,
    warnings: usize,
    cards: Vec<ValidationLine>,
}

#[derive(Serialize)]
struct ConfigEntry {
    key: &'static str,
    value: String,
}

#[derive(Serialize)]
struct ConfigData {
    entries: Vec<ConfigEntry>,
}

#[derive(Serialize)]
struct MessageData {
    content: String,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData {
    messages: Vec<MessageData>,
}

#[derive(Serialize)]
struct HelpLine {
    usage: &'static str,
    padding: String,
    about: &'static str,
}

#[derive(Serialize)]
struct HelpData {
    commands: Vec<HelpLine>,
}

/// One page of cards, with a footer describing where it sits.
pub fn render_card_list(
    renderer: &Renderer,
    cards: &[DisplayCard],
    page: Option<&PageInfo>,
    empty_message: &str,
) -> Result<String> {
    let title_width = LINE_WIDTH.saturating_sub(INDEX_WIDTH + 2 + META_WIDTH);
    let description_width = LINE_WIDTH.saturating_sub(INDEX_WIDTH);

    let lines = cards
        .iter()
        .map(|dc| {
            let title = truncate_to_width(&display_title(&dc.card), title_width);
            let padding = " ".repeat(title_width.saturating_sub(title.width()));
            CardLine {
                index: format_index(dc.position),
                title,
                padding,
                favorite: dc.favorite,
                category: truncate_to_width(&dc.card.category, CATEGORY_WIDTH),
                model: truncate_to_width(dc.card.model_str(), MODEL_WIDTH),
                description: truncate_to_width(&single_line(&dc.card.description), description_width),
                indent: " ".repeat(INDEX_WIDTH),
            }
        })
        .collect::<Vec<_>>();

    let data = ListData {
        empty: lines.is_empty(),
        cards: lines,
        empty_message: empty_message.to_string(),
        footer: page.map(footer).unwrap_or_default(),
        favorite_marker: FAVORITE_MARKER,
    };
    renderer.render(CARD_LIST, &data)
}

/// The expanded view: everything on the card, prompt text included.
pub fn render_full_cards(renderer: &Renderer, cards: &[DisplayCard]) -> Result<String> {
    let entries = cards
        .iter()
        .map(|dc| FullCard {
            index: dc.position.map(|n| format!("{}. ", n)).unwrap_or_default(),
            title: display_title(&dc.card),
            favorite: dc.favorite,
            category: dc.card.category.clone(),
            model: dc.card.model_str().to_string(),
            version: dc.card.version.clone(),
            date: relative_date(&dc.card),
            tags: dc.card.tags.clone(),
            description: dc.card.description.clone(),
            content: dc.card.content.trim_end().to_string(),
        })
        .collect();

    let data = FullCardData {
        cards: entries,
        favorite_marker: FAVORITE_MARKER,
        separator: "=".repeat(32),
        rule: "-".repeat(32),
    };
    renderer.render(FULL_CARD, &data)
}

pub fn render_facets(renderer: &Renderer, facets: &Facets) -> Result<String> {
    let data = FacetsData {
        sections: vec![
            facet_section("Categories", &facets.categories),
            facet_section("Models", &facets.models),
            facet_section("Tags", &facets.tags),
        ],
    };
    renderer.render(FACETS, &data)
}

pub fn render_validation(renderer: &Renderer, report: &ValidationReport) -> Result<String> {
    let cards = report
        .cards
        .iter()
        .map(|v| ValidationLine {
            label: if v.title.trim().is_empty() {
                v.id.clone()
            } else {
                format!("{} ({})", v.title, v.id)
            },
            errors: v.errors.clone(),
            warnings: v.warnings.clone(),
        })
        .collect();

    let data = ValidationData {
        checked: report.checked,
        valid: report.valid_count(),
        invalid: report.invalid_count(),
        warnings: report.warning_count(),
        cards,
    };
    renderer.render(VALIDATION, &data)
}

pub fn render_config(renderer: &Renderer, config: &DeckConfig) -> Result<String> {
    let data = ConfigData {
        entries: config
            .entries()
            .into_iter()
            .map(|(key, value)| ConfigEntry { key, value })
            .collect(),
    };
    renderer.render(CONFIG, &data)
}

pub fn render_messages(renderer: &Renderer, messages: &[CmdMessage]) -> Result<String> {
    if messages.is_empty() {
        return Ok(String::new());
    }
    let data = MessagesData {
        messages: messages
            .iter()
            .map(|m| MessageData {
                content: m.content.clone(),
                style: match m.level {
                    MessageLevel::Info => names::INFO,
                    MessageLevel::Success => names::SUCCESS,
                    MessageLevel::Warning => names::WARNING,
                    MessageLevel::Error => names::ERROR,
                },
            })
            .collect(),
    };
    renderer.render(MESSAGES, &data)
}

/// A gallery window. When nothing is listed, the first message stands in
/// for the list.
pub fn render_window(renderer: &Renderer, result: &CmdResult) -> Result<String> {
    let mut messages = result.messages.as_slice();
    let mut empty_message = "";
    if result.listed_cards.is_empty() {
        if let Some((first, rest)) = messages.split_first() {
            empty_message = first.content.as_str();
            messages = rest;
        }
    }
    let mut out = render_card_list(
        renderer,
        &result.listed_cards,
        result.page.as_ref(),
        empty_message,
    )?;
    out.push_str(&render_messages(renderer, messages)?);
    Ok(out)
}

pub fn render_browse_help(renderer: &Renderer, commands: &[(&'static str, &'static str)]) -> Result<String> {
    let width = commands.iter().map(|(usage, _)| usage.width()).max().unwrap_or(0) + 2;
    let data = HelpData {
        commands: commands
            .iter()
            .map(|&(usage, about)| HelpLine {
                usage,
                padding: " ".repeat(width - usage.width()),
                about,
            })
            .collect(),
    };
    renderer.render(BROWSE_HELP, &data)
}

fn facet_section(name: &'static str, counts: &[FacetCount]) -> FacetSection {
    let width = counts.iter().map(|f| f.value.width()).max().unwrap_or(0) + 2;
    FacetSection {
        name,
        entries: counts
            .iter()
            .map(|f| FacetEntry {
                value: f.value.clone(),
                padding: " ".repeat(width - f.value.width()),
                count: f.count,
            })
            .collect(),
    }
}

fn footer(page: &PageInfo) -> String {
    let mut parts = vec![
        format!("Page {} of {}", page.page, page.total_pages),
        format!("{} of {} prompts", page.visible, page.total),
    ];
    if page.sort != SortKey::None {
        parts.push(format!("sorted by {}", page.sort));
    }
    let filters = filter_summary(&page.filter);
    if !filters.is_empty() {
        parts.push(filters);
    }
    parts.join(" · ")
}

/// Active filters in words, or an empty string when nothing is filtered.
pub fn filter_summary(filter: &FilterState) -> String {
    let mut parts = Vec::new();
    if !filter.search.trim().is_empty() {
        parts.push(format!("search \"{}\"", filter.search.trim()));
    }
    if !is_all(&filter.category) {
        parts.push(format!("category {}", filter.category));
    }
    if !is_all(&filter.model) {
        parts.push(format!("model {}", filter.model));
    }
    if !filter.tags.is_empty() {
        let tags: Vec<&str> = filter.tags.iter().map(String::as_str).collect();
        parts.push(format!("tags {}", tags.join(", ")));
    }
    parts.join(", ")
}

fn format_index(position: Option<usize>) -> String {
    match position {
        Some(n) => format!("{:>width$}. ", n, width = INDEX_WIDTH - 2),
        None => format!("{:>width$}  ", "-", width = INDEX_WIDTH - 2),
    }
}

fn display_title(card: &Card) -> String {
    if card.title.trim().is_empty() {
        "(untitled)".to_string()
    } else {
        single_line(&card.title)
    }
}

fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

/// "3 months ago (2024-01-10)"; unparseable or future dates show as written.
fn relative_date(card: &Card) -> String {
    let raw = match card.date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return String::new(),
    };
    let Some(midnight) = card.parsed_date().and_then(|d| d.and_hms_opt(0, 0, 0)) else {
        return raw.to_string();
    };
    match Utc::now()
        .signed_duration_since(midnight.and_utc())
        .to_std()
    {
        Ok(elapsed) => format!(
            "{} ({})",
            timeago::Formatter::new().convert(elapsed),
            midnight.format("%Y-%m-%d")
        ),
        Err(_) => raw.to_string(),
    }
}
